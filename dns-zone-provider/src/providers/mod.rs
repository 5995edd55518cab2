//! DNS Provider implementations

/// Shared utilities used by provider implementations.
pub mod common;

#[cfg(feature = "loopia")]
mod loopia;

#[cfg(feature = "loopia")]
pub use loopia::{
    LOOPIA_API_URL, LoopiaProvider, LoopiaProviderBuilder, LoopiaRecord, LoopiaRecordBuilder,
};
