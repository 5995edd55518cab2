//! # dns-zone-provider
//!
//! DNS zone record and subdomain management for registrars that expose an
//! XML-RPC API.
//!
//! ## Supported Providers
//!
//! | Provider | Feature Flag | Auth Method |
//! |----------|-------------|-------------|
//! | [Loopia](https://www.loopia.com/api/) | `loopia` | Username/password per call |
//!
//! ## Feature Flags
//!
//! ### Provider Selection
//!
//! - **`loopia`** *(default)*: Enable the Loopia provider.
//!
//! ### TLS Backend
//!
//! - **`native-tls`** *(default)*: Use the platform's native TLS implementation.
//! - **`rustls`**: Use rustls. Recommended for cross-compilation and Android targets.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_zone_provider::{Credentials, DnsProvider, LoopiaProvider, LoopiaRecord, ZoneRecord};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 1. Create a provider and attach credentials
//!     let mut provider = LoopiaProvider::new()?;
//!     provider.authenticate(Credentials::new("user@loopiaapi", "secret"));
//!
//!     // 2. Make sure the subdomain exists, then add a record to it
//!     provider.add_subdomain("www.example.com").await?;
//!     let record = LoopiaRecord::builder("www.example.com", "A", "1.2.3.4")
//!         .ttl(300)
//!         .build();
//!     provider.add_record(&record).await?;
//!
//!     // 3. List what is there now
//!     for record in provider.get_records("www.example.com").await? {
//!         println!("{} {} -> {}", record.id(), record.record_type(), record.value());
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Domain Splitting
//!
//! Every name is split into a subdomain and the last two labels with
//! [`split_domain`]. Multi-part public suffixes are not recognised, so
//! `example.co.uk` is treated as subdomain `example` of `co.uk`.
//!
//! ## Error Handling
//!
//! All provider operations return [`Result<T, ProviderError>`](ProviderError).
//! Loopia status strings map onto structured variants:
//!
//! - `AUTH_ERROR` → [`ProviderError::InvalidCredentials`]
//! - `RATE_LIMITED` → [`ProviderError::RateLimited`]
//! - `BAD_INDATA` → [`ProviderError::InvalidParameter`]
//! - `INSUFFICIENT_FUNDS` → [`ProviderError::QuotaExceeded`]
//! - `DOMAIN_OCCUPIED` → [`ProviderError::DomainOccupied`]
//! - anything else → [`ProviderError::Unknown`]
//!
//! Nothing is retried. Batch adds stop at the first failure without rollback.

mod error;
mod http_client;
mod providers;
mod traits;
mod types;
mod utils;
pub mod xmlrpc;

#[cfg(test)]
mod test_utils;

// Re-export error types
pub use error::{ProviderError, Result};

// Re-export public traits (error mapping stays internal)
pub use traits::{DnsProvider, RpcTransport, ZoneRecord};

// Re-export types
pub use types::{
    Credentials, DEFAULT_PRIORITY, DEFAULT_TTL, DomainParts, RecordFields, RecordOptions,
    UNSAVED_RECORD_ID,
};

pub use providers::common::split_domain;

// Re-export utils module
pub use utils::log_sanitizer;

// Re-export concrete providers (behind feature flags)
#[cfg(feature = "loopia")]
pub use providers::{
    LOOPIA_API_URL, LoopiaProvider, LoopiaProviderBuilder, LoopiaRecord, LoopiaRecordBuilder,
};
