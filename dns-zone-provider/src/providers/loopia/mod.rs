//! Loopia DNS Provider

mod error;
mod provider;
mod record;
mod rpc;

use std::time::Duration;

use crate::error::Result;
use crate::traits::RpcTransport;
use crate::types::Credentials;
use crate::xmlrpc::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, XmlRpcClient};

pub use record::{LoopiaRecord, LoopiaRecordBuilder};

pub(crate) const PROVIDER_NAME: &str = "loopia";

/// Loopia XML-RPC 接口地址
pub const LOOPIA_API_URL: &str = "https://api.loopia.se/RPCSERV";

/// Loopia DNS Provider
///
/// Generic over the transport so tests can swap in a recording double; the
/// default is the HTTP [`XmlRpcClient`].
pub struct LoopiaProvider<T: RpcTransport = XmlRpcClient> {
    pub(crate) transport: T,
    pub(crate) session: Option<Credentials>,
}

impl LoopiaProvider<XmlRpcClient> {
    /// Provider against [`LOOPIA_API_URL`] with default timeouts, not yet authenticated.
    pub fn new() -> Result<Self> {
        Self::builder().build()
    }

    pub fn builder() -> LoopiaProviderBuilder {
        LoopiaProviderBuilder::default()
    }
}

impl<T: RpcTransport> LoopiaProvider<T> {
    /// Provider over a caller-supplied transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            session: None,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// Builder for an HTTP-backed [`LoopiaProvider`].
#[derive(Debug, Clone)]
pub struct LoopiaProviderBuilder {
    endpoint: String,
    connect_timeout: Duration,
    timeout: Duration,
    credentials: Option<Credentials>,
}

impl Default for LoopiaProviderBuilder {
    fn default() -> Self {
        Self {
            endpoint: LOOPIA_API_URL.to_string(),
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            credentials: None,
        }
    }
}

impl LoopiaProviderBuilder {
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Pre-authenticates the built provider.
    pub fn credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn build(self) -> Result<LoopiaProvider> {
        let transport = XmlRpcClient::with_timeouts(
            self.endpoint,
            PROVIDER_NAME,
            self.connect_timeout,
            self.timeout,
        )?;

        Ok(LoopiaProvider {
            transport,
            session: self.credentials,
        })
    }
}
