//! XML-RPC over HTTP transport

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::error::{ProviderError, Result};
use crate::http_client::HttpUtils;
use crate::traits::RpcTransport;
use crate::utils::log_sanitizer::truncate_for_log;

use super::codec::{MethodResponse, decode_response, encode_call};
use super::value::Value;

/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// XML-RPC client bound to one fixed endpoint.
///
/// Each `invoke` is a single HTTP POST. Faults are surfaced as
/// [`ProviderError::Unknown`] carrying the fault code; interpreting them is
/// left to the provider.
#[derive(Debug, Clone)]
pub struct XmlRpcClient {
    client: Client,
    endpoint: String,
    provider_name: &'static str,
}

impl XmlRpcClient {
    /// Creates a client with the default timeouts.
    pub fn new(endpoint: impl Into<String>, provider_name: &'static str) -> Result<Self> {
        Self::with_timeouts(
            endpoint,
            provider_name,
            Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    /// Creates a client with explicit connect and request timeouts.
    pub fn with_timeouts(
        endpoint: impl Into<String>,
        provider_name: &'static str,
        connect_timeout: Duration,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| ProviderError::NetworkError {
                provider: provider_name.to_string(),
                detail: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self::with_client(client, endpoint, provider_name))
    }

    /// Wraps an existing `reqwest::Client`.
    pub fn with_client(
        client: Client,
        endpoint: impl Into<String>,
        provider_name: &'static str,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            provider_name,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RpcTransport for XmlRpcClient {
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value> {
        let body = encode_call(method, &params).map_err(|e| ProviderError::SerializationError {
            provider: self.provider_name.to_string(),
            detail: e.to_string(),
        })?;

        let request = self
            .client
            .post(&self.endpoint)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(body);

        let (_status, response_text) =
            HttpUtils::execute_request(request, self.provider_name, "POST", method).await?;

        match decode_response(&response_text) {
            Ok(MethodResponse::Success(value)) => Ok(value),
            Ok(MethodResponse::Fault(fault)) => {
                log::error!(
                    "[{}] {method} fault {}: {}",
                    self.provider_name,
                    fault.code,
                    fault.message
                );
                Err(ProviderError::Unknown {
                    provider: self.provider_name.to_string(),
                    raw_code: Some(fault.code.to_string()),
                    raw_message: fault.message,
                })
            }
            Err(e) => {
                log::error!("[{}] XML-RPC parse failed: {e}", self.provider_name);
                log::error!(
                    "[{}] Raw response: {}",
                    self.provider_name,
                    truncate_for_log(&response_text)
                );
                Err(ProviderError::ParseError {
                    provider: self.provider_name.to_string(),
                    detail: e.to_string(),
                })
            }
        }
    }
}
