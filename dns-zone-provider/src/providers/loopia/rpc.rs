//! Loopia call helpers

use crate::error::{ProviderError, Result};
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError, RpcTransport};
use crate::types::Credentials;
use crate::utils::log_sanitizer::summarize_params;
use crate::xmlrpc::Value;

use super::error::{STATUS_OK, is_error_status};
use super::{LoopiaProvider, PROVIDER_NAME};

impl<T: RpcTransport> LoopiaProvider<T> {
    fn session(&self) -> Result<&Credentials> {
        self.session
            .as_ref()
            .ok_or_else(|| ProviderError::NotAuthenticated {
                provider: PROVIDER_NAME.to_string(),
            })
    }

    /// 发起一次调用，参数前自动插入用户名和密码
    pub(crate) async fn call(&self, method: &str, args: Vec<Value>) -> Result<Value> {
        let credentials = self.session()?;

        let mut params = Vec::with_capacity(args.len() + 2);
        params.push(Value::from(credentials.username.as_str()));
        params.push(Value::from(credentials.password.as_str()));
        params.extend(args);

        log::debug!(
            "[{PROVIDER_NAME}] call {method}({})",
            summarize_params(&params, 2)
        );
        self.transport.invoke(method, params).await
    }

    /// 写操作：结果必须是 `OK`
    pub(crate) async fn call_ack(
        &self,
        method: &str,
        args: Vec<Value>,
        ctx: ErrorContext,
    ) -> Result<()> {
        let result = self.call(method, args).await?;

        match result.as_str() {
            Some(STATUS_OK) => Ok(()),
            Some(status) => Err(self.status_error(method, status, ctx)),
            None => {
                let err = self.unknown_error(RawApiError::new(format!(
                    "unexpected {} result from {method}",
                    result.type_name()
                )));
                log::error!("[{PROVIDER_NAME}] {method} failed: {err}");
                Err(err)
            }
        }
    }

    /// 读操作：结果为数组；失败时 Loopia 返回单元素状态数组
    pub(crate) async fn call_list(
        &self,
        method: &str,
        args: Vec<Value>,
        ctx: ErrorContext,
    ) -> Result<Vec<Value>> {
        match self.call(method, args).await? {
            Value::Array(items) => {
                if let [Value::String(status)] = items.as_slice()
                    && is_error_status(status)
                {
                    return Err(self.status_error(method, status, ctx));
                }
                Ok(items)
            }
            Value::String(status) => Err(self.status_error(method, &status, ctx)),
            other => Err(self.parse_error(format!(
                "expected array from {method}, got {}",
                other.type_name()
            ))),
        }
    }

    fn status_error(&self, method: &str, status: &str, ctx: ErrorContext) -> ProviderError {
        let err = self.map_error(RawApiError::with_code(status, status), ctx);
        if err.is_expected() {
            log::warn!("[{PROVIDER_NAME}] {method} rejected: {err}");
        } else {
            log::error!("[{PROVIDER_NAME}] {method} failed: {err}");
        }
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockTransport;
    use crate::traits::DnsProvider;

    fn authed() -> LoopiaProvider<MockTransport> {
        let mut provider = LoopiaProvider::with_transport(MockTransport::new());
        provider.authenticate(Credentials::new("user@loopiaapi", "secret"));
        provider
    }

    #[tokio::test]
    async fn call_prepends_credentials() {
        let provider = authed();
        provider
            .call("getSubdomains", vec![Value::from("example.com")])
            .await
            .unwrap();

        let calls = provider.transport().calls().await;
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].method, "getSubdomains");
        assert_eq!(
            calls[0].params,
            vec![
                Value::from("user@loopiaapi"),
                Value::from("secret"),
                Value::from("example.com"),
            ]
        );
    }

    #[tokio::test]
    async fn call_requires_session() {
        let provider = LoopiaProvider::with_transport(MockTransport::new());
        let err = provider.call("getDomains", vec![]).await.unwrap_err();
        assert!(matches!(err, ProviderError::NotAuthenticated { .. }));
        assert!(provider.transport().calls().await.is_empty());
    }

    #[tokio::test]
    async fn ack_maps_status() {
        let provider = authed();
        provider
            .transport()
            .respond("addSubdomain", Ok(Value::from("BAD_INDATA")))
            .await;

        let err = provider
            .call_ack("addSubdomain", vec![], ErrorContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidParameter { .. }));
    }

    #[tokio::test]
    async fn ack_rejects_non_string_result() {
        let provider = authed();
        provider
            .transport()
            .respond("addSubdomain", Ok(Value::Int(1)))
            .await;

        let err = provider
            .call_ack("addSubdomain", vec![], ErrorContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unknown { raw_code: None, .. }));
    }

    #[tokio::test]
    async fn list_detects_status_array() {
        let provider = authed();
        provider
            .transport()
            .respond(
                "getZoneRecords",
                Ok(Value::Array(vec![Value::from("AUTH_ERROR")])),
            )
            .await;

        let err = provider
            .call_list("getZoneRecords", vec![], ErrorContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
    }

    #[tokio::test]
    async fn list_keeps_single_label_result() {
        let provider = authed();
        provider
            .transport()
            .respond("getSubdomains", Ok(Value::Array(vec![Value::from("www")])))
            .await;

        let items = provider
            .call_list("getSubdomains", vec![], ErrorContext::default())
            .await
            .unwrap();
        assert_eq!(items, vec![Value::from("www")]);
    }

    #[tokio::test]
    async fn list_maps_bare_status() {
        let provider = authed();
        provider
            .transport()
            .respond("getSubdomains", Ok(Value::from("RATE_LIMITED")))
            .await;

        let err = provider
            .call_list("getSubdomains", vec![], ErrorContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::RateLimited { .. }));
    }

    #[tokio::test]
    async fn list_rejects_scalar_result() {
        let provider = authed();
        provider
            .transport()
            .respond("getSubdomains", Ok(Value::Int(3)))
            .await;

        let err = provider
            .call_list("getSubdomains", vec![], ErrorContext::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::ParseError { .. }));
    }
}
