//! Loopia status mapping

use crate::error::ProviderError;
use crate::traits::{ErrorContext, ProviderErrorMapper, RawApiError, RpcTransport};

use super::{LoopiaProvider, PROVIDER_NAME};

/// 成功状态
pub(crate) const STATUS_OK: &str = "OK";

/// Status strings Loopia returns in place of a result.
pub(crate) const ERROR_STATUSES: &[&str] = &[
    "AUTH_ERROR",
    "DOMAIN_OCCUPIED",
    "RATE_LIMITED",
    "BAD_INDATA",
    "UNKNOWN_ERROR",
    "INSUFFICIENT_FUNDS",
];

pub(crate) fn is_error_status(status: &str) -> bool {
    ERROR_STATUSES.contains(&status)
}

/// Loopia status mapping
/// Reference: <https://www.loopia.com/api/>
impl<T: RpcTransport> ProviderErrorMapper for LoopiaProvider<T> {
    fn provider_name(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError {
        match raw.code.as_deref() {
            Some("AUTH_ERROR") => ProviderError::InvalidCredentials {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("RATE_LIMITED") => ProviderError::RateLimited {
                provider: self.provider_name().to_string(),
                retry_after: None,
                raw_message: Some(raw.message),
            },

            // BAD_INDATA 不指明具体参数
            Some("BAD_INDATA") => ProviderError::InvalidParameter {
                provider: self.provider_name().to_string(),
                param: "general".to_string(),
                detail: raw.message,
            },

            Some("INSUFFICIENT_FUNDS") => ProviderError::QuotaExceeded {
                provider: self.provider_name().to_string(),
                raw_message: Some(raw.message),
            },

            Some("DOMAIN_OCCUPIED") => ProviderError::DomainOccupied {
                provider: self.provider_name().to_string(),
                domain: context.domain.unwrap_or_else(|| "<unknown>".to_string()),
                raw_message: Some(raw.message),
            },

            // UNKNOWN_ERROR 及未收录的状态
            _ => self.unknown_error(raw),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MockTransport;

    fn provider() -> LoopiaProvider<MockTransport> {
        LoopiaProvider::with_transport(MockTransport::new())
    }

    fn status(code: &str) -> RawApiError {
        RawApiError::with_code(code, code)
    }

    #[test]
    fn auth_error() {
        let err = provider().map_error(status("AUTH_ERROR"), ErrorContext::default());
        assert!(matches!(err, ProviderError::InvalidCredentials { .. }));
        assert!(err.is_expected());
    }

    #[test]
    fn rate_limited() {
        let err = provider().map_error(status("RATE_LIMITED"), ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::RateLimited {
                retry_after: None,
                ..
            }
        ));
    }

    #[test]
    fn bad_indata() {
        let err = provider().map_error(status("BAD_INDATA"), ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::InvalidParameter { ref param, .. } if param == "general"
        ));
    }

    #[test]
    fn insufficient_funds() {
        let err = provider().map_error(status("INSUFFICIENT_FUNDS"), ErrorContext::default());
        assert!(matches!(err, ProviderError::QuotaExceeded { .. }));
    }

    #[test]
    fn domain_occupied_uses_context() {
        let err = provider().map_error(
            status("DOMAIN_OCCUPIED"),
            ErrorContext::for_domain("example.com"),
        );
        assert!(matches!(
            err,
            ProviderError::DomainOccupied { ref domain, .. } if domain == "example.com"
        ));

        let err = provider().map_error(status("DOMAIN_OCCUPIED"), ErrorContext::default());
        assert!(matches!(
            err,
            ProviderError::DomainOccupied { ref domain, .. } if domain == "<unknown>"
        ));
    }

    #[test]
    fn unknown_statuses_fall_back() {
        for code in ["UNKNOWN_ERROR", "SOMETHING_NEW"] {
            let err = provider().map_error(status(code), ErrorContext::default());
            assert!(matches!(
                err,
                ProviderError::Unknown { raw_code: Some(ref c), .. } if c == code
            ));
            assert!(!err.is_expected());
        }
    }

    #[test]
    fn status_set() {
        assert!(is_error_status("AUTH_ERROR"));
        assert!(is_error_status("UNKNOWN_ERROR"));
        assert!(!is_error_status(STATUS_OK));
        assert!(!is_error_status("www"));
    }
}
