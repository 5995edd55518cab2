use serde::{Deserialize, Serialize};

/// Unified error type for all DNS zone operations.
///
/// Each variant includes a `provider` field identifying which provider produced the error,
/// plus variant-specific context. All variants are serializable for structured error reporting.
///
/// Errors fall into three groups:
/// - validation: [`MissingField`](Self::MissingField)
/// - caller misuse: [`InvalidDomain`](Self::InvalidDomain),
///   [`MissingRecordId`](Self::MissingRecordId), [`NotAuthenticated`](Self::NotAuthenticated)
/// - transport / remote failures: everything else
///
/// None of these are retried by the crate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ProviderError {
    /// A required record field was absent.
    MissingField {
        /// Provider that produced the error.
        provider: String,
        /// Name of the missing field (`domain`, `type`, `value`, `rdata`, ...).
        field: String,
    },

    /// The domain cannot be split into subdomain and registrable domain.
    InvalidDomain {
        /// Provider that produced the error.
        provider: String,
        /// The offending domain string.
        domain: String,
    },

    /// The record has no provider-assigned identifier (id is 0).
    MissingRecordId {
        /// Provider that produced the error.
        provider: String,
        /// Domain of the record.
        domain: String,
    },

    /// A remote operation was attempted before `authenticate`.
    NotAuthenticated {
        /// Provider that produced the error.
        provider: String,
    },

    /// A network-level error occurred (DNS resolution failure, connection refused, etc.).
    NetworkError {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Provider that produced the error.
        provider: String,
        /// Error details.
        detail: String,
    },

    /// The provided credentials were rejected.
    InvalidCredentials {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The API rate limit has been exceeded.
    RateLimited {
        /// Provider that produced the error.
        provider: String,
        /// Suggested wait time in seconds, if provided.
        retry_after: Option<u64>,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The provider rejected the request data.
    InvalidParameter {
        /// Provider that produced the error.
        provider: String,
        /// Name of the invalid parameter.
        param: String,
        /// Description of what's wrong.
        detail: String,
    },

    /// The account lacks funds or quota for the operation.
    QuotaExceeded {
        /// Provider that produced the error.
        provider: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// The domain is held by another account or otherwise occupied.
    DomainOccupied {
        /// Provider that produced the error.
        provider: String,
        /// Domain name involved.
        domain: String,
        /// Original error message from the provider API, if available.
        raw_message: Option<String>,
    },

    /// Failed to parse the provider's response.
    ParseError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the parse failure.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Provider that produced the error.
        provider: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// An unrecognized error from the provider API (unmapped status, XML-RPC fault, HTTP status).
    Unknown {
        /// Provider that produced the error.
        provider: String,
        /// Raw error code from the API, if available.
        raw_code: Option<String>,
        /// Raw error message from the API.
        raw_message: String,
    },
}

impl ProviderError {
    /// 是否为预期行为（用户输入、凭证错误等），用于日志分级。
    ///
    /// 返回 `true` 时应使用 `warn` 级别，`false` 时使用 `error` 级别。
    /// **新增变体时请同步更新此方法。**
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::MissingField { .. }
                | Self::InvalidDomain { .. }
                | Self::MissingRecordId { .. }
                | Self::NotAuthenticated { .. }
                | Self::InvalidCredentials { .. }
                | Self::InvalidParameter { .. }
                | Self::QuotaExceeded { .. }
                | Self::DomainOccupied { .. }
        )
    }
}

impl std::fmt::Display for ProviderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField { provider, field } => {
                write!(f, "[{provider}] Missing record field '{field}'")
            }
            Self::InvalidDomain { provider, domain } => {
                write!(f, "[{provider}] Cannot split domain '{domain}'")
            }
            Self::MissingRecordId { provider, domain } => {
                write!(f, "[{provider}] Record for '{domain}' has no id")
            }
            Self::NotAuthenticated { provider } => {
                write!(f, "[{provider}] Not authenticated")
            }
            Self::NetworkError { provider, detail } => {
                write!(f, "[{provider}] Network error: {detail}")
            }
            Self::Timeout { provider, detail } => {
                write!(f, "[{provider}] Request timeout: {detail}")
            }
            Self::InvalidCredentials {
                provider,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Invalid credentials: {msg}")
                } else {
                    write!(f, "[{provider}] Invalid credentials")
                }
            }
            Self::RateLimited {
                provider,
                retry_after,
                ..
            } => {
                if let Some(secs) = retry_after {
                    write!(f, "[{provider}] Rate limited (retry after {secs}s)")
                } else {
                    write!(f, "[{provider}] Rate limited")
                }
            }
            Self::InvalidParameter {
                provider,
                param,
                detail,
            } => {
                write!(f, "[{provider}] Invalid parameter '{param}': {detail}")
            }
            Self::QuotaExceeded { provider, .. } => {
                write!(f, "[{provider}] Quota exceeded")
            }
            Self::DomainOccupied {
                provider,
                domain,
                raw_message,
            } => {
                if let Some(msg) = raw_message {
                    write!(f, "[{provider}] Domain '{domain}' is occupied: {msg}")
                } else {
                    write!(f, "[{provider}] Domain '{domain}' is occupied")
                }
            }
            Self::ParseError { provider, detail } => {
                write!(f, "[{provider}] Parse error: {detail}")
            }
            Self::SerializationError { provider, detail } => {
                write!(f, "[{provider}] Serialization error: {detail}")
            }
            Self::Unknown {
                provider,
                raw_message,
                ..
            } => {
                write!(f, "[{provider}] {raw_message}")
            }
        }
    }
}

impl std::error::Error for ProviderError {}

/// Convenience type alias for `Result<T, ProviderError>`.
pub type Result<T> = std::result::Result<T, ProviderError>;
