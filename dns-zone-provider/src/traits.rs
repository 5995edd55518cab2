use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::types::{Credentials, RecordFields};
use crate::xmlrpc::Value;

/// 原始 API 错误（内部使用）
#[derive(Debug, Clone)]
pub(crate) struct RawApiError {
    /// 错误码（状态字符串或 fault code）
    pub code: Option<String>,
    /// 原始错误消息
    pub message: String,
}

impl RawApiError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }

    pub fn with_code(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            message: message.into(),
        }
    }
}

/// 错误上下文信息（内部使用）
/// 用于在映射错误时提供额外信息
#[derive(Debug, Clone, Default)]
pub(crate) struct ErrorContext {
    /// 域名（用于 `DomainOccupied` 等错误）
    pub domain: Option<String>,
}

impl ErrorContext {
    pub fn for_domain(domain: impl Into<String>) -> Self {
        Self {
            domain: Some(domain.into()),
        }
    }
}

/// Provider 错误映射 Trait（内部使用）
/// 各 Provider 实现此 trait 以将原始 API 错误映射到统一错误类型
pub(crate) trait ProviderErrorMapper {
    /// 返回 Provider 标识符
    fn provider_name(&self) -> &'static str;

    /// 将原始 API 错误映射到统一错误类型
    fn map_error(&self, raw: RawApiError, context: ErrorContext) -> ProviderError;

    /// 快捷方法：解析错误
    fn parse_error(&self, detail: impl ToString) -> ProviderError {
        ProviderError::ParseError {
            provider: self.provider_name().to_string(),
            detail: detail.to_string(),
        }
    }

    /// 快捷方法：未知错误（fallback）
    fn unknown_error(&self, raw: RawApiError) -> ProviderError {
        ProviderError::Unknown {
            provider: self.provider_name().to_string(),
            raw_code: raw.code,
            raw_message: raw.message,
        }
    }
}

/// Remote procedure call transport.
///
/// `invoke` issues exactly one call and returns the decoded result. Transport
/// and protocol failures are returned as-is; implementations must not retry.
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn invoke(&self, method: &str, params: Vec<Value>) -> Result<Value>;
}

/// A DNS record as understood by one provider.
///
/// `Raw` is the provider's wire shape. `Default` yields an empty record.
pub trait ZoneRecord: Default + Clone + Send + Sync {
    /// Wire representation exchanged with the provider.
    type Raw;

    /// Builds a record from internal fields, applying defaults.
    fn from_fields(fields: RecordFields) -> Result<Self>;

    /// Replaces this record's content with `fields`.
    fn set(&mut self, fields: RecordFields) -> Result<&mut Self> {
        *self = Self::from_fields(fields)?;
        Ok(self)
    }

    /// Builds a record from a provider response, bound to `domain`.
    fn load(raw: &Self::Raw, domain: &str) -> Result<Self>;

    /// Serializes the record into the provider's request shape.
    fn to_raw(&self) -> Self::Raw;

    /// Fully-qualified name the record applies to.
    fn domain(&self) -> &str;

    /// Provider-assigned id; 0 means not persisted.
    fn id(&self) -> u32;
}

/// DNS 提供商 Trait
///
/// Calling code should depend on this trait only. Every remote operation needs
/// a prior [`authenticate`](Self::authenticate).
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// Record type handled by this provider.
    type Record: ZoneRecord;

    /// 提供商标识符
    fn id(&self) -> &'static str;

    /// Stores the session credentials. No network call is made.
    fn authenticate(&mut self, credentials: Credentials) -> &mut Self
    where
        Self: Sized;

    fn is_authenticated(&self) -> bool;

    /// 验证凭证是否有效
    async fn validate_credentials(&self) -> Result<bool>;

    /// Adds one record. No duplicate check is made.
    async fn add_record(&self, record: &Self::Record) -> Result<()>;

    /// Adds records in order, stopping at the first failure.
    ///
    /// Records after the failing one are not attempted and nothing is rolled back.
    async fn add_records(&self, records: &[Self::Record]) -> Result<()> {
        for record in records {
            self.add_record(record).await?;
        }
        Ok(())
    }

    /// Lists the records of `domain`; every returned record is bound to `domain`.
    async fn get_records(&self, domain: &str) -> Result<Vec<Self::Record>>;

    /// Updates a persisted record (non-zero id).
    async fn update_record(&self, record: &Self::Record) -> Result<()>;

    /// Deletes a persisted record (non-zero id).
    async fn delete_record(&self, record: &Self::Record) -> Result<()>;

    /// Adds a subdomain unless the provider already lists it.
    async fn add_subdomain(&self, name: &str) -> Result<()>;

    /// Lists subdomain labels of a registrable domain.
    async fn get_subdomains(&self, domain: &str) -> Result<Vec<String>>;

    async fn remove_subdomain(&self, name: &str) -> Result<()>;
}
