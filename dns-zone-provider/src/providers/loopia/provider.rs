//! Loopia DnsProvider trait 实现

use async_trait::async_trait;

use crate::error::{ProviderError, Result};
use crate::providers::common::split_domain_for;
use crate::traits::{DnsProvider, ErrorContext, ProviderErrorMapper, RpcTransport, ZoneRecord};
use crate::types::{Credentials, DomainParts, UNSAVED_RECORD_ID};
use crate::xmlrpc::Value;

use super::record::normalize_raw_record;
use super::{LoopiaProvider, LoopiaRecord, PROVIDER_NAME};

impl<T: RpcTransport> LoopiaProvider<T> {
    fn split(&self, domain: &str) -> Result<DomainParts> {
        split_domain_for(domain, self.provider_name())
    }

    /// 已持久化的记录才有 id
    fn require_id(&self, record: &LoopiaRecord) -> Result<u32> {
        match record.id() {
            UNSAVED_RECORD_ID => Err(ProviderError::MissingRecordId {
                provider: self.provider_name().to_string(),
                domain: record.domain().to_string(),
            }),
            id => Ok(id),
        }
    }
}

#[async_trait]
impl<T: RpcTransport> DnsProvider for LoopiaProvider<T> {
    type Record = LoopiaRecord;

    fn id(&self) -> &'static str {
        PROVIDER_NAME
    }

    fn authenticate(&mut self, credentials: Credentials) -> &mut Self {
        self.session = Some(credentials);
        self
    }

    fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    async fn validate_credentials(&self) -> Result<bool> {
        match self
            .call_list("getDomains", vec![], ErrorContext::default())
            .await
        {
            Ok(_) => Ok(true),
            Err(ProviderError::InvalidCredentials { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn add_record(&self, record: &LoopiaRecord) -> Result<()> {
        let parts = self.split(record.domain())?;
        let ctx = ErrorContext::for_domain(record.domain());

        self.call_ack(
            "addZoneRecord",
            vec![
                Value::from(parts.registrable),
                Value::from(parts.subdomain),
                Value::from(record.to_raw()),
            ],
            ctx,
        )
        .await
    }

    async fn get_records(&self, domain: &str) -> Result<Vec<LoopiaRecord>> {
        let parts = self.split(domain)?;

        let items = self
            .call_list(
                "getZoneRecords",
                vec![Value::from(parts.registrable), Value::from(parts.subdomain)],
                ErrorContext::for_domain(domain),
            )
            .await?;

        items
            .into_iter()
            .map(|item| match item {
                Value::Struct(raw) => LoopiaRecord::load(&normalize_raw_record(raw), domain),
                other => Err(self.parse_error(format!(
                    "expected record struct, got {}",
                    other.type_name()
                ))),
            })
            .collect()
    }

    async fn update_record(&self, record: &LoopiaRecord) -> Result<()> {
        self.require_id(record)?;
        let parts = self.split(record.domain())?;

        self.call_ack(
            "updateZoneRecord",
            vec![
                Value::from(parts.registrable),
                Value::from(parts.subdomain),
                Value::from(record.to_raw()),
            ],
            ErrorContext::for_domain(record.domain()),
        )
        .await
    }

    async fn delete_record(&self, record: &LoopiaRecord) -> Result<()> {
        let id = self.require_id(record)?;
        let parts = self.split(record.domain())?;

        self.call_ack(
            "removeZoneRecord",
            vec![
                Value::from(parts.registrable),
                Value::from(parts.subdomain),
                Value::from(id),
            ],
            ErrorContext::for_domain(record.domain()),
        )
        .await
    }

    async fn add_subdomain(&self, name: &str) -> Result<()> {
        let parts = self.split(name)?;

        let existing = self.get_subdomains(&parts.registrable).await?;
        if existing.iter().any(|label| *label == parts.subdomain) {
            log::debug!("[{PROVIDER_NAME}] subdomain already present, skipping add");
            return Ok(());
        }

        self.call_ack(
            "addSubdomain",
            vec![Value::from(parts.registrable), Value::from(parts.subdomain)],
            ErrorContext::for_domain(name),
        )
        .await
    }

    async fn get_subdomains(&self, domain: &str) -> Result<Vec<String>> {
        let items = self
            .call_list(
                "getSubdomains",
                vec![Value::from(domain)],
                ErrorContext::for_domain(domain),
            )
            .await?;

        items
            .into_iter()
            .map(|item| match item {
                Value::String(label) => Ok(label),
                other => Err(self.parse_error(format!(
                    "expected subdomain label, got {}",
                    other.type_name()
                ))),
            })
            .collect()
    }

    async fn remove_subdomain(&self, name: &str) -> Result<()> {
        let parts = self.split(name)?;

        self.call_ack(
            "removeSubdomain",
            vec![Value::from(parts.registrable), Value::from(parts.subdomain)],
            ErrorContext::for_domain(name),
        )
        .await
    }
}
