//! Loopia zone record and its wire mapping
//!
//! Wire keys: `record_id`, `type`, `ttl`, `priority`, `rdata`. Requests carry
//! `id` instead of `record_id`, and only for records that already exist.

use crate::error::{ProviderError, Result};
use crate::traits::ZoneRecord;
use crate::types::{
    DEFAULT_PRIORITY, DEFAULT_TTL, RecordFields, RecordOptions, UNSAVED_RECORD_ID,
};
use crate::xmlrpc::{Struct, Value};

use super::PROVIDER_NAME;

/// A Loopia DNS record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopiaRecord {
    domain: String,
    id: u32,
    ttl: u32,
    record_type: String,
    priority: u32,
    value: String,
}

/// Builder for [`LoopiaRecord`]; unset options keep their defaults.
#[derive(Debug, Clone)]
pub struct LoopiaRecordBuilder {
    domain: String,
    record_type: String,
    value: String,
    options: RecordOptions,
}

impl LoopiaRecordBuilder {
    pub fn id(mut self, id: u32) -> Self {
        self.options.id = id;
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.options.ttl = ttl;
        self
    }

    pub fn priority(mut self, priority: u32) -> Self {
        self.options.priority = priority;
        self
    }

    pub fn options(mut self, options: RecordOptions) -> Self {
        self.options = options;
        self
    }

    pub fn build(self) -> LoopiaRecord {
        LoopiaRecord {
            domain: self.domain,
            id: self.options.id,
            ttl: self.options.ttl,
            record_type: self.record_type,
            priority: self.options.priority,
            value: self.value,
        }
    }
}

impl LoopiaRecord {
    pub fn builder(
        domain: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
    ) -> LoopiaRecordBuilder {
        LoopiaRecordBuilder {
            domain: domain.into(),
            record_type: record_type.into(),
            value: value.into(),
            options: RecordOptions::default(),
        }
    }

    pub fn record_type(&self) -> &str {
        &self.record_type
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn ttl(&self) -> u32 {
        self.ttl
    }

    pub fn priority(&self) -> u32 {
        self.priority
    }
}

fn missing(field: &str) -> ProviderError {
    ProviderError::MissingField {
        provider: PROVIDER_NAME.to_string(),
        field: field.to_string(),
    }
}

fn wrong_type(key: &str, expected: &str, found: &Value) -> ProviderError {
    ProviderError::ParseError {
        provider: PROVIDER_NAME.to_string(),
        detail: format!(
            "record field '{key}' should be {expected}, got {}",
            found.type_name()
        ),
    }
}

/// 仅缺失才报错；空字符串（如空 TXT 值）原样保留
fn required(field: Option<String>, name: &str) -> Result<String> {
    field.ok_or_else(|| missing(name))
}

fn raw_string(raw: &Struct, key: &str) -> Result<Option<String>> {
    match raw.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(wrong_type(key, "a string", other)),
    }
}

fn raw_u32(raw: &Struct, key: &str, default: u32) -> Result<u32> {
    match raw.get(key) {
        None | Some(Value::Nil) => Ok(default),
        Some(Value::Int(i)) => u32::try_from(*i).map_err(|_| ProviderError::ParseError {
            provider: PROVIDER_NAME.to_string(),
            detail: format!("record field '{key}' out of range: {i}"),
        }),
        Some(other) => Err(wrong_type(key, "an int", other)),
    }
}

/// 批量读取时的归一化：`rdata` 同步复制到 `value`
pub(crate) fn normalize_raw_record(mut raw: Struct) -> Struct {
    if let Some(rdata) = raw.get("rdata").cloned() {
        raw.insert("value".to_string(), rdata);
    }
    raw
}

impl ZoneRecord for LoopiaRecord {
    type Raw = Struct;

    fn from_fields(fields: RecordFields) -> Result<Self> {
        let defaults = RecordOptions::default();
        Ok(Self {
            domain: required(fields.domain, "domain")?,
            record_type: required(fields.record_type, "type")?,
            value: required(fields.value, "value")?,
            id: fields.id.unwrap_or(defaults.id),
            ttl: fields.ttl.unwrap_or(defaults.ttl),
            priority: fields.priority.unwrap_or(defaults.priority),
        })
    }

    fn load(raw: &Struct, domain: &str) -> Result<Self> {
        let record_type = raw_string(raw, "type")?.ok_or_else(|| missing("type"))?;
        let value = match raw_string(raw, "rdata")? {
            Some(rdata) => rdata,
            None => raw_string(raw, "value")?.ok_or_else(|| missing("rdata"))?,
        };

        Ok(Self {
            domain: domain.to_string(),
            id: raw_u32(raw, "record_id", UNSAVED_RECORD_ID)?,
            ttl: raw_u32(raw, "ttl", DEFAULT_TTL)?,
            record_type,
            priority: raw_u32(raw, "priority", DEFAULT_PRIORITY)?,
            value,
        })
    }

    fn to_raw(&self) -> Struct {
        let mut raw = Struct::new();
        raw.insert("ttl".to_string(), Value::from(self.ttl));
        raw.insert("type".to_string(), Value::from(self.record_type.as_str()));
        raw.insert("priority".to_string(), Value::from(self.priority));
        raw.insert("rdata".to_string(), Value::from(self.value.as_str()));

        if self.id != UNSAVED_RECORD_ID {
            raw.insert("id".to_string(), Value::from(self.id));
        }

        raw
    }

    fn domain(&self) -> &str {
        &self.domain
    }

    fn id(&self) -> u32 {
        self.id
    }
}
