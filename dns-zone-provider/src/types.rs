use serde::{Deserialize, Serialize};

// ============ Record defaults ============

/// TTL applied when a record does not specify one.
pub const DEFAULT_TTL: u32 = 3600;
/// Priority applied when a record does not specify one.
pub const DEFAULT_PRIORITY: u32 = 0;
/// Identifier of a record that has not been persisted by the provider yet.
pub const UNSAVED_RECORD_ID: u32 = 0;

// ============ Credentials ============

/// Username/password pair for one provider session.
///
/// Owned by exactly one provider instance; set through
/// [`DnsProvider::authenticate`](crate::DnsProvider::authenticate).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

// ============ Record input ============

/// Optional record attributes with their named defaults.
///
/// # Default
///
/// `id = 0` (not persisted), `ttl = 3600`, `priority = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordOptions {
    pub id: u32,
    pub ttl: u32,
    pub priority: u32,
}

impl Default for RecordOptions {
    fn default() -> Self {
        Self {
            id: UNSAVED_RECORD_ID,
            ttl: DEFAULT_TTL,
            priority: DEFAULT_PRIORITY,
        }
    }
}

/// Internal field set used to build a record.
///
/// `domain`, `type` and `value` are required when the record is built; the rest
/// fall back to [`RecordOptions::default`]. Field names match the keys accepted
/// from configuration files or JSON payloads.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub record_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<u32>,
}

impl RecordFields {
    /// Field set with the three required fields filled in.
    pub fn new(
        domain: impl Into<String>,
        record_type: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            domain: Some(domain.into()),
            record_type: Some(record_type.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }
}

// ============ Domain parts ============

/// Result of splitting a dotted name.
///
/// `"foo.bar.example.com"` → `subdomain = "foo.bar"`, `registrable = "example.com"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainParts {
    /// Everything before the registrable domain; empty for two-label names.
    pub subdomain: String,
    /// The last two labels.
    pub registrable: String,
}
