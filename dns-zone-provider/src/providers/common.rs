//! Provider 公共工具函数

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ProviderError, Result};
use crate::types::DomainParts;

// ============ 域名拆分 ============

/// 可选前缀（以 `.` 结尾）+ 最后两段标签。
/// 贪婪的前缀捕获保证注册域名只取最右侧的两段。
#[allow(clippy::expect_used)]
static DOMAIN_PARTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\.*(.*)\.)?(.+\..+)$").expect("domain pattern is valid"));

/// Splits a dotted name into subdomain and registrable domain.
///
/// The registrable domain is always the last two labels, so multi-part public
/// suffixes are not recognised: `"example.co.uk"` splits into
/// `("example", "co.uk")`. Callers depend on this rule; it is not a
/// public-suffix lookup.
///
/// - `"example.com"` → `("", "example.com")`
/// - `"www.example.com"` → `("www", "example.com")`
/// - `"a.b.example.com"` → `("a.b", "example.com")`
///
/// Fails with [`ProviderError::InvalidDomain`] when the name has no dot.
pub fn split_domain(domain: &str) -> Result<DomainParts> {
    split_domain_for(domain, env!("CARGO_PKG_NAME"))
}

/// 同 [`split_domain`]，错误中标注调用方 provider
pub(crate) fn split_domain_for(domain: &str, provider: &str) -> Result<DomainParts> {
    let caps = DOMAIN_PARTS
        .captures(domain)
        .ok_or_else(|| ProviderError::InvalidDomain {
            provider: provider.to_string(),
            domain: domain.to_string(),
        })?;

    let subdomain = caps.get(1).map_or("", |m| m.as_str());
    let registrable = caps.get(2).map_or("", |m| m.as_str());

    Ok(DomainParts {
        subdomain: subdomain.to_string(),
        registrable: registrable.to_string(),
    })
}
