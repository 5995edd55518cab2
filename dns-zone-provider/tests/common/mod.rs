//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use dns_zone_provider::{
    Credentials, DnsProvider, LoopiaProvider, LoopiaRecord, ZoneRecord,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr $(,)?) => {{
        let res = $expr;
        assert!(res.is_ok(), "expected Ok(..), got {res:?}");
        let Ok(val) = res else {
            return;
        };
        val
    }};
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {res:?}",
            format_args!($($msg)+)
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试子域名标签
pub fn generate_test_label() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("_test-{}", &uuid.to_string()[..8])
}

/// 测试上下文 - 封装 Provider 和测试域名
pub struct TestContext {
    pub provider: LoopiaProvider,
    pub domain: String,
}

impl TestContext {
    /// 创建 Loopia 测试上下文
    pub fn loopia() -> Option<Self> {
        let username = env::var("LOOPIA_USERNAME").ok()?;
        let password = env::var("LOOPIA_PASSWORD").ok()?;
        let domain = env::var("TEST_DOMAIN").ok()?;

        let mut provider = LoopiaProvider::new().ok()?;
        provider.authenticate(Credentials::new(username, password));

        Some(Self { provider, domain })
    }

    /// 新的测试子域名全名，例如 `_test-1a2b3c4d.example.com`
    pub fn test_name(&self) -> String {
        format!("{}.{}", generate_test_label(), self.domain)
    }

    /// 在测试子域名下添加 TXT 记录并回读
    pub async fn create_test_record(&self, name: &str, text: &str) -> Option<LoopiaRecord> {
        self.provider.add_subdomain(name).await.ok()?;
        let record = LoopiaRecord::builder(name, "TXT", text).ttl(300).build();
        self.provider.add_record(&record).await.ok()?;

        self.provider
            .get_records(name)
            .await
            .ok()?
            .into_iter()
            .find(|r| r.record_type() == "TXT" && r.value() == text)
    }

    /// 清理测试子域名（连同其下的记录）
    pub async fn cleanup_name(&self, name: &str) {
        if let Ok(records) = self.provider.get_records(name).await {
            for record in records.iter().filter(|r| r.id() != 0) {
                let _ = self.provider.delete_record(record).await;
            }
        }
        let _ = self.provider.remove_subdomain(name).await;
    }

    /// 清理所有遗留的测试子域名（以 _test- 开头）
    pub async fn cleanup_all_test_names(&self) {
        if let Ok(labels) = self.provider.get_subdomains(&self.domain).await {
            for label in labels.iter().filter(|l| l.starts_with("_test-")) {
                self.cleanup_name(&format!("{label}.{}", self.domain)).await;
            }
        }
    }
}
