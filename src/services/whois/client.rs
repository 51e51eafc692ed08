//! WHOIS/RDAP lookup using the whois-service crate

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::anyhow;
use async_trait::async_trait;
use futures_util::FutureExt;
use tokio::sync::OnceCell;
use tracing::{info, warn};
use whois_service::{WhoisClient, WhoisResponse};

use super::parse::normalize;
use super::types::{UpstreamRecord, WhoisRecord};
use crate::config::WhoisConfig;
use crate::errors::{PrivacyApiError, Result};

/// Upstream WHOIS client abstraction
#[async_trait]
pub trait WhoisLookup: Send + Sync {
    async fn lookup(&self, domain: &str) -> anyhow::Result<UpstreamRecord>;

    /// 获取 client 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// whois-service backed client
///
/// The client is built on first use; it tries RDAP first and falls back to
/// port-43 WHOIS with IANA bootstrap for TLD discovery. Registration data is
/// never cached, every lookup goes to the registry.
#[derive(Default)]
pub struct UpstreamWhoisClient {
    client: OnceCell<WhoisClient>,
}

impl UpstreamWhoisClient {
    pub fn new() -> Self {
        Self::default()
    }

    async fn client(&self) -> anyhow::Result<&WhoisClient> {
        self.client
            .get_or_try_init(|| async {
                WhoisClient::new_without_cache()
                    .await
                    .map_err(|e| anyhow!("Failed to create WHOIS client: {}", e))
            })
            .await
    }
}

#[async_trait]
impl WhoisLookup for UpstreamWhoisClient {
    async fn lookup(&self, domain: &str) -> anyhow::Result<UpstreamRecord> {
        let client = self.client().await?;
        let response = client
            .lookup(domain)
            .await
            .map_err(|e| anyhow!("{}", e))?;
        Ok(upstream_record(&response))
    }

    fn name(&self) -> &'static str {
        "whois-service"
    }
}

fn upstream_record(response: &WhoisResponse) -> UpstreamRecord {
    let mut record = UpstreamRecord {
        domain: response.domain.clone(),
        raw_text: response.raw_data.clone(),
        ..Default::default()
    };

    // No parsed data: only the raw text is available
    let Some(parsed) = &response.parsed_data else {
        return record;
    };

    record.registrar = parsed.registrar.clone();
    record.creation_date = parsed.creation_date.clone();
    record.expiration_date = parsed.expiration_date.clone();
    record.updated_date = parsed.updated_date.clone();
    record.name_servers = parsed.name_servers.clone();
    record.status = parsed.status.clone();
    record.registrant_name = parsed.registrant_name.clone();
    record.emails = [
        &parsed.registrant_email,
        &parsed.admin_email,
        &parsed.tech_email,
    ]
    .into_iter()
    .flatten()
    .cloned()
    .collect();

    record
}

/// WHOIS 查询服务
///
/// Every upstream failure, timeout or panic surfaces as a single
/// [`PrivacyApiError::Lookup`]; the upstream detail only reaches the log.
pub struct WhoisService {
    inner: Arc<dyn WhoisLookup>,
    timeout: Option<Duration>,
}

impl WhoisService {
    pub fn new(inner: Arc<dyn WhoisLookup>, timeout: Option<Duration>) -> Self {
        Self { inner, timeout }
    }

    /// 使用 whois-service 创建服务
    pub fn from_config(config: &WhoisConfig) -> Self {
        let timeout = (config.timeout_secs > 0).then(|| Duration::from_secs(config.timeout_secs));
        Self::new(Arc::new(UpstreamWhoisClient::new()), timeout)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Err(PrivacyApiError::validation("Domain must not be empty"));
        }

        let start = Instant::now();
        info!("Starting WHOIS lookup for domain: {}", domain);

        match self.lookup_upstream(domain).await {
            Ok(record) => {
                info!(
                    "WHOIS lookup successful for {} in {:?}",
                    domain,
                    start.elapsed()
                );
                Ok(normalize(record))
            }
            Err(e) => {
                warn!(
                    "WHOIS lookup failed for {} via {}: {:#}",
                    domain,
                    self.inner.name(),
                    e
                );
                Err(PrivacyApiError::lookup(format!(
                    "Error looking up domain {}",
                    domain
                )))
            }
        }
    }

    async fn lookup_upstream(&self, domain: &str) -> anyhow::Result<UpstreamRecord> {
        let guarded = AssertUnwindSafe(self.inner.lookup(domain)).catch_unwind();

        let outcome = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, guarded)
                .await
                .map_err(|_| anyhow!("timed out after {:?}", limit))?,
            None => guarded.await,
        };

        outcome.map_err(|_| anyhow!("upstream client panicked"))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::whois::types::OneOrMany;

    struct FailingClient;

    #[async_trait]
    impl WhoisLookup for FailingClient {
        async fn lookup(&self, _domain: &str) -> anyhow::Result<UpstreamRecord> {
            Err(anyhow!("connection reset by peer"))
        }

        fn name(&self) -> &'static str {
            "failing"
        }
    }

    #[test]
    fn test_zero_timeout_disables_limit() {
        let service = WhoisService::from_config(&WhoisConfig { timeout_secs: 0 });
        assert!(service.timeout().is_none());

        let service = WhoisService::from_config(&WhoisConfig { timeout_secs: 4 });
        assert_eq!(service.timeout(), Some(Duration::from_secs(4)));
    }

    #[tokio::test]
    async fn test_upstream_text_is_not_exposed() {
        let service = WhoisService::new(Arc::new(FailingClient), None);
        let err = service.lookup("example.com").await.unwrap_err();
        assert!(matches!(err, PrivacyApiError::Lookup(_)));
        assert!(!err.message().contains("connection reset"));
        assert!(err.message().contains("example.com"));
    }

    struct SlowClient;

    #[async_trait]
    impl WhoisLookup for SlowClient {
        async fn lookup(&self, domain: &str) -> anyhow::Result<UpstreamRecord> {
            tokio::time::sleep(Duration::from_millis(500)).await;
            Ok(UpstreamRecord {
                domain: domain.to_string(),
                ..Default::default()
            })
        }

        fn name(&self) -> &'static str {
            "slow"
        }
    }

    struct PanickingClient;

    #[async_trait]
    impl WhoisLookup for PanickingClient {
        async fn lookup(&self, _domain: &str) -> anyhow::Result<UpstreamRecord> {
            panic!("registry parser exploded")
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_slow_upstream_times_out_as_lookup_error() {
        let service = WhoisService::new(Arc::new(SlowClient), Some(Duration::from_millis(50)));

        let start = Instant::now();
        let err = service.lookup("example.com").await.unwrap_err();
        assert!(start.elapsed() < Duration::from_millis(500));

        assert!(matches!(err, PrivacyApiError::Lookup(_)));
        assert_eq!(err.message(), "Error looking up domain example.com");
        assert!(!err.message().contains("timed out"));
    }

    #[tokio::test]
    async fn test_slow_upstream_without_limit_completes() {
        let service = WhoisService::new(Arc::new(SlowClient), None);
        let record = service.lookup("example.com").await.unwrap();
        assert_eq!(
            record.domain_name,
            Some(OneOrMany::One("example.com".to_string()))
        );
    }

    #[tokio::test]
    async fn test_upstream_panic_is_lookup_error() {
        let service = WhoisService::new(Arc::new(PanickingClient), None);
        let err = service.lookup("example.com").await.unwrap_err();
        assert!(matches!(err, PrivacyApiError::Lookup(_)));
        assert!(!err.message().contains("exploded"));
    }

    #[test]
    fn test_upstream_client_is_built_lazily() {
        let client = UpstreamWhoisClient::new();
        assert!(!client.client.initialized());
        assert_eq!(client.name(), "whois-service");
    }

    #[tokio::test]
    async fn test_blank_domain_is_validation_error() {
        let service = WhoisService::new(Arc::new(FailingClient), None);
        let err = service.lookup("  ").await.unwrap_err();
        assert!(matches!(err, PrivacyApiError::Validation(_)));
    }
}
