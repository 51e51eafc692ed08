//! GeoIP 服务
//!
//! `GeoIpService` owns the country database handle with an explicit
//! `open` / `close` lifecycle. The reader itself sits behind
//! [`CountryLookup`] so other readers can be injected.

use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use super::maxmind::MaxMindProvider;
use super::resolver::resolve_domain;
use crate::errors::{PrivacyApiError, Result};

/// 国家级地理位置记录
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryRecord {
    /// ISO 3166-1 alpha-2 国家代码 (e.g., "CN", "US")
    pub iso_code: Option<String>,
    pub country_name: Option<String>,
    pub continent_name: Option<String>,
    pub is_in_european_union: bool,
}

/// 国家数据库查询 trait
pub trait CountryLookup: Send + Sync {
    /// `Ok(None)` when the database holds no record for `ip`.
    fn country(&self, ip: IpAddr) -> Result<Option<CountryRecord>>;

    /// 获取 reader 名称（用于日志）
    fn name(&self) -> &'static str;
}

/// Geolocation answer returned to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoLookupResult {
    pub ip_address: String,
    pub country_iso_code: Option<String>,
    pub country_name: Option<String>,
    pub continent: Option<String>,
    #[serde(default)]
    pub is_in_european_union: bool,
}

impl GeoLookupResult {
    pub fn from_record(ip: IpAddr, record: CountryRecord) -> Self {
        Self {
            ip_address: ip.to_string(),
            country_iso_code: record.iso_code,
            country_name: record.country_name,
            continent: record.continent_name,
            is_in_european_union: record.is_in_european_union,
        }
    }
}

pub struct GeoIpService {
    db_path: PathBuf,
    reader: RwLock<Option<Arc<dyn CountryLookup>>>,
}

impl GeoIpService {
    /// Create a closed service for the database at `db_path`.
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            reader: RwLock::new(None),
        }
    }

    /// Create an already-open service around an existing reader.
    pub fn with_reader(reader: Arc<dyn CountryLookup>) -> Self {
        Self {
            db_path: PathBuf::new(),
            reader: RwLock::new(Some(reader)),
        }
    }

    /// 打开数据库（重复调用无副作用）
    pub fn open(&self) -> Result<()> {
        let mut reader = self.reader.write();
        if reader.is_some() {
            debug!("GeoIP: database already open");
            return Ok(());
        }

        let provider = MaxMindProvider::open(&self.db_path).map_err(|e| {
            PrivacyApiError::database(format!(
                "Failed to open GeoIP database at {}: {}",
                self.db_path.display(),
                e
            ))
        })?;

        info!(
            "GeoIP: Using {} database at {}",
            provider.name(),
            self.db_path.display()
        );
        *reader = Some(Arc::new(provider));
        Ok(())
    }

    /// 关闭数据库（重复调用无副作用）
    pub fn close(&self) {
        if self.reader.write().take().is_some() {
            info!("GeoIP: database closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.reader.read().is_some()
    }

    fn reader(&self) -> Result<Arc<dyn CountryLookup>> {
        self.reader
            .read()
            .clone()
            .ok_or_else(|| PrivacyApiError::not_open("GeoIP database reader is not open"))
    }

    /// 查询 IP 地址字符串
    ///
    /// The address must be a bare IPv4 or IPv6 literal; surrounding
    /// whitespace is rejected as a validation error.
    pub fn lookup(&self, address: &str) -> Result<GeoLookupResult> {
        let ip: IpAddr = address
            .parse()
            .map_err(|_| PrivacyApiError::validation(format!("Invalid IP address: {}", address)))?;
        self.lookup_ip(ip)
    }

    pub fn lookup_ip(&self, ip: IpAddr) -> Result<GeoLookupResult> {
        let reader = self.reader()?;

        match reader.country(ip)? {
            Some(record) => {
                trace!(
                    "{} lookup for {}: country={:?}",
                    reader.name(),
                    ip,
                    record.iso_code
                );
                Ok(GeoLookupResult::from_record(ip, record))
            }
            None => Err(PrivacyApiError::not_found(format!(
                "IP address {} not found in the database.",
                ip
            ))),
        }
    }

    /// 先解析域名，再查询第一个地址
    pub async fn lookup_domain(&self, domain: &str) -> Result<GeoLookupResult> {
        let ip = resolve_domain(domain).await?;
        debug!("GeoIP: resolved {} to {}", domain, ip);
        self.lookup_ip(ip)
    }

    /// 查询调用方自身的地址
    pub fn lookup_self(&self, caller: Option<IpAddr>) -> Result<GeoLookupResult> {
        let ip = caller.ok_or_else(|| PrivacyApiError::validation("Could not determine client IP"))?;
        self.lookup_ip(ip)
    }
}
