//! MaxMind GeoLite2 数据库实现
//!
//! 使用本地 MaxMind GeoLite2-Country.mmdb 文件进行 IP 国家查询

use std::net::IpAddr;
use std::path::Path;

use maxminddb::Reader;

use super::provider::{CountryLookup, CountryRecord};
use crate::errors::{PrivacyApiError, Result};

/// MaxMind country reader
pub struct MaxMindProvider {
    reader: Reader<Vec<u8>>,
}

impl MaxMindProvider {
    /// 从文件路径创建 MaxMind Provider
    pub fn open<P: AsRef<Path>>(path: P) -> std::result::Result<Self, maxminddb::MaxMindDbError> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self { reader })
    }
}

impl CountryLookup for MaxMindProvider {
    fn country(&self, ip: IpAddr) -> Result<Option<CountryRecord>> {
        let result = self
            .reader
            .lookup(ip)
            .map_err(|e| PrivacyApiError::database(format!("Error looking up IP address {}: {}", ip, e)))?;

        let Some(record) = result
            .decode::<maxminddb::geoip2::Country>()
            .map_err(|e| PrivacyApiError::database(format!("Error decoding record for {}: {}", ip, e)))?
        else {
            return Ok(None);
        };

        Ok(Some(CountryRecord {
            iso_code: record.country.iso_code.map(String::from),
            country_name: record.country.names.english.map(String::from),
            continent_name: record.continent.names.english.map(String::from),
            is_in_european_union: record.country.is_in_european_union.unwrap_or(false),
        }))
    }

    fn name(&self) -> &'static str {
        "MaxMind"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_DB: &str = concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/data/GeoLite2-Country-Test.mmdb"
    );

    fn provider() -> MaxMindProvider {
        MaxMindProvider::open(TEST_DB).expect("test database should open")
    }

    #[test]
    fn test_ipv4_country_record() {
        let record = provider()
            .country("81.2.69.160".parse().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(record.iso_code.as_deref(), Some("GB"));
        assert_eq!(record.country_name.as_deref(), Some("United Kingdom"));
        assert_eq!(record.continent_name.as_deref(), Some("Europe"));
        // 记录里没有 EU 标记
        assert!(!record.is_in_european_union);
    }

    #[test]
    fn test_eu_flag_decoded() {
        let record = provider()
            .country("89.160.20.115".parse().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(record.iso_code.as_deref(), Some("SE"));
        assert_eq!(record.country_name.as_deref(), Some("Sweden"));
        assert!(record.is_in_european_union);
    }

    #[test]
    fn test_ipv6_country_record() {
        let record = provider()
            .country("2001:218::1".parse().unwrap())
            .unwrap()
            .unwrap();

        assert_eq!(record.iso_code.as_deref(), Some("JP"));
        assert_eq!(record.country_name.as_deref(), Some("Japan"));
        assert_eq!(record.continent_name.as_deref(), Some("Asia"));
        assert!(!record.is_in_european_union);
    }

    #[test]
    fn test_absent_address_is_none() {
        let provider = provider();
        for ip in ["8.8.8.8", "81.2.69.192", "2001:219::1"] {
            let record = provider.country(ip.parse().unwrap()).unwrap();
            assert!(record.is_none(), "{} should have no record", ip);
        }
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(MaxMindProvider::open(dir.path().join("missing.mmdb")).is_err());
    }
}
