//! GeoIP 服务模块
//!
//! 提供 IP 地址国家级地理位置查询：
//! - MaxMind GeoLite2-Country 本地数据库
//! - 域名先解析再查询

mod maxmind;
mod provider;
mod resolver;

pub use maxmind::MaxMindProvider;
pub use provider::{CountryLookup, CountryRecord, GeoIpService, GeoLookupResult};
pub use resolver::resolve_domain;
