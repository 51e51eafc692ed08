use serde::{Deserialize, Serialize};

/// 静态配置（启动时加载）
///
/// 优先级：ENV > config.toml > 默认值
/// ENV 前缀：PRIVACY_API，分隔符：__
/// 示例：PRIVACY_API__SERVER__PORT=9000
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StaticConfig {
    #[serde(default)]
    pub app: AppConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub geoip: GeoIpConfig,
    #[serde(default)]
    pub whois: WhoisConfig,
    #[serde(default)]
    pub phishing: PhishingConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 应用信息
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default = "default_app_version")]
    pub version: String,
    /// Forces the log level to `debug` when set.
    #[serde(default)]
    pub debug: bool,
}

/// 服务器配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,
    #[serde(default = "default_server_port")]
    pub port: u16,
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Peers allowed to supply `X-Forwarded-For` / `X-Real-IP`.
    /// Single addresses or CIDR blocks.
    #[serde(default)]
    pub trusted_proxies: Vec<String>,
}

/// GeoIP 数据库配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoIpConfig {
    /// MaxMindDB 文件路径 (GeoLite2-Country.mmdb)
    #[serde(default = "default_geoip_database_path")]
    pub database_path: String,
}

/// WHOIS 查询配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WhoisConfig {
    /// 单次查询超时（秒），0 表示不限制
    #[serde(default = "default_whois_timeout_secs")]
    pub timeout_secs: u64,
}

/// 钓鱼域名列表配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhishingConfig {
    #[serde(default = "default_phishing_domains_path")]
    pub domains_path: String,
    /// When true a missing or unreadable list aborts startup instead of
    /// serving an empty set.
    #[serde(default)]
    pub require_file: bool,
}

/// CORS 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_cors_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_allow_credentials")]
    pub allow_credentials: bool,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default)]
    pub file: Option<String>,
    #[serde(default = "default_max_backups")]
    pub max_backups: u32,
    #[serde(default = "default_enable_rotation")]
    pub enable_rotation: bool,
}

// ============================================================
// Default value functions for static config
// ============================================================

fn default_app_name() -> String {
    "NeerHack Privacy API".to_string()
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

fn default_workers() -> usize {
    num_cpus::get()
}

fn default_geoip_database_path() -> String {
    "data/GeoLite2-Country.mmdb".to_string()
}

fn default_whois_timeout_secs() -> u64 {
    10
}

fn default_phishing_domains_path() -> String {
    "data/phishing-domains-ACTIVE.txt".to_string()
}

fn default_cors_allowed_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_cors_allow_credentials() -> bool {
    true
}

fn default_cors_max_age() -> u64 {
    3600
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_max_backups() -> u32 {
    5
}

fn default_enable_rotation() -> bool {
    true
}

// ============================================================
// Default implementations
// ============================================================

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            version: default_app_version(),
            debug: false,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
            workers: default_workers(),
            trusted_proxies: Vec::new(),
        }
    }
}

impl Default for GeoIpConfig {
    fn default() -> Self {
        Self {
            database_path: default_geoip_database_path(),
        }
    }
}

impl Default for WhoisConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_whois_timeout_secs(),
        }
    }
}

impl Default for PhishingConfig {
    fn default() -> Self {
        Self {
            domains_path: default_phishing_domains_path(),
            require_file: false,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_cors_allowed_origins(),
            allow_credentials: default_cors_allow_credentials(),
            max_age: default_cors_max_age(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            file: None,
            max_backups: default_max_backups(),
            enable_rotation: default_enable_rotation(),
        }
    }
}
