use std::path::Path;

use config::{Config, Environment, File};

use super::StaticConfig;
use crate::errors::{PrivacyApiError, Result};

/// 默认配置文件路径
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 环境变量前缀
pub const ENV_PREFIX: &str = "PRIVACY_API";

impl StaticConfig {
    /// 从 TOML 文件和环境变量加载配置
    ///
    /// The file is optional; a missing file falls back to defaults.
    /// Environment variables override file values, e.g.
    /// `PRIVACY_API__GEOIP__DATABASE_PATH=/srv/geo.mmdb`.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let path = path.unwrap_or(DEFAULT_CONFIG_PATH);

        let settings = Config::builder()
            // 1. 从 TOML 文件加载（可选）
            .add_source(File::with_name(path).required(false))
            // 2. 从环境变量覆盖
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.trusted_proxies")
                    .with_list_parse_key("cors.allowed_origins")
                    .try_parsing(true),
            )
            .build()?;

        let config: StaticConfig = settings.try_deserialize()?;

        if Path::new(path).exists() {
            eprintln!("[INFO] Configuration loaded from: {}", path);
        }

        Ok(config)
    }

    /// Effective log filter, honouring `app.debug`.
    pub fn log_level(&self) -> &str {
        if self.app.debug {
            "debug"
        } else {
            &self.logging.level
        }
    }

    /// 保存配置到 TOML 文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| PrivacyApiError::serialization(e.to_string()))?;

        if let Some(parent) = path.as_ref().parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_from_toml_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(
            &path,
            r#"
            [geoip]
            database_path = "/srv/geo/country.mmdb"

            [whois]
            timeout_secs = 3
            "#,
        )
        .unwrap();

        let config = StaticConfig::load(path.to_str()).unwrap();
        assert_eq!(config.geoip.database_path, "/srv/geo/country.mmdb");
        assert_eq!(config.whois.timeout_secs, 3);
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = StaticConfig::load(Some("definitely/not/here.toml")).unwrap();
        assert_eq!(config.app.name, "NeerHack Privacy API");
    }

    #[test]
    fn test_debug_forces_debug_level() {
        let mut config = StaticConfig::default();
        assert_eq!(config.log_level(), "info");
        config.app.debug = true;
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn test_sample_config_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("sample.toml");
        StaticConfig::default().save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("[geoip]"));
        let parsed: StaticConfig = toml::from_str(&content).unwrap();
        assert_eq!(parsed.server.port, 8000);
    }
}
