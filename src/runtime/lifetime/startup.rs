use actix_web::web;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::api::api_v1_routes;
use crate::config::StaticConfig;
use crate::services::{GeoIpService, PhishingDomainSet, WhoisService};
use crate::utils::TrustedProxies;

/// Services shared by every worker
#[derive(Clone)]
pub struct StartupContext {
    pub geoip: Arc<GeoIpService>,
    pub whois: Arc<WhoisService>,
    pub phishing: Arc<PhishingDomainSet>,
    pub trusted_proxies: TrustedProxies,
}

impl StartupContext {
    /// 注册共享状态和 `/api/v1` 路由
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.geoip.clone()))
            .app_data(web::Data::new(self.whois.clone()))
            .app_data(web::Data::new(self.phishing.clone()))
            .app_data(web::Data::new(self.trusted_proxies.clone()))
            .service(api_v1_routes());
    }
}

/// 准备服务器启动的上下文
///
/// Opens the GeoIP database, loads the phishing list and builds the WHOIS
/// client. A database that cannot be opened aborts startup; the phishing
/// list only does when `phishing.require_file` is set.
pub fn prepare_server_startup(config: &StaticConfig) -> Result<StartupContext> {
    let start_time = Instant::now();
    debug!("Starting pre-startup processing...");

    let geoip = Arc::new(GeoIpService::new(&config.geoip.database_path));
    geoip.open().context("Failed to initialize GeoIP service")?;

    let phishing = if config.phishing.require_file {
        PhishingDomainSet::load_strict(&config.phishing.domains_path)
            .context("Failed to load phishing domain list")?
    } else {
        PhishingDomainSet::load(&config.phishing.domains_path)
    };
    if phishing.is_empty() {
        warn!("Phishing domain set is empty, no domain will be flagged");
    }
    let phishing = Arc::new(phishing);

    let whois = Arc::new(WhoisService::from_config(&config.whois));
    match whois.timeout() {
        Some(limit) => debug!("WHOIS lookups limited to {:?}", limit),
        None => warn!("WHOIS timeout disabled, slow registries can hold requests open"),
    }

    let trusted_proxies = TrustedProxies::new(&config.server.trusted_proxies);
    if trusted_proxies.is_empty() {
        debug!("No trusted proxies configured, X-Forwarded-For is ignored");
    } else {
        info!(
            "Trusted proxies configured: {:?}",
            config.server.trusted_proxies
        );
    }

    info!(
        "Pre-startup processing completed in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        geoip,
        whois,
        phishing,
        trusted_proxies,
    })
}
