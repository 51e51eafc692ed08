use tokio::signal;
use tracing::{info, warn};

use crate::services::GeoIpService;

/// 等待 Ctrl+C
pub async fn listen_for_shutdown() {
    match signal::ctrl_c().await {
        Ok(()) => {
            info!("Shutdown signal received, stopping server...");
        }
        Err(e) => {
            warn!(
                "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
                e
            );
        }
    }
}

/// 服务器停止后释放资源
pub fn perform_shutdown_tasks(geoip: &GeoIpService) {
    geoip.close();
    info!("GeoIP database closed");
}
