//! Server mode
//!
//! Builds the services, starts the HTTP server and drives graceful shutdown.

use actix_web::{
    App, HttpServer,
    middleware::{Compress, DefaultHeaders},
};
use anyhow::{Context, Result};
use std::time::Duration;
use tracing::{error, info, warn};

use super::lifetime::shutdown;
use super::lifetime::startup::{self, StartupContext};
use crate::api::cors::{build_cors, validate_cors_config};
use crate::api::middleware::{RequestIdMiddleware, TimingMiddleware};
use crate::config::StaticConfig;

/// Run the HTTP server until Ctrl+C
///
/// Logging must be initialized before calling this function.
pub async fn run_server(config: &StaticConfig) -> Result<()> {
    let startup = startup::prepare_server_startup(config).inspect_err(|e| {
        error!("Server startup failed: {:#}", e);
    })?;
    serve(config, startup).await
}

/// 使用已准备好的服务运行 HTTP server
///
/// The GeoIP database is closed on every exit path, including bind
/// failures and a server task that ends with an error.
pub async fn serve(config: &StaticConfig, startup: StartupContext) -> Result<()> {
    let geoip = startup.geoip.clone();

    let outcome = run_http_server(config, startup).await;
    if let Err(e) = &outcome {
        error!("Server stopped with an error: {:#}", e);
    }

    shutdown::perform_shutdown_tasks(&geoip);
    outcome
}

async fn run_http_server(config: &StaticConfig, startup: StartupContext) -> Result<()> {
    let cors_config = config.cors.clone();
    validate_cors_config(&cors_config);

    let workers = config.server.workers.max(1);
    let bind_address = format!("{}:{}", config.server.host, config.server.port);

    let server = HttpServer::new(move || {
        let cors = build_cors(&cors_config);

        App::new()
            .wrap(TimingMiddleware)
            .wrap(RequestIdMiddleware)
            .wrap(cors)
            .wrap(Compress::default())
            .wrap(DefaultHeaders::new().add(("Cache-Control", "no-store")))
            .configure(|cfg| startup.configure(cfg))
    })
    .keep_alive(Duration::from_secs(30))
    .client_request_timeout(Duration::from_millis(5000))
    .workers(workers)
    .disable_signals()
    .bind(&bind_address)
    .with_context(|| format!("Failed to bind {}", bind_address))?
    .run();

    info!(
        "{} v{} listening on http://{} ({} workers)",
        config.app.name, config.app.version, bind_address, workers
    );

    let handle = server.handle();
    let server_task = actix_web::rt::spawn(server);

    tokio::select! {
        res = server_task => {
            res.context("Server task failed")?
                .context("Server terminated with an error")
        }
        _ = shutdown::listen_for_shutdown() => {
            handle.stop(true).await;
            warn!("Graceful shutdown: server stopped");
            Ok(())
        }
    }
}
