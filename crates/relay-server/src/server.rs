//! HTTP server launch
//!
//! Rocket handles Ctrl+C and SIGTERM itself; [`serve_with_shutdown`] adds an
//! external trigger on top.

use std::future::Future;
use std::net::IpAddr;

use relay_domain::error::{Error, Result};
use relay_infrastructure::AppContext;
use relay_infrastructure::config::ServerConfig;
use rocket::config::{Config as RocketConfig, LogLevel};
use tracing::info;

use crate::routes::relay_rocket;

/// Rocket configuration for the configured bind address
pub fn rocket_config(server: &ServerConfig) -> Result<RocketConfig> {
    let address: IpAddr = server.host.parse().map_err(|e| {
        Error::configuration_with_source(format!("invalid server host '{}'", server.host), e)
    })?;
    Ok(RocketConfig {
        address,
        port: server.port,
        log_level: LogLevel::Critical,
        ..RocketConfig::default()
    })
}

/// Serve the API until Rocket receives a shutdown signal
pub async fn serve(app: AppContext) -> Result<()> {
    serve_with_shutdown(app, std::future::pending()).await
}

/// Serve the API until `shutdown_signal` resolves or Rocket shuts down
pub async fn serve_with_shutdown(
    app: AppContext,
    shutdown_signal: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let config = rocket_config(&app.config.server)?;
    info!(address = %config.address, port = config.port, "HTTP API listening");

    let rocket = relay_rocket(app)
        .configure(config)
        .ignite()
        .await
        .map_err(|e| Error::infrastructure(format!("Rocket ignite failed: {e}")))?;

    let shutdown = rocket.shutdown();
    tokio::spawn(async move {
        shutdown_signal.await;
        shutdown.notify();
    });

    rocket
        .launch()
        .await
        .map_err(|e| Error::infrastructure(format!("Rocket launch failed: {e}")))?;
    info!("HTTP API stopped");
    Ok(())
}
