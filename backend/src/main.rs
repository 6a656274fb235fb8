//! Taskboard entry-point: load settings, wire adapters, serve HTTP.

mod server;

use actix_web::web;
use color_eyre::eyre::{Result, WrapErr, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use server::{AppSettings, ServerConfig, build_http_state, create_server};
use taskboard::inbound::http::health::HealthState;

#[actix_web::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        AppSettings::load().map_err(|err| eyre!("failed to load configuration: {err}"))?;
    let bind_addr = settings.bind_addr()?;
    let http_state = build_http_state(&settings)
        .await
        .wrap_err("failed to initialise adapters")?;

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), ServerConfig::new(bind_addr, http_state))?;
    let handle = server.handle();

    actix_web::rt::spawn(async move {
        if let Err(error) = tokio::signal::ctrl_c().await {
            warn!(%error, "failed to listen for shutdown signal");
            return;
        }
        info!("shutdown requested; draining");
        health_state.mark_draining();
        handle.stop(true).await;
    });

    server.await?;
    Ok(())
}
