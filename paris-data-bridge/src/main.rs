use std::path::PathBuf;

use anyhow::Context;
use paris_data_bridge::bus::MqttPublisher;
use paris_data_bridge::config::AppConfig;
use paris_data_bridge::ratp::RatpClient;
use paris_data_bridge::web::{AppState, create_router};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "paris_data_bridge=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Optional config file path as the only argument
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("failed to load configuration")?;

    if config.ratp.accept_invalid_hostnames {
        warn!("TLS hostname verification is disabled for the RATP API");
    }

    let ratp = RatpClient::new(config.ratp.clone()).context("failed to create RATP client")?;
    let publisher = MqttPublisher::connect(&config.bus).context("failed to create MQTT publisher")?;

    let state = AppState::new(ratp, publisher);
    let app = create_router(state);

    let addr = config.server.addr().context("invalid server address")?;
    info!(%addr, ratp = %config.ratp.base_url, "Paris data bridge listening");
    info!("  GET  /health");
    info!("  GET  /paris-data/destinations/{{type}}/{{line}}");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
