//! Logs every destinations message published by the bridge.

use std::path::PathBuf;

use anyhow::Context;
use paris_data_bridge::bus::{MqttSubscription, consume};
use paris_data_bridge::config::AppConfig;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "destinations_subscriber=debug,paris_data_bridge=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = AppConfig::load(config_path.as_deref()).context("failed to load configuration")?;

    let mut subscription = MqttSubscription::connect(&config.bus)
        .await
        .context("failed to subscribe")?;

    let received = consume(&mut subscription, |message| match message {
        Some(response) => info!(
            destinations = response.destinations().len(),
            call = %response.metadata.call,
            ?response,
            "received destinations"
        ),
        None => info!("received empty destinations message"),
    })
    .await
    .context("subscription failed")?;

    info!(received, "subscriber stopped");
    Ok(())
}
