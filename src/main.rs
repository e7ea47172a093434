use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use battery_gateway::{api, telemetry, Config, Gateway};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    telemetry::init(config.log_format);
    info!(?config, "battery gateway starting");

    let gateway = Arc::new(Gateway::new(&config)?);
    let app = api::router(gateway.clone());

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("binding {}", config.listen_addr))?;
    info!(
        listen_addr = %config.listen_addr,
        device_url = gateway.device_url(),
        "wifi configuration available at POST /api/esp32/config"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
