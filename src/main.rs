use std::net::TcpListener;

use anyhow::Context;
use appointment_board::config::Config;
use appointment_board::server;
use appointment_board::store::Store;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = Config::from_env().context("Failed to load configuration")?;
    let store = Store::connect(&config.store)
        .await
        .context("Failed to connect to appointment store")?;

    let listener = TcpListener::bind((config.bind_addr.as_str(), config.port))
        .with_context(|| format!("Failed to bind {}:{}", config.bind_addr, config.port))?;
    info!("Server running on {}", listener.local_addr()?);

    server::build(store.clone(), listener)?.await?;

    store.shutdown().await;
    Ok(())
}
