//! Seed Production Management Platform - Backend Server
//!
//! Serves the seed program's reference data, lots, stock and needs analysis
//! as a JSON API.

use std::net::SocketAddr;

use seedbank_backend::{create_app, AppState, Config, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "seedbank_server=debug,seedbank_backend=debug,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting Seed Production Management Server");
    tracing::info!("Environment: {}", config.environment);

    // Load the dataset once; it lives in memory for the life of the process
    let store = Store::load(&config.data).await?;

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = AppState::new(store, config);

    // Build application
    let app = create_app(state);

    // Start server
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
