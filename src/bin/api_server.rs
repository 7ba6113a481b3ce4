// API Server Binary Entry Point
//
// Purpose: Start the Axum footprint API
// Usage: cargo run --features api --bin api_server

use footprint_scorer::{create_router, AppState, ServerConfig};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing (structured logging)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| {
                    // Default log level: info for our crate, warn for others
                    "footprint_scorer=info,tower_http=debug,axum=debug,warn".into()
                }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting API server...");

    // Configuration from environment variables
    let config = ServerConfig::from_env();

    tracing::info!("Configuration:");
    tracing::info!("  PORT: {}", config.port);
    tracing::info!("  DATA_DIR: {:?}", config.data_dir);
    tracing::info!("  SNAPSHOT_CAPACITY: {}", config.snapshot_capacity);
    tracing::info!("  SNAPSHOT_TTL: {:?}", config.snapshot_ttl);
    tracing::info!("  COUNTRY_LOOKUP_URL: {:?}", config.country_lookup_url);
    tracing::info!("  COUNTRY_LOOKUP_TIMEOUT: {:?}", config.country_lookup_timeout);
    tracing::info!("  DEFAULT_COUNTRY: {}", config.default_country);

    let port = config.port;

    // Initialize application state (loads and validates tables)
    let state = AppState::new(config)?;
    tracing::info!("Application state initialized successfully");

    // Create router with all endpoints and middleware
    let app = create_router(state);

    // Bind to address
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
