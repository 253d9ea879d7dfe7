//! Satwatch HTTP Server Binary
//!
//! This is the main entry point for the satwatch REST API server.
//! It loads the configuration, constructs the document store, seeds the
//! tracked satellite, starts the background position poller, and serves the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin satwatch-server
//! ```
//!
//! # Configuration
//!
//! Settings come from an optional `satwatch.toml` in the working directory
//! (see `config::AppConfig`); every field has a default, so the server runs
//! without one.
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (overrides the config file, default: 0.0.0.0)
//! - `PORT`: Server port (overrides the config file, default: 8080)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use satwatch::config::AppConfig;
use satwatch::db::{schema, services as db_services, DocumentRepository, LocalRepository};
use satwatch::http::{create_router, AppState};
use satwatch::models::Satellite;
use satwatch::poller::{PositionClient, PositionPoller};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .init();

    info!("Starting Satwatch HTTP Server");

    let config = AppConfig::load()?;

    // The repository is owned here and shared explicitly with every consumer.
    let repository: Arc<dyn DocumentRepository> = Arc::new(LocalRepository::new());
    seed_tracked_satellite(repository.as_ref(), &config).await?;
    info!("Repository initialized successfully");

    if config.tracking.poller_enabled {
        let client = PositionClient::new(
            &config.tracking.position_api_url,
            config.tracking.request_timeout_secs,
        )?;
        let poller = PositionPoller::new(
            Arc::clone(&repository),
            client,
            config.tracking.iss_sat_id,
            Duration::from_secs(config.tracking.poll_interval_secs),
        );
        poller.start();
    } else {
        info!("Position poller disabled by configuration");
    }

    // Create application state
    let state = AppState::new(Arc::clone(&repository), Arc::new(config.tracking.clone()));

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or(config.server.host);
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(config.server.port);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Make sure the tracked satellite exists so polling can start against a
/// fresh store.
async fn seed_tracked_satellite(
    repository: &dyn DocumentRepository,
    config: &AppConfig,
) -> anyhow::Result<()> {
    let sat_id = config.tracking.iss_sat_id;
    if db_services::find_satellite(repository, sat_id)
        .await?
        .is_some()
    {
        return Ok(());
    }

    let satellite = Satellite {
        sat_id,
        name: "ISS (ZARYA)".to_string(),
        units: config.tracking.units.clone(),
    };
    repository
        .insert(schema::SATELLITES, satellite.to_document()?)
        .await?;
    info!("Seeded satellite {} into the store", sat_id);
    Ok(())
}
