//! Helios HTTP Server Binary
//!
//! This is the main entry point for the Helios REST API server.
//! It loads configuration, sets up the HTTP router, and starts serving requests.
//!
//! # Usage
//!
//! ```bash
//! # Serve archives from ../resources without an astronomy collaborator
//! cargo run --bin helios-server
//!
//! # With a collaborator and a custom archive root
//! HELIOS_ASTRO_URL=http://localhost:5001 HELIOS_RESOURCE_ROOT=/srv/helios/resources \
//!   cargo run --bin helios-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 5000)
//! - `HELIOS_RESOURCE_ROOT`: Archive root directory (default: ../resources)
//! - `HELIOS_RESOURCE_PORT`: Port of the static resource server (default: 8000)
//! - `HELIOS_ASTRO_URL`: Astronomy collaborator base URL (optional)
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use helios::config::ServerConfig;
use helios::http::{create_router, AppState};

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
        .with_thread_ids(true)
        .init();

    info!("Starting Helios HTTP Server");

    let config = ServerConfig::load()?;
    info!("Serving archives from {}", config.resources.root.display());
    if !config.resources.root.is_dir() {
        warn!(
            "Archive root {} does not exist; field-line lookups will report no data",
            config.resources.root.display()
        );
    }
    match &config.astro.base_url {
        Some(url) => info!("Astronomy collaborator at {}", url),
        None => warn!("No astronomy collaborator configured; delegated endpoints will fail"),
    }

    // Create application state
    let state = AppState::from_config(&config)?;

    // Create router with all endpoints
    let app = create_router(state);

    let addr: SocketAddr = config.bind_address().parse()?;
    info!("Server listening on http://{}", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
