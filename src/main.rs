//! Hero profile routing service.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶ axum (request id, trace, timeout)
//!                        │
//!                        ▼
//!                   dispatch handler ── body + query ──▶ RouteRequest
//!                        │
//!                        ▼
//!                   routing::Router (first match in registration order)
//!                        │
//!                        ▼
//!                   api::handlers (static tables) ──▶ ApiResponse (status, JSON)
//! ```

use std::path::PathBuf;

use clap::Parser;

use hero_routes::config::{load_config, validate_config, AppConfig, ConfigError};
use hero_routes::http::bind;
use hero_routes::lifecycle::signals;
use hero_routes::observability::{logging, metrics};
use hero_routes::{api, HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "hero-routes")]
#[command(about = "Hero profile API demonstrating routing patterns", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bind address, overriding the configuration file.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);

    tracing::info!("hero-routes v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    let routes = api::router()?;
    for route in routes.routes() {
        tracing::debug!(method = ?route.method(), pattern = %route.template(), "Route registered");
    }

    if config.observability.metrics_enabled {
        // Validated above.
        if let Ok(addr) = config.observability.metrics_address.parse() {
            metrics::init_metrics(addr);
        }
    }

    let listener = bind(&config.listener.bind_address).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        routes = routes.len(),
        "Listening for connections"
    );

    let shutdown = Shutdown::new();
    signals::spawn_signal_handler(shutdown.clone());

    let server = HttpServer::new(config, routes);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
