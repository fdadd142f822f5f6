//! Service entry-point: tracing, configuration, and the HTTP server.

use clap::Parser;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use asset_registry::server::{ServerConfig, run};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let config = ServerConfig::parse();

    // RUST_LOG still wins over the configured directive.
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(e) = fmt().with_env_filter(filter).try_init() {
        warn!(error = %e, "tracing init failed");
    }

    run(&config)?.await
}
