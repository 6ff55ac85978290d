//! Lotsize Daemon
//!
//! Serves the lot size calculator over HTTP.
//!
//! # Usage
//!
//! ```bash
//! # Start with default configuration
//! cargo run -p lotsized
//!
//! # Start with custom environment
//! LOTSIZE_ENV=test LOTSIZE_API_PORT=8081 cargo run -p lotsized
//! ```
//!
//! # Environment Variables
//!
//! - `LOTSIZE_ENV`: Environment (test, development, production)
//! - `LOTSIZE_API_HOST`: API host (default: 0.0.0.0)
//! - `LOTSIZE_API_PORT`: API port (default: 8080)
//! - `LOTSIZE_DEFAULT_LEVERAGE`: Leverage when a request omits it (default: 100)
//! - `LOTSIZE_DEFAULT_RISK_PERCENT`: Risk % when a request omits it (default: 2)

use lotsized::{Config, Daemon};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::from_default_env()
                .add_directive("lotsized=info".parse()?)
                .add_directive("tower_http=info".parse()?),
        )
        .init();

    // Load configuration
    let config = Config::from_env()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = %config.environment,
        api_host = %config.api.host,
        api_port = config.api.port,
        "Lotsize Daemon"
    );

    Daemon::new(config).run().await?;

    Ok(())
}
