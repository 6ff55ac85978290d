//! Lotsize Daemon Library
//!
//! JSON HTTP front end for the lot size calculator.
//!
//! # Architecture
//!
//! ```text
//! Client → API Server → TradePlanner → LotSizeCalculator → Currency Reference Table
//! ```
//!
//! # Components
//!
//! - **Daemon**: Binds the listener and serves until shutdown
//! - **API**: HTTP endpoints over the engine
//! - **Config**: Environment-based configuration
//!
//! # Example
//!
//! ```rust,ignore
//! use lotsized::{Config, Daemon};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = Config::from_env().expect("Failed to load config");
//!     Daemon::new(config).run().await.expect("Daemon error");
//! }
//! ```

#![warn(clippy::all)]

pub mod api;
pub mod config;
pub mod daemon;
pub mod error;

// Re-exports for convenience
pub use config::{ApiConfig, CalculatorDefaults, Config, Environment};
pub use daemon::Daemon;
pub use error::{DaemonError, DaemonResult};
