//! Lotsize Engine Layer
//!
//! Pure decision logic, deterministic, no I/O.
//! Takes trade parameters → Returns sizes, levels and advisories.
//!
//! Two failure channels are kept apart:
//! - calculator methods return `None` when a value cannot be computed
//!   (unknown pair, non-positive divisor);
//! - [`validation`] reports every input that violates its bound.
//!
//! [`plan::TradePlanner`] combines both into a typed [`PlanError`].

#![warn(clippy::all)]

pub mod calculator;
pub mod error;
pub mod health;
pub mod plan;
pub mod validation;

pub use calculator::{
    LotSizeCalculator, LotSizeResult, PipValueEntry, PipValueInfo, PositionSizes, PriceLevels,
    CONTRACT_SIZE,
};
pub use error::{PlanError, PlanResult};
pub use health::{
    AccountHealth, HealthStatus, MarginUsage, RiskLevel, RiskRewardQuality, Severity,
};
pub use plan::{AccountImpact, RiskMode, TradePlan, TradePlanner, TradeRequest};
pub use validation::{ValidationInput, ValidationResult};
