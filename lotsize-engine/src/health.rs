//! Advisory classifications.
//!
//! Banding of risk percentage, risk/reward ratio and margin usage into
//! labelled tiers. Classification only; nothing here changes a number.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity tier used to pick how an advisory is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Within recommended limits
    Success,
    /// Neutral note
    Info,
    /// Worth a second look
    Warning,
    /// Outside recommended limits
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

// =============================================================================
// Account health
// =============================================================================

/// Risk band for a per-trade risk percentage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    /// risk <= 1%
    Excellent,
    /// 1% < risk <= 2%
    Good,
    /// 2% < risk <= 3%
    Moderate,
    /// 3% < risk <= 5%
    High,
    /// risk > 5%
    Dangerous,
}

impl HealthStatus {
    /// Band a risk percentage. Upper bounds are inclusive.
    pub fn from_risk_percentage(risk_percentage: Decimal) -> Self {
        if risk_percentage <= dec!(1) {
            HealthStatus::Excellent
        } else if risk_percentage <= dec!(2) {
            HealthStatus::Good
        } else if risk_percentage <= dec!(3) {
            HealthStatus::Moderate
        } else if risk_percentage <= dec!(5) {
            HealthStatus::High
        } else {
            HealthStatus::Dangerous
        }
    }

    /// Severity tier of this band
    pub fn severity(&self) -> Severity {
        match self {
            HealthStatus::Excellent | HealthStatus::Good => Severity::Success,
            HealthStatus::Moderate => Severity::Warning,
            HealthStatus::High | HealthStatus::Dangerous => Severity::Error,
        }
    }

    /// Advisory shown next to the band
    pub fn message(&self) -> &'static str {
        match self {
            HealthStatus::Excellent => "Excellent risk management - Very conservative approach",
            HealthStatus::Good => "Good risk management - Balanced approach",
            HealthStatus::Moderate => "Moderate risk - Consider reducing position size",
            HealthStatus::High => "High risk - You're risking more than recommended!",
            HealthStatus::Dangerous => "DANGEROUS - This could wipe out your account quickly!",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HealthStatus::Excellent => "excellent",
            HealthStatus::Good => "good",
            HealthStatus::Moderate => "moderate",
            HealthStatus::High => "high",
            HealthStatus::Dangerous => "dangerous",
        };
        f.write_str(name)
    }
}

/// Account health check result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountHealth {
    /// Risk band
    pub status: HealthStatus,
    /// Severity tier of the band
    pub severity: Severity,
    /// Human-readable advisory
    pub message: String,
}

impl AccountHealth {
    /// Classify a per-trade risk percentage
    pub fn from_risk_percentage(risk_percentage: Decimal) -> Self {
        let status = HealthStatus::from_risk_percentage(risk_percentage);
        Self {
            status,
            severity: status.severity(),
            message: status.message().to_string(),
        }
    }
}

// =============================================================================
// Risk/reward quality
// =============================================================================

/// Quality band for a risk/reward ratio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskRewardQuality {
    /// ratio >= 2.0
    Excellent,
    /// 1.5 <= ratio < 2.0
    Good,
    /// 1.0 <= ratio < 1.5
    Acceptable,
    /// ratio < 1.0
    Poor,
}

impl RiskRewardQuality {
    /// Ratio below which the trade setup should be reworked
    pub const ADJUSTMENT_THRESHOLD: Decimal = dec!(1.5);

    /// Band a risk/reward ratio. Lower bounds are inclusive.
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio >= dec!(2.0) {
            RiskRewardQuality::Excellent
        } else if ratio >= dec!(1.5) {
            RiskRewardQuality::Good
        } else if ratio >= dec!(1.0) {
            RiskRewardQuality::Acceptable
        } else {
            RiskRewardQuality::Poor
        }
    }

    /// Severity tier of this band
    pub fn severity(&self) -> Severity {
        match self {
            RiskRewardQuality::Excellent | RiskRewardQuality::Good => Severity::Success,
            RiskRewardQuality::Acceptable => Severity::Warning,
            RiskRewardQuality::Poor => Severity::Error,
        }
    }

    /// True when a ratio should prompt the trader to widen TP or tighten SL
    pub fn needs_adjustment(ratio: Decimal) -> bool {
        ratio < Self::ADJUSTMENT_THRESHOLD
    }
}

// =============================================================================
// Margin usage
// =============================================================================

/// Band for the share of the account locked as margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginUsage {
    /// usage <= 30%
    Normal,
    /// 30% < usage <= 50%
    Moderate,
    /// usage > 50%
    High,
}

impl MarginUsage {
    /// Band a margin usage percentage
    pub fn from_percentage(margin_usage_percent: Decimal) -> Self {
        if margin_usage_percent > dec!(50) {
            MarginUsage::High
        } else if margin_usage_percent > dec!(30) {
            MarginUsage::Moderate
        } else {
            MarginUsage::Normal
        }
    }

    /// Severity tier of this band
    pub fn severity(&self) -> Severity {
        match self {
            MarginUsage::Normal => Severity::Success,
            MarginUsage::Moderate => Severity::Warning,
            MarginUsage::High => Severity::Error,
        }
    }
}

// =============================================================================
// Risk level
// =============================================================================

/// Trading style implied by a per-trade risk percentage
///
/// Shown alongside [`HealthStatus`] for percentage-mode trades. The bands
/// are coarser: everything above 3% is one tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    /// risk <= 1%
    Conservative,
    /// 1% < risk <= 2%
    Moderate,
    /// 2% < risk <= 3%
    Aggressive,
    /// risk > 3%
    VeryHigh,
}

impl RiskLevel {
    /// Band a risk percentage. Upper bounds are inclusive.
    pub fn from_risk_percentage(risk_percentage: Decimal) -> Self {
        if risk_percentage <= dec!(1) {
            RiskLevel::Conservative
        } else if risk_percentage <= dec!(2) {
            RiskLevel::Moderate
        } else if risk_percentage <= dec!(3) {
            RiskLevel::Aggressive
        } else {
            RiskLevel::VeryHigh
        }
    }

    /// Severity tier of this band
    pub fn severity(&self) -> Severity {
        match self {
            RiskLevel::Conservative => Severity::Success,
            RiskLevel::Moderate => Severity::Info,
            RiskLevel::Aggressive => Severity::Warning,
            RiskLevel::VeryHigh => Severity::Error,
        }
    }

    /// Advisory shown next to the band
    pub fn message(&self) -> &'static str {
        match self {
            RiskLevel::Conservative => {
                "Conservative risk level - Good for long-term capital preservation"
            },
            RiskLevel::Moderate => "Moderate risk level - Balanced approach for steady growth",
            RiskLevel::Aggressive => {
                "Aggressive risk level - Higher potential returns but increased risk"
            },
            RiskLevel::VeryHigh => "Very high risk level - Consider reducing position size",
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
