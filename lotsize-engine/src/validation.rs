//! Input validation.
//!
//! Partial by design: only the fields a caller supplies are checked, so the
//! same routine serves both percentage-based and fixed-amount flows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs to validate. `None` fields are skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationInput {
    /// Account balance in USD
    pub account_balance: Option<Decimal>,
    /// Risk per trade, percent of balance
    pub risk_percentage: Option<Decimal>,
    /// Risk per trade in USD
    pub risk_amount: Option<Decimal>,
    /// Stop-loss distance in pips
    pub stop_loss_pips: Option<Decimal>,
    /// Take-profit distance in pips
    pub take_profit_pips: Option<Decimal>,
    /// Intended entry price
    pub entry_price: Option<Decimal>,
}

/// Outcome of validation: every violated bound, in field order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// One message per violated bound
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// True when no bound was violated
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// All messages joined with `"; "`, empty when valid
    pub fn message(&self) -> String {
        self.errors.join("; ")
    }

    /// `(is_valid, joined messages)`
    pub fn into_parts(self) -> (bool, String) {
        (self.is_valid(), self.message())
    }
}

impl ValidationInput {
    /// Check every supplied field against its bound.
    pub fn validate(&self) -> ValidationResult {
        let mut errors = Vec::new();
        let non_positive = |value: Option<Decimal>| value.is_some_and(|v| v <= Decimal::ZERO);

        if non_positive(self.account_balance) {
            errors.push("Account balance must be greater than 0".to_string());
        }

        if self
            .risk_percentage
            .is_some_and(|v| v <= Decimal::ZERO || v > Decimal::ONE_HUNDRED)
        {
            errors.push("Risk percentage must be between 0 and 100".to_string());
        }

        if non_positive(self.risk_amount) {
            errors.push("Risk amount must be greater than 0".to_string());
        }

        if non_positive(self.stop_loss_pips) {
            errors.push("Stop loss pips must be greater than 0".to_string());
        }

        if non_positive(self.take_profit_pips) {
            errors.push("Take profit pips must be greater than 0".to_string());
        }

        if non_positive(self.entry_price) {
            errors.push("Entry price must be greater than 0".to_string());
        }

        ValidationResult { errors }
    }
}

// =============================================================================
// Tests
// =============================================================================
