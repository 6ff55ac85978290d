//! Trade plan assembly.
//!
//! One call runs the full calculation flow for a trade:
//!
//! ```text
//! validate → account health → risk/reward → position sizes
//!          → price levels → margin → reward → account impact
//! ```
//!
//! Validation runs first so the calculator is never fed values it does not
//! guard against (e.g. negative leverage).

use lotsize_domain::{get_pair_info, Leverage, LotType, TradeDirection};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculator::{risk_amount_from_percentage, LotSizeCalculator, PositionSizes, PriceLevels};
use crate::error::{PlanError, PlanResult};
use crate::health::{AccountHealth, MarginUsage, RiskLevel, RiskRewardQuality};
use crate::validation::ValidationInput;

// =============================================================================
// Request
// =============================================================================

/// How the risk for a trade is expressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RiskMode {
    /// Percentage of the account balance
    Percentage {
        /// Account balance in USD
        account_balance: Decimal,
        /// Risk per trade, percent of balance
        risk_percentage: Decimal,
    },
    /// Fixed dollar amount
    FixedAmount {
        /// Risk per trade in USD
        risk_amount: Decimal,
    },
}

/// Everything needed to plan one trade
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeRequest {
    /// Pair symbol, e.g. "EUR/USD"
    pub pair: String,
    /// Risk definition
    pub risk: RiskMode,
    /// Stop-loss distance in pips
    pub stop_loss_pips: Decimal,
    /// Take-profit distance in pips
    pub take_profit_pips: Decimal,
    /// Intended entry price
    pub entry_price: Decimal,
    /// Trade direction
    pub direction: TradeDirection,
    /// Account leverage (100 for 1:100)
    pub leverage: Decimal,
}

// =============================================================================
// Plan
// =============================================================================

/// Effect of the trade on the account (percentage mode only)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountImpact {
    /// Standard-lot actual risk as percent of balance
    pub risk_ratio_percent: Decimal,
    /// Balance left after margin is locked
    pub free_margin_after: Decimal,
    /// Margin as percent of balance
    pub margin_usage_percent: Decimal,
    /// Margin usage band
    pub margin_usage: MarginUsage,
}

/// Full result of a trade calculation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradePlan {
    /// Pair symbol
    pub pair: String,
    /// Trade direction
    pub direction: TradeDirection,
    /// Entry price
    pub entry_price: Decimal,
    /// Dollar risk the sizes were computed for
    pub risk_amount: Decimal,
    /// Health band (percentage mode only)
    pub account_health: Option<AccountHealth>,
    /// Risk level insight (percentage mode only)
    pub risk_level: Option<RiskLevel>,
    /// Take-profit pips / stop-loss pips
    pub risk_reward_ratio: Decimal,
    /// Risk/reward band
    pub risk_reward_quality: RiskRewardQuality,
    /// True if the ratio is below the recommended minimum
    pub risk_reward_needs_adjustment: bool,
    /// Sizes for every lot type
    pub position_sizes: PositionSizes,
    /// Stop-loss and take-profit prices
    pub price_levels: PriceLevels,
    /// Account leverage
    pub leverage: Decimal,
    /// Margin for the standard-lot size
    pub margin_required: Decimal,
    /// Dollar reward at take profit for the standard-lot size
    pub reward_amount: Decimal,
    /// Account impact (percentage mode only)
    pub account_impact: Option<AccountImpact>,
}

// =============================================================================
// Planner
// =============================================================================

/// Runs the full calculation flow on top of a [`LotSizeCalculator`].
#[derive(Debug, Clone, Default)]
pub struct TradePlanner {
    calculator: LotSizeCalculator,
}

impl TradePlanner {
    /// Create a planner.
    pub fn new(calculator: LotSizeCalculator) -> Self {
        Self { calculator }
    }

    /// Access the underlying calculator.
    pub fn calculator(&self) -> &LotSizeCalculator {
        &self.calculator
    }

    /// Build a trade plan.
    ///
    /// # Errors
    ///
    /// - `PlanError::InvalidInput` if any input violates its bound
    /// - `PlanError::Domain` if leverage is not positive
    /// - `PlanError::UnknownPair` if the pair is not in the reference table
    /// - `PlanError::Uncomputable` if a step overflows
    pub fn plan(&self, request: &TradeRequest) -> PlanResult<TradePlan> {
        let calc = &self.calculator;
        let pair = request.pair.as_str();

        // 1. Validate
        let risk_amount = match request.risk {
            RiskMode::Percentage {
                account_balance,
                risk_percentage,
            } => risk_amount_from_percentage(account_balance, risk_percentage)
                .ok_or(PlanError::Uncomputable("risk amount"))?,
            RiskMode::FixedAmount { risk_amount } => risk_amount,
        };

        let (account_balance, risk_percentage) = match request.risk {
            RiskMode::Percentage {
                account_balance,
                risk_percentage,
            } => (Some(account_balance), Some(risk_percentage)),
            RiskMode::FixedAmount { .. } => (None, None),
        };

        let validation = calc.validate_inputs(&ValidationInput {
            account_balance,
            risk_percentage,
            risk_amount: Some(risk_amount),
            stop_loss_pips: Some(request.stop_loss_pips),
            take_profit_pips: Some(request.take_profit_pips),
            entry_price: Some(request.entry_price),
        });
        if !validation.is_valid() {
            return Err(PlanError::InvalidInput(validation.message()));
        }

        let leverage = Leverage::new(request.leverage)?;

        // 2. Pair
        if get_pair_info(pair).is_none() {
            return Err(PlanError::UnknownPair(request.pair.clone()));
        }

        // 3. Account health
        let account_health = risk_percentage.map(|pct| calc.check_account_health(pct));
        let risk_level = risk_percentage.map(RiskLevel::from_risk_percentage);

        // 4. Risk/reward
        let risk_reward_ratio = calc
            .calculate_risk_reward_ratio(request.take_profit_pips, request.stop_loss_pips)
            .ok_or(PlanError::Uncomputable("risk/reward ratio"))?;

        // 5. Position sizes
        let position_sizes = match request.risk {
            RiskMode::Percentage {
                account_balance,
                risk_percentage,
            } => calc.calculate_position_size_by_risk_percentage(
                account_balance,
                risk_percentage,
                request.stop_loss_pips,
                pair,
            ),
            RiskMode::FixedAmount { risk_amount } => calc.calculate_position_size_by_dollar_amount(
                risk_amount,
                request.stop_loss_pips,
                pair,
            ),
        }
        .ok_or(PlanError::Uncomputable("position size"))?;

        // 6. Price levels
        let price_levels = calc
            .calculate_price_levels(
                request.entry_price,
                request.stop_loss_pips,
                request.take_profit_pips,
                request.direction,
                pair,
            )
            .ok_or(PlanError::Uncomputable("price levels"))?;

        // 7-8. Margin and reward for the standard-lot size
        let standard_lots = position_sizes.standard.position_size_lots;

        let margin_required = calc
            .calculate_margin_required(
                standard_lots,
                request.entry_price,
                leverage.as_decimal(),
                pair,
            )
            .ok_or(PlanError::Uncomputable("margin"))?;

        let reward_amount = calc
            .calculate_reward_amount(
                standard_lots,
                request.take_profit_pips,
                pair,
                LotType::Standard,
            )
            .ok_or(PlanError::Uncomputable("reward amount"))?;

        // 9. Account impact
        let account_impact = account_balance
            .map(|balance| {
                account_impact(balance, position_sizes.standard.actual_risk, margin_required)
            })
            .transpose()?;

        debug!(
            pair,
            direction = %request.direction,
            %risk_amount,
            %risk_reward_ratio,
            %margin_required,
            "Trade plan assembled"
        );

        Ok(TradePlan {
            pair: request.pair.clone(),
            direction: request.direction,
            entry_price: request.entry_price,
            risk_amount,
            account_health,
            risk_level,
            risk_reward_ratio,
            risk_reward_quality: RiskRewardQuality::from_ratio(risk_reward_ratio),
            risk_reward_needs_adjustment: RiskRewardQuality::needs_adjustment(risk_reward_ratio),
            position_sizes,
            price_levels,
            leverage: leverage.as_decimal(),
            margin_required,
            reward_amount,
            account_impact,
        })
    }
}

fn account_impact(
    account_balance: Decimal,
    actual_risk: Decimal,
    margin_required: Decimal,
) -> PlanResult<AccountImpact> {
    let percent_of_balance = |value: Decimal| {
        value
            .checked_div(account_balance)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .ok_or(PlanError::Uncomputable("account impact"))
    };

    let risk_ratio_percent = percent_of_balance(actual_risk)?;
    let margin_usage_percent = percent_of_balance(margin_required)?;

    let free_margin_after = account_balance
        .checked_sub(margin_required)
        .ok_or(PlanError::Uncomputable("account impact"))?;

    Ok(AccountImpact {
        risk_ratio_percent,
        free_margin_after,
        margin_usage_percent,
        margin_usage: MarginUsage::from_percentage(margin_usage_percent),
    })
}

// =============================================================================
// Tests
// =============================================================================
