//! Lot size calculator.
//!
//! Pure functions over the static currency reference table. Every method
//! that cannot produce a number (unknown pair, non-positive divisor) returns
//! `None`; input validation is a separate channel, see
//! [`LotSizeCalculator::validate_inputs`].

use lotsize_domain::{get_pair_info, get_pip_value, ByLotType, LotType, TradeDirection};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::health::AccountHealth;
use crate::validation::{ValidationInput, ValidationResult};

/// Contract size used for margin, independent of the lot type
pub const CONTRACT_SIZE: Decimal = dec!(100000);

/// Decimal places kept on `position_size_lots`
const LOTS_DP: u32 = 4;

/// Decimal places kept on `actual_risk`
const RISK_DP: u32 = 2;

// =============================================================================
// Results
// =============================================================================

/// Position size for one lot type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LotSizeResult {
    /// Lots needed to risk the requested amount (4 dp)
    pub position_size_lots: Decimal,
    /// Position size in units of the base currency (0 dp)
    pub position_size_units: Decimal,
    /// USD value of one pip for one lot of this type
    pub pip_value: Decimal,
    /// Dollar risk of the position (2 dp)
    ///
    /// Derived from the unrounded lot count, so it matches the requested
    /// risk amount to the cent.
    pub actual_risk: Decimal,
    /// Units in one lot of this type
    pub lot_size_units: u32,
}

/// Position sizes for every lot type
pub type PositionSizes = ByLotType<LotSizeResult>;

/// Pip value facts for one lot type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipValueEntry {
    /// USD value of one pip
    pub pip_value: Decimal,
    /// Units in one lot
    pub lot_size: u32,
    /// Quote precision of the pair
    pub decimals: u32,
}

/// Pip value facts for every lot type
pub type PipValueInfo = ByLotType<PipValueEntry>;

/// Stop-loss and take-profit prices, rounded to the pair's precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceLevels {
    /// Stop-loss price
    pub stop_loss_price: Decimal,
    /// Take-profit price
    pub take_profit_price: Decimal,
}

// =============================================================================
// Calculator
// =============================================================================

/// Forex lot size calculator.
///
/// Stateless apart from the constant lot-size table; cheap to clone and safe
/// to share between threads.
#[derive(Debug, Clone)]
pub struct LotSizeCalculator {
    lot_sizes: ByLotType<u32>,
}

impl LotSizeCalculator {
    /// Create a calculator with the standard lot-size table.
    pub fn new() -> Self {
        Self {
            lot_sizes: ByLotType {
                standard: LotType::Standard.units(),
                mini: LotType::Mini.units(),
                micro: LotType::Micro.units(),
            },
        }
    }

    /// Units in one lot of `lot_type`.
    pub fn lot_size(&self, lot_type: LotType) -> u32 {
        *self.lot_sizes.get(lot_type)
    }

    /// Size a position from a percentage of the account balance.
    ///
    /// `risk_amount = account_balance × risk_percentage / 100`
    ///
    /// Returns `None` if any input is not positive or the pair is unknown.
    pub fn calculate_position_size_by_risk_percentage(
        &self,
        account_balance: Decimal,
        risk_percentage: Decimal,
        stop_loss_pips: Decimal,
        pair: &str,
    ) -> Option<PositionSizes> {
        if account_balance <= Decimal::ZERO
            || risk_percentage <= Decimal::ZERO
            || stop_loss_pips <= Decimal::ZERO
        {
            return None;
        }

        let risk_amount = risk_amount_from_percentage(account_balance, risk_percentage)?;
        self.calculate_position_size(risk_amount, stop_loss_pips, pair)
    }

    /// Size a position from a fixed dollar risk.
    ///
    /// Returns `None` if any input is not positive or the pair is unknown.
    pub fn calculate_position_size_by_dollar_amount(
        &self,
        risk_amount: Decimal,
        stop_loss_pips: Decimal,
        pair: &str,
    ) -> Option<PositionSizes> {
        if risk_amount <= Decimal::ZERO || stop_loss_pips <= Decimal::ZERO {
            return None;
        }

        self.calculate_position_size(risk_amount, stop_loss_pips, pair)
    }

    /// Shared sizing routine.
    ///
    /// ```text
    /// lots        = risk_amount / (pip_value × stop_loss_pips)
    /// actual_risk = lots × pip_value × stop_loss_pips
    /// units       = lots × lot_size_units
    /// ```
    ///
    /// Only the reported fields are rounded; every formula uses `lots` as
    /// divided.
    fn calculate_position_size(
        &self,
        risk_amount: Decimal,
        stop_loss_pips: Decimal,
        pair: &str,
    ) -> Option<PositionSizes> {
        get_pair_info(pair)?;

        let sizes = ByLotType::try_from_fn(|lot_type| {
            let pip_value = get_pip_value(pair, lot_type)?;
            let risk_per_lot = pip_value.checked_mul(stop_loss_pips)?;
            let lots = risk_amount.checked_div(risk_per_lot)?;

            let position_size_lots = lots.round_dp(LOTS_DP);
            let actual_risk = lots.checked_mul(risk_per_lot)?.round_dp(RISK_DP);
            let lot_size_units = self.lot_size(lot_type);
            let position_size_units = lots.checked_mul(Decimal::from(lot_size_units))?.round_dp(0);

            Some(LotSizeResult {
                position_size_lots,
                position_size_units,
                pip_value,
                actual_risk,
                lot_size_units,
            })
        })?;

        debug!(
            pair,
            %risk_amount,
            %stop_loss_pips,
            standard_lots = %sizes.standard.position_size_lots,
            "Position size calculated"
        );

        Some(sizes)
    }

    /// Pip value, lot size and quote precision for every lot type.
    pub fn calculate_pip_value_info(&self, pair: &str) -> Option<PipValueInfo> {
        let info = get_pair_info(pair)?;

        ByLotType::try_from_fn(|lot_type| {
            Some(PipValueEntry {
                pip_value: get_pip_value(pair, lot_type)?,
                lot_size: self.lot_size(lot_type),
                decimals: info.decimals,
            })
        })
    }

    /// Reward per unit of risk: `take_profit_pips / stop_loss_pips`.
    ///
    /// Returns `None` when `stop_loss_pips <= 0`. No bounds are applied to the
    /// result.
    pub fn calculate_risk_reward_ratio(
        &self,
        take_profit_pips: Decimal,
        stop_loss_pips: Decimal,
    ) -> Option<Decimal> {
        if stop_loss_pips <= Decimal::ZERO {
            return None;
        }
        take_profit_pips.checked_div(stop_loss_pips)
    }

    /// Margin required to open `lot_size` standard lots.
    ///
    /// Pairs with USD as base (`USD/...`) use the notional at `entry_price`;
    /// every other pair uses `lot_size × 100000 / leverage` and ignores the
    /// entry price.
    ///
    /// Returns `None` for an unknown pair or zero leverage. Negative leverage
    /// is not rejected here; callers validate first.
    pub fn calculate_margin_required(
        &self,
        lot_size: Decimal,
        entry_price: Decimal,
        leverage: Decimal,
        pair: &str,
    ) -> Option<Decimal> {
        get_pair_info(pair)?;

        let units = lot_size.checked_mul(CONTRACT_SIZE)?;

        let exposure = if pair.starts_with("USD/") {
            units.checked_mul(entry_price)?
        } else {
            units
        };

        exposure.checked_div(leverage)
    }

    /// Stop-loss and take-profit prices for a trade.
    ///
    /// Pip size is `0.01` for 2-decimal pairs and `0.0001` for everything
    /// else, including 3-decimal JPY pairs.
    pub fn calculate_price_levels(
        &self,
        entry_price: Decimal,
        stop_loss_pips: Decimal,
        take_profit_pips: Decimal,
        direction: TradeDirection,
        pair: &str,
    ) -> Option<PriceLevels> {
        let info = get_pair_info(pair)?;
        let pip_size = pip_size(info.decimals);

        let stop_distance = stop_loss_pips.checked_mul(pip_size)?;
        let target_distance = take_profit_pips.checked_mul(pip_size)?;

        let (stop_loss_price, take_profit_price) = match direction {
            TradeDirection::Buy => (
                entry_price.checked_sub(stop_distance)?,
                entry_price.checked_add(target_distance)?,
            ),
            TradeDirection::Sell => (
                entry_price.checked_add(stop_distance)?,
                entry_price.checked_sub(target_distance)?,
            ),
        };

        Some(PriceLevels {
            stop_loss_price: stop_loss_price.round_dp(info.decimals),
            take_profit_price: take_profit_price.round_dp(info.decimals),
        })
    }

    /// [`calculate_price_levels`](Self::calculate_price_levels) with the
    /// direction as free text (`"buy"` in any case buys, anything else sells).
    pub fn calculate_price_levels_str(
        &self,
        entry_price: Decimal,
        stop_loss_pips: Decimal,
        take_profit_pips: Decimal,
        direction: &str,
        pair: &str,
    ) -> Option<PriceLevels> {
        self.calculate_price_levels(
            entry_price,
            stop_loss_pips,
            take_profit_pips,
            TradeDirection::from(direction),
            pair,
        )
    }

    /// Dollar reward if take profit is hit: `lot_size × pip_value × take_profit_pips`.
    pub fn calculate_reward_amount(
        &self,
        lot_size: Decimal,
        take_profit_pips: Decimal,
        pair: &str,
        lot_type: LotType,
    ) -> Option<Decimal> {
        let pip_value = get_pip_value(pair, lot_type)?;
        lot_size.checked_mul(pip_value)?.checked_mul(take_profit_pips)
    }

    /// Classify a risk percentage into a health band.
    pub fn check_account_health(&self, risk_percentage: Decimal) -> AccountHealth {
        AccountHealth::from_risk_percentage(risk_percentage)
    }

    /// Check every supplied input against its bound.
    ///
    /// Fields left as `None` are not checked.
    pub fn validate_inputs(&self, input: &ValidationInput) -> ValidationResult {
        input.validate()
    }
}

impl Default for LotSizeCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// `account_balance × risk_percentage / 100`
pub fn risk_amount_from_percentage(
    account_balance: Decimal,
    risk_percentage: Decimal,
) -> Option<Decimal> {
    account_balance
        .checked_mul(risk_percentage)?
        .checked_div(Decimal::ONE_HUNDRED)
}

/// Pip size for a quote precision
pub fn pip_size(decimals: u32) -> Decimal {
    if decimals == 2 {
        dec!(0.01)
    } else {
        dec!(0.0001)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn calc() -> LotSizeCalculator {
        LotSizeCalculator::new()
    }

    // Position sizing tests
    #[test]
    fn test_eur_usd_two_percent_of_ten_thousand() {
        let sizes = calc()
            .calculate_position_size_by_risk_percentage(dec!(10000), dec!(2), dec!(20), "EUR/USD")
            .unwrap();

        // 200 / (10 × 20) = 1 standard lot
        assert_eq!(sizes.standard.position_size_lots, dec!(1));
        assert_eq!(sizes.standard.position_size_units, dec!(100000));
        assert_eq!(sizes.standard.pip_value, dec!(10));
        assert_eq!(sizes.standard.actual_risk, dec!(200.00));
        assert_eq!(sizes.standard.lot_size_units, 100_000);

        assert_eq!(sizes.mini.position_size_lots, dec!(10));
        assert_eq!(sizes.mini.pip_value, dec!(1));
        assert_eq!(sizes.micro.position_size_lots, dec!(100));
        assert_eq!(sizes.micro.position_size_units, dec!(100000));
    }

    #[test]
    fn test_dollar_amount_rounds_lots_to_four_places() {
        let sizes = calc()
            .calculate_position_size_by_dollar_amount(dec!(200), dec!(20), "USD/JPY")
            .unwrap();

        // 200 / (9.13 × 20) = 1.09529025...
        assert_eq!(sizes.standard.position_size_lots, dec!(1.0953));
        assert_eq!(sizes.standard.position_size_units, dec!(109529));
        assert_eq!(sizes.standard.actual_risk, dec!(200.00));
    }

    #[test]
    fn test_actual_risk_matches_requested_risk() {
        let sizes = calc()
            .calculate_position_size_by_dollar_amount(dec!(333), dec!(700), "EUR/USD")
            .unwrap();

        // 333 / 7000 = 0.047571... lots; the rounded 0.0476 would risk 333.20
        assert_eq!(sizes.standard.position_size_lots, dec!(0.0476));
        for (lot_type, result) in sizes.iter() {
            assert_eq!(result.actual_risk, dec!(333), "{lot_type}");
        }

        let sizes = calc()
            .calculate_position_size_by_risk_percentage(dec!(100000), dec!(1), dec!(900), "USD/JPY")
            .unwrap();
        assert_eq!(sizes.standard.actual_risk, dec!(1000));
    }

    #[test]
    fn test_position_size_rejects_non_positive_inputs() {
        let c = calc();
        assert!(c
            .calculate_position_size_by_risk_percentage(dec!(0), dec!(2), dec!(20), "EUR/USD")
            .is_none());
        assert!(c
            .calculate_position_size_by_risk_percentage(dec!(10000), dec!(-1), dec!(20), "EUR/USD")
            .is_none());
        assert!(c
            .calculate_position_size_by_risk_percentage(dec!(10000), dec!(2), dec!(0), "EUR/USD")
            .is_none());
        assert!(c.calculate_position_size_by_dollar_amount(dec!(0), dec!(20), "EUR/USD").is_none());
        assert!(c
            .calculate_position_size_by_dollar_amount(dec!(100), dec!(-5), "EUR/USD")
            .is_none());
    }

    #[test]
    fn test_position_size_unknown_pair() {
        assert!(calc()
            .calculate_position_size_by_dollar_amount(dec!(100), dec!(20), "BTC/USD")
            .is_none());
    }

    // Pip value info tests
    #[test]
    fn test_pip_value_info() {
        let info = calc().calculate_pip_value_info("XAU/USD").unwrap();
        assert_eq!(info.standard.pip_value, dec!(1));
        assert_eq!(info.mini.pip_value, dec!(0.1));
        assert_eq!(info.micro.pip_value, dec!(0.01));
        assert_eq!(info.micro.lot_size, 1_000);
        assert!(info.iter().all(|(_, entry)| entry.decimals == 2));

        assert!(calc().calculate_pip_value_info("XYZ/ABC").is_none());
    }

    // Risk/reward tests
    #[test]
    fn test_risk_reward_ratio() {
        assert_eq!(calc().calculate_risk_reward_ratio(dec!(40), dec!(20)), Some(dec!(2)));
        assert_eq!(calc().calculate_risk_reward_ratio(dec!(0), dec!(20)), Some(dec!(0)));
        assert_eq!(calc().calculate_risk_reward_ratio(dec!(10), dec!(0)), None);
        assert_eq!(calc().calculate_risk_reward_ratio(dec!(10), dec!(-2)), None);
    }

    // Margin tests
    #[test]
    fn test_margin_ignores_entry_price_for_non_usd_base() {
        let c = calc();
        let margin = c.calculate_margin_required(dec!(1.0), dec!(1.10000), dec!(100), "EUR/USD");
        assert_eq!(margin, Some(dec!(1000)));

        let other_price = c.calculate_margin_required(dec!(1.0), dec!(5), dec!(100), "EUR/USD");
        assert_eq!(other_price, margin);
    }

    #[test]
    fn test_margin_uses_entry_price_for_usd_base() {
        let margin = calc().calculate_margin_required(dec!(0.5), dec!(110), dec!(100), "USD/JPY");
        // 0.5 × 100000 × 110 / 100
        assert_eq!(margin, Some(dec!(55000)));
    }

    #[test]
    fn test_margin_uncomputable() {
        let c = calc();
        assert!(c.calculate_margin_required(dec!(1), dec!(1), dec!(100), "ZZZ/USD").is_none());
        assert!(c.calculate_margin_required(dec!(1), dec!(1), dec!(0), "EUR/USD").is_none());
    }

    #[test]
    fn test_margin_negative_leverage_is_not_guarded() {
        let margin = calc().calculate_margin_required(dec!(1), dec!(1), dec!(-100), "EUR/USD");
        assert_eq!(margin, Some(dec!(-1000)));
    }

    // Price level tests
    #[test]
    fn test_price_levels_buy_five_decimals() {
        let levels = calc()
            .calculate_price_levels(
                dec!(1.10000),
                dec!(20),
                dec!(40),
                TradeDirection::Buy,
                "EUR/USD",
            )
            .unwrap();
        assert_eq!(levels.stop_loss_price, dec!(1.09800));
        assert_eq!(levels.take_profit_price, dec!(1.10400));
    }

    #[test]
    fn test_price_levels_sell_metals() {
        let levels = calc()
            .calculate_price_levels(
                dec!(1800),
                dec!(150),
                dec!(300),
                TradeDirection::Sell,
                "XAU/USD",
            )
            .unwrap();
        // pip size 0.01 for 2-decimal pairs
        assert_eq!(levels.stop_loss_price, dec!(1801.50));
        assert_eq!(levels.take_profit_price, dec!(1797.00));
    }

    #[test]
    fn test_price_levels_jpy_uses_small_pip_size() {
        let levels = calc()
            .calculate_price_levels(dec!(110), dec!(20), dec!(40), TradeDirection::Buy, "USD/JPY")
            .unwrap();
        // 20 × 0.0001 = 0.002, not 20 × 0.001
        assert_eq!(levels.stop_loss_price, dec!(109.998));
        assert_eq!(levels.take_profit_price, dec!(110.004));
    }

    #[test]
    fn test_price_levels_direction_string() {
        let c = calc();
        let buy = c.calculate_price_levels_str(dec!(1.2), dec!(10), dec!(10), "BUY", "GBP/USD");
        let sell =
            c.calculate_price_levels_str(dec!(1.2), dec!(10), dec!(10), "whatever", "GBP/USD");
        assert_eq!(buy.unwrap().stop_loss_price, dec!(1.19900));
        assert_eq!(sell.unwrap().stop_loss_price, dec!(1.20100));
        assert!(c
            .calculate_price_levels_str(dec!(1.2), dec!(10), dec!(10), "buy", "???")
            .is_none());
    }

    // Reward tests
    #[test]
    fn test_reward_amount() {
        let c = calc();
        assert_eq!(
            c.calculate_reward_amount(dec!(1), dec!(40), "EUR/USD", LotType::Standard),
            Some(dec!(400))
        );
        assert_eq!(
            c.calculate_reward_amount(dec!(2), dec!(40), "EUR/USD", LotType::Micro),
            Some(dec!(8))
        );
        assert_eq!(c.calculate_reward_amount(dec!(1), dec!(40), "NOPE", LotType::Mini), None);
    }

    // Helpers
    #[test]
    fn test_pip_size() {
        assert_eq!(pip_size(2), dec!(0.01));
        assert_eq!(pip_size(3), dec!(0.0001));
        assert_eq!(pip_size(5), dec!(0.0001));
    }
}
