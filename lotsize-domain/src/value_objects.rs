//! Value Objects for the Lotsize Domain
//!
//! Immutable, validated domain primitives.
//! Parsing is strict where the domain requires it (lot types, symbols,
//! leverage) and lenient where traders type free text (trade direction).

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Domain errors for value object validation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Symbol must be a `BASE/QUOTE` pair
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Lot type must be standard, mini or micro
    #[error("Invalid lot type: {0}")]
    InvalidLotType(String),

    /// Leverage must be positive
    #[error("Invalid leverage: {0}")]
    InvalidLeverage(String),
}

// =============================================================================
// PairSymbol
// =============================================================================

/// PairSymbol represents a forex pair quoted as `BASE/QUOTE` (e.g., EUR/USD)
///
/// # Invariants
/// - Base and quote are non-empty, uppercase ASCII letters
///
/// Serialized as the `BASE/QUOTE` string; deserializing goes through
/// [`PairSymbol::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PairSymbol {
    base: String,
    quote: String,
}

impl PairSymbol {
    /// Parse a `BASE/QUOTE` symbol
    ///
    /// # Examples
    /// ```
    /// # use lotsize_domain::value_objects::PairSymbol;
    /// let symbol = PairSymbol::parse("eur/usd").unwrap();
    /// assert_eq!(symbol.base(), "EUR");
    /// assert_eq!(symbol.quote(), "USD");
    /// assert_eq!(symbol.as_pair(), "EUR/USD");
    /// ```
    ///
    /// # Errors
    /// Returns `DomainError::InvalidSymbol` if the string is not `BASE/QUOTE`
    pub fn parse(pair: &str) -> Result<Self, DomainError> {
        let (base, quote) = pair
            .split_once('/')
            .ok_or_else(|| DomainError::InvalidSymbol(format!("Missing '/' in pair: {}", pair)))?;

        Self::new(base, quote)
    }

    /// Create a PairSymbol from explicit base and quote
    pub fn new(base: &str, quote: &str) -> Result<Self, DomainError> {
        let valid = |code: &str| !code.is_empty() && code.chars().all(|c| c.is_ascii_alphabetic());

        if !valid(base) || !valid(quote) {
            return Err(DomainError::InvalidSymbol(format!(
                "Base and quote must be non-empty currency codes: {}/{}",
                base, quote
            )));
        }

        Ok(Self {
            base: base.to_ascii_uppercase(),
            quote: quote.to_ascii_uppercase(),
        })
    }

    /// Get the base currency
    pub fn base(&self) -> &str {
        &self.base
    }

    /// Get the quote currency
    pub fn quote(&self) -> &str {
        &self.quote
    }

    /// Get the pair as string (e.g., "EUR/USD")
    pub fn as_pair(&self) -> String {
        format!("{}/{}", self.base, self.quote)
    }
}

impl TryFrom<String> for PairSymbol {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PairSymbol> for String {
    fn from(value: PairSymbol) -> Self {
        value.as_pair()
    }
}

impl fmt::Display for PairSymbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

// =============================================================================
// PairCategory
// =============================================================================

/// Grouping used to organise the pair picker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PairCategory {
    /// USD against another G10 currency
    Major,
    /// Two non-USD currencies
    Cross,
    /// Metals quoted in USD
    Commodity,
    /// Emerging-market currencies
    Exotic,
}

impl PairCategory {
    /// All categories in display order
    pub const ALL: [PairCategory; 4] = [
        PairCategory::Major,
        PairCategory::Cross,
        PairCategory::Commodity,
        PairCategory::Exotic,
    ];

    /// Category name as shown to traders
    pub fn as_str(&self) -> &'static str {
        match self {
            PairCategory::Major => "Major",
            PairCategory::Cross => "Cross",
            PairCategory::Commodity => "Commodity",
            PairCategory::Exotic => "Exotic",
        }
    }
}

impl fmt::Display for PairCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LotType
// =============================================================================

/// Standardised position size
///
/// | Lot      | Units   | Pip value           |
/// |----------|---------|---------------------|
/// | Standard | 100,000 | per-pair reference  |
/// | Mini     | 10,000  | standard / 10       |
/// | Micro    | 1,000   | standard / 100      |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LotType {
    /// 100,000 units
    Standard,
    /// 10,000 units
    Mini,
    /// 1,000 units
    Micro,
}

impl LotType {
    /// All lot types, largest first
    pub const ALL: [LotType; 3] = [LotType::Standard, LotType::Mini, LotType::Micro];

    /// Units of the base currency in one lot
    pub fn units(&self) -> u32 {
        match self {
            LotType::Standard => 100_000,
            LotType::Mini => 10_000,
            LotType::Micro => 1_000,
        }
    }

    /// Divisor applied to the standard-lot pip value
    pub fn pip_divisor(&self) -> Decimal {
        match self {
            LotType::Standard => Decimal::ONE,
            LotType::Mini => Decimal::TEN,
            LotType::Micro => Decimal::ONE_HUNDRED,
        }
    }

    /// Lowercase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            LotType::Standard => "standard",
            LotType::Mini => "mini",
            LotType::Micro => "micro",
        }
    }
}

impl FromStr for LotType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "standard" => Ok(LotType::Standard),
            "mini" => Ok(LotType::Mini),
            "micro" => Ok(LotType::Micro),
            other => Err(DomainError::InvalidLotType(format!(
                "{}. Expected: standard, mini, micro",
                other
            ))),
        }
    }
}

impl fmt::Display for LotType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// ByLotType
// =============================================================================

/// One value per lot type
///
/// Every calculation that fans out over lot types returns this, so a result
/// always carries exactly `standard`, `mini` and `micro`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByLotType<T> {
    /// Standard lot value
    pub standard: T,
    /// Mini lot value
    pub mini: T,
    /// Micro lot value
    pub micro: T,
}

impl<T> ByLotType<T> {
    /// Build by evaluating `f` for each lot type
    ///
    /// Returns `None` as soon as any lot type yields `None`.
    pub fn try_from_fn<F>(mut f: F) -> Option<Self>
    where
        F: FnMut(LotType) -> Option<T>,
    {
        Some(Self {
            standard: f(LotType::Standard)?,
            mini: f(LotType::Mini)?,
            micro: f(LotType::Micro)?,
        })
    }

    /// Get the value for a lot type
    pub fn get(&self, lot_type: LotType) -> &T {
        match lot_type {
            LotType::Standard => &self.standard,
            LotType::Mini => &self.mini,
            LotType::Micro => &self.micro,
        }
    }

    /// Iterate as `(lot_type, value)` pairs, largest lot first
    pub fn iter(&self) -> impl Iterator<Item = (LotType, &T)> {
        LotType::ALL.into_iter().map(move |lot_type| (lot_type, self.get(lot_type)))
    }
}

// =============================================================================
// TradeDirection
// =============================================================================

/// Direction of the trade
///
/// Parsing is lenient: `"buy"` in any case is `Buy`, every other string is
/// treated as `Sell`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TradeDirection {
    /// Long the base currency
    Buy,
    /// Short the base currency
    Sell,
}

impl TradeDirection {
    /// Lowercase name used on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeDirection::Buy => "buy",
            TradeDirection::Sell => "sell",
        }
    }
}

impl From<&str> for TradeDirection {
    fn from(value: &str) -> Self {
        if value.eq_ignore_ascii_case("buy") {
            TradeDirection::Buy
        } else {
            TradeDirection::Sell
        }
    }
}

impl From<String> for TradeDirection {
    fn from(value: String) -> Self {
        TradeDirection::from(value.as_str())
    }
}

impl From<TradeDirection> for String {
    fn from(value: TradeDirection) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for TradeDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeDirection::Buy => write!(f, "BUY"),
            TradeDirection::Sell => write!(f, "SELL"),
        }
    }
}

// =============================================================================
// Leverage
// =============================================================================

/// Account leverage (e.g., 100 for 1:100)
///
/// # Invariants
/// - Must be > 0
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "Decimal", into = "Decimal")]
pub struct Leverage(Decimal);

impl Leverage {
    /// Create a new Leverage with validation
    ///
    /// # Errors
    /// Returns `DomainError::InvalidLeverage` if value <= 0
    pub fn new(value: Decimal) -> Result<Self, DomainError> {
        if value <= Decimal::ZERO {
            return Err(DomainError::InvalidLeverage(format!(
                "Leverage must be positive, got {}",
                value
            )));
        }
        Ok(Self(value))
    }

    /// Get the underlying Decimal value
    pub fn as_decimal(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Leverage {
    type Error = DomainError;

    fn try_from(value: Decimal) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Leverage> for Decimal {
    fn from(value: Leverage) -> Self {
        value.0
    }
}

impl fmt::Display for Leverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "1:{}", self.0)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    // PairSymbol tests
    #[test]
    fn test_pair_symbol_parse() {
        let symbol = PairSymbol::parse("EUR/USD").unwrap();
        assert_eq!(symbol.base(), "EUR");
        assert_eq!(symbol.quote(), "USD");
        assert_eq!(symbol.as_pair(), "EUR/USD");
        assert_eq!(symbol.to_string(), "EUR/USD");
    }

    #[test]
    fn test_pair_symbol_uppercases() {
        let symbol = PairSymbol::new("xau", "usd").unwrap();
        assert_eq!(symbol.as_pair(), "XAU/USD");
    }

    #[test]
    fn test_pair_symbol_invalid() {
        assert!(PairSymbol::parse("EURUSD").is_err());
        assert!(PairSymbol::parse("/USD").is_err());
        assert!(PairSymbol::parse("EUR/").is_err());
        assert!(PairSymbol::parse("").is_err());
        assert!(matches!(
            PairSymbol::parse("EUR/US1"),
            Err(DomainError::InvalidSymbol(_))
        ));
    }

    #[test]
    fn test_pair_symbol_serde_validates() {
        let symbol: PairSymbol = serde_json::from_str("\"gbp/jpy\"").unwrap();
        assert_eq!(symbol.as_pair(), "GBP/JPY");
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"GBP/JPY\"");

        assert!(serde_json::from_str::<PairSymbol>("\"GBPJPY\"").is_err());
        assert!(serde_json::from_str::<PairSymbol>(r#"{"base":"eur","quote":"usd"}"#).is_err());
    }

    // LotType tests
    #[test]
    fn test_lot_type_units() {
        assert_eq!(LotType::Standard.units(), 100_000);
        assert_eq!(LotType::Mini.units(), 10_000);
        assert_eq!(LotType::Micro.units(), 1_000);
    }

    #[test]
    fn test_lot_type_from_str() {
        assert_eq!("standard".parse::<LotType>().unwrap(), LotType::Standard);
        assert_eq!("Mini".parse::<LotType>().unwrap(), LotType::Mini);
        assert_eq!("MICRO".parse::<LotType>().unwrap(), LotType::Micro);
        assert!(matches!("nano".parse::<LotType>(), Err(DomainError::InvalidLotType(_))));
    }

    #[test]
    fn test_lot_type_serde_lowercase() {
        assert_eq!(serde_json::to_string(&LotType::Mini).unwrap(), "\"mini\"");
        let parsed: LotType = serde_json::from_str("\"micro\"").unwrap();
        assert_eq!(parsed, LotType::Micro);
    }

    // ByLotType tests
    #[test]
    fn test_by_lot_type_short_circuits() {
        let all = ByLotType::try_from_fn(|lot| Some(lot.units()));
        assert_eq!(all.map(|v| v.micro), Some(1_000));

        let none = ByLotType::try_from_fn(|lot| (lot != LotType::Mini).then_some(1));
        assert!(none.is_none());
    }

    #[test]
    fn test_by_lot_type_iter_order() {
        let values = ByLotType::try_from_fn(|lot| Some(lot.units())).unwrap();
        let order: Vec<LotType> = values.iter().map(|(lot, _)| lot).collect();
        assert_eq!(order, vec![LotType::Standard, LotType::Mini, LotType::Micro]);
    }

    // TradeDirection tests
    #[test]
    fn test_trade_direction_parsing() {
        assert_eq!(TradeDirection::from("buy"), TradeDirection::Buy);
        assert_eq!(TradeDirection::from("BUY"), TradeDirection::Buy);
        assert_eq!(TradeDirection::from("Sell"), TradeDirection::Sell);
        // Anything that is not "buy" sells
        assert_eq!(TradeDirection::from("short"), TradeDirection::Sell);
        assert_eq!(TradeDirection::from(""), TradeDirection::Sell);
    }

    #[test]
    fn test_trade_direction_serde() {
        let parsed: TradeDirection = serde_json::from_str("\"Buy\"").unwrap();
        assert_eq!(parsed, TradeDirection::Buy);
        assert_eq!(serde_json::to_string(&TradeDirection::Sell).unwrap(), "\"sell\"");
    }

    // Leverage tests
    #[test]
    fn test_leverage_validation() {
        assert!(Leverage::new(dec!(100)).is_ok());
        assert!(Leverage::new(dec!(0.5)).is_ok());
        assert!(Leverage::new(dec!(0)).is_err());
        assert!(Leverage::new(dec!(-30)).is_err());
    }

    #[test]
    fn test_leverage_display() {
        let leverage = Leverage::new(dec!(500)).unwrap();
        assert_eq!(leverage.to_string(), "1:500");
    }

    #[test]
    fn test_leverage_serde_validates() {
        let leverage: Leverage = serde_json::from_str("\"200\"").unwrap();
        assert_eq!(leverage.as_decimal(), dec!(200));
        assert_eq!(serde_json::to_string(&leverage).unwrap(), "\"200\"");

        assert!(serde_json::from_str::<Leverage>("\"-5\"").is_err());
        assert!(serde_json::from_str::<Leverage>("\"0\"").is_err());
    }
}
