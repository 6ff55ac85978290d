//! Currency Reference Table
//!
//! Static, process-wide table of per-pair constants: pip value of one
//! standard lot (in USD), quote precision and category.
//!
//! The table is read-only. Lookups for unknown symbols return `None`
//! rather than an error: an unknown pair means "not computable".

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::value_objects::{LotType, PairCategory};

/// Reference data for one supported pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyPairInfo {
    /// USD value of one pip on a 100,000-unit position
    pub pip_value_per_standard_lot: Decimal,
    /// Decimal places used to quote the price
    pub decimals: u32,
    /// Picker grouping
    pub category: PairCategory,
}

const fn info(pip_value: Decimal, decimals: u32, category: PairCategory) -> CurrencyPairInfo {
    CurrencyPairInfo {
        pip_value_per_standard_lot: pip_value,
        decimals,
        category,
    }
}

/// Supported pairs, in declaration order
pub static CURRENCY_PAIRS: [(&str, CurrencyPairInfo); 14] = [
    ("EUR/USD", info(dec!(10), 5, PairCategory::Major)),
    ("GBP/USD", info(dec!(10), 5, PairCategory::Major)),
    ("USD/JPY", info(dec!(9.13), 3, PairCategory::Major)),
    ("AUD/USD", info(dec!(10), 5, PairCategory::Major)),
    ("USD/CAD", info(dec!(7.96), 5, PairCategory::Major)),
    ("USD/CHF", info(dec!(10.27), 5, PairCategory::Major)),
    ("NZD/USD", info(dec!(10), 5, PairCategory::Major)),
    ("EUR/JPY", info(dec!(9.13), 3, PairCategory::Cross)),
    ("GBP/JPY", info(dec!(9.13), 3, PairCategory::Cross)),
    ("EUR/GBP", info(dec!(10), 5, PairCategory::Cross)),
    ("AUD/JPY", info(dec!(9.13), 3, PairCategory::Cross)),
    ("GBP/CAD", info(dec!(7.96), 5, PairCategory::Cross)),
    ("XAU/USD", info(dec!(1), 2, PairCategory::Commodity)),
    ("XAG/USD", info(dec!(0.5), 2, PairCategory::Commodity)),
];

/// All pair symbols in declaration order
pub fn get_all_pairs() -> Vec<&'static str> {
    CURRENCY_PAIRS.iter().map(|(pair, _)| *pair).collect()
}

/// Reference data for a pair, `None` if the pair is not supported
pub fn get_pair_info(pair: &str) -> Option<&'static CurrencyPairInfo> {
    CURRENCY_PAIRS
        .iter()
        .find(|(symbol, _)| *symbol == pair)
        .map(|(_, info)| info)
}

/// Pairs grouped by category
///
/// Single pass in declaration order. Every category appears, in display
/// order, even when it has no members.
pub fn get_currency_pairs_by_category() -> Vec<(PairCategory, Vec<&'static str>)> {
    let mut groups: Vec<(PairCategory, Vec<&'static str>)> =
        PairCategory::ALL.iter().map(|category| (*category, Vec::new())).collect();

    for (pair, info) in CURRENCY_PAIRS.iter() {
        if let Some((_, members)) =
            groups.iter_mut().find(|(category, _)| *category == info.category)
        {
            members.push(*pair);
        }
    }

    groups
}

/// Pairs flattened in picker order (Major, Cross, Commodity, Exotic)
pub fn pairs_in_display_order() -> Vec<&'static str> {
    get_currency_pairs_by_category()
        .into_iter()
        .flat_map(|(_, members)| members)
        .collect()
}

/// Pip value of one lot of `lot_type`, `None` if the pair is not supported
///
/// Mini is a tenth and micro a hundredth of the standard-lot value.
pub fn get_pip_value(pair: &str, lot_type: LotType) -> Option<Decimal> {
    let info = get_pair_info(pair)?;
    Some(info.pip_value_per_standard_lot / lot_type.pip_divisor())
}

/// String-typed variant of [`get_pip_value`]
///
/// Only the exact wire names `standard`, `mini` and `micro` are accepted.
/// Anything else, including other casings, is "not computable" and yields
/// `None` like an unknown pair does.
pub fn get_pip_value_by_name(pair: &str, lot_type: &str) -> Option<Decimal> {
    let lot_type = LotType::ALL.into_iter().find(|known| known.as_str() == lot_type)?;
    get_pip_value(pair, lot_type)
}

/// Suggested entry price to pre-fill for a pair
pub fn default_entry_price(pair: &str) -> Decimal {
    match pair {
        "EUR/USD" => dec!(1.10000),
        "XAU/USD" => dec!(1800.0),
        p if p.starts_with("USD/JPY") => dec!(110.0),
        _ => dec!(1.0000),
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_symbols_are_unique() {
        let pairs = get_all_pairs();
        let unique: HashSet<&str> = pairs.iter().copied().collect();
        assert_eq!(unique.len(), pairs.len());
    }

    #[test]
    fn test_reference_invariants() {
        for (pair, info) in CURRENCY_PAIRS.iter() {
            assert!(info.pip_value_per_standard_lot > Decimal::ZERO, "{pair}");
            assert!([2, 3, 5].contains(&info.decimals), "{pair}");
        }
    }

    #[test]
    fn test_get_all_pairs_declaration_order() {
        let pairs = get_all_pairs();
        assert_eq!(pairs.len(), 14);
        assert_eq!(pairs[0], "EUR/USD");
        assert_eq!(pairs[2], "USD/JPY");
        assert_eq!(pairs[13], "XAG/USD");
    }

    #[test]
    fn test_get_pair_info() {
        let info = get_pair_info("USD/JPY").unwrap();
        assert_eq!(info.pip_value_per_standard_lot, dec!(9.13));
        assert_eq!(info.decimals, 3);
        assert_eq!(info.category, PairCategory::Major);

        assert!(get_pair_info("BTC/USD").is_none());
        assert!(get_pair_info("eur/usd").is_none());
    }

    #[test]
    fn test_by_category_keeps_empty_exotic() {
        let groups = get_currency_pairs_by_category();
        let names: Vec<PairCategory> = groups.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, PairCategory::ALL.to_vec());

        assert_eq!(groups[0].1.len(), 7);
        assert_eq!(groups[1].1, vec!["EUR/JPY", "GBP/JPY", "EUR/GBP", "AUD/JPY", "GBP/CAD"]);
        assert_eq!(groups[2].1, vec!["XAU/USD", "XAG/USD"]);
        assert!(groups[3].1.is_empty());
    }

    #[test]
    fn test_display_order_matches_dataset() {
        // Categories are declared contiguously, so the picker order equals declaration order
        assert_eq!(pairs_in_display_order(), get_all_pairs());
    }

    #[test]
    fn test_pip_value_scaling() {
        for pair in get_all_pairs() {
            let standard = get_pip_value(pair, LotType::Standard).unwrap();
            assert_eq!(get_pip_value(pair, LotType::Mini).unwrap(), standard / dec!(10));
            assert_eq!(get_pip_value(pair, LotType::Micro).unwrap(), standard / dec!(100));
        }
        assert_eq!(get_pip_value("USD/JPY", LotType::Micro), Some(dec!(0.0913)));
    }

    #[test]
    fn test_pip_value_unknown_inputs() {
        assert_eq!(get_pip_value("ABC/XYZ", LotType::Standard), None);
        assert_eq!(get_pip_value_by_name("EUR/USD", "nano"), None);
        assert_eq!(get_pip_value_by_name("EUR/USD", "Standard"), None);
        assert_eq!(get_pip_value_by_name("EUR/USD", "MINI"), None);
        assert_eq!(get_pip_value_by_name("ABC/XYZ", "mini"), None);
        assert_eq!(get_pip_value_by_name("XAG/USD", "mini"), Some(dec!(0.05)));
    }

    #[test]
    fn test_default_entry_price() {
        assert_eq!(default_entry_price("EUR/USD"), dec!(1.1));
        assert_eq!(default_entry_price("XAU/USD"), dec!(1800));
        assert_eq!(default_entry_price("USD/JPY"), dec!(110));
        assert_eq!(default_entry_price("GBP/JPY"), dec!(1));
        assert_eq!(default_entry_price("UNKNOWN"), dec!(1));
    }
}
