//! Lotsize Domain Layer
//!
//! Pure domain logic with zero I/O dependencies.
//! Contains value objects and the static currency reference table.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Public modules
pub mod currency;
pub mod value_objects;

// Re-export commonly used types
pub use currency::{
    default_entry_price, get_all_pairs, get_currency_pairs_by_category, get_pair_info,
    get_pip_value, get_pip_value_by_name, pairs_in_display_order, CurrencyPairInfo,
};
pub use value_objects::{
    ByLotType, DomainError, Leverage, LotType, PairCategory, PairSymbol, TradeDirection,
};
