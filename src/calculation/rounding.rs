//! Currency and hour rounding.

use rust_decimal::{Decimal, RoundingStrategy};

/// Number of decimal places kept for money and hours.
pub const CURRENCY_DECIMAL_PLACES: u32 = 2;

/// Rounds to 2 decimal places, midpoint away from zero.
///
/// # Examples
///
/// ```
/// use hris_engine::calculation::round_currency;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_currency(Decimal::from_str("10.005").unwrap()), Decimal::from_str("10.01").unwrap());
/// assert_eq!(round_currency(Decimal::from_str("10.004").unwrap()), Decimal::from_str("10.00").unwrap());
/// ```
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(CURRENCY_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}
