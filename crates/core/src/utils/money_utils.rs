use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::CURRENCY_DECIMAL_PRECISION;

/// Rounds a currency amount to 2 decimal places, half away from zero.
///
/// Every persisted currency figure (payments, totals, shares, expense
/// totals) goes through this; derived read-time projections keep full
/// precision and leave rounding to the display layer.
pub fn round_currency(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(
        CURRENCY_DECIMAL_PRECISION,
        RoundingStrategy::MidpointAwayFromZero,
    )
}
