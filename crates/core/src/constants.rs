/// Decimal precision for persisted currency amounts.
pub const CURRENCY_DECIMAL_PRECISION: u32 = 2;

/// Inclusive operand range for the arithmetic confirmation challenge.
pub const CHALLENGE_OPERAND_MIN: i64 = 1;
pub const CHALLENGE_OPERAND_MAX: i64 = 10;
