//! Parse-and-validate boundary for form-sourced values.
//!
//! Every numeric or date string coming from a form crosses this boundary
//! before it reaches any ledger math, so malformed input surfaces as a
//! [`ValidationError`] instead of propagating through calculations.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Parses a currency or rate field from a form string.
///
/// Whitespace (including the non-breaking spaces some locales use as
/// thousand separators) is stripped before parsing. An empty field is a
/// `MissingField` error; anything non-numeric names the offending field.
pub fn parse_decimal_field(field: &str, raw: &str) -> Result<Decimal, ValidationError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    Decimal::from_str(&cleaned)
        .map_err(|e| ValidationError::field(field, format!("not a number: {e}")))
}

/// Parses a whole-number field (durations, quantities).
pub fn parse_u32_field(field: &str, raw: &str) -> Result<u32, ValidationError> {
    let cleaned: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    cleaned
        .parse::<u32>()
        .map_err(|e| ValidationError::field(field, format!("not a whole number: {e}")))
}

/// Parses an ISO `YYYY-MM-DD` date field, the format date inputs emit.
pub fn parse_date_field(field: &str, raw: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField(field.to_string()));
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map_err(|e| ValidationError::field(field, format!("not a date: {e}")))
}
