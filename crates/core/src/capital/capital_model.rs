//! Capital domain models.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::parse_decimal_field;

/// Domain model representing one capital contribution.
///
/// Contributions are only ever aggregated, never amortized.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalContribution {
    pub id: String,
    pub amount: Decimal,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

/// Input model for recording a capital contribution.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCapitalContribution {
    pub amount: Decimal,
    pub source: String,
}

impl NewCapitalContribution {
    /// Builds a contribution input from raw form strings.
    pub fn parse(amount: &str, source: &str) -> Result<Self, ValidationError> {
        if source.trim().is_empty() {
            return Err(ValidationError::MissingField("source".to_string()));
        }
        Ok(NewCapitalContribution {
            amount: parse_decimal_field("amount", amount)?,
            source: source.trim().to_string(),
        })
    }
}

/// Derived global capital ledger: everything raised minus everything
/// spent across all projects. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CapitalLedger {
    pub total_capital: Decimal,
    pub total_expenses: Decimal,
    /// Signed; negative means spending has outrun the raised capital.
    pub remaining_capital: Decimal,
}
