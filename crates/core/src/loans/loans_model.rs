//! Loans domain models.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::{parse_date_field, parse_decimal_field, parse_u32_field};

/// Domain model representing a shared loan.
///
/// Immutable once created: the derived `monthly_payment` and `total_due`
/// are computed by the schedule builder at creation time and persisted
/// with the loan. Only obligation `paid` flags mutate afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub start_date: NaiveDate,
    pub duration_months: u32,
    pub monthly_insurance: Decimal,
    pub monthly_payment: Decimal,
    pub total_due: Decimal,
}

/// Validated input terms for a new loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTerms {
    pub principal: Decimal,
    pub annual_rate_percent: Decimal,
    pub start_date: NaiveDate,
    pub duration_months: u32,
    pub monthly_insurance: Decimal,
    pub participant_ids: Vec<String>,
}

impl LoanTerms {
    /// Builds loan terms from raw form strings.
    ///
    /// This is the parse boundary: nothing numeric enters the schedule
    /// math without passing through here (or arriving already typed).
    pub fn parse(
        principal: &str,
        annual_rate_percent: &str,
        start_date: &str,
        duration_months: &str,
        monthly_insurance: &str,
        participant_ids: Vec<String>,
    ) -> Result<Self, ValidationError> {
        Ok(LoanTerms {
            principal: parse_decimal_field("principal", principal)?,
            annual_rate_percent: parse_decimal_field("annualRatePercent", annual_rate_percent)?,
            start_date: parse_date_field("startDate", start_date)?,
            duration_months: parse_u32_field("durationMonths", duration_months)?,
            monthly_insurance: parse_decimal_field("monthlyInsurance", monthly_insurance)?,
            participant_ids,
        })
    }
}

/// A user co-signing a loan, with their equal monthly share.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanParticipant {
    pub loan_id: String,
    pub user_id: String,
    pub share: Decimal,
}

/// One participant's scheduled payment for one month of the loan term.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Obligation {
    pub id: String,
    pub loan_id: String,
    pub user_id: String,
    /// Target calendar month, 1-based.
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
    pub paid: bool,
}

/// An obligation produced by the schedule builder, before the loan has
/// an identity in the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledObligation {
    pub user_id: String,
    pub month: u32,
    pub year: i32,
    pub amount: Decimal,
}

/// Output of the schedule builder: the derived loan figures plus the
/// full obligation set (duration × participant count rows).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanSchedule {
    pub monthly_payment: Decimal,
    pub total_due: Decimal,
    pub per_participant_share: Decimal,
    pub obligations: Vec<ScheduledObligation>,
}

/// As-of-now ledger projection for one loan. Derived on every read,
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoanLedgerView {
    pub months_elapsed: u32,
    pub months_paid: u32,
    pub remaining_months: u32,
    pub amount_paid: Decimal,
    pub remaining_amount: Decimal,
    pub interest_paid: Decimal,
    pub principal_paid: Decimal,
    pub remaining_interest: Decimal,
    pub remaining_principal: Decimal,
    /// `months_paid / duration * 100`, for display.
    pub progress_percentage: Decimal,
}

/// Confirmation rollup for one (month, year) across all participants.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub month: u32,
    pub year: i32,
    pub participant_count: usize,
    pub paid_count: usize,
    /// Sum of the amounts whose obligations were explicitly confirmed.
    pub confirmed_total: Decimal,
    pub progress_percentage: Decimal,
}

/// A (month, year) pair a participant has an obligation in.
///
/// Ordering sorts chronologically: by year, then month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub struct DueDate {
    pub year: i32,
    pub month: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn loan_terms_parse_round_trips_form_strings() {
        let terms = LoanTerms::parse(
            "10 000",
            "6",
            "2025-01-15",
            "24",
            "10.00",
            vec!["u1".into(), "u2".into()],
        )
        .unwrap();
        assert_eq!(terms.principal, dec!(10000));
        assert_eq!(terms.duration_months, 24);
        assert_eq!(terms.start_date, NaiveDate::from_ymd_opt(2025, 1, 15).unwrap());
    }

    #[test]
    fn loan_terms_parse_names_the_bad_field() {
        let err = LoanTerms::parse("abc", "6", "2025-01-15", "24", "0", vec!["u1".into()])
            .unwrap_err();
        assert!(err.to_string().contains("principal"));
    }

    #[test]
    fn due_dates_sort_chronologically() {
        let mut dates = vec![
            DueDate { year: 2025, month: 1 },
            DueDate { year: 2024, month: 12 },
            DueDate { year: 2025, month: 3 },
        ];
        dates.sort();
        assert_eq!(
            dates,
            vec![
                DueDate { year: 2024, month: 12 },
                DueDate { year: 2025, month: 1 },
                DueDate { year: 2025, month: 3 },
            ]
        );
    }

    #[test]
    fn ledger_view_serializes_camel_case() {
        let view = LoanLedgerView {
            months_elapsed: 3,
            months_paid: 3,
            remaining_months: 21,
            amount_paid: dec!(1359.63),
            remaining_amount: dec!(9517.41),
            interest_paid: dec!(109.63),
            principal_paid: dec!(1250.00),
            remaining_interest: dec!(767.41),
            remaining_principal: dec!(8750.00),
            progress_percentage: dec!(12.5),
        };
        let json = serde_json::to_value(&view).unwrap();
        assert!(json.get("monthsPaid").is_some());
        assert!(json.get("remainingAmount").is_some());
        assert!(json.get("progressPercentage").is_some());
    }
}
