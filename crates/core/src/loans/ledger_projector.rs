//! Read-time ledger projection.
//!
//! Everything here is derived from "now" and already-fetched rows on
//! every read, so displayed status always reflects the current date
//! without a background job. Nothing in this module mutates state.
//!
//! The projection (how many installments *should* be paid by now) and the
//! per-obligation `paid` flags (what was *actually* confirmed) are two
//! independent signals and are surfaced separately.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::loans::loans_model::{DueDate, Loan, LoanLedgerView, MonthSummary, Obligation};
use crate::utils::whole_months_between;

/// Projects a loan's amortization status as of `now`.
///
/// Month counting uses the canonical whole-calendar-month rule: one
/// installment is due in the start month, plus one per elapsed calendar
/// month, capped at the term. The interest/principal split is the
/// straight-line allocation (total interest spread evenly over the
/// term), an intentional simplification of a true amortization table.
pub fn project_status(loan: &Loan, now: NaiveDate) -> Result<LoanLedgerView> {
    if loan.duration_months == 0 {
        return Err(ValidationError::field("durationMonths", "must be at least one month").into());
    }
    let duration = Decimal::from(loan.duration_months);

    let months_elapsed = whole_months_between(loan.start_date, now);
    let months_paid = months_elapsed.min(loan.duration_months);
    let paid = Decimal::from(months_paid);

    let amount_paid = paid * loan.monthly_payment;
    let remaining_amount = (loan.total_due - amount_paid).max(Decimal::ZERO);
    let remaining_months = loan.duration_months - months_paid;

    let total_interest = loan.total_due - loan.principal;
    let monthly_interest = total_interest / duration;
    let interest_paid = monthly_interest * paid;
    let principal_paid = amount_paid - interest_paid;
    let remaining_interest = total_interest - interest_paid;
    let remaining_principal = remaining_amount - remaining_interest;

    Ok(LoanLedgerView {
        months_elapsed,
        months_paid,
        remaining_months,
        amount_paid,
        remaining_amount,
        interest_paid,
        principal_paid,
        remaining_interest,
        remaining_principal,
        progress_percentage: paid / duration * Decimal::ONE_HUNDRED,
    })
}

/// Rolls up explicit payment confirmations for one (month, year).
///
/// `obligations` must already be filtered to that month; the summary
/// counts the confirmed rows and sums their amounts.
pub fn month_summary(month: u32, year: i32, obligations: &[Obligation]) -> MonthSummary {
    let participant_count = obligations.len();
    let paid: Vec<&Obligation> = obligations.iter().filter(|o| o.paid).collect();
    let confirmed_total = paid.iter().map(|o| o.amount).sum();
    let progress_percentage = if participant_count == 0 {
        Decimal::ZERO
    } else {
        Decimal::from(paid.len() as u64) / Decimal::from(participant_count as u64)
            * Decimal::ONE_HUNDRED
    };

    MonthSummary {
        month,
        year,
        participant_count,
        paid_count: paid.len(),
        confirmed_total,
        progress_percentage,
    }
}

/// Unique (month, year) pairs across a set of obligations, sorted
/// chronologically.
pub fn due_dates(obligations: &[Obligation]) -> Vec<DueDate> {
    let unique: BTreeSet<DueDate> = obligations
        .iter()
        .map(|o| DueDate {
            year: o.year,
            month: o.month,
        })
        .collect();
    unique.into_iter().collect()
}
