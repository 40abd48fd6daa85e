//! Fixed-rate installment schedule generation.
//!
//! Runs exactly once, at loan creation. Produces the fixed monthly
//! payment (annuity formula plus insurance), the total amount due over
//! the term, the equal per-participant share, and one obligation row per
//! participant per month. Pure computation; persisting the result is the
//! service's job.

use rust_decimal::{Decimal, MathematicalOps};

use crate::errors::{Result, ValidationError};
use crate::loans::loans_model::{LoanSchedule, LoanTerms, ScheduledObligation};
use crate::utils::{month_year_after, round_currency};

/// Builds the full payment schedule for the given loan terms.
///
/// Rounding policy: all currency outputs are rounded to 2 decimals, half
/// away from zero, independently. No remainder redistribution is
/// performed, so `per_participant_share * participant_count` may drift
/// from `monthly_payment` by up to `count * 0.005` currency units. That
/// drift is accepted and matches the persisted data model.
pub fn build_schedule(terms: &LoanTerms) -> Result<LoanSchedule> {
    validate_terms(terms)?;

    let duration = Decimal::from(terms.duration_months);
    let monthly_rate = terms.annual_rate_percent / Decimal::ONE_HUNDRED / Decimal::from(12);

    // The annuity formula divides by 1 - (1 + r)^-n, which is undefined
    // at r = 0. A zero-rate loan amortizes straight-line instead.
    let base_payment = if monthly_rate.is_zero() {
        terms.principal / duration
    } else {
        let growth = (Decimal::ONE + monthly_rate).powi(terms.duration_months as i64);
        terms.principal * monthly_rate / (Decimal::ONE - Decimal::ONE / growth)
    };

    let monthly_payment = round_currency(base_payment + terms.monthly_insurance);
    let total_due = round_currency(monthly_payment * duration);
    let participant_count = Decimal::from(terms.participant_ids.len() as u64);
    let per_participant_share = round_currency(monthly_payment / participant_count);

    let mut obligations =
        Vec::with_capacity(terms.duration_months as usize * terms.participant_ids.len());
    for i in 0..terms.duration_months {
        let (month, year) = month_year_after(terms.start_date, i);
        for user_id in &terms.participant_ids {
            obligations.push(ScheduledObligation {
                user_id: user_id.clone(),
                month,
                year,
                amount: per_participant_share,
            });
        }
    }

    Ok(LoanSchedule {
        monthly_payment,
        total_due,
        per_participant_share,
        obligations,
    })
}

fn validate_terms(terms: &LoanTerms) -> Result<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(ValidationError::field("principal", "must be greater than zero").into());
    }
    if terms.duration_months < 1 {
        return Err(ValidationError::field("durationMonths", "must be at least one month").into());
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(ValidationError::field("annualRatePercent", "must not be negative").into());
    }
    if terms.monthly_insurance < Decimal::ZERO {
        return Err(ValidationError::field("monthlyInsurance", "must not be negative").into());
    }
    if terms.participant_ids.is_empty() {
        return Err(
            ValidationError::field("participantIds", "at least one participant is required")
                .into(),
        );
    }
    Ok(())
}
