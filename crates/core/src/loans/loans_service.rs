use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, info};

use crate::errors::Result;
use crate::gate::Challenge;
use crate::loans::ledger_projector::{due_dates, month_summary, project_status};
use crate::loans::loans_model::{
    DueDate, Loan, LoanLedgerView, LoanParticipant, LoanTerms, MonthSummary, Obligation,
};
use crate::loans::loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
use crate::loans::schedule_builder::build_schedule;

/// Orchestrates loan creation, ledger reads, and payment confirmation
/// over the repository.
pub struct LoanService {
    repository: Arc<dyn LoanRepositoryTrait>,
}

impl LoanService {
    pub fn new(repository: Arc<dyn LoanRepositoryTrait>) -> Self {
        LoanService { repository }
    }
}

#[async_trait]
impl LoanServiceTrait for LoanService {
    /// Validates the terms, derives the schedule, and persists the loan
    /// with all its obligation rows in one logical transaction.
    async fn create_loan(&self, terms: LoanTerms) -> Result<Loan> {
        let schedule = build_schedule(&terms)?;
        info!(
            "Creating loan: principal {}, {} months, {} participants, monthly payment {}",
            terms.principal,
            terms.duration_months,
            terms.participant_ids.len(),
            schedule.monthly_payment
        );
        self.repository
            .insert_loan_with_schedule(terms, schedule)
            .await
    }

    fn get_loans(&self) -> Result<Vec<Loan>> {
        self.repository.get_loans()
    }

    fn get_loans_for_participant(&self, user_id: &str) -> Result<Vec<Loan>> {
        self.repository.get_loans_for_participant(user_id)
    }

    fn get_participants(&self, loan_id: &str) -> Result<Vec<LoanParticipant>> {
        self.repository.get_participants(loan_id)
    }

    fn get_loan_status(&self, loan_id: &str, now: NaiveDate) -> Result<LoanLedgerView> {
        let loan = self.repository.get_loan(loan_id)?;
        project_status(&loan, now)
    }

    fn get_loan_obligations(&self, loan_id: &str) -> Result<Vec<Obligation>> {
        self.repository.get_obligations_for_loan(loan_id)
    }

    fn list_due_dates(&self, user_id: &str) -> Result<Vec<DueDate>> {
        let obligations = self.repository.get_obligations_for_user(user_id)?;
        Ok(due_dates(&obligations))
    }

    fn get_month_obligations(&self, month: u32, year: i32) -> Result<Vec<Obligation>> {
        self.repository.get_obligations_for_month(month, year)
    }

    fn get_month_summary(&self, month: u32, year: i32) -> Result<MonthSummary> {
        let obligations = self.repository.get_obligations_for_month(month, year)?;
        Ok(month_summary(month, year, &obligations))
    }

    /// Marks one obligation paid once the challenge gate passes.
    ///
    /// A wrong answer changes nothing and the caller may retry with a
    /// fresh challenge. Confirming an already-paid obligation is a no-op
    /// returning the unchanged row; the flag only ever moves to `true`.
    async fn confirm_payment(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<Obligation> {
        challenge.verify(answer)?;
        debug!("Confirming payment for {user_id} on {month}/{year}");
        self.repository
            .mark_obligation_paid(user_id, month, year)
            .await
    }
}
