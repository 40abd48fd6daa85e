use async_trait::async_trait;
use chrono::NaiveDate;

use crate::errors::Result;
use crate::gate::Challenge;
use crate::loans::loans_model::{
    DueDate, Loan, LoanLedgerView, LoanParticipant, LoanSchedule, LoanTerms, MonthSummary,
    Obligation,
};

/// Trait for loan repository operations.
///
/// `insert_loan_with_schedule` is one logical transaction: the loan, its
/// participants, and every obligation row land together or not at all.
#[async_trait]
pub trait LoanRepositoryTrait: Send + Sync {
    fn get_loans(&self) -> Result<Vec<Loan>>;
    fn get_loan(&self, loan_id: &str) -> Result<Loan>;
    fn get_loans_for_participant(&self, user_id: &str) -> Result<Vec<Loan>>;
    fn get_participants(&self, loan_id: &str) -> Result<Vec<LoanParticipant>>;
    fn get_obligations_for_loan(&self, loan_id: &str) -> Result<Vec<Obligation>>;
    fn get_obligations_for_user(&self, user_id: &str) -> Result<Vec<Obligation>>;
    fn get_obligations_for_month(&self, month: u32, year: i32) -> Result<Vec<Obligation>>;
    /// Persists the loan row derived from `terms` and `schedule`, the
    /// participant rows, and the full obligation set. Returns the stored
    /// loan with its assigned id.
    async fn insert_loan_with_schedule(
        &self,
        terms: LoanTerms,
        schedule: LoanSchedule,
    ) -> Result<Loan>;
    /// Flips `paid` for the (user, month, year) obligation. Monotonic:
    /// marking an already-paid row returns it unchanged.
    async fn mark_obligation_paid(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Obligation>;
}

/// Trait for loan service operations.
#[async_trait]
pub trait LoanServiceTrait: Send + Sync {
    async fn create_loan(&self, terms: LoanTerms) -> Result<Loan>;
    fn get_loans(&self) -> Result<Vec<Loan>>;
    fn get_loans_for_participant(&self, user_id: &str) -> Result<Vec<Loan>>;
    fn get_participants(&self, loan_id: &str) -> Result<Vec<LoanParticipant>>;
    /// As-of-now projection for one loan; recomputed on every call.
    fn get_loan_status(&self, loan_id: &str, now: NaiveDate) -> Result<LoanLedgerView>;
    /// The loan's full obligation set, every participant and month.
    fn get_loan_obligations(&self, loan_id: &str) -> Result<Vec<Obligation>>;
    fn list_due_dates(&self, user_id: &str) -> Result<Vec<DueDate>>;
    fn get_month_obligations(&self, month: u32, year: i32) -> Result<Vec<Obligation>>;
    fn get_month_summary(&self, month: u32, year: i32) -> Result<MonthSummary>;
    /// Confirms one participant's payment for a month, gated by the
    /// arithmetic challenge the caller was issued.
    async fn confirm_payment(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<Obligation>;
}
