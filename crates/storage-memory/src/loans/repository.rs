use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use hearth_core::errors::StoreError;
use hearth_core::loans::{
    Loan, LoanParticipant, LoanRepositoryTrait, LoanSchedule, LoanTerms, Obligation,
};
use hearth_core::Result;

#[derive(Default)]
struct LoanTables {
    loans: Vec<Loan>,
    participants: Vec<LoanParticipant>,
    obligations: Vec<Obligation>,
}

/// In-memory loan store. One lock guards all three tables so the
/// multi-row schedule insert is observed all-or-nothing.
pub struct LoanRepository {
    tables: RwLock<LoanTables>,
}

impl LoanRepository {
    pub fn new() -> Self {
        LoanRepository {
            tables: RwLock::new(LoanTables::default()),
        }
    }

    fn read_tables(&self) -> Result<std::sync::RwLockReadGuard<'_, LoanTables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::Internal(format!("Loan tables lock poisoned: {e}")).into())
    }

    fn write_tables(&self) -> Result<std::sync::RwLockWriteGuard<'_, LoanTables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::Internal(format!("Loan tables lock poisoned: {e}")).into())
    }
}

impl Default for LoanRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    fn get_loans(&self) -> Result<Vec<Loan>> {
        Ok(self.read_tables()?.loans.clone())
    }

    fn get_loan(&self, loan_id: &str) -> Result<Loan> {
        self.read_tables()?
            .loans
            .iter()
            .find(|l| l.id == loan_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Loan {loan_id} not found")).into())
    }

    fn get_loans_for_participant(&self, user_id: &str) -> Result<Vec<Loan>> {
        let tables = self.read_tables()?;
        let loan_ids: Vec<&str> = tables
            .participants
            .iter()
            .filter(|p| p.user_id == user_id)
            .map(|p| p.loan_id.as_str())
            .collect();
        Ok(tables
            .loans
            .iter()
            .filter(|l| loan_ids.contains(&l.id.as_str()))
            .cloned()
            .collect())
    }

    fn get_participants(&self, loan_id: &str) -> Result<Vec<LoanParticipant>> {
        Ok(self
            .read_tables()?
            .participants
            .iter()
            .filter(|p| p.loan_id == loan_id)
            .cloned()
            .collect())
    }

    fn get_obligations_for_loan(&self, loan_id: &str) -> Result<Vec<Obligation>> {
        Ok(self
            .read_tables()?
            .obligations
            .iter()
            .filter(|o| o.loan_id == loan_id)
            .cloned()
            .collect())
    }

    fn get_obligations_for_user(&self, user_id: &str) -> Result<Vec<Obligation>> {
        Ok(self
            .read_tables()?
            .obligations
            .iter()
            .filter(|o| o.user_id == user_id)
            .cloned()
            .collect())
    }

    fn get_obligations_for_month(&self, month: u32, year: i32) -> Result<Vec<Obligation>> {
        Ok(self
            .read_tables()?
            .obligations
            .iter()
            .filter(|o| o.month == month && o.year == year)
            .cloned()
            .collect())
    }

    async fn insert_loan_with_schedule(
        &self,
        terms: LoanTerms,
        schedule: LoanSchedule,
    ) -> Result<Loan> {
        let loan = Loan {
            id: Uuid::new_v4().to_string(),
            principal: terms.principal,
            annual_rate_percent: terms.annual_rate_percent,
            start_date: terms.start_date,
            duration_months: terms.duration_months,
            monthly_insurance: terms.monthly_insurance,
            monthly_payment: schedule.monthly_payment,
            total_due: schedule.total_due,
        };

        let participants: Vec<LoanParticipant> = terms
            .participant_ids
            .iter()
            .map(|user_id| LoanParticipant {
                loan_id: loan.id.clone(),
                user_id: user_id.clone(),
                share: schedule.per_participant_share,
            })
            .collect();

        let obligations: Vec<Obligation> = schedule
            .obligations
            .into_iter()
            .map(|scheduled| Obligation {
                id: Uuid::new_v4().to_string(),
                loan_id: loan.id.clone(),
                user_id: scheduled.user_id,
                month: scheduled.month,
                year: scheduled.year,
                amount: scheduled.amount,
                paid: false,
            })
            .collect();

        let mut tables = self.write_tables()?;
        debug!(
            "Inserting loan {} with {} participants and {} obligation rows",
            loan.id,
            participants.len(),
            obligations.len()
        );
        tables.loans.push(loan.clone());
        tables.participants.extend(participants);
        tables.obligations.extend(obligations);
        Ok(loan)
    }

    async fn mark_obligation_paid(
        &self,
        user_id: &str,
        month: u32,
        year: i32,
    ) -> Result<Obligation> {
        let mut tables = self.write_tables()?;
        let obligation = tables
            .obligations
            .iter_mut()
            .find(|o| o.user_id == user_id && o.month == month && o.year == year)
            .ok_or_else(|| {
                StoreError::NotFound(format!(
                    "No obligation for user {user_id} in {month}/{year}"
                ))
            })?;
        obligation.paid = true;
        debug!("Marked obligation {} paid", obligation.id);
        Ok(obligation.clone())
    }
}
