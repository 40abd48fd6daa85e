use std::sync::Arc;

use async_trait::async_trait;
use log::info;
use rust_decimal::Decimal;

use crate::capital::capital_model::{CapitalContribution, CapitalLedger, NewCapitalContribution};
use crate::capital::capital_traits::{CapitalRepositoryTrait, CapitalServiceTrait};
use crate::errors::{Result, ValidationError};
use crate::gate::Challenge;
use crate::projects::ProjectRepositoryTrait;

/// Orchestrates capital contributions and the global capital ledger.
///
/// The ledger spans domains: it nets the raised capital against every
/// project's expenses, so the service reads through the project
/// repository as well.
pub struct CapitalService {
    capital_repository: Arc<dyn CapitalRepositoryTrait>,
    project_repository: Arc<dyn ProjectRepositoryTrait>,
}

impl CapitalService {
    pub fn new(
        capital_repository: Arc<dyn CapitalRepositoryTrait>,
        project_repository: Arc<dyn ProjectRepositoryTrait>,
    ) -> Self {
        CapitalService {
            capital_repository,
            project_repository,
        }
    }
}

#[async_trait]
impl CapitalServiceTrait for CapitalService {
    fn list_contributions(&self) -> Result<Vec<CapitalContribution>> {
        self.capital_repository.list_contributions()
    }

    async fn add_contribution(
        &self,
        new_contribution: NewCapitalContribution,
    ) -> Result<CapitalContribution> {
        if new_contribution.amount <= Decimal::ZERO {
            return Err(ValidationError::field("amount", "must be greater than zero").into());
        }
        info!(
            "Recording capital contribution of {} from '{}'",
            new_contribution.amount, new_contribution.source
        );
        self.capital_repository
            .add_contribution(new_contribution)
            .await
    }

    async fn delete_contribution(
        &self,
        contribution_id: &str,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<()> {
        challenge.verify(answer)?;
        self.capital_repository
            .delete_contribution(contribution_id)
            .await
    }

    fn get_capital_ledger(&self) -> Result<CapitalLedger> {
        let total_capital: Decimal = self
            .capital_repository
            .list_contributions()?
            .iter()
            .map(|c| c.amount)
            .sum();
        let total_expenses: Decimal = self
            .project_repository
            .get_all_expenses()?
            .iter()
            .map(|e| e.total)
            .sum();
        Ok(CapitalLedger {
            total_capital,
            total_expenses,
            remaining_capital: total_capital - total_expenses,
        })
    }
}
