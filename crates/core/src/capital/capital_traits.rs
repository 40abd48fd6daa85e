use async_trait::async_trait;

use crate::capital::capital_model::{CapitalContribution, CapitalLedger, NewCapitalContribution};
use crate::errors::Result;
use crate::gate::Challenge;

/// Trait for capital repository operations.
#[async_trait]
pub trait CapitalRepositoryTrait: Send + Sync {
    /// Contributions, newest first.
    fn list_contributions(&self) -> Result<Vec<CapitalContribution>>;
    async fn add_contribution(
        &self,
        new_contribution: NewCapitalContribution,
    ) -> Result<CapitalContribution>;
    async fn delete_contribution(&self, contribution_id: &str) -> Result<()>;
}

/// Trait for capital service operations.
#[async_trait]
pub trait CapitalServiceTrait: Send + Sync {
    fn list_contributions(&self) -> Result<Vec<CapitalContribution>>;
    async fn add_contribution(
        &self,
        new_contribution: NewCapitalContribution,
    ) -> Result<CapitalContribution>;
    /// Challenge-gated delete.
    async fn delete_contribution(
        &self,
        contribution_id: &str,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<()>;
    /// Total capital minus all project expenses, as of the stored data.
    fn get_capital_ledger(&self) -> Result<CapitalLedger>;
}
