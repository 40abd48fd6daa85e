use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use hearth_core::capital::{CapitalContribution, CapitalRepositoryTrait, NewCapitalContribution};
use hearth_core::errors::StoreError;
use hearth_core::Result;

/// In-memory capital contribution store.
pub struct CapitalRepository {
    contributions: RwLock<Vec<CapitalContribution>>,
}

impl CapitalRepository {
    pub fn new() -> Self {
        CapitalRepository {
            contributions: RwLock::new(Vec::new()),
        }
    }
}

impl Default for CapitalRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CapitalRepositoryTrait for CapitalRepository {
    fn list_contributions(&self) -> Result<Vec<CapitalContribution>> {
        let contributions = self
            .contributions
            .read()
            .map_err(|e| StoreError::Internal(format!("Capital table lock poisoned: {e}")))?;
        let mut rows = contributions.clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn add_contribution(
        &self,
        new_contribution: NewCapitalContribution,
    ) -> Result<CapitalContribution> {
        let contribution = CapitalContribution {
            id: Uuid::new_v4().to_string(),
            amount: new_contribution.amount,
            source: new_contribution.source,
            created_at: Utc::now(),
        };
        self.contributions
            .write()
            .map_err(|e| StoreError::Internal(format!("Capital table lock poisoned: {e}")))?
            .push(contribution.clone());
        Ok(contribution)
    }

    async fn delete_contribution(&self, contribution_id: &str) -> Result<()> {
        let mut contributions = self
            .contributions
            .write()
            .map_err(|e| StoreError::Internal(format!("Capital table lock poisoned: {e}")))?;
        let before = contributions.len();
        contributions.retain(|c| c.id != contribution_id);
        if contributions.len() == before {
            return Err(
                StoreError::NotFound(format!("Contribution {contribution_id} not found")).into(),
            );
        }
        Ok(())
    }
}
