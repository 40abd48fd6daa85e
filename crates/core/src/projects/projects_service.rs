use std::sync::Arc;

use async_trait::async_trait;
use log::{info, warn};
use rust_decimal::Decimal;

use crate::errors::{Result, ValidationError};
use crate::files::FileStoreTrait;
use crate::gate::Challenge;
use crate::projects::projects_model::{
    Expense, ExpenseUpdate, NewExpense, NewProject, Project, ProjectBudget, ProjectOverview,
    ProjectUpdate, Task,
};
use crate::projects::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::utils::{days_between, round_currency};

/// Orchestrates project, task, and expense lifecycles over the
/// repository and the receipt file store.
pub struct ProjectService {
    repository: Arc<dyn ProjectRepositoryTrait>,
    file_store: Arc<dyn FileStoreTrait>,
}

impl ProjectService {
    pub fn new(
        repository: Arc<dyn ProjectRepositoryTrait>,
        file_store: Arc<dyn FileStoreTrait>,
    ) -> Self {
        ProjectService {
            repository,
            file_store,
        }
    }

    fn validate_dates(
        start_date: chrono::NaiveDate,
        end_date: chrono::NaiveDate,
        estimated_cost: Decimal,
    ) -> Result<()> {
        if end_date < start_date {
            return Err(
                ValidationError::field("endDate", "must not be before the start date").into(),
            );
        }
        if estimated_cost < Decimal::ZERO {
            return Err(ValidationError::field("estimatedCost", "must not be negative").into());
        }
        Ok(())
    }

    fn validate_expense(unit_price: Decimal, quantity: u32) -> Result<()> {
        if unit_price < Decimal::ZERO {
            return Err(ValidationError::field("unitPrice", "must not be negative").into());
        }
        if quantity == 0 {
            return Err(ValidationError::field("quantity", "must be at least one").into());
        }
        Ok(())
    }

    fn budget_for(&self, project: &Project) -> Result<ProjectBudget> {
        let total_expenses: Decimal = self
            .repository
            .get_expenses_for_project(&project.id)?
            .iter()
            .map(|e| e.total)
            .sum();
        Ok(ProjectBudget {
            project_id: project.id.clone(),
            estimated_cost: project.estimated_cost,
            total_expenses,
            remaining_budget: project.estimated_cost - total_expenses,
        })
    }
}

#[async_trait]
impl ProjectServiceTrait for ProjectService {
    fn get_projects(&self) -> Result<Vec<Project>> {
        self.repository.get_projects()
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.repository.get_project(project_id)
    }

    async fn create_project(&self, new_project: NewProject) -> Result<Project> {
        Self::validate_dates(
            new_project.start_date,
            new_project.end_date,
            new_project.estimated_cost,
        )?;
        let project = Project {
            // The store assigns the id on insert.
            id: String::new(),
            title: new_project.title,
            start_date: new_project.start_date,
            end_date: new_project.end_date,
            duration_days: days_between(new_project.start_date, new_project.end_date),
            estimated_cost: new_project.estimated_cost,
        };
        info!("Creating project '{}'", project.title);
        self.repository
            .create_project(project, new_project.task_titles)
            .await
    }

    async fn update_project(&self, update: ProjectUpdate) -> Result<Project> {
        Self::validate_dates(update.start_date, update.end_date, update.estimated_cost)?;
        let project = Project {
            id: update.id.clone(),
            title: update.title,
            start_date: update.start_date,
            end_date: update.end_date,
            duration_days: days_between(update.start_date, update.end_date),
            estimated_cost: update.estimated_cost,
        };
        let tasks = update
            .tasks
            .into_iter()
            .map(|t| Task {
                id: t.id.unwrap_or_default(),
                project_id: update.id.clone(),
                title: t.title,
                done: t.done,
            })
            .collect();
        self.repository.update_project(project, tasks).await
    }

    async fn delete_project(
        &self,
        project_id: &str,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<()> {
        challenge.verify(answer)?;
        let deleted_expenses = self.repository.delete_project(project_id).await?;
        info!(
            "Deleted project {project_id} with {} expenses",
            deleted_expenses.len()
        );
        // The rows are gone; losing a receipt file here only leaves an
        // orphan in the object store.
        for expense in deleted_expenses {
            if let Some(url) = expense.file_url {
                if let Err(e) = self.file_store.delete(&url).await {
                    warn!("Failed to delete receipt file {url}: {e}");
                }
            }
        }
        Ok(())
    }

    fn get_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        self.repository.get_tasks(project_id)
    }

    async fn set_task_done(&self, task_id: &str, done: bool) -> Result<Task> {
        self.repository.set_task_done(task_id, done).await
    }

    fn get_expenses_for_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        self.repository.get_expenses_for_project(project_id)
    }

    async fn add_expense(
        &self,
        new_expense: NewExpense,
        receipt: Option<(String, Vec<u8>)>,
    ) -> Result<Expense> {
        Self::validate_expense(new_expense.unit_price, new_expense.quantity)?;
        // Referenced project must exist before anything is written.
        self.repository.get_project(&new_expense.project_id)?;

        let file_url = match receipt {
            Some((file_name, bytes)) => Some(self.file_store.upload(&file_name, bytes).await?),
            None => None,
        };
        let expense = Expense {
            id: String::new(),
            project_id: new_expense.project_id,
            description: new_expense.description,
            unit_price: new_expense.unit_price,
            quantity: new_expense.quantity,
            total: round_currency(
                new_expense.unit_price * Decimal::from(new_expense.quantity),
            ),
            file_url,
        };
        self.repository.create_expense(expense).await
    }

    async fn update_expense(&self, update: ExpenseUpdate) -> Result<Expense> {
        Self::validate_expense(update.unit_price, update.quantity)?;
        let stored = self.repository.get_expense(&update.id)?;
        let expense = Expense {
            id: stored.id,
            project_id: stored.project_id,
            description: update.description,
            unit_price: update.unit_price,
            quantity: update.quantity,
            // Never left stale: recomputed on every edit.
            total: round_currency(update.unit_price * Decimal::from(update.quantity)),
            file_url: stored.file_url,
        };
        self.repository.update_expense(expense).await
    }

    async fn delete_expense(
        &self,
        expense_id: &str,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<()> {
        challenge.verify(answer)?;
        let deleted = self.repository.delete_expense(expense_id).await?;
        if let Some(url) = deleted.file_url {
            if let Err(e) = self.file_store.delete(&url).await {
                warn!("Failed to delete receipt file {url}: {e}");
            }
        }
        Ok(())
    }

    fn get_project_budget(&self, project_id: &str) -> Result<ProjectBudget> {
        let project = self.repository.get_project(project_id)?;
        self.budget_for(&project)
    }

    fn get_project_overview(&self, project_id: &str) -> Result<ProjectOverview> {
        let project = self.repository.get_project(project_id)?;
        let budget = self.budget_for(&project)?;
        let tasks = self.repository.get_tasks(project_id)?;
        let done = tasks.iter().filter(|t| t.done).count();
        let task_progress_percentage = if tasks.is_empty() {
            Decimal::ZERO
        } else {
            Decimal::from(done as u64) / Decimal::from(tasks.len() as u64)
                * Decimal::ONE_HUNDRED
        };
        Ok(ProjectOverview {
            project,
            budget,
            task_count: tasks.len(),
            done_task_count: done,
            task_progress_percentage,
        })
    }
}
