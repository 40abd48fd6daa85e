use async_trait::async_trait;

use crate::errors::Result;
use crate::gate::Challenge;
use crate::projects::projects_model::{
    Expense, ExpenseUpdate, NewExpense, NewProject, Project, ProjectBudget, ProjectOverview,
    ProjectUpdate, Task,
};

/// Trait for project repository operations.
///
/// `create_project` inserts the project and its initial tasks together;
/// `delete_project` cascades to the project's tasks and expenses (children
/// first, then the parent) and returns the deleted expenses so the caller
/// can clean up attached files.
#[async_trait]
pub trait ProjectRepositoryTrait: Send + Sync {
    fn get_projects(&self) -> Result<Vec<Project>>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn create_project(&self, project: Project, task_titles: Vec<String>) -> Result<Project>;
    async fn update_project(&self, project: Project, tasks: Vec<Task>) -> Result<Project>;
    async fn delete_project(&self, project_id: &str) -> Result<Vec<Expense>>;

    fn get_tasks(&self, project_id: &str) -> Result<Vec<Task>>;
    async fn set_task_done(&self, task_id: &str, done: bool) -> Result<Task>;

    fn get_expense(&self, expense_id: &str) -> Result<Expense>;
    fn get_expenses_for_project(&self, project_id: &str) -> Result<Vec<Expense>>;
    fn get_all_expenses(&self) -> Result<Vec<Expense>>;
    async fn create_expense(&self, expense: Expense) -> Result<Expense>;
    async fn update_expense(&self, expense: Expense) -> Result<Expense>;
    async fn delete_expense(&self, expense_id: &str) -> Result<Expense>;
}

/// Trait for project service operations.
#[async_trait]
pub trait ProjectServiceTrait: Send + Sync {
    fn get_projects(&self) -> Result<Vec<Project>>;
    fn get_project(&self, project_id: &str) -> Result<Project>;
    async fn create_project(&self, new_project: NewProject) -> Result<Project>;
    async fn update_project(&self, update: ProjectUpdate) -> Result<Project>;
    /// Challenge-gated cascading delete: tasks and expenses go first,
    /// then the project, then any receipt files in the object store.
    async fn delete_project(
        &self,
        project_id: &str,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<()>;

    fn get_tasks(&self, project_id: &str) -> Result<Vec<Task>>;
    async fn set_task_done(&self, task_id: &str, done: bool) -> Result<Task>;

    fn get_expenses_for_project(&self, project_id: &str) -> Result<Vec<Expense>>;
    async fn add_expense(
        &self,
        new_expense: NewExpense,
        receipt: Option<(String, Vec<u8>)>,
    ) -> Result<Expense>;
    async fn update_expense(&self, update: ExpenseUpdate) -> Result<Expense>;
    /// Challenge-gated delete; also removes the attached receipt file.
    async fn delete_expense(
        &self,
        expense_id: &str,
        challenge: &Challenge,
        answer: i64,
    ) -> Result<()>;

    fn get_project_budget(&self, project_id: &str) -> Result<ProjectBudget>;
    fn get_project_overview(&self, project_id: &str) -> Result<ProjectOverview>;
}
