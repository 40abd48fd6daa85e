use std::sync::RwLock;

use async_trait::async_trait;
use log::debug;
use uuid::Uuid;

use hearth_core::errors::StoreError;
use hearth_core::projects::{Expense, Project, ProjectRepositoryTrait, Task};
use hearth_core::Result;

#[derive(Default)]
struct ProjectTables {
    projects: Vec<Project>,
    tasks: Vec<Task>,
    expenses: Vec<Expense>,
}

/// In-memory project store. One lock guards the three tables so the
/// cascade delete is observed all-or-nothing.
pub struct ProjectRepository {
    tables: RwLock<ProjectTables>,
}

impl ProjectRepository {
    pub fn new() -> Self {
        ProjectRepository {
            tables: RwLock::new(ProjectTables::default()),
        }
    }

    fn read_tables(&self) -> Result<std::sync::RwLockReadGuard<'_, ProjectTables>> {
        self.tables
            .read()
            .map_err(|e| StoreError::Internal(format!("Project tables lock poisoned: {e}")).into())
    }

    fn write_tables(&self) -> Result<std::sync::RwLockWriteGuard<'_, ProjectTables>> {
        self.tables
            .write()
            .map_err(|e| StoreError::Internal(format!("Project tables lock poisoned: {e}")).into())
    }
}

impl Default for ProjectRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProjectRepositoryTrait for ProjectRepository {
    fn get_projects(&self) -> Result<Vec<Project>> {
        Ok(self.read_tables()?.projects.clone())
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.read_tables()?
            .projects
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Project {project_id} not found")).into())
    }

    async fn create_project(&self, project: Project, task_titles: Vec<String>) -> Result<Project> {
        let stored = Project {
            id: Uuid::new_v4().to_string(),
            ..project
        };
        let tasks: Vec<Task> = task_titles
            .into_iter()
            .map(|title| Task {
                id: Uuid::new_v4().to_string(),
                project_id: stored.id.clone(),
                title,
                done: false,
            })
            .collect();

        let mut tables = self.write_tables()?;
        tables.projects.push(stored.clone());
        tables.tasks.extend(tasks);
        Ok(stored)
    }

    async fn update_project(&self, project: Project, tasks: Vec<Task>) -> Result<Project> {
        let mut tables = self.write_tables()?;
        // Validate everything up front; no row may change on a rejected
        // update.
        if !tables.projects.iter().any(|p| p.id == project.id) {
            return Err(StoreError::NotFound(format!("Project {} not found", project.id)).into());
        }
        for task in tasks.iter().filter(|t| !t.id.is_empty()) {
            if !tables
                .tasks
                .iter()
                .any(|stored| stored.id == task.id && stored.project_id == project.id)
            {
                return Err(StoreError::NotFound(format!(
                    "Task {} not found on project {}",
                    task.id, project.id
                ))
                .into());
            }
        }

        if let Some(row) = tables.projects.iter_mut().find(|p| p.id == project.id) {
            *row = project.clone();
        }

        // Replace semantics: tasks carrying an id are updated, new ones
        // inserted, and stored tasks missing from the submitted set dropped.
        let kept_ids: Vec<String> = tasks
            .iter()
            .filter(|t| !t.id.is_empty())
            .map(|t| t.id.clone())
            .collect();
        tables
            .tasks
            .retain(|t| t.project_id != project.id || kept_ids.contains(&t.id));
        for task in tasks {
            if task.id.is_empty() {
                tables.tasks.push(Task {
                    id: Uuid::new_v4().to_string(),
                    ..task
                });
            } else if let Some(row) = tables.tasks.iter_mut().find(|t| t.id == task.id) {
                *row = task;
            }
        }
        Ok(project)
    }

    async fn delete_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        let mut tables = self.write_tables()?;
        if !tables.projects.iter().any(|p| p.id == project_id) {
            return Err(StoreError::NotFound(format!("Project {project_id} not found")).into());
        }
        // Children first, then the parent.
        tables.tasks.retain(|t| t.project_id != project_id);
        let (deleted, kept): (Vec<Expense>, Vec<Expense>) = tables
            .expenses
            .drain(..)
            .partition(|e| e.project_id == project_id);
        tables.expenses = kept;
        tables.projects.retain(|p| p.id != project_id);
        debug!(
            "Deleted project {project_id} and {} expense rows",
            deleted.len()
        );
        Ok(deleted)
    }

    fn get_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self
            .read_tables()?
            .tasks
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn set_task_done(&self, task_id: &str, done: bool) -> Result<Task> {
        let mut tables = self.write_tables()?;
        let task = tables
            .tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound(format!("Task {task_id} not found")))?;
        task.done = done;
        Ok(task.clone())
    }

    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.read_tables()?
            .expenses
            .iter()
            .find(|e| e.id == expense_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("Expense {expense_id} not found")).into())
    }

    fn get_expenses_for_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        Ok(self
            .read_tables()?
            .expenses
            .iter()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect())
    }

    fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.read_tables()?.expenses.clone())
    }

    async fn create_expense(&self, expense: Expense) -> Result<Expense> {
        let mut tables = self.write_tables()?;
        if !tables.projects.iter().any(|p| p.id == expense.project_id) {
            return Err(StoreError::ConstraintViolation(format!(
                "Project {} not found for expense",
                expense.project_id
            ))
            .into());
        }
        let stored = Expense {
            id: Uuid::new_v4().to_string(),
            ..expense
        };
        tables.expenses.push(stored.clone());
        Ok(stored)
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense> {
        let mut tables = self.write_tables()?;
        let row = tables
            .expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| StoreError::NotFound(format!("Expense {} not found", expense.id)))?;
        *row = expense.clone();
        Ok(expense)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<Expense> {
        let mut tables = self.write_tables()?;
        let index = tables
            .expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| StoreError::NotFound(format!("Expense {expense_id} not found")))?;
        Ok(tables.expenses.remove(index))
    }
}
