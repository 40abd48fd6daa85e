use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal_macros::dec;

use crate::errors::{Error, GateError, Result, StoreError};
use crate::files::FileStoreTrait;
use crate::gate::Challenge;
use crate::projects::projects_model::{
    Expense, ExpenseUpdate, NewExpense, NewProject, Project, ProjectUpdate, Task, TaskInput,
};
use crate::projects::projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};
use crate::projects::ProjectService;

// ============== Mocks ==============

#[derive(Default)]
struct MockProjectRepository {
    projects: RwLock<Vec<Project>>,
    tasks: RwLock<Vec<Task>>,
    expenses: RwLock<Vec<Expense>>,
    counter: RwLock<u32>,
}

impl MockProjectRepository {
    fn next_id(&self, prefix: &str) -> String {
        let mut counter = self.counter.write().unwrap();
        *counter += 1;
        format!("{prefix}-{counter}")
    }
}

#[async_trait]
impl ProjectRepositoryTrait for MockProjectRepository {
    fn get_projects(&self) -> Result<Vec<Project>> {
        Ok(self.projects.read().unwrap().clone())
    }

    fn get_project(&self, project_id: &str) -> Result<Project> {
        self.projects
            .read()
            .unwrap()
            .iter()
            .find(|p| p.id == project_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("project {project_id}")).into())
    }

    async fn create_project(
        &self,
        mut project: Project,
        task_titles: Vec<String>,
    ) -> Result<Project> {
        project.id = self.next_id("project");
        let mut tasks = self.tasks.write().unwrap();
        for title in task_titles {
            tasks.push(Task {
                id: self.next_id("task"),
                project_id: project.id.clone(),
                title,
                done: false,
            });
        }
        self.projects.write().unwrap().push(project.clone());
        Ok(project)
    }

    async fn update_project(&self, project: Project, tasks: Vec<Task>) -> Result<Project> {
        {
            let mut projects = self.projects.write().unwrap();
            let stored = projects
                .iter_mut()
                .find(|p| p.id == project.id)
                .ok_or_else(|| StoreError::NotFound(format!("project {}", project.id)))?;
            *stored = project.clone();
        }
        let mut stored_tasks = self.tasks.write().unwrap();
        stored_tasks.retain(|t| {
            t.project_id != project.id
                || tasks.iter().any(|u| u.id == t.id)
        });
        for task in tasks {
            if task.id.is_empty() {
                stored_tasks.push(Task {
                    id: self.next_id("task"),
                    ..task
                });
            } else if let Some(existing) =
                stored_tasks.iter_mut().find(|t| t.id == task.id)
            {
                *existing = task;
            }
        }
        Ok(project)
    }

    async fn delete_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        self.tasks
            .write()
            .unwrap()
            .retain(|t| t.project_id != project_id);
        let mut expenses = self.expenses.write().unwrap();
        let deleted: Vec<Expense> = expenses
            .iter()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect();
        expenses.retain(|e| e.project_id != project_id);
        self.projects
            .write()
            .unwrap()
            .retain(|p| p.id != project_id);
        Ok(deleted)
    }

    fn get_tasks(&self, project_id: &str) -> Result<Vec<Task>> {
        Ok(self
            .tasks
            .read()
            .unwrap()
            .iter()
            .filter(|t| t.project_id == project_id)
            .cloned()
            .collect())
    }

    async fn set_task_done(&self, task_id: &str, done: bool) -> Result<Task> {
        let mut tasks = self.tasks.write().unwrap();
        let task = tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| StoreError::NotFound(format!("task {task_id}")))?;
        task.done = done;
        Ok(task.clone())
    }

    fn get_expense(&self, expense_id: &str) -> Result<Expense> {
        self.expenses
            .read()
            .unwrap()
            .iter()
            .find(|e| e.id == expense_id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(format!("expense {expense_id}")).into())
    }

    fn get_expenses_for_project(&self, project_id: &str) -> Result<Vec<Expense>> {
        Ok(self
            .expenses
            .read()
            .unwrap()
            .iter()
            .filter(|e| e.project_id == project_id)
            .cloned()
            .collect())
    }

    fn get_all_expenses(&self) -> Result<Vec<Expense>> {
        Ok(self.expenses.read().unwrap().clone())
    }

    async fn create_expense(&self, mut expense: Expense) -> Result<Expense> {
        expense.id = self.next_id("expense");
        self.expenses.write().unwrap().push(expense.clone());
        Ok(expense)
    }

    async fn update_expense(&self, expense: Expense) -> Result<Expense> {
        let mut expenses = self.expenses.write().unwrap();
        let stored = expenses
            .iter_mut()
            .find(|e| e.id == expense.id)
            .ok_or_else(|| StoreError::NotFound(format!("expense {}", expense.id)))?;
        *stored = expense.clone();
        Ok(expense)
    }

    async fn delete_expense(&self, expense_id: &str) -> Result<Expense> {
        let mut expenses = self.expenses.write().unwrap();
        let index = expenses
            .iter()
            .position(|e| e.id == expense_id)
            .ok_or_else(|| StoreError::NotFound(format!("expense {expense_id}")))?;
        Ok(expenses.remove(index))
    }
}

#[derive(Default)]
struct MockFileStore {
    uploaded: RwLock<Vec<String>>,
    deleted: RwLock<Vec<String>>,
}

#[async_trait]
impl FileStoreTrait for MockFileStore {
    async fn upload(&self, file_name: &str, _bytes: Vec<u8>) -> Result<String> {
        let url = format!("mem://receipts/{file_name}");
        self.uploaded.write().unwrap().push(url.clone());
        Ok(url)
    }

    async fn delete(&self, url: &str) -> Result<()> {
        self.deleted.write().unwrap().push(url.to_string());
        Ok(())
    }
}

// ============== Helpers ==============

fn make_service() -> (ProjectService, Arc<MockFileStore>) {
    let file_store = Arc::new(MockFileStore::default());
    let service = ProjectService::new(
        Arc::new(MockProjectRepository::default()),
        file_store.clone(),
    );
    (service, file_store)
}

fn garden_project() -> NewProject {
    NewProject {
        title: "Garden wall".to_string(),
        start_date: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(),
        end_date: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        estimated_cost: dec!(4500),
        task_titles: vec!["Dig foundation".to_string(), "Lay bricks".to_string()],
    }
}

// ============== Tests ==============

#[tokio::test]
async fn create_project_derives_duration_and_tasks() {
    let (service, _) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();

    assert_eq!(project.duration_days, 121);
    let tasks = service.get_tasks(&project.id).unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| !t.done));
}

#[tokio::test]
async fn create_project_rejects_end_before_start() {
    let (service, _) = make_service();
    let mut bad = garden_project();
    bad.end_date = NaiveDate::from_ymd_opt(2025, 2, 1).unwrap();

    let err = service.create_project(bad).await.unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(err.to_string().contains("endDate"));
}

#[tokio::test]
async fn update_project_replaces_the_task_list() {
    let (service, _) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();
    let existing = service.get_tasks(&project.id).unwrap();

    let update = ProjectUpdate {
        id: project.id.clone(),
        title: "Garden wall (phase 2)".to_string(),
        start_date: project.start_date,
        end_date: project.end_date,
        estimated_cost: dec!(5000),
        tasks: vec![
            // Keep the first task, now done; drop the second; add one.
            TaskInput {
                id: Some(existing[0].id.clone()),
                title: existing[0].title.clone(),
                done: true,
            },
            TaskInput {
                id: None,
                title: "Pointing".to_string(),
                done: false,
            },
        ],
    };
    let updated = service.update_project(update).await.unwrap();
    assert_eq!(updated.estimated_cost, dec!(5000));

    let tasks = service.get_tasks(&project.id).unwrap();
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().any(|t| t.title == "Pointing"));
    assert!(!tasks.iter().any(|t| t.id == existing[1].id));
    assert!(tasks.iter().find(|t| t.id == existing[0].id).unwrap().done);
}

#[tokio::test]
async fn expense_total_is_recomputed_on_create_and_edit() {
    let (service, _) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();

    let expense = service
        .add_expense(
            NewExpense {
                project_id: project.id.clone(),
                description: "Cement".to_string(),
                unit_price: dec!(12.345),
                quantity: 3,
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(expense.total, dec!(37.04)); // round2(37.035), half away from zero

    let edited = service
        .update_expense(ExpenseUpdate {
            id: expense.id,
            description: "Cement (bulk)".to_string(),
            unit_price: dec!(10),
            quantity: 5,
        })
        .await
        .unwrap();
    assert_eq!(edited.total, dec!(50.00));
}

#[tokio::test]
async fn add_expense_uploads_the_receipt_and_keeps_the_url() {
    let (service, file_store) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();

    let expense = service
        .add_expense(
            NewExpense {
                project_id: project.id.clone(),
                description: "Bricks".to_string(),
                unit_price: dec!(0.8),
                quantity: 500,
            },
            Some(("bricks.jpg".to_string(), vec![0xff, 0xd8])),
        )
        .await
        .unwrap();
    assert_eq!(expense.file_url.as_deref(), Some("mem://receipts/bricks.jpg"));
    assert_eq!(file_store.uploaded.read().unwrap().len(), 1);
}

#[tokio::test]
async fn add_expense_to_unknown_project_fails_before_upload() {
    let (service, file_store) = make_service();
    let err = service
        .add_expense(
            NewExpense {
                project_id: "missing".to_string(),
                description: "Bricks".to_string(),
                unit_price: dec!(1),
                quantity: 1,
            },
            Some(("bricks.jpg".to_string(), vec![1])),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Store(StoreError::NotFound(_))));
    assert!(file_store.uploaded.read().unwrap().is_empty());
}

#[tokio::test]
async fn project_budget_is_signed() {
    let (service, _) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();

    service
        .add_expense(
            NewExpense {
                project_id: project.id.clone(),
                description: "Everything".to_string(),
                unit_price: dec!(5000),
                quantity: 1,
            },
            None,
        )
        .await
        .unwrap();

    let budget = service.get_project_budget(&project.id).unwrap();
    assert_eq!(budget.total_expenses, dec!(5000));
    assert_eq!(budget.remaining_budget, dec!(-500)); // over budget
}

#[tokio::test]
async fn delete_project_cascades_and_cleans_up_files() {
    let (service, file_store) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();
    service
        .add_expense(
            NewExpense {
                project_id: project.id.clone(),
                description: "Bricks".to_string(),
                unit_price: dec!(0.8),
                quantity: 500,
            },
            Some(("bricks.jpg".to_string(), vec![1])),
        )
        .await
        .unwrap();

    let challenge = Challenge::with_operands(2, 3);
    service
        .delete_project(&project.id, &challenge, 5)
        .await
        .unwrap();

    assert!(service.get_projects().unwrap().is_empty());
    assert!(service.get_tasks(&project.id).unwrap().is_empty());
    assert!(service.get_expenses_for_project(&project.id).unwrap().is_empty());
    assert_eq!(
        file_store.deleted.read().unwrap().as_slice(),
        ["mem://receipts/bricks.jpg"]
    );
}

#[tokio::test]
async fn delete_project_with_wrong_answer_changes_nothing() {
    let (service, _) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();

    let challenge = Challenge::with_operands(2, 3);
    let err = service
        .delete_project(&project.id, &challenge, 6)
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Gate(GateError::WrongAnswer)));
    assert_eq!(service.get_projects().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_expense_removes_its_receipt() {
    let (service, file_store) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();
    let expense = service
        .add_expense(
            NewExpense {
                project_id: project.id.clone(),
                description: "Sand".to_string(),
                unit_price: dec!(30),
                quantity: 2,
            },
            Some(("sand.png".to_string(), vec![1, 2, 3])),
        )
        .await
        .unwrap();

    let challenge = Challenge::with_operands(4, 4);
    service
        .delete_expense(&expense.id, &challenge, 8)
        .await
        .unwrap();
    assert!(service.get_expenses_for_project(&project.id).unwrap().is_empty());
    assert_eq!(file_store.deleted.read().unwrap().len(), 1);
}

#[tokio::test]
async fn project_overview_tracks_task_progress() {
    let (service, _) = make_service();
    let project = service.create_project(garden_project()).await.unwrap();
    let tasks = service.get_tasks(&project.id).unwrap();
    service.set_task_done(&tasks[0].id, true).await.unwrap();

    let overview = service.get_project_overview(&project.id).unwrap();
    assert_eq!(overview.task_count, 2);
    assert_eq!(overview.done_task_count, 1);
    assert_eq!(overview.task_progress_percentage, dec!(50));
}
