//! Projects domain models: projects, their tasks, and their expenses.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::utils::{parse_date_field, parse_decimal_field, parse_u32_field};

/// Domain model representing a budgeted project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Derived from the dates at write time; display only, never
    /// authoritative.
    pub duration_days: i64,
    pub estimated_cost: Decimal,
}

/// Input model for creating a new project with its initial tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProject {
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_cost: Decimal,
    pub task_titles: Vec<String>,
}

impl NewProject {
    /// Builds a new-project input from raw form strings.
    pub fn parse(
        title: &str,
        start_date: &str,
        end_date: &str,
        estimated_cost: &str,
        task_titles: Vec<String>,
    ) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()));
        }
        Ok(NewProject {
            title: title.trim().to_string(),
            start_date: parse_date_field("startDate", start_date)?,
            end_date: parse_date_field("endDate", end_date)?,
            estimated_cost: parse_decimal_field("estimatedCost", estimated_cost)?,
            task_titles,
        })
    }
}

/// Full-state update for a project and its task list.
///
/// Tasks carry optional ids: with an id the task is updated in place,
/// without one it is inserted, and stored tasks absent from the list are
/// deleted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectUpdate {
    pub id: String,
    pub title: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub estimated_cost: Decimal,
    pub tasks: Vec<TaskInput>,
}

/// One task in a project update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub id: Option<String>,
    pub title: String,
    pub done: bool,
}

/// Domain model for a project task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub project_id: String,
    pub title: String,
    pub done: bool,
}

/// Domain model for a project expense.
///
/// `total` is always `round2(unit_price * quantity)`, recomputed at every
/// write; it is never accepted from the caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: String,
    pub project_id: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    pub total: Decimal,
    /// URL of the receipt image in the object store, if one was attached.
    pub file_url: Option<String>,
}

/// Input model for creating an expense.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewExpense {
    pub project_id: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl NewExpense {
    /// Builds a new-expense input from raw form strings.
    pub fn parse(
        project_id: &str,
        description: &str,
        unit_price: &str,
        quantity: &str,
    ) -> Result<Self, ValidationError> {
        if description.trim().is_empty() {
            return Err(ValidationError::MissingField("description".to_string()));
        }
        Ok(NewExpense {
            project_id: project_id.to_string(),
            description: description.trim().to_string(),
            unit_price: parse_decimal_field("unitPrice", unit_price)?,
            quantity: parse_u32_field("quantity", quantity)?,
        })
    }
}

/// Edit of an existing expense; the total is recomputed, the attached
/// file is managed separately.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseUpdate {
    pub id: String,
    pub description: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

/// Derived budget view for one project. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBudget {
    pub project_id: String,
    pub estimated_cost: Decimal,
    pub total_expenses: Decimal,
    /// Signed; negative means the project is over budget.
    pub remaining_budget: Decimal,
}

/// Derived project overview: budget plus task progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub project: Project,
    pub budget: ProjectBudget,
    pub task_count: usize,
    pub done_task_count: usize,
    pub task_progress_percentage: Decimal,
}
