//! Projects module - domain models, services, and traits.

mod projects_model;
mod projects_service;
mod projects_traits;

pub use projects_model::{
    Expense, ExpenseUpdate, NewExpense, NewProject, Project, ProjectBudget, ProjectOverview,
    ProjectUpdate, Task, TaskInput,
};
pub use projects_service::ProjectService;
pub use projects_traits::{ProjectRepositoryTrait, ProjectServiceTrait};

#[cfg(test)]
mod projects_service_tests;
