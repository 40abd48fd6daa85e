//! In-memory storage implementation for projects, tasks, and expenses.

mod repository;

pub use repository::ProjectRepository;
