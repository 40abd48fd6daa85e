//! In-memory storage implementation for capital contributions.

mod repository;

pub use repository::CapitalRepository;
