//! In-memory storage implementation for loans.

mod repository;

pub use repository::LoanRepository;
