//! Hearth Core - Domain entities, services, and traits.
//!
//! This crate contains the core business logic for Hearth, a household
//! finance tracker built around loan amortization and a per-participant
//! payment ledger. It is storage-agnostic and defines traits that are
//! implemented by the `storage-memory` crate.

pub mod capital;
pub mod constants;
pub mod errors;
pub mod files;
pub mod gate;
pub mod loans;
pub mod projects;
pub mod utils;

// Re-export common types from the loan module
pub use loans::*;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
