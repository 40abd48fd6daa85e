//! In-memory storage implementation for Hearth.
//!
//! This crate implements the repository and file-store traits defined in
//! `hearth-core` on top of process-local state. It contains:
//! - Repository implementations for all domain entities
//! - A `mem://` object store for receipt files
//! - Id assignment for inserted rows
//!
//! # Architecture
//!
//! This crate is the only place where rows live. `core` is
//! storage-agnostic and works with traits.
//!
//! ```text
//!        core (domain)
//!              │
//!              ▼
//!   storage-memory (this crate)
//!              │
//!              ▼
//!     in-process tables
//! ```
//!
//! Each repository guards its tables behind a single `RwLock` so a
//! multi-row insert is observed all-or-nothing by readers.

pub mod capital;
pub mod files;
pub mod loans;
pub mod projects;

pub use capital::CapitalRepository;
pub use files::MemoryFileStore;
pub use loans::LoanRepository;
pub use projects::ProjectRepository;
