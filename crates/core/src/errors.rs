//! Core error types for the hearth application.
//!
//! This module defines store-agnostic error types. Storage-specific errors
//! are converted to these types by the storage layer.

use chrono::ParseError as ChronoParseError;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the household ledger.
///
/// Store-specific errors are wrapped in string form to keep this type
/// store-agnostic. No variant is fatal to the process; every error is
/// recoverable at the call boundary.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Record store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Confirmation gate failed: {0}")]
    Gate(#[from] GateError),

    #[error("File store error: {0}")]
    FileStore(String),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

/// Store-agnostic error type for record-store operations.
///
/// This enum uses `String` for all error details, allowing the storage
/// layer to convert its own error types into this format.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A store query failed to execute.
    #[error("Store query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A uniqueness or integrity constraint was violated.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A multi-row write failed and was rolled back. Partial schedules
    /// are never a valid state, so bulk inserts surface this variant.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Internal/unexpected store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Validation errors for user input and data parsing.
///
/// All of these are raised before any mutation is attempted.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),

    #[error("Field '{field}' has an invalid value: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Failed to parse decimal number: {0}")]
    DecimalParse(#[from] rust_decimal::Error),

    #[error("Failed to parse date: {0}")]
    DateParse(#[from] ChronoParseError),
}

impl ValidationError {
    /// Shorthand for an invalid-field error with an owned message.
    pub fn field(field: &str, reason: impl Into<String>) -> Self {
        ValidationError::InvalidField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Errors raised by the arithmetic confirmation gate.
///
/// A wrong answer never mutates state; the caller may retry indefinitely
/// with a freshly issued challenge.
#[derive(Error, Debug)]
pub enum GateError {
    #[error("The challenge answer did not match")]
    WrongAnswer,
}

// === From implementations for common error types ===

impl From<rust_decimal::Error> for Error {
    fn from(err: rust_decimal::Error) -> Self {
        Error::Validation(ValidationError::DecimalParse(err))
    }
}

impl From<ChronoParseError> for Error {
    fn from(err: ChronoParseError) -> Self {
        Error::Validation(ValidationError::DateParse(err))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<Error> for String {
    fn from(err: Error) -> Self {
        err.to_string()
    }
}
