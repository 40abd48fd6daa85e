//! Arithmetic confirmation gate for destructive or payment-confirming
//! actions.

mod challenge;

pub use challenge::Challenge;
