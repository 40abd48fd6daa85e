//! Capital module - contribution tracking and the global capital ledger.

mod capital_model;
mod capital_service;
mod capital_traits;

pub use capital_model::{CapitalContribution, CapitalLedger, NewCapitalContribution};
pub use capital_service::CapitalService;
pub use capital_traits::{CapitalRepositoryTrait, CapitalServiceTrait};
