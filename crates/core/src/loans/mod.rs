//! Loans module - schedule generation, ledger projection, models,
//! services, and traits.

pub mod ledger_projector;
mod loans_model;
mod loans_service;
mod loans_traits;
pub mod schedule_builder;

pub use ledger_projector::{due_dates, month_summary, project_status};
pub use loans_model::{
    DueDate, Loan, LoanLedgerView, LoanParticipant, LoanSchedule, LoanTerms, MonthSummary,
    Obligation, ScheduledObligation,
};
pub use loans_service::LoanService;
pub use loans_traits::{LoanRepositoryTrait, LoanServiceTrait};
pub use schedule_builder::build_schedule;
