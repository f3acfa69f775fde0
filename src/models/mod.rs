//! Core data models for the vacation migration.
//!
//! This module contains all the domain models used throughout the migration.

mod balance;
mod employee;
mod outcome;
mod plan;
mod vacation_period;

pub use balance::BalanceInput;
pub use employee::{Employee, RawDate};
pub use outcome::{OutcomeCategory, RowOutcome};
pub use plan::{Eligibility, GenerationStep, PeriodPlan, StepDecision};
pub use vacation_period::{
    ACTIVE_STATUS, AuditContext, PeriodDescriptor, PeriodKind, VacationPeriod,
};
