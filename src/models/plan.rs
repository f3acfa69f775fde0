//! Period plan models.
//!
//! This module contains the [`PeriodPlan`] returned by the period generator
//! and the [`GenerationStep`] trace recording every year it examined.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::PeriodDescriptor;

/// Which quantity an accrual year may take.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Eligibility {
    /// The year is still inside its validity window; it takes pending days.
    Balance,
    /// The validity window has passed; it takes expired days.
    Expired,
}

/// What the generator did with an examined year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepDecision {
    /// A period was emitted for the year.
    Emitted,
    /// Nothing could be placed in the year; no period was emitted.
    Skipped,
    /// The year's work period is empty; generation stopped.
    Degenerate,
    /// A single negative-balance adjustment was emitted.
    Adjustment,
}

/// A single step in the generation trace.
///
/// # Example
///
/// ```
/// use vacation_migration::models::{Eligibility, GenerationStep, StepDecision};
/// use chrono::NaiveDate;
///
/// let step = GenerationStep {
///     year: 2024,
///     acquisition_date: NaiveDate::from_ymd_opt(2024, 5, 15).unwrap(),
///     work_start: NaiveDate::from_ymd_opt(2023, 5, 15).unwrap(),
///     eligibility: Some(Eligibility::Balance),
///     balance_taken: 30,
///     expired_taken: 0,
///     decision: StepDecision::Emitted,
///     reasoning: "30 pending days placed".to_string(),
/// };
/// assert_eq!(step.days_taken(), 30);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStep {
    /// Year of the acquisition date examined.
    pub year: i32,
    /// The anniversary closing the work period.
    pub acquisition_date: NaiveDate,
    /// First day of the work period.
    pub work_start: NaiveDate,
    /// Classification of the year, absent for degenerate years.
    pub eligibility: Option<Eligibility>,
    /// Pending days placed in this year.
    pub balance_taken: i64,
    /// Expired days placed in this year.
    pub expired_taken: i64,
    /// What happened.
    pub decision: StepDecision,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}

impl GenerationStep {
    /// Total days placed in this year.
    pub fn days_taken(&self) -> i64 {
        self.balance_taken + self.expired_taken
    }
}

/// The output of the period generator for one employee.
///
/// Periods are ordered as generated: newest first, walking backward in time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PeriodPlan {
    /// The emitted periods, newest first.
    pub periods: Vec<PeriodDescriptor>,
    /// Every year examined, in order.
    pub steps: Vec<GenerationStep>,
    /// Pending days no eligible year could take.
    pub undistributed_balance: i64,
    /// Expired days no eligible year could take.
    pub undistributed_expired: i64,
}

impl PeriodPlan {
    /// Sum of the balance field across all periods.
    pub fn total_balance(&self) -> i64 {
        self.periods.iter().map(|p| p.balance).sum()
    }

    /// Sum of the expired field across all periods.
    pub fn total_expired(&self) -> i64 {
        self.periods.iter().map(|p| p.expired).sum()
    }

    /// Returns true when every requested day was placed.
    pub fn is_fully_distributed(&self) -> bool {
        self.undistributed_balance == 0 && self.undistributed_expired == 0
    }

    /// Human-readable summary of the plan.
    ///
    /// # Example
    ///
    /// ```
    /// use vacation_migration::models::PeriodPlan;
    ///
    /// let plan = PeriodPlan::default();
    /// assert_eq!(
    ///     plan.summary(),
    ///     "0 balance and 0 expired days distributed across 0 period(s)"
    /// );
    /// ```
    pub fn summary(&self) -> String {
        let mut message = format!(
            "{} balance and {} expired days distributed across {} period(s)",
            self.total_balance(),
            self.total_expired(),
            self.periods.len()
        );
        if !self.is_fully_distributed() {
            message.push_str(&format!(
                "; {} balance and {} expired days left undistributed",
                self.undistributed_balance, self.undistributed_expired
            ));
        }
        message
    }
}
