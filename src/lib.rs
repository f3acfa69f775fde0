//! Vacation Balance Migration
//!
//! This crate back-fills historical vacation accrual periods from an HR
//! balance spreadsheet. For every employee row it reconstructs the yearly
//! periods the pending and expired days belong to, walking backward from the
//! newest credited anniversary, and stores them with full audit data.

#![warn(missing_docs)]

pub mod accrual;
pub mod config;
pub mod error;
pub mod logging;
pub mod migration;
pub mod models;
pub mod source;
pub mod store;
