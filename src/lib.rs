//! Work-session earnings engine
//!
//! This crate records worked shifts, prices them with a daily regular-hour
//! allowance, monthly tiered overtime and a holiday rate, and aggregates
//! the stored sessions into weekly, monthly and yearly reports.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod ledger;
pub mod models;
pub mod store;
pub mod telemetry;
