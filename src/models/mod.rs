//! Core data models for the earnings engine.
//!
//! This module contains all the domain models used throughout the engine.

mod audit;
mod holiday;
mod summary;
mod window;
mod work_session;

pub use audit::AuditStep;
pub use holiday::{Holiday, NewHoliday};
pub use summary::{
    MonthSlot, PeriodReport, PeriodSummary, SessionTotals, WeekBreakdown, YearlyData,
};
pub use window::{DAYS_PER_WEEK, DateWindow};
pub use work_session::{NewWorkSession, OwnerId, WorkSession};
