//! Calculation logic for the earnings engine.
//!
//! This module contains the pure calculation functions: worked hours from
//! clock times, the daily overtime split and monthly overtime tiering,
//! holiday pricing, monthly overtime accumulation over stored sessions,
//! and weekly, monthly and yearly aggregation.

mod earnings;
mod monthly_overtime;
mod period_aggregator;
mod worked_hours;

pub use earnings::{EarningsBreakdown, OvertimeTiering, compute_earnings, tier_overtime};
pub use monthly_overtime::{
    MonthlyOvertimeAccumulation, accumulate_monthly_overtime, accumulated_overtime_hours,
    sum_monthly_overtime,
};
pub use period_aggregator::{
    summarize, summarize_month, week_start, weekly_breakdown, yearly_breakdown,
};
pub use worked_hours::{
    MINUTES_PER_DAY, WorkedHoursResult, calculate_worked_hours, compute_worked_hours,
    parse_clock_time, shift_minutes,
};
