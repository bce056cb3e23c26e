//! Reporting models produced by the period aggregator.
//!
//! None of these are persisted; they are computed on every query.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{DateWindow, Holiday, WorkSession};

/// Running totals over a group of sessions.
///
/// Every report type in this module is built by folding sessions into one
/// of these.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTotals {
    /// Sum of `hours_worked`.
    pub hours: Decimal,
    /// Sum of `total_earnings`.
    pub earnings: Decimal,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Number of sessions; each session counts as one work day.
    pub days: u32,
    /// Number of sessions worked on a holiday.
    pub holidays: u32,
}

impl SessionTotals {
    /// Folds one session into the totals.
    pub fn add(&mut self, session: &WorkSession) {
        self.hours += session.hours_worked;
        self.earnings += session.total_earnings;
        self.regular_hours += session.regular_hours_or_zero();
        self.overtime_hours += session.overtime_hours_or_zero();
        self.days += 1;
        if session.is_holiday {
            self.holidays += 1;
        }
    }

    /// Average hours per work day, zero when there are no work days.
    pub fn average_hours_per_day(&self) -> Decimal {
        if self.days == 0 {
            Decimal::ZERO
        } else {
            self.hours / Decimal::from(self.days)
        }
    }

    /// Average earnings per work day, zero when there are no work days.
    pub fn average_earnings_per_day(&self) -> Decimal {
        if self.days == 0 {
            Decimal::ZERO
        } else {
            self.earnings / Decimal::from(self.days)
        }
    }
}

impl<'a> FromIterator<&'a WorkSession> for SessionTotals {
    fn from_iter<I: IntoIterator<Item = &'a WorkSession>>(iter: I) -> Self {
        let mut totals = SessionTotals::default();
        for session in iter {
            totals.add(session);
        }
        totals
    }
}

/// One Sunday-aligned week inside a monthly summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekBreakdown {
    /// The Sunday the week starts on.
    pub week: NaiveDate,
    /// Hours worked.
    pub hours: Decimal,
    /// Total earnings.
    pub earnings: Decimal,
    /// Regular hours.
    pub regular_hours: Decimal,
    /// Overtime hours.
    pub overtime_hours: Decimal,
    /// Sessions in the week.
    pub days: u32,
    /// Sessions worked on a holiday.
    pub holidays: u32,
}

impl WeekBreakdown {
    /// Builds a week row from its start date and totals.
    pub fn new(week: NaiveDate, totals: SessionTotals) -> Self {
        Self {
            week,
            hours: totals.hours,
            earnings: totals.earnings,
            regular_hours: totals.regular_hours,
            overtime_hours: totals.overtime_hours,
            days: totals.days,
            holidays: totals.holidays,
        }
    }
}

/// Aggregate of the sessions and holidays in one window.
///
/// # Example
///
/// ```
/// use earnings_engine::models::PeriodSummary;
/// use rust_decimal::Decimal;
///
/// let empty = PeriodSummary::default();
/// assert_eq!(empty.average_hours_per_day, Decimal::ZERO);
/// assert!(empty.weekly_breakdown.is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodSummary {
    /// Sum of hours worked.
    pub total_hours: Decimal,
    /// Sum of session earnings.
    pub total_earnings: Decimal,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Number of sessions.
    pub work_days: u32,
    /// Number of sessions worked on a holiday.
    pub holiday_days: u32,
    /// Calendar holidays in the window, worked or not.
    pub total_holidays_in_window: u32,
    /// `total_hours / work_days`, zero when nothing was worked.
    pub average_hours_per_day: Decimal,
    /// Per-week rows, filled for monthly summaries only.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub weekly_breakdown: Vec<WeekBreakdown>,
}

impl PeriodSummary {
    /// Builds a summary from session totals and the number of calendar
    /// holidays in the window.
    pub fn from_totals(totals: &SessionTotals, holidays_in_window: u32) -> Self {
        Self {
            total_hours: totals.hours,
            total_earnings: totals.earnings,
            regular_hours: totals.regular_hours,
            overtime_hours: totals.overtime_hours,
            work_days: totals.days,
            holiday_days: totals.holidays,
            total_holidays_in_window: holidays_in_window,
            average_hours_per_day: totals.average_hours_per_day(),
            weekly_breakdown: Vec::new(),
        }
    }
}

/// A summary together with the records it was computed from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodReport {
    /// The window that was summarized.
    pub window: DateWindow,
    /// The aggregate figures.
    #[serde(flatten)]
    pub summary: PeriodSummary,
    /// Sessions in the window.
    pub sessions: Vec<WorkSession>,
    /// Calendar holidays in the window.
    pub holidays: Vec<Holiday>,
}

/// One month-of-year slot in the yearly report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthSlot {
    /// Month number, 1 for January through 12 for December.
    pub month: u32,
    /// Sum of hours worked.
    pub total_hours: Decimal,
    /// Sum of session earnings.
    pub total_earnings: Decimal,
    /// Sum of regular hours.
    pub regular_hours: Decimal,
    /// Sum of overtime hours.
    pub overtime_hours: Decimal,
    /// Number of sessions.
    pub work_days: u32,
    /// Number of sessions worked on a holiday.
    pub holiday_days: u32,
    /// `total_hours / work_days`, zero for an empty month.
    pub average_hours_per_day: Decimal,
}

impl MonthSlot {
    /// Builds a slot from its month number and totals.
    pub fn new(month: u32, totals: &SessionTotals) -> Self {
        Self {
            month,
            total_hours: totals.hours,
            total_earnings: totals.earnings,
            regular_hours: totals.regular_hours,
            overtime_hours: totals.overtime_hours,
            work_days: totals.days,
            holiday_days: totals.holidays,
            average_hours_per_day: totals.average_hours_per_day(),
        }
    }
}

/// Twelve monthly slots plus totals and averages for one year.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyData {
    /// The calendar year.
    pub year: i32,
    /// Always twelve slots, January first.
    pub monthly_data: Vec<MonthSlot>,
    /// Sum of hours worked.
    pub total_hours: Decimal,
    /// Sum of session earnings.
    pub total_earnings: Decimal,
    /// Sum of regular hours.
    pub total_regular_hours: Decimal,
    /// Sum of overtime hours.
    pub total_overtime_hours: Decimal,
    /// Number of sessions.
    pub total_work_days: u32,
    /// Number of sessions worked on a holiday.
    pub total_holiday_days: u32,
    /// `total_hours / total_work_days`, zero for an empty year.
    pub average_hours_per_work_day: Decimal,
    /// `total_earnings / total_work_days`, zero for an empty year.
    pub average_earnings_per_work_day: Decimal,
    /// `total_earnings / 12`.
    pub average_monthly_earnings: Decimal,
}
