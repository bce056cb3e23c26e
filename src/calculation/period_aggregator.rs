//! Period aggregation for reporting.
//!
//! Rolls stored sessions and holidays up into totals. The same summary is
//! used for weeks and months; months additionally get a per-week
//! breakdown. The yearly report buckets sessions by month of year in a
//! separate pass rather than composing monthly summaries.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use rust_decimal::Decimal;

use crate::models::{
    Holiday, MonthSlot, PeriodSummary, SessionTotals, WeekBreakdown, WorkSession, YearlyData,
};

/// The Sunday on or before `date`.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::week_start;
/// use chrono::NaiveDate;
///
/// // 2026-01-15 is a Thursday
/// let thursday = NaiveDate::from_ymd_opt(2026, 1, 15).unwrap();
/// assert_eq!(week_start(thursday), NaiveDate::from_ymd_opt(2026, 1, 11).unwrap());
/// ```
pub fn week_start(date: NaiveDate) -> NaiveDate {
    let offset = u64::from(date.weekday().num_days_from_sunday());
    date.checked_sub_days(Days::new(offset)).unwrap_or(date)
}

/// Summarizes sessions and holidays that were already filtered to one window.
///
/// Every session counts as one work day, even when several share a date.
/// The weekly breakdown is left empty; see [`summarize_month`].
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::summarize;
/// use rust_decimal::Decimal;
///
/// let summary = summarize(&[], &[]);
/// assert_eq!(summary.total_hours, Decimal::ZERO);
/// assert_eq!(summary.work_days, 0);
/// assert_eq!(summary.average_hours_per_day, Decimal::ZERO);
/// ```
pub fn summarize(sessions: &[WorkSession], holidays: &[Holiday]) -> PeriodSummary {
    let totals: SessionTotals = sessions.iter().collect();
    PeriodSummary::from_totals(&totals, count(holidays.len()))
}

/// Summarizes one month, including the per-week breakdown.
pub fn summarize_month(sessions: &[WorkSession], holidays: &[Holiday]) -> PeriodSummary {
    let mut summary = summarize(sessions, holidays);
    summary.weekly_breakdown = weekly_breakdown(sessions);
    summary
}

/// Groups sessions by the Sunday-aligned week containing their date.
///
/// Rows come back in ascending week order whatever order the sessions
/// arrive in.
pub fn weekly_breakdown(sessions: &[WorkSession]) -> Vec<WeekBreakdown> {
    let mut weeks: BTreeMap<NaiveDate, SessionTotals> = BTreeMap::new();
    for session in sessions {
        weeks.entry(week_start(session.date)).or_default().add(session);
    }

    weeks
        .into_iter()
        .map(|(week, totals)| WeekBreakdown::new(week, totals))
        .collect()
}

/// Builds the yearly report from the sessions of one calendar year.
///
/// Sessions are bucketed into twelve slots by month of year. The yearly
/// totals are summed directly from the sessions.
pub fn yearly_breakdown(year: i32, sessions: &[WorkSession]) -> YearlyData {
    let mut slots: [SessionTotals; 12] = Default::default();
    for session in sessions {
        slots[session.date.month0() as usize].add(session);
    }

    let monthly_data = slots
        .iter()
        .zip(1u32..)
        .map(|(totals, month)| MonthSlot::new(month, totals))
        .collect();

    let totals: SessionTotals = sessions.iter().collect();

    YearlyData {
        year,
        monthly_data,
        total_hours: totals.hours,
        total_earnings: totals.earnings,
        total_regular_hours: totals.regular_hours,
        total_overtime_hours: totals.overtime_hours,
        total_work_days: totals.days,
        total_holiday_days: totals.holidays,
        average_hours_per_work_day: totals.average_hours_per_day(),
        average_earnings_per_work_day: totals.average_earnings_per_day(),
        average_monthly_earnings: totals.earnings / Decimal::from(12),
    }
}

fn count(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}
