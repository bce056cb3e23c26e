//! Half-open calendar date windows.
//!
//! Every query and report in the engine works over a [`DateWindow`]:
//! the start day is included, the end day is not.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Number of days in a reporting week.
pub const DAYS_PER_WEEK: u64 = 7;

/// A half-open window of calendar days, `[start, end)`.
///
/// # Example
///
/// ```
/// use earnings_engine::models::DateWindow;
/// use chrono::NaiveDate;
///
/// let window = DateWindow::month(2026, 2).unwrap();
/// assert_eq!(window.start, NaiveDate::from_ymd_opt(2026, 2, 1).unwrap());
/// assert_eq!(window.end, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
/// assert!(window.contains(NaiveDate::from_ymd_opt(2026, 2, 28).unwrap()));
/// assert!(!window.contains(window.end));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    /// First day inside the window.
    pub start: NaiveDate,
    /// First day after the window.
    pub end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from explicit bounds.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The seven days starting at `week_start`.
    ///
    /// `week_start` is taken as given; it does not have to be a Sunday.
    pub fn week(week_start: NaiveDate) -> Self {
        let end = week_start
            .checked_add_days(Days::new(DAYS_PER_WEEK))
            .unwrap_or(NaiveDate::MAX);
        Self::new(week_start, end)
    }

    /// The calendar month `month` (1-12) of `year`.
    pub fn month(year: i32, month: u32) -> EngineResult<Self> {
        let start = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
            EngineError::Validation {
                field: "month".to_string(),
                message: format!("{}-{} is not a calendar month", year, month),
            }
        })?;
        Ok(Self::month_containing(start))
    }

    /// The calendar month containing `date`.
    pub fn month_containing(date: NaiveDate) -> Self {
        let start = date.with_day(1).unwrap_or(date);
        let end = start
            .checked_add_months(chrono::Months::new(1))
            .unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }

    /// January 1st of `year` up to January 1st of the following year.
    pub fn year(year: i32) -> EngineResult<Self> {
        let invalid = || EngineError::Validation {
            field: "year".to_string(),
            message: format!("{} is out of range", year),
        };
        let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(invalid)?;
        let end = year
            .checked_add(1)
            .and_then(|next| NaiveDate::from_ymd_opt(next, 1, 1))
            .ok_or_else(invalid)?;
        Ok(Self::new(start, end))
    }

    /// Builds a window from optional inclusive bounds.
    ///
    /// A missing bound leaves that side open.
    pub fn from_inclusive(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        let start = start.unwrap_or(NaiveDate::MIN);
        let end = end
            .and_then(|d| d.succ_opt())
            .unwrap_or(NaiveDate::MAX);
        Self::new(start, end)
    }

    /// Whether `date` falls inside the window.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_week_spans_seven_days() {
        let window = DateWindow::week(date(2026, 3, 1));
        assert_eq!(window.end, date(2026, 3, 8));
        assert!(window.contains(date(2026, 3, 7)));
        assert!(!window.contains(date(2026, 3, 8)));
    }

    #[test]
    fn test_month_containing_mid_month_date() {
        let window = DateWindow::month_containing(date(2026, 1, 17));
        assert_eq!(window, DateWindow::new(date(2026, 1, 1), date(2026, 2, 1)));
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        let window = DateWindow::month(2025, 12).unwrap();
        assert_eq!(window.end, date(2026, 1, 1));
    }

    #[test]
    fn test_invalid_month_rejected() {
        match DateWindow::month(2026, 13) {
            Err(EngineError::Validation { field, .. }) => assert_eq!(field, "month"),
            other => panic!("Expected Validation error, got {:?}", other),
        }
        assert!(DateWindow::month(2026, 0).is_err());
    }

    #[test]
    fn test_year_window() {
        let window = DateWindow::year(2024).unwrap();
        assert_eq!(window, DateWindow::new(date(2024, 1, 1), date(2025, 1, 1)));
        assert!(window.contains(date(2024, 12, 31)));
    }

    #[test]
    fn test_inclusive_bounds_include_end_day() {
        let window = DateWindow::from_inclusive(Some(date(2026, 1, 1)), Some(date(2026, 1, 31)));
        assert!(window.contains(date(2026, 1, 31)));
        assert!(!window.contains(date(2026, 2, 1)));
    }

    #[test]
    fn test_open_bounds_contain_everything() {
        let window = DateWindow::from_inclusive(None, None);
        assert!(window.contains(date(1970, 1, 1)));
        assert!(window.contains(date(2100, 6, 30)));
    }
}
