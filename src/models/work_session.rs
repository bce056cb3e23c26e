//! Work session model and related types.
//!
//! A [`WorkSession`] is one worked shift. Its derived hour and earnings
//! fields are filled in once, when the session is added, and are never
//! recomputed afterwards.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies the user that owns a record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OwnerId(String);

impl OwnerId {
    /// Creates an owner id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for OwnerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The caller-supplied part of a work session.
///
/// When `is_holiday` is `None` the holiday calendar decides.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewWorkSession {
    /// The calendar day the shift started on.
    pub date: NaiveDate,
    /// Clock-in time, `HH:MM`.
    pub start_time: String,
    /// Clock-out time, `HH:MM`. Earlier than `start_time` for overnight shifts.
    pub end_time: String,
    /// Unpaid break taken during the shift.
    pub break_minutes: i64,
    /// Pay per regular hour.
    pub hourly_rate: Decimal,
    /// Free-text note.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit holiday flag.
    #[serde(default)]
    pub is_holiday: Option<bool>,
}

/// A stored work session.
///
/// The optional breakdown fields are absent on records written before the
/// breakdown existed; readers treat them as zero.
///
/// # Example
///
/// ```
/// use earnings_engine::models::{OwnerId, WorkSession};
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let session = WorkSession {
///     id: Uuid::new_v4(),
///     owner: OwnerId::new("user_1"),
///     date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
///     start_time: "09:00".to_string(),
///     end_time: "17:00".to_string(),
///     break_minutes: 0,
///     hourly_rate: Decimal::from(20),
///     description: String::new(),
///     is_holiday: false,
///     hours_worked: Decimal::from(8),
///     regular_hours: None,
///     overtime_hours: None,
///     regular_earnings: None,
///     overtime_earnings: None,
///     holiday_earnings: None,
///     total_earnings: Decimal::from(160),
/// };
/// assert_eq!(session.overtime_hours_or_zero(), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkSession {
    /// Record id.
    pub id: Uuid,
    /// The user this session belongs to.
    pub owner: OwnerId,
    /// The calendar day the shift started on.
    pub date: NaiveDate,
    /// Clock-in time, `HH:MM`.
    pub start_time: String,
    /// Clock-out time, `HH:MM`.
    pub end_time: String,
    /// Unpaid break taken during the shift.
    pub break_minutes: i64,
    /// Pay per regular hour.
    pub hourly_rate: Decimal,
    /// Free-text note, empty when none was given.
    pub description: String,
    /// Whether the shift was paid at the holiday rate.
    pub is_holiday: bool,
    /// Shift length minus break, in hours.
    pub hours_worked: Decimal,
    /// Hours paid at the plain rate.
    #[serde(default)]
    pub regular_hours: Option<Decimal>,
    /// Hours beyond the daily regular allowance.
    #[serde(default)]
    pub overtime_hours: Option<Decimal>,
    /// Pay for the regular hours.
    #[serde(default)]
    pub regular_earnings: Option<Decimal>,
    /// Pay for the overtime hours across both tiers.
    #[serde(default)]
    pub overtime_earnings: Option<Decimal>,
    /// Pay for a holiday shift.
    #[serde(default)]
    pub holiday_earnings: Option<Decimal>,
    /// Sum of the three earnings components.
    pub total_earnings: Decimal,
}

impl WorkSession {
    /// Regular hours, zero when absent.
    pub fn regular_hours_or_zero(&self) -> Decimal {
        self.regular_hours.unwrap_or(Decimal::ZERO)
    }

    /// Overtime hours, zero when absent.
    pub fn overtime_hours_or_zero(&self) -> Decimal {
        self.overtime_hours.unwrap_or(Decimal::ZERO)
    }
}
