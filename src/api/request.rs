//! Request types for the earnings engine API.
//!
//! This module defines the JSON bodies and query strings the endpoints
//! accept, and the checks applied to them before the ledger runs.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculation::parse_clock_time;
use crate::error::{EngineError, EngineResult};
use crate::models::{NewHoliday, NewWorkSession};

fn invalid(field: &str, message: &str) -> EngineError {
    EngineError::Validation {
        field: field.to_string(),
        message: message.to_string(),
    }
}

/// Highest hourly rate the API accepts.
pub const MAX_HOURLY_RATE: u32 = 100_000;

/// Longest unpaid break the API accepts, one full day.
pub const MAX_BREAK_MINUTES: i64 = 24 * 60;

/// Request body for `POST /sessions`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRequest {
    /// The day the shift started.
    pub date: NaiveDate,
    /// Clock-in time, `HH:MM`.
    pub start_time: String,
    /// Clock-out time, `HH:MM`.
    pub end_time: String,
    /// Unpaid break in minutes.
    pub break_minutes: i64,
    /// Pay per regular hour.
    pub hourly_rate: Decimal,
    /// Optional note.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit holiday flag; the calendar decides when omitted.
    #[serde(default)]
    pub is_holiday: Option<bool>,
}

impl SessionRequest {
    /// Rejects inputs the calculators would accept but the API does not.
    pub fn validate(&self) -> EngineResult<()> {
        if self.hourly_rate <= Decimal::ZERO {
            return Err(invalid("hourly_rate", "must be greater than zero"));
        }
        if self.hourly_rate > Decimal::from(MAX_HOURLY_RATE) {
            return Err(invalid("hourly_rate", "must not exceed 100000"));
        }
        if self.break_minutes < 0 {
            return Err(invalid("break_minutes", "must not be negative"));
        }
        if self.break_minutes > MAX_BREAK_MINUTES {
            return Err(invalid("break_minutes", "must not exceed 1440"));
        }
        parse_clock_time(&self.start_time)?;
        parse_clock_time(&self.end_time)?;
        Ok(())
    }
}

impl From<SessionRequest> for NewWorkSession {
    fn from(req: SessionRequest) -> Self {
        NewWorkSession {
            date: req.date,
            start_time: req.start_time,
            end_time: req.end_time,
            break_minutes: req.break_minutes,
            hourly_rate: req.hourly_rate,
            description: req.description,
            is_holiday: req.is_holiday,
        }
    }
}

/// Request body for `POST /holidays`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolidayRequest {
    /// The day to mark.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
    /// Optional note.
    #[serde(default)]
    pub description: Option<String>,
}

impl HolidayRequest {
    /// Requires a non-blank name.
    pub fn validate(&self) -> EngineResult<()> {
        if self.name.trim().is_empty() {
            return Err(invalid("name", "must not be empty"));
        }
        Ok(())
    }
}

impl From<HolidayRequest> for NewHoliday {
    fn from(req: HolidayRequest) -> Self {
        NewHoliday {
            date: req.date,
            name: req.name.trim().to_string(),
            description: req.description,
        }
    }
}

/// Query string for `GET /sessions`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListSessionsQuery {
    /// First day to include.
    pub start_date: Option<NaiveDate>,
    /// Last day to include.
    pub end_date: Option<NaiveDate>,
    /// Maximum number of sessions to return.
    pub limit: Option<usize>,
}

impl ListSessionsQuery {
    /// Rejects a zero limit.
    pub fn validate(&self) -> EngineResult<()> {
        if self.limit == Some(0) {
            return Err(invalid("limit", "must be greater than zero"));
        }
        Ok(())
    }
}

/// Query string for `GET /holidays`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DateRangeQuery {
    /// First day to include.
    pub start_date: Option<NaiveDate>,
    /// Last day to include.
    pub end_date: Option<NaiveDate>,
}

/// Query string for `GET /stats/weekly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeekQuery {
    /// First day of the week.
    pub week_start: NaiveDate,
}

/// Query string naming one calendar month.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthQuery {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1 through 12.
    pub month: u32,
}

/// Query string for `GET /stats/yearly`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearQuery {
    /// Calendar year.
    pub year: i32,
}
