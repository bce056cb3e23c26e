//! Worked-hours arithmetic.
//!
//! Converts a clock-in time, clock-out time and break length into worked
//! hours. A clock-out earlier than the clock-in is an overnight shift and
//! wraps around midnight exactly once.

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::AuditStep;

/// Minutes in one day, added once to an overnight shift.
pub const MINUTES_PER_DAY: i64 = 24 * 60;

/// The result of computing the hours worked in a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkedHoursResult {
    /// Minutes between clock-in and clock-out.
    pub shift_minutes: i64,
    /// Whether the shift crossed midnight.
    pub overnight: bool,
    /// Shift minutes less the break, in hours.
    pub hours_worked: Decimal,
    /// The audit step recording this computation.
    pub audit_step: AuditStep,
}

/// Parses an `HH:MM` clock time.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::parse_clock_time;
/// use chrono::NaiveTime;
///
/// assert_eq!(parse_clock_time("06:30").unwrap(), NaiveTime::from_hms_opt(6, 30, 0).unwrap());
/// assert!(parse_clock_time("6.30pm").is_err());
/// ```
pub fn parse_clock_time(value: &str) -> EngineResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M").map_err(|_| EngineError::InvalidTime {
        value: value.to_string(),
    })
}

/// Minutes from `start` to `end`, wrapping past midnight when `end` is earlier.
pub fn shift_minutes(start: NaiveTime, end: NaiveTime) -> i64 {
    let total = (end - start).num_minutes();
    if total < 0 {
        total + MINUTES_PER_DAY
    } else {
        total
    }
}

/// Computes worked hours for a shift.
///
/// The break is subtracted without any check; a break longer than the
/// shift yields negative hours.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::{compute_worked_hours, parse_clock_time};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let start = parse_clock_time("22:00").unwrap();
/// let end = parse_clock_time("06:00").unwrap();
/// assert_eq!(compute_worked_hours(start, end, 30), Decimal::from_str("7.5").unwrap());
/// ```
pub fn compute_worked_hours(start: NaiveTime, end: NaiveTime, break_minutes: i64) -> Decimal {
    let worked_minutes = shift_minutes(start, end).saturating_sub(break_minutes);
    Decimal::from(worked_minutes) / Decimal::from(60)
}

/// Computes worked hours and records the audit step for it.
pub fn calculate_worked_hours(
    start: NaiveTime,
    end: NaiveTime,
    break_minutes: i64,
    step_number: u32,
) -> WorkedHoursResult {
    let minutes = shift_minutes(start, end);
    let overnight = end < start;
    let hours_worked = compute_worked_hours(start, end, break_minutes);

    let reasoning = if overnight {
        format!(
            "Shift {} to {} crosses midnight: {} minutes less {} minute break = {} hours",
            start.format("%H:%M"),
            end.format("%H:%M"),
            minutes,
            break_minutes,
            hours_worked.normalize()
        )
    } else {
        format!(
            "Shift {} to {}: {} minutes less {} minute break = {} hours",
            start.format("%H:%M"),
            end.format("%H:%M"),
            minutes,
            break_minutes,
            hours_worked.normalize()
        )
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "worked_hours".to_string(),
        rule_name: "Worked Hours".to_string(),
        input: serde_json::json!({
            "start_time": start.format("%H:%M").to_string(),
            "end_time": end.format("%H:%M").to_string(),
            "break_minutes": break_minutes
        }),
        output: serde_json::json!({
            "shift_minutes": minutes,
            "overnight": overnight,
            "hours_worked": hours_worked.normalize().to_string()
        }),
        reasoning,
    };

    WorkedHoursResult {
        shift_minutes: minutes,
        overnight,
        hours_worked,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        parse_clock_time(s).unwrap()
    }

    #[test]
    fn test_day_shift_no_break() {
        assert_eq!(compute_worked_hours(time("09:00"), time("17:00"), 0), dec("8"));
    }

    #[test]
    fn test_day_shift_with_break() {
        assert_eq!(compute_worked_hours(time("09:00"), time("17:30"), 30), dec("8"));
    }

    #[test]
    fn test_overnight_shift_with_break() {
        assert_eq!(compute_worked_hours(time("22:00"), time("06:00"), 30), dec("7.5"));
    }

    #[test]
    fn test_fractional_hours() {
        assert_eq!(compute_worked_hours(time("09:00"), time("09:45"), 0), dec("0.75"));
    }

    #[test]
    fn test_zero_duration_shift() {
        assert_eq!(compute_worked_hours(time("09:00"), time("09:00"), 0), Decimal::ZERO);
    }

    #[test]
    fn test_break_longer_than_shift_goes_negative() {
        // Not rejected here; the request layer is responsible for sane input.
        assert_eq!(compute_worked_hours(time("09:00"), time("10:00"), 90), dec("-0.5"));
    }

    #[test]
    fn test_one_minute_before_start_is_almost_a_full_day() {
        assert_eq!(shift_minutes(time("09:00"), time("08:59")), MINUTES_PER_DAY - 1);
    }

    #[test]
    fn test_parse_rejects_malformed_times() {
        for bad in ["", "9", "25:00", "12:60", "noon"] {
            match parse_clock_time(bad) {
                Err(EngineError::InvalidTime { value }) => assert_eq!(value, bad),
                other => panic!("Expected InvalidTime for {:?}, got {:?}", bad, other),
            }
        }
    }

    #[test]
    fn test_audit_step_marks_overnight() {
        let result = calculate_worked_hours(time("22:00"), time("06:00"), 30, 1);

        assert!(result.overnight);
        assert_eq!(result.shift_minutes, 480);
        assert_eq!(result.hours_worked, dec("7.5"));
        assert_eq!(result.audit_step.rule_id, "worked_hours");
        assert_eq!(result.audit_step.output["hours_worked"].as_str().unwrap(), "7.5");
        assert!(result.audit_step.reasoning.contains("crosses midnight"));
    }
}
