//! Monthly overtime accumulation.
//!
//! Before a session is priced, the engine needs the overtime its owner has
//! already recorded in the same calendar month. Only persisted sessions
//! count; the session being priced is not stored yet. Earlier sessions are
//! never re-priced when this figure later changes.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{AuditStep, DateWindow, OwnerId, WorkSession};
use crate::store::RecordStore;

/// The overtime already recorded in a session's month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyOvertimeAccumulation {
    /// The calendar month that was scanned.
    pub window: DateWindow,
    /// Number of stored sessions in that month.
    pub session_count: usize,
    /// Sum of their overtime hours.
    pub overtime_hours: Decimal,
    /// The audit step recording the accumulation.
    pub audit_step: AuditStep,
}

/// Sums the overtime of the sessions that fall in `reference_date`'s month.
///
/// Sessions outside the month are ignored, so callers may pass a wider set.
/// Sessions without an overtime figure count as zero.
///
/// # Examples
///
/// ```
/// use earnings_engine::calculation::sum_monthly_overtime;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let reference = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
/// assert_eq!(sum_monthly_overtime(&[], reference), Decimal::ZERO);
/// ```
pub fn sum_monthly_overtime(sessions: &[WorkSession], reference_date: NaiveDate) -> Decimal {
    let window = DateWindow::month_containing(reference_date);
    sessions
        .iter()
        .filter(|s| window.contains(s.date))
        .map(WorkSession::overtime_hours_or_zero)
        .sum()
}

/// Reads the owner's stored sessions for the month of `reference_date` and
/// sums their overtime.
pub fn accumulate_monthly_overtime(
    store: &dyn RecordStore,
    owner: &OwnerId,
    reference_date: NaiveDate,
    step_number: u32,
) -> EngineResult<MonthlyOvertimeAccumulation> {
    let window = DateWindow::month_containing(reference_date);
    let sessions = store.list_sessions(owner, &window)?;
    let overtime_hours = sum_monthly_overtime(&sessions, reference_date);

    let audit_step = AuditStep {
        step_number,
        rule_id: "monthly_overtime_accumulation".to_string(),
        rule_name: "Monthly Overtime Accumulation".to_string(),
        input: serde_json::json!({
            "month_start": window.start.to_string(),
            "month_end": window.end.to_string()
        }),
        output: serde_json::json!({
            "session_count": sessions.len(),
            "overtime_hours": overtime_hours.normalize().to_string()
        }),
        reasoning: format!(
            "{} stored sessions from {} to {} carry {} overtime hours",
            sessions.len(),
            window.start,
            window.end,
            overtime_hours.normalize()
        ),
    };

    Ok(MonthlyOvertimeAccumulation {
        window,
        session_count: sessions.len(),
        overtime_hours,
        audit_step,
    })
}

/// Overtime hours the owner has already recorded in `reference_date`'s month.
pub fn accumulated_overtime_hours(
    store: &dyn RecordStore,
    owner: &OwnerId,
    reference_date: NaiveDate,
) -> EngineResult<Decimal> {
    accumulate_monthly_overtime(store, owner, reference_date, 0).map(|acc| acc.overtime_hours)
}
