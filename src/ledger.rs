//! The ledger: every operation the engine exposes.
//!
//! [`Ledger`] ties the calculators to a [`RecordStore`]. Adding a session
//! runs the full pipeline (worked hours, holiday resolution, monthly
//! overtime accumulation, earnings) and persists the result. Reporting
//! reads a window of records back and hands them to the aggregator.
//!
//! Writes go through a single lock, so two sessions added to the same
//! month never price against the same overtime baseline.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::calculation::{
    accumulate_monthly_overtime, calculate_worked_hours, compute_earnings, parse_clock_time,
    summarize, summarize_month, yearly_breakdown,
};
use crate::config::{AppConfig, EarningsRules};
use crate::error::{EngineError, EngineResult, RecordKind};
use crate::models::{
    AuditStep, DateWindow, Holiday, NewHoliday, NewWorkSession, OwnerId, PeriodReport,
    WorkSession, YearlyData,
};
use crate::store::RecordStore;

/// What adding a session produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddSessionOutcome {
    /// Id of the stored session.
    pub id: Uuid,
    /// The session as stored.
    pub session: WorkSession,
    /// Every rule applied, in order.
    pub audit_trace: Vec<AuditStep>,
}

/// Work session and holiday operations for all owners.
pub struct Ledger {
    store: Arc<dyn RecordStore>,
    rules: EarningsRules,
    default_list_limit: usize,
    write_lock: Mutex<()>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("rules", &self.rules)
            .field("default_list_limit", &self.default_list_limit)
            .finish_non_exhaustive()
    }
}

impl Ledger {
    /// Creates a ledger over `store` using the rules in `config`.
    pub fn new(store: Arc<dyn RecordStore>, config: &AppConfig) -> Self {
        Self {
            store,
            rules: config.earnings().clone(),
            default_list_limit: config.server().default_list_limit,
            write_lock: Mutex::new(()),
        }
    }

    /// The pay rules sessions are priced with.
    pub fn rules(&self) -> &EarningsRules {
        &self.rules
    }

    // Guards no data, so a poisoned lock is safe to reuse.
    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!("Recovered ledger write lock after a panicked writer");
            self.write_lock.clear_poison();
            PoisonError::into_inner(poisoned)
        })
    }

    // Work sessions

    /// Prices and stores a new session.
    ///
    /// The holiday flag defaults to whatever the owner's calendar says for
    /// the session's date. Overtime tiering uses the overtime already
    /// stored for that month; sessions stored earlier are left untouched.
    pub fn add_work_session(
        &self,
        owner: &OwnerId,
        input: NewWorkSession,
    ) -> EngineResult<AddSessionOutcome> {
        let start = parse_clock_time(&input.start_time)?;
        let end = parse_clock_time(&input.end_time)?;

        let _guard = self.lock_writes();
        let mut audit_trace = Vec::new();

        let worked = calculate_worked_hours(start, end, input.break_minutes, 1);
        audit_trace.push(worked.audit_step);

        let is_holiday = self.resolve_holiday(owner, input.date, input.is_holiday, &mut audit_trace)?;

        let accumulation = accumulate_monthly_overtime(self.store.as_ref(), owner, input.date, 3)?;
        let prior_overtime = accumulation.overtime_hours;
        audit_trace.push(accumulation.audit_step);

        let breakdown = compute_earnings(
            worked.hours_worked,
            input.hourly_rate,
            is_holiday,
            prior_overtime,
            &self.rules,
            4,
        )?;
        audit_trace.extend(breakdown.audit_steps);

        let session = WorkSession {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            date: input.date,
            start_time: start.format("%H:%M").to_string(),
            end_time: end.format("%H:%M").to_string(),
            break_minutes: input.break_minutes,
            hourly_rate: input.hourly_rate,
            description: input.description.unwrap_or_default(),
            is_holiday,
            hours_worked: worked.hours_worked,
            regular_hours: Some(breakdown.regular_hours),
            overtime_hours: Some(breakdown.overtime_hours),
            regular_earnings: Some(breakdown.regular_earnings),
            overtime_earnings: Some(breakdown.overtime_earnings),
            holiday_earnings: Some(breakdown.holiday_earnings),
            total_earnings: breakdown.total_earnings,
        };

        let id = self.store.insert_session(session.clone())?;

        info!(
            owner = %owner,
            session_id = %id,
            date = %session.date,
            hours_worked = %session.hours_worked,
            is_holiday,
            prior_overtime = %prior_overtime,
            total_earnings = %session.total_earnings,
            "Work session added"
        );

        Ok(AddSessionOutcome {
            id,
            session,
            audit_trace,
        })
    }

    fn resolve_holiday(
        &self,
        owner: &OwnerId,
        date: NaiveDate,
        explicit: Option<bool>,
        audit_trace: &mut Vec<AuditStep>,
    ) -> EngineResult<bool> {
        let (is_holiday, reasoning, source) = match explicit {
            Some(flag) => (
                flag,
                format!("Holiday flag given explicitly as {}", flag),
                "explicit",
            ),
            None => match self.store.find_holiday(owner, date)? {
                Some(holiday) => (
                    true,
                    format!("{} is marked as '{}' in the calendar", date, holiday.name),
                    "calendar",
                ),
                None => (
                    false,
                    format!("{} is not marked as a holiday in the calendar", date),
                    "calendar",
                ),
            },
        };

        debug!(owner = %owner, %date, is_holiday, source, "Holiday flag resolved");

        audit_trace.push(AuditStep {
            step_number: 2,
            rule_id: "holiday_resolution".to_string(),
            rule_name: "Holiday Resolution".to_string(),
            input: serde_json::json!({
                "date": date.to_string(),
                "is_holiday": explicit
            }),
            output: serde_json::json!({
                "is_holiday": is_holiday,
                "source": source
            }),
            reasoning,
        });

        Ok(is_holiday)
    }

    /// Deletes one of the owner's sessions.
    ///
    /// A missing id and another owner's id fail the same way.
    pub fn remove_work_session(&self, owner: &OwnerId, id: Uuid) -> EngineResult<()> {
        let _guard = self.lock_writes();
        match self.store.get_session(id)? {
            Some(session) if &session.owner == owner => {
                self.store.delete_session(id)?;
                info!(owner = %owner, session_id = %id, "Work session removed");
                Ok(())
            }
            _ => Err(EngineError::NotFound {
                kind: RecordKind::WorkSession,
                id,
            }),
        }
    }

    /// Lists the owner's sessions between inclusive bounds, newest first.
    ///
    /// At most `limit` sessions come back; the configured default applies
    /// when `limit` is `None`.
    pub fn list_work_sessions(
        &self,
        owner: &OwnerId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
        limit: Option<usize>,
    ) -> EngineResult<Vec<WorkSession>> {
        let window = DateWindow::from_inclusive(start, end);
        let mut sessions = self.store.list_sessions(owner, &window)?;
        sessions.sort_by(|a, b| b.date.cmp(&a.date));
        sessions.truncate(limit.unwrap_or(self.default_list_limit));
        Ok(sessions)
    }

    // Reporting

    fn report(&self, owner: &OwnerId, window: DateWindow, monthly: bool) -> EngineResult<PeriodReport> {
        let sessions = self.store.list_sessions(owner, &window)?;
        let holidays = self.store.list_holidays(owner, &window)?;
        let summary = if monthly {
            summarize_month(&sessions, &holidays)
        } else {
            summarize(&sessions, &holidays)
        };
        Ok(PeriodReport {
            window,
            summary,
            sessions,
            holidays,
        })
    }

    /// Totals for the seven days starting at `week_start`.
    pub fn weekly_stats(&self, owner: &OwnerId, week_start: NaiveDate) -> EngineResult<PeriodReport> {
        self.report(owner, DateWindow::week(week_start), false)
    }

    /// Totals for one calendar month, with a per-week breakdown.
    pub fn monthly_stats(&self, owner: &OwnerId, year: i32, month: u32) -> EngineResult<PeriodReport> {
        self.report(owner, DateWindow::month(year, month)?, true)
    }

    /// Twelve monthly slots plus totals for one calendar year.
    pub fn yearly_data(&self, owner: &OwnerId, year: i32) -> EngineResult<YearlyData> {
        let window = DateWindow::year(year)?;
        let sessions = self.store.list_sessions(owner, &window)?;
        Ok(yearly_breakdown(year, &sessions))
    }

    // Holidays

    /// Marks a date as a holiday for the owner.
    pub fn add_holiday(&self, owner: &OwnerId, input: NewHoliday) -> EngineResult<Uuid> {
        let _guard = self.lock_writes();
        if self.store.find_holiday(owner, input.date)?.is_some() {
            return Err(EngineError::HolidayExists { date: input.date });
        }

        let holiday = Holiday {
            id: Uuid::new_v4(),
            owner: owner.clone(),
            date: input.date,
            name: input.name,
            description: input.description.unwrap_or_default(),
        };
        let id = self.store.insert_holiday(holiday)?;

        info!(owner = %owner, holiday_id = %id, date = %input.date, "Holiday added");
        Ok(id)
    }

    /// Deletes one of the owner's holidays.
    pub fn remove_holiday(&self, owner: &OwnerId, id: Uuid) -> EngineResult<()> {
        let _guard = self.lock_writes();
        match self.store.get_holiday(id)? {
            Some(holiday) if &holiday.owner == owner => {
                self.store.delete_holiday(id)?;
                info!(owner = %owner, holiday_id = %id, "Holiday removed");
                Ok(())
            }
            _ => Err(EngineError::NotFound {
                kind: RecordKind::Holiday,
                id,
            }),
        }
    }

    /// Lists the owner's holidays between inclusive bounds, oldest first.
    pub fn list_holidays(
        &self,
        owner: &OwnerId,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> EngineResult<Vec<Holiday>> {
        let window = DateWindow::from_inclusive(start, end);
        let mut holidays = self.store.list_holidays(owner, &window)?;
        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }

    /// The owner's holiday on `date`, if one is marked.
    pub fn holiday_on(&self, owner: &OwnerId, date: NaiveDate) -> EngineResult<Option<Holiday>> {
        self.store.find_holiday(owner, date)
    }

    /// The owner's holidays in one calendar month.
    pub fn month_holidays(&self, owner: &OwnerId, year: i32, month: u32) -> EngineResult<Vec<Holiday>> {
        let window = DateWindow::month(year, month)?;
        let mut holidays = self.store.list_holidays(owner, &window)?;
        holidays.sort_by_key(|h| h.date);
        Ok(holidays)
    }
}
