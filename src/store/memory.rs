//! In-memory record store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::{DateWindow, Holiday, OwnerId, WorkSession};

use super::RecordStore;

/// A [`RecordStore`] that keeps everything in process memory.
///
/// Sessions are listed newest first and holidays oldest first.
#[derive(Debug, Default)]
pub struct MemoryStore {
    sessions: RwLock<HashMap<Uuid, WorkSession>>,
    holidays: RwLock<HashMap<Uuid, Holiday>>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned<T>(_: PoisonError<T>) -> EngineError {
    EngineError::Store {
        message: "record lock poisoned by a panicked writer".to_string(),
    }
}

impl RecordStore for MemoryStore {
    fn insert_session(&self, session: WorkSession) -> EngineResult<Uuid> {
        let id = session.id;
        self.sessions.write().map_err(poisoned)?.insert(id, session);
        Ok(id)
    }

    fn get_session(&self, id: Uuid) -> EngineResult<Option<WorkSession>> {
        Ok(self.sessions.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn list_sessions(
        &self,
        owner: &OwnerId,
        window: &DateWindow,
    ) -> EngineResult<Vec<WorkSession>> {
        let sessions = self.sessions.read().map_err(poisoned)?;
        let mut matching: Vec<WorkSession> = sessions
            .values()
            .filter(|s| &s.owner == owner && window.contains(s.date))
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matching)
    }

    fn delete_session(&self, id: Uuid) -> EngineResult<()> {
        self.sessions.write().map_err(poisoned)?.remove(&id);
        Ok(())
    }

    fn insert_holiday(&self, holiday: Holiday) -> EngineResult<Uuid> {
        let id = holiday.id;
        self.holidays.write().map_err(poisoned)?.insert(id, holiday);
        Ok(id)
    }

    fn get_holiday(&self, id: Uuid) -> EngineResult<Option<Holiday>> {
        Ok(self.holidays.read().map_err(poisoned)?.get(&id).cloned())
    }

    fn find_holiday(&self, owner: &OwnerId, date: NaiveDate) -> EngineResult<Option<Holiday>> {
        Ok(self
            .holidays
            .read()
            .map_err(poisoned)?
            .values()
            .find(|h| &h.owner == owner && h.date == date)
            .cloned())
    }

    fn list_holidays(&self, owner: &OwnerId, window: &DateWindow) -> EngineResult<Vec<Holiday>> {
        let holidays = self.holidays.read().map_err(poisoned)?;
        let mut matching: Vec<Holiday> = holidays
            .values()
            .filter(|h| &h.owner == owner && window.contains(h.date))
            .cloned()
            .collect();
        matching.sort_by_key(|h| h.date);
        Ok(matching)
    }

    fn delete_holiday(&self, id: Uuid) -> EngineResult<()> {
        self.holidays.write().map_err(poisoned)?.remove(&id);
        Ok(())
    }
}
