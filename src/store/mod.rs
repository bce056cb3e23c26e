//! Record store abstraction.
//!
//! The engine reads and writes work sessions and holidays through the
//! [`RecordStore`] trait. [`MemoryStore`] is the bundled implementation.

mod memory;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::{DateWindow, Holiday, OwnerId, WorkSession};

pub use memory::MemoryStore;

/// Storage for work sessions and holidays.
///
/// Implementations do not check ownership; the ledger does that before
/// deleting anything. List results carry no ordering guarantee.
pub trait RecordStore: Send + Sync {
    // Work sessions

    /// Stores a session under its own id and returns that id.
    fn insert_session(&self, session: WorkSession) -> EngineResult<Uuid>;

    /// Fetches a session by id.
    fn get_session(&self, id: Uuid) -> EngineResult<Option<WorkSession>>;

    /// Lists an owner's sessions whose date falls inside `window`.
    fn list_sessions(&self, owner: &OwnerId, window: &DateWindow)
    -> EngineResult<Vec<WorkSession>>;

    /// Removes a session. Removing a missing id is not an error.
    fn delete_session(&self, id: Uuid) -> EngineResult<()>;

    // Holidays

    /// Stores a holiday under its own id and returns that id.
    fn insert_holiday(&self, holiday: Holiday) -> EngineResult<Uuid>;

    /// Fetches a holiday by id.
    fn get_holiday(&self, id: Uuid) -> EngineResult<Option<Holiday>>;

    /// Finds the owner's holiday on `date`, if any.
    fn find_holiday(&self, owner: &OwnerId, date: NaiveDate) -> EngineResult<Option<Holiday>>;

    /// Lists an owner's holidays whose date falls inside `window`.
    fn list_holidays(&self, owner: &OwnerId, window: &DateWindow) -> EngineResult<Vec<Holiday>>;

    /// Removes a holiday. Removing a missing id is not an error.
    fn delete_holiday(&self, id: Uuid) -> EngineResult<()>;
}
