//! Holiday calendar model.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::OwnerId;

/// A named calendar marker. At most one per owner and date.
///
/// # Example
///
/// ```
/// use earnings_engine::models::{Holiday, OwnerId};
/// use chrono::NaiveDate;
/// use uuid::Uuid;
///
/// let holiday = Holiday {
///     id: Uuid::new_v4(),
///     owner: OwnerId::new("user_1"),
///     date: NaiveDate::from_ymd_opt(2025, 12, 25).unwrap(),
///     name: "Christmas Day".to_string(),
///     description: String::new(),
/// };
/// assert_eq!(holiday.name, "Christmas Day");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// Record id.
    pub id: Uuid,
    /// The user this holiday belongs to.
    pub owner: OwnerId,
    /// The day marked as a holiday.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
    /// Optional note, empty when none was given.
    #[serde(default)]
    pub description: String,
}

/// The caller-supplied part of a holiday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHoliday {
    /// The day to mark.
    pub date: NaiveDate,
    /// Display name.
    pub name: String,
    /// Optional note.
    #[serde(default)]
    pub description: Option<String>,
}
