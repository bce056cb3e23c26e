//! Error types for the earnings engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for every rejection the ledger and its request layer can produce.

use chrono::NaiveDate;
use thiserror::Error;
use uuid::Uuid;

/// The kind of record an operation was addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// A stored work session.
    WorkSession,
    /// A calendar holiday.
    Holiday,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::WorkSession => write!(f, "Work session"),
            RecordKind::Holiday => write!(f, "Holiday"),
        }
    }
}

/// The main error type for the earnings engine.
///
/// # Example
///
/// ```
/// use earnings_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/earnings.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/earnings.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// Configuration parsed but holds values the engine cannot use.
    #[error("Invalid configuration value '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration key.
        field: String,
        /// Why the value was rejected.
        message: String,
    },

    /// The caller did not identify itself.
    #[error("Not authenticated")]
    Unauthenticated,

    /// A request field failed validation.
    #[error("Invalid field '{field}': {message}")]
    Validation {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A clock time was not in `HH:MM` form.
    #[error("Invalid clock time '{value}': expected HH:MM")]
    InvalidTime {
        /// The rejected input.
        value: String,
    },

    /// The owner already has a holiday on this date.
    #[error("Holiday already exists for {date}")]
    HolidayExists {
        /// The conflicting date.
        date: NaiveDate,
    },

    /// The record does not exist or belongs to another owner.
    #[error("{kind} not found or unauthorized: {id}")]
    NotFound {
        /// What kind of record was requested.
        kind: RecordKind,
        /// The requested record id.
        id: Uuid,
    },

    /// The record store failed to complete an operation.
    #[error("Record store error: {message}")]
    Store {
        /// A description of the store failure.
        message: String,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
