//! HTTP API module for the earnings engine.
//!
//! This module provides the REST endpoints for recording work sessions,
//! managing the holiday calendar and reading weekly, monthly and yearly
//! earnings reports.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::{USER_ID_HEADER, caller_from_headers, create_router};
pub use request::{
    DateRangeQuery, HolidayRequest, ListSessionsQuery, MAX_BREAK_MINUTES, MAX_HOURLY_RATE,
    MonthQuery, SessionRequest, WeekQuery, YearQuery,
};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
