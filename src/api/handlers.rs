//! HTTP request handlers for the earnings engine API.
//!
//! This module contains the handler functions for all API endpoints.
//! Every endpoint acts for the caller named in the `x-user-id` header.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get},
};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::models::OwnerId;

use super::request::{
    DateRangeQuery, HolidayRequest, ListSessionsQuery, MonthQuery, SessionRequest, WeekQuery,
    YearQuery,
};
use super::response::ApiErrorResponse;
use super::state::AppState;

/// Header carrying the caller's user id.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/sessions", get(list_sessions_handler).post(add_session_handler))
        .route("/sessions/:id", delete(remove_session_handler))
        .route("/stats/weekly", get(weekly_stats_handler))
        .route("/stats/monthly", get(monthly_stats_handler))
        .route("/stats/yearly", get(yearly_data_handler))
        .route("/holidays", get(list_holidays_handler).post(add_holiday_handler))
        .route("/holidays/month", get(month_holidays_handler))
        .route("/holidays/on/:date", get(holiday_on_handler))
        .route("/holidays/:id", delete(remove_holiday_handler))
        .with_state(state)
}

/// Reads the caller's identity from the request headers.
///
/// A missing, blank or non-UTF-8 header is treated as no identity at all.
pub fn caller_from_headers(headers: &HeaderMap) -> EngineResult<OwnerId> {
    headers
        .get(USER_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(OwnerId::new)
        .ok_or(EngineError::Unauthenticated)
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Logs a rejected request and converts the cause into an error response.
fn rejected<E>(correlation_id: Uuid, operation: &'static str) -> impl Fn(E) -> ApiErrorResponse
where
    E: Into<ApiErrorResponse> + std::fmt::Display,
{
    move |err| {
        warn!(
            correlation_id = %correlation_id,
            operation,
            error = %err,
            "Request rejected"
        );
        err.into()
    }
}

// Work sessions

/// Handler for `POST /sessions`.
///
/// Validates the body, prices the session and returns it together with its
/// audit trace.
async fn add_session_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<SessionRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    // Generate correlation ID for request tracking
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing add session request");

    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "add_session"))?;
    let Json(request) = payload.map_err(rejected(correlation_id, "add_session"))?;
    request
        .validate()
        .map_err(rejected(correlation_id, "add_session"))?;

    let start_time = Instant::now();
    let outcome = state
        .ledger()
        .add_work_session(&owner, request.into())
        .map_err(rejected(correlation_id, "add_session"))?;

    info!(
        correlation_id = %correlation_id,
        owner = %owner,
        session_id = %outcome.id,
        total_earnings = %outcome.session.total_earnings,
        duration_us = start_time.elapsed().as_micros(),
        "Work session recorded"
    );
    Ok(json_response(StatusCode::CREATED, outcome))
}

/// Handler for `GET /sessions`.
async fn list_sessions_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<ListSessionsQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "list_sessions"))?;
    let Query(query) = query.map_err(rejected(correlation_id, "list_sessions"))?;
    query
        .validate()
        .map_err(rejected(correlation_id, "list_sessions"))?;

    let sessions = state
        .ledger()
        .list_work_sessions(&owner, query.start_date, query.end_date, query.limit)
        .map_err(rejected(correlation_id, "list_sessions"))?;

    info!(
        correlation_id = %correlation_id,
        owner = %owner,
        count = sessions.len(),
        "Listed work sessions"
    );
    Ok(json_response(StatusCode::OK, sessions))
}

/// Handler for `DELETE /sessions/:id`.
async fn remove_session_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "remove_session"))?;
    let Path(id) = id.map_err(rejected(correlation_id, "remove_session"))?;

    state
        .ledger()
        .remove_work_session(&owner, id)
        .map_err(rejected(correlation_id, "remove_session"))?;

    info!(correlation_id = %correlation_id, owner = %owner, session_id = %id, "Work session deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

// Reporting

/// Handler for `GET /stats/weekly`.
async fn weekly_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<WeekQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "weekly_stats"))?;
    let Query(query) = query.map_err(rejected(correlation_id, "weekly_stats"))?;

    let report = state
        .ledger()
        .weekly_stats(&owner, query.week_start)
        .map_err(rejected(correlation_id, "weekly_stats"))?;

    info!(
        correlation_id = %correlation_id,
        owner = %owner,
        week_start = %query.week_start,
        work_days = report.summary.work_days,
        "Weekly stats computed"
    );
    Ok(json_response(StatusCode::OK, report))
}

/// Handler for `GET /stats/monthly`.
async fn monthly_stats_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "monthly_stats"))?;
    let Query(query) = query.map_err(rejected(correlation_id, "monthly_stats"))?;

    let report = state
        .ledger()
        .monthly_stats(&owner, query.year, query.month)
        .map_err(rejected(correlation_id, "monthly_stats"))?;

    info!(
        correlation_id = %correlation_id,
        owner = %owner,
        year = query.year,
        month = query.month,
        work_days = report.summary.work_days,
        "Monthly stats computed"
    );
    Ok(json_response(StatusCode::OK, report))
}

/// Handler for `GET /stats/yearly`.
async fn yearly_data_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<YearQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "yearly_data"))?;
    let Query(query) = query.map_err(rejected(correlation_id, "yearly_data"))?;

    let data = state
        .ledger()
        .yearly_data(&owner, query.year)
        .map_err(rejected(correlation_id, "yearly_data"))?;

    info!(
        correlation_id = %correlation_id,
        owner = %owner,
        year = query.year,
        total_earnings = %data.total_earnings,
        "Yearly data computed"
    );
    Ok(json_response(StatusCode::OK, data))
}

// Holidays

#[derive(Serialize)]
struct CreatedHoliday {
    id: Uuid,
}

#[derive(Serialize)]
struct HolidayLookup {
    date: NaiveDate,
    holiday: Option<crate::models::Holiday>,
}

/// Handler for `POST /holidays`.
async fn add_holiday_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<HolidayRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "add_holiday"))?;
    let Json(request) = payload.map_err(rejected(correlation_id, "add_holiday"))?;
    request
        .validate()
        .map_err(rejected(correlation_id, "add_holiday"))?;

    let id = state
        .ledger()
        .add_holiday(&owner, request.into())
        .map_err(rejected(correlation_id, "add_holiday"))?;

    info!(correlation_id = %correlation_id, owner = %owner, holiday_id = %id, "Holiday recorded");
    Ok(json_response(StatusCode::CREATED, CreatedHoliday { id }))
}

/// Handler for `GET /holidays`.
async fn list_holidays_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<DateRangeQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "list_holidays"))?;
    let Query(query) = query.map_err(rejected(correlation_id, "list_holidays"))?;

    let holidays = state
        .ledger()
        .list_holidays(&owner, query.start_date, query.end_date)
        .map_err(rejected(correlation_id, "list_holidays"))?;

    Ok(json_response(StatusCode::OK, holidays))
}

/// Handler for `DELETE /holidays/:id`.
async fn remove_holiday_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "remove_holiday"))?;
    let Path(id) = id.map_err(rejected(correlation_id, "remove_holiday"))?;

    state
        .ledger()
        .remove_holiday(&owner, id)
        .map_err(rejected(correlation_id, "remove_holiday"))?;

    info!(correlation_id = %correlation_id, owner = %owner, holiday_id = %id, "Holiday deleted");
    Ok(StatusCode::NO_CONTENT.into_response())
}

/// Handler for `GET /holidays/on/:date`.
///
/// Answers 200 either way; `holiday` is null when the day is not marked.
async fn holiday_on_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    date: Result<Path<NaiveDate>, PathRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "holiday_on"))?;
    let Path(date) = date.map_err(rejected(correlation_id, "holiday_on"))?;

    let holiday = state
        .ledger()
        .holiday_on(&owner, date)
        .map_err(rejected(correlation_id, "holiday_on"))?;

    Ok(json_response(StatusCode::OK, HolidayLookup { date, holiday }))
}

/// Handler for `GET /holidays/month`.
async fn month_holidays_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: Result<Query<MonthQuery>, QueryRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    let owner = caller_from_headers(&headers).map_err(rejected(correlation_id, "month_holidays"))?;
    let Query(query) = query.map_err(rejected(correlation_id, "month_holidays"))?;

    let holidays = state
        .ledger()
        .month_holidays(&owner, query.year, query.month)
        .map_err(rejected(correlation_id, "month_holidays"))?;

    Ok(json_response(StatusCode::OK, holidays))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::store::MemoryStore;
    use axum::{body::Body, http::Request};
    use serde_json::{Value, json};
    use std::str::FromStr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::default(), Arc::new(MemoryStore::new()))
    }

    async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if body_bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body_bytes).unwrap()
        };
        (status, json)
    }

    fn post(uri: &str, user: Option<&str>, body: String) -> Request<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(user) = user {
            builder = builder.header(USER_ID_HEADER, user);
        }
        builder.body(Body::from(body)).unwrap()
    }

    fn session_body() -> String {
        json!({
            "date": "2026-01-13",
            "start_time": "09:00",
            "end_time": "17:00",
            "break_minutes": 0,
            "hourly_rate": "20"
        })
        .to_string()
    }

    #[test]
    fn test_caller_from_headers() {
        let mut headers = HeaderMap::new();
        assert!(matches!(caller_from_headers(&headers), Err(EngineError::Unauthenticated)));

        headers.insert(USER_ID_HEADER, "   ".parse().unwrap());
        assert!(matches!(caller_from_headers(&headers), Err(EngineError::Unauthenticated)));

        headers.insert(USER_ID_HEADER, "user_7".parse().unwrap());
        assert_eq!(caller_from_headers(&headers).unwrap(), OwnerId::new("user_7"));
    }

    #[tokio::test]
    async fn test_add_session_returns_201() {
        let router = create_router(create_test_state());
        let (status, json) = send(router, post("/sessions", Some("alice"), session_body())).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["session"]["owner"], "alice");
        let total = json["session"]["total_earnings"].as_str().unwrap();
        assert_eq!(rust_decimal::Decimal::from_str(total).unwrap(), rust_decimal::Decimal::from(160));
        assert!(json["audit_trace"].as_array().unwrap().len() >= 4);
    }

    #[tokio::test]
    async fn test_missing_user_returns_401() {
        let router = create_router(create_test_state());
        let (status, json) = send(router, post("/sessions", None, session_body())).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(json["code"], "UNAUTHENTICATED");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let router = create_router(create_test_state());
        let (status, json) = send(
            router,
            post("/sessions", Some("alice"), "{ invalid json }".to_string()),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = json!({ "date": "2026-01-13", "start_time": "09:00" }).to_string();
        let (status, json) = send(router, post("/sessions", Some("alice"), body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_missing_content_type_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("POST")
            .uri("/sessions")
            .header(USER_ID_HEADER, "alice")
            .body(Body::from(session_body()))
            .unwrap();
        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MISSING_CONTENT_TYPE");
    }

    #[tokio::test]
    async fn test_bad_month_query_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .uri("/stats/monthly?year=2026&month=13")
            .header(USER_ID_HEADER, "alice")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_unparseable_query_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .uri("/stats/weekly?week_start=next-tuesday")
            .header(USER_ID_HEADER, "alice")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_QUERY");
    }

    #[tokio::test]
    async fn test_delete_unknown_session_returns_404() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("DELETE")
            .uri(format!("/sessions/{}", Uuid::new_v4()))
            .header(USER_ID_HEADER, "alice")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(json["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_delete_with_bad_id_returns_400() {
        let router = create_router(create_test_state());
        let request = Request::builder()
            .method("DELETE")
            .uri("/holidays/not-a-uuid")
            .header(USER_ID_HEADER, "alice")
            .body(Body::empty())
            .unwrap();
        let (status, json) = send(router, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "INVALID_PATH");
    }

    #[tokio::test]
    async fn test_duplicate_holiday_returns_409() {
        let state = create_test_state();
        let body = json!({ "date": "2026-01-26", "name": "Australia Day" }).to_string();

        let (first, _) = send(
            create_router(state.clone()),
            post("/holidays", Some("alice"), body.clone()),
        )
        .await;
        let (second, json) = send(create_router(state), post("/holidays", Some("alice"), body)).await;

        assert_eq!(first, StatusCode::CREATED);
        assert_eq!(second, StatusCode::CONFLICT);
        assert_eq!(json["code"], "HOLIDAY_EXISTS");
    }
}
