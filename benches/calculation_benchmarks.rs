//! Performance benchmarks for the earnings engine.
//!
//! Covers the pure calculators and the HTTP path:
//! - Pricing one session
//! - Adding one session through the router
//! - Monthly report over a full month of sessions
//! - Yearly breakdown over 1000 sessions
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use std::hint::black_box;
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rust_decimal::Decimal;
use uuid::Uuid;

use earnings_engine::api::{AppState, USER_ID_HEADER, create_router};
use earnings_engine::calculation::{compute_earnings, compute_worked_hours, parse_clock_time, yearly_breakdown};
use earnings_engine::config::{ConfigLoader, EarningsRules};
use earnings_engine::models::{OwnerId, WorkSession};
use earnings_engine::store::MemoryStore;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration and an empty store.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/default").expect("Failed to load config");
    AppState::new(config, Arc::new(MemoryStore::new()))
}

/// Builds `count` stored ten-hour sessions spread over 2026.
fn create_sessions(count: u64) -> Vec<WorkSession> {
    let first_day = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
    (0..count)
        .map(|i| WorkSession {
            id: Uuid::new_v4(),
            owner: OwnerId::new("bench_user"),
            date: first_day.checked_add_days(Days::new(i % 365)).unwrap(),
            start_time: "08:00".to_string(),
            end_time: "18:00".to_string(),
            break_minutes: 0,
            hourly_rate: Decimal::from(20),
            description: String::new(),
            is_holiday: i % 20 == 0,
            hours_worked: Decimal::from(10),
            regular_hours: Some(Decimal::from(8)),
            overtime_hours: Some(Decimal::from(2)),
            regular_earnings: Some(Decimal::from(160)),
            overtime_earnings: Some(Decimal::from(50)),
            holiday_earnings: Some(Decimal::ZERO),
            total_earnings: Decimal::from(210),
        })
        .collect()
}

/// Benchmark: worked hours and earnings for one session.
fn bench_single_session(c: &mut Criterion) {
    let rules = EarningsRules::default();
    let start = parse_clock_time("06:00").unwrap();
    let end = parse_clock_time("20:00").unwrap();

    let mut group = c.benchmark_group("single_session");
    for prior in [0u32, 58, 65] {
        group.bench_with_input(BenchmarkId::from_parameter(prior), &prior, |b, &prior| {
            b.iter(|| {
                let hours = compute_worked_hours(black_box(start), black_box(end), 30);
                black_box(compute_earnings(
                    hours,
                    Decimal::from(20),
                    false,
                    Decimal::from(prior),
                    &rules,
                    1,
                )
                .unwrap())
            })
        });
    }
    group.finish();
}

/// Benchmark: POST /sessions through the router.
fn bench_add_session_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "date": "2026-01-13",
        "start_time": "08:00",
        "end_time": "18:00",
        "break_minutes": 30,
        "hourly_rate": "24.50"
    })
    .to_string();

    c.bench_function("add_session_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/sessions")
                        .header("Content-Type", "application/json")
                        .header(USER_ID_HEADER, "bench_user")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: GET /stats/monthly over a month with one session per day.
fn bench_monthly_report(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();
    let owner = OwnerId::new("bench_user");
    for day in 1..=31 {
        let input = serde_json::from_value(serde_json::json!({
            "date": format!("2026-01-{:02}", day),
            "start_time": "08:00",
            "end_time": "18:00",
            "break_minutes": 0,
            "hourly_rate": "20"
        }))
        .unwrap();
        state.ledger().add_work_session(&owner, input).unwrap();
    }
    let router = create_router(state);

    let mut group = c.benchmark_group("reporting");
    group.throughput(Throughput::Elements(31));
    group.bench_function("monthly_report_31_sessions", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .uri("/stats/monthly?year=2026&month=1")
                        .header(USER_ID_HEADER, "bench_user")
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
    group.finish();
}

/// Benchmark: yearly breakdown over 1000 sessions.
fn bench_yearly_breakdown(c: &mut Criterion) {
    let sessions = create_sessions(1000);

    let mut group = c.benchmark_group("large_aggregation");
    group.throughput(Throughput::Elements(1000));
    group.bench_function("yearly_breakdown_1000", |b| {
        b.iter(|| black_box(yearly_breakdown(2026, black_box(&sessions))))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_single_session,
    bench_add_session_endpoint,
    bench_monthly_report,
    bench_yearly_breakdown
);
criterion_main!(benches);
