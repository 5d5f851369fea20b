use axum::http::StatusCode;
use chrono::NaiveDate;
use otsched_api::handlers::{
    audit::{DEFAULT_LOG_LIMIT, LogQuery, MAX_LOG_LIMIT},
    summary::month_bounds,
};
use otsched_core::errors::OtError;
use pretty_assertions::assert_eq;
use rstest::rstest;

use crate::test_utils::test_server;

#[rstest]
#[case(None, DEFAULT_LOG_LIMIT)]
#[case(Some(10), 10)]
#[case(Some(0), 1)]
#[case(Some(-5), 1)]
#[case(Some(10_000), MAX_LOG_LIMIT)]
fn test_log_limit(#[case] limit: Option<i64>, #[case] expected: i64) {
    assert_eq!(LogQuery { limit }.effective_limit(), expected);
}

#[rstest]
#[case(2024, 2, 29)]
#[case(2025, 2, 28)]
#[case(2025, 12, 31)]
#[case(2025, 4, 30)]
fn test_month_bounds(#[case] year: i32, #[case] month: u32, #[case] last_day: u32) {
    let (first, last) = month_bounds(year, month).unwrap();

    assert_eq!(first, NaiveDate::from_ymd_opt(year, month, 1).unwrap());
    assert_eq!(last, NaiveDate::from_ymd_opt(year, month, last_day).unwrap());
}

#[test]
fn test_month_bounds_rejects_invalid_month() {
    assert!(matches!(month_bounds(2025, 13), Err(OtError::Validation(_))));
    assert!(matches!(month_bounds(2025, 0), Err(OtError::Validation(_))));
}

#[tokio::test]
async fn test_calendar_with_invalid_month_is_bad_request() {
    let response = test_server().get("/api/calendar?year=2025&month=13").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_available_slots_requires_date() {
    let response = test_server().get("/api/ots/1/available-slots").await;

    response.assert_status(StatusCode::BAD_REQUEST);
}
