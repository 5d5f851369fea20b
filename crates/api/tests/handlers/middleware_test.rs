use axum::http::{HeaderMap, HeaderValue, StatusCode, header::AUTHORIZATION};
use otsched_api::middleware::{
    auth::bearer_token,
    error_handling::{AppError, map_error},
};
use otsched_core::errors::OtError;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;

use crate::test_utils::{surgery_body, test_server};

#[rstest]
#[case(OtError::NotFound("Surgery not found".into()), StatusCode::NOT_FOUND)]
#[case(OtError::Validation("Invalid input".into()), StatusCode::BAD_REQUEST)]
#[case(OtError::Conflict("taken".into()), StatusCode::CONFLICT)]
#[case(OtError::Authentication("no token".into()), StatusCode::UNAUTHORIZED)]
#[case(OtError::Authorization("not allowed".into()), StatusCode::FORBIDDEN)]
#[case(OtError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
fn test_error_status(#[case] error: OtError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).status(), expected);
}

#[test]
fn test_map_error_builds_response() {
    let response = map_error(OtError::Conflict("taken".to_string()));

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[rstest]
#[case("Bearer abc123", Some("abc123"))]
#[case("bearer abc123", Some("abc123"))]
#[case("Bearer ", None)]
#[case("Basic dXNlcjpwYXNz", None)]
#[case("abc123", None)]
fn test_bearer_token(#[case] header: &str, #[case] expected: Option<&str>) {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_str(header).unwrap());

    assert_eq!(bearer_token(&headers), expected);
}

#[test]
fn test_bearer_token_missing_header() {
    assert_eq!(bearer_token(&HeaderMap::new()), None);
}

#[tokio::test]
async fn test_mutating_endpoint_requires_token() {
    let response = test_server()
        .post("/api/surgeries")
        .json(&surgery_body("1", "09:00", 60))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("bearer token"));
}

#[tokio::test]
async fn test_database_failure_is_internal_error() {
    let response = test_server().get("/api/doctors").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].is_string());
}
