use axum::http::StatusCode;
use mockall::predicate;
use otsched_api::handlers::surgery::{
    CONFLICT_MESSAGE, detect_conflict, ensure_bookable, prepare_emergency, request_conflicts,
};
use otsched_core::{
    errors::OtError,
    models::surgery::{SurgeryRequest, SurgeryStatus},
    scheduling::Candidate,
};
use otsched_db::mock::repositories::MockSurgeryRepo;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use uuid::Uuid;

use crate::test_utils::{bearer, booked, date, hm, surgery_body, test_server};

fn candidate(start: chrono::NaiveTime, duration_minutes: i32) -> Candidate {
    Candidate {
        ot_id: "1".to_string(),
        date: date(),
        start,
        duration_minutes,
        exclude_id: None,
    }
}

fn request(time: &str, duration_minutes: i32) -> SurgeryRequest {
    serde_json::from_value(surgery_body("1", time, duration_minutes)).unwrap()
}

fn repo_with(rows: Vec<otsched_db::models::DbSurgery>) -> MockSurgeryRepo {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .with(predicate::eq("1".to_string()), predicate::eq(date()))
        .times(1)
        .returning(move |_, _| Ok(rows.clone()));
    repo
}

async fn check(repo: &MockSurgeryRepo, candidate: &Candidate) -> bool {
    detect_conflict(candidate, || {
        repo.bookings_for_theater_on_date(candidate.ot_id.clone(), candidate.date)
    })
    .await
}

#[tokio::test]
async fn test_overlapping_booking_conflicts() {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .with(predicate::eq("1".to_string()), predicate::eq(date()))
        .times(1)
        .returning(|_, _| Ok(vec![booked("1", hm(9, 0), 180, "scheduled")]));

    assert!(check(&repo, &candidate(hm(10, 0), 60)).await);
}

#[tokio::test]
async fn test_adjacent_booking_does_not_conflict() {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .returning(|_, _| Ok(vec![booked("1", hm(9, 0), 60, "scheduled")]));

    assert!(!check(&repo, &candidate(hm(10, 0), 60)).await);
    assert!(!check(&repo, &candidate(hm(8, 0), 60)).await);
}

#[tokio::test]
async fn test_cancelled_booking_does_not_conflict() {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .returning(|_, _| Ok(vec![booked("1", hm(9, 0), 180, "cancelled")]));

    assert!(!check(&repo, &candidate(hm(10, 0), 60)).await);
}

#[tokio::test]
async fn test_edited_surgery_ignores_its_own_slot() {
    let existing = booked("1", hm(9, 0), 120, "scheduled");
    let id = existing.id;
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .returning(move |_, _| Ok(vec![existing.clone()]));

    let mut moved = candidate(hm(9, 30), 120);
    assert!(check(&repo, &moved).await);

    moved.exclude_id = Some(id);
    assert!(!check(&repo, &moved).await);
}

#[tokio::test]
async fn test_unloadable_bookings_fail_open() {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .returning(|_, _| Err(eyre::eyre!("connection refused")));

    assert!(!check(&repo, &candidate(hm(9, 0), 60)).await);
}

#[tokio::test]
async fn test_unreadable_booking_row_fails_open() {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date()
        .returning(|_, _| Ok(vec![booked("1", hm(9, 0), 180, "postponed")]));

    assert!(!check(&repo, &candidate(hm(10, 0), 60)).await);
}

#[tokio::test]
async fn test_clashing_booking_is_rejected_as_conflict() {
    let repo = repo_with(vec![booked("1", hm(9, 0), 180, "scheduled")]);
    let booking = request("10:00", 60);

    let result = ensure_bookable(&booking, None, || {
        repo.bookings_for_theater_on_date(booking.ot_id.clone(), booking.surgery_date)
    })
    .await;

    match result {
        Err(OtError::Conflict(message)) => assert_eq!(message, CONFLICT_MESSAGE),
        other => panic!("expected a conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_free_slot_is_bookable() {
    let repo = repo_with(vec![booked("1", hm(9, 0), 60, "scheduled")]);
    let booking = request("10:00", 60);

    let result = ensure_bookable(&booking, None, || {
        repo.bookings_for_theater_on_date(booking.ot_id.clone(), booking.surgery_date)
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_update_does_not_clash_with_its_previous_slot() {
    let existing = booked("1", hm(9, 0), 120, "scheduled");
    let id = existing.id;
    let repo = repo_with(vec![existing]);
    let edit = request("09:30", 120);

    let result = ensure_bookable(&edit, Some(id), || {
        repo.bookings_for_theater_on_date(edit.ot_id.clone(), edit.surgery_date)
    })
    .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_cancelled_update_skips_the_check() {
    let mut repo = MockSurgeryRepo::new();
    repo.expect_bookings_for_theater_on_date().never();
    let mut edit = request("09:30", 120);
    edit.status = SurgeryStatus::Cancelled;

    let clashes = request_conflicts(&edit, Some(Uuid::new_v4()), || {
        repo.bookings_for_theater_on_date(edit.ot_id.clone(), edit.surgery_date)
    })
    .await;

    assert!(!clashes);
}

#[tokio::test]
async fn test_clashing_emergency_needs_manual_resolution() {
    let repo = repo_with(vec![booked("1", hm(9, 0), 180, "in_progress")]);
    let mut emergency = request("10:00", 60);
    let (ot_id, day) = (emergency.ot_id.clone(), emergency.surgery_date);

    let needs_manual_resolution =
        prepare_emergency(&mut emergency, || repo.bookings_for_theater_on_date(ot_id, day)).await;

    assert!(needs_manual_resolution);
    assert!(emergency.is_emergency);
}

#[tokio::test]
async fn test_emergency_in_free_slot_needs_no_resolution() {
    let repo = repo_with(vec![booked("1", hm(9, 0), 180, "cancelled")]);
    let mut emergency = request("10:00", 60);
    let (ot_id, day) = (emergency.ot_id.clone(), emergency.surgery_date);

    let needs_manual_resolution =
        prepare_emergency(&mut emergency, || repo.bookings_for_theater_on_date(ot_id, day)).await;

    assert!(!needs_manual_resolution);
    assert!(emergency.is_emergency);
}

#[tokio::test]
async fn test_check_conflict_endpoint_fails_open_without_database() {
    let response = test_server()
        .post("/api/surgeries/check-conflict")
        .json(&json!({
            "surgery_date": "2025-01-02",
            "surgery_time": "09:00",
            "ot_id": "1",
            "duration_minutes": 120,
        }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body, json!({ "has_conflict": false }));
}

#[tokio::test]
async fn test_check_conflict_rejects_invalid_duration() {
    let response = test_server()
        .post("/api/surgeries/check-conflict")
        .json(&json!({
            "surgery_date": "2025-01-02",
            "surgery_time": "09:00",
            "ot_id": "1",
            "duration_minutes": 0,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_conflict_rejects_end_past_last_date() {
    let response = test_server()
        .post("/api/surgeries/check-conflict")
        .json(&json!({
            "surgery_date": "+262142-12-31",
            "surgery_time": "23:00",
            "ot_id": "1",
            "duration_minutes": 120,
        }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_check_conflict_rejects_malformed_time() {
    let response = test_server()
        .post("/api/surgeries/check-conflict")
        .json(&json!({
            "surgery_date": "2025-01-02",
            "surgery_time": "25:99",
            "ot_id": "1",
            "duration_minutes": 60,
        }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_surgery_validates_before_touching_storage() {
    let (name, value) = bearer();
    let response = test_server()
        .post("/api/surgeries")
        .add_header(name, value)
        .json(&surgery_body("1", "09:00", 2000))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("duration_minutes"));
}

#[tokio::test]
async fn test_emergency_booking_rejects_blank_theater() {
    let (name, value) = bearer();
    let response = test_server()
        .post("/api/surgeries/emergency")
        .add_header(name, value)
        .json(&surgery_body("  ", "23:00", 120))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_cancel_requires_token() {
    let response = test_server()
        .delete(&format!("/api/surgeries/{}", Uuid::new_v4()))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}
