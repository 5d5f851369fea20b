use chrono::{NaiveDate, NaiveTime, Utc};
use fake::{Fake, faker::internet::en::SafeEmail, faker::name::en::Name};
use otsched_core::{
    errors::OtError,
    models::{
        audit::{AuditAction, AuditLog},
        doctor::Doctor,
        surgery::{Surgery, SurgeryStatus},
    },
    scheduling::Booking,
};
use otsched_db::models::{DbAuditLog, DbDoctor, DbSurgery, to_bookings};
use pretty_assertions::assert_eq;
use rstest::rstest;
use uuid::Uuid;

fn db_surgery(status: &str) -> DbSurgery {
    DbSurgery {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        doctor_id: Uuid::new_v4(),
        surgery_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
        surgery_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        ot_id: "1".to_string(),
        anesthesiologist: "Dr. Smith".to_string(),
        anesthesia_type: "General".to_string(),
        assistant_surgeon: None,
        nurses: vec!["Nurse Adams".to_string(), "Nurse Brown".to_string()],
        pre_op_events: None,
        post_op_events: None,
        surgical_report_url: None,
        notes: Some("Routine cardiac procedure".to_string()),
        required_instruments: Some("Cardiac surgery set".to_string()),
        status: status.to_string(),
        is_emergency: false,
        duration_minutes: 180,
        needs_manual_resolution: false,
        created_at: Utc::now(),
        updated_at: None,
        cancelled_at: None,
    }
}

#[test]
fn test_doctor_from_row() {
    let name: String = Name().fake();
    let email: String = SafeEmail().fake();
    let row = DbDoctor {
        id: Uuid::new_v4(),
        name: name.clone(),
        specialization: "Neurosurgery".to_string(),
        email: email.clone(),
        phone: "+1-555-0103".to_string(),
        department: "Neurology".to_string(),
        created_at: Utc::now(),
        updated_at: None,
    };

    let doctor = Doctor::from(row.clone());

    assert_eq!(doctor.id, row.id);
    assert_eq!(doctor.name, name);
    assert_eq!(doctor.email, email);
}

#[rstest]
#[case("scheduled", SurgeryStatus::Scheduled)]
#[case("in_progress", SurgeryStatus::InProgress)]
#[case("cancelled", SurgeryStatus::Cancelled)]
fn test_surgery_from_row(#[case] raw: &str, #[case] status: SurgeryStatus) {
    let row = db_surgery(raw);

    let surgery = Surgery::try_from(row.clone()).expect("row should convert");

    assert_eq!(surgery.id, row.id);
    assert_eq!(surgery.status, status);
    assert_eq!(surgery.nurses, row.nurses);
    assert_eq!(surgery.duration_minutes, 180);
}

#[test]
fn test_surgery_with_unknown_status_is_rejected() {
    let result = Surgery::try_from(db_surgery("postponed"));

    assert!(matches!(result, Err(OtError::Validation(_))));
}

#[test]
fn test_booking_from_row() {
    let row = db_surgery("completed");

    let booking = Booking::try_from(&row).unwrap();

    assert_eq!(booking.id, row.id);
    assert_eq!(booking.ot_id, "1");
    assert_eq!(booking.status, SurgeryStatus::Completed);
    assert_eq!(booking.end().time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
}

#[test]
fn test_to_bookings_keeps_every_row() {
    let rows = vec![db_surgery("scheduled"), db_surgery("cancelled")];

    let bookings = to_bookings(&rows).unwrap();

    assert_eq!(bookings.len(), 2);
    assert!(bookings[0].is_active());
    assert!(!bookings[1].is_active());
}

#[test]
fn test_audit_log_from_row() {
    let row = DbAuditLog {
        id: Uuid::new_v4(),
        action: "surgery_cancelled".to_string(),
        surgery_id: Uuid::new_v4(),
        user_id: "user-42".to_string(),
        timestamp: Utc::now(),
        details: None,
    };

    let log = AuditLog::try_from(row).unwrap();

    assert_eq!(log.action, AuditAction::SurgeryCancelled);
    assert_eq!(log.user_id, "user-42");
}
