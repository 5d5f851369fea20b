use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use otsched_core::{
    errors::OtError,
    models::{
        audit::AuditLog,
        doctor::Doctor,
        patient::Patient,
        surgery::Surgery,
    },
    scheduling::Booking,
};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDoctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbPatient {
    pub id: Uuid,
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub medical_record_number: String,
    pub phone: String,
    pub emergency_contact: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSurgery {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub surgery_date: NaiveDate,
    pub surgery_time: NaiveTime,
    pub ot_id: String,
    pub anesthesiologist: String,
    pub anesthesia_type: String,
    pub assistant_surgeon: Option<String>,
    pub nurses: Vec<String>,
    pub pre_op_events: Option<String>,
    pub post_op_events: Option<String>,
    pub surgical_report_url: Option<String>,
    pub notes: Option<String>,
    pub required_instruments: Option<String>,
    pub status: String,
    pub is_emergency: bool,
    pub duration_minutes: i32,
    pub needs_manual_resolution: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAuditLog {
    pub id: Uuid,
    pub action: String,
    pub surgery_id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}

impl From<DbDoctor> for Doctor {
    fn from(row: DbDoctor) -> Self {
        Doctor {
            id: row.id,
            name: row.name,
            specialization: row.specialization,
            email: row.email,
            phone: row.phone,
            department: row.department,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl From<DbPatient> for Patient {
    fn from(row: DbPatient) -> Self {
        Patient {
            id: row.id,
            name: row.name,
            age: row.age,
            gender: row.gender,
            medical_record_number: row.medical_record_number,
            phone: row.phone,
            emergency_contact: row.emergency_contact,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl TryFrom<DbSurgery> for Surgery {
    type Error = OtError;

    fn try_from(row: DbSurgery) -> Result<Self, Self::Error> {
        Ok(Surgery {
            status: row.status.parse()?,
            id: row.id,
            patient_id: row.patient_id,
            doctor_id: row.doctor_id,
            surgery_date: row.surgery_date,
            surgery_time: row.surgery_time,
            ot_id: row.ot_id,
            anesthesiologist: row.anesthesiologist,
            anesthesia_type: row.anesthesia_type,
            assistant_surgeon: row.assistant_surgeon,
            nurses: row.nurses,
            pre_op_events: row.pre_op_events,
            post_op_events: row.post_op_events,
            surgical_report_url: row.surgical_report_url,
            notes: row.notes,
            required_instruments: row.required_instruments,
            is_emergency: row.is_emergency,
            duration_minutes: row.duration_minutes,
            needs_manual_resolution: row.needs_manual_resolution,
            created_at: row.created_at,
            updated_at: row.updated_at,
            cancelled_at: row.cancelled_at,
        })
    }
}

impl TryFrom<&DbSurgery> for Booking {
    type Error = OtError;

    fn try_from(row: &DbSurgery) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            ot_id: row.ot_id.clone(),
            date: row.surgery_date,
            start: row.surgery_time,
            duration_minutes: row.duration_minutes,
            status: row.status.parse()?,
            is_emergency: row.is_emergency,
        })
    }
}

impl TryFrom<DbAuditLog> for AuditLog {
    type Error = OtError;

    fn try_from(row: DbAuditLog) -> Result<Self, Self::Error> {
        Ok(AuditLog {
            id: row.id,
            action: row.action.parse()?,
            surgery_id: row.surgery_id,
            user_id: row.user_id,
            timestamp: row.timestamp,
            details: row.details,
        })
    }
}

/// Converts rows into the scheduler's view. Fails on the first row with an unknown status.
pub fn to_bookings(rows: &[DbSurgery]) -> Result<Vec<Booking>, OtError> {
    rows.iter().map(Booking::try_from).collect()
}
