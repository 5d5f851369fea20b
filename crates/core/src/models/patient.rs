use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_non_empty;
use crate::errors::{OtError, OtResult};

pub const MAX_PATIENT_AGE: i32 = 150;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
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

/// Body of `POST /api/patients` and `PUT /api/patients/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientRequest {
    pub name: String,
    pub age: i32,
    pub gender: String,
    pub medical_record_number: String,
    pub phone: String,
    pub emergency_contact: String,
}

impl PatientRequest {
    pub fn validate(&self) -> OtResult<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("medical_record_number", &self.medical_record_number)?;
        if !(0..=MAX_PATIENT_AGE).contains(&self.age) {
            return Err(OtError::Validation(format!(
                "age must be between 0 and {}",
                MAX_PATIENT_AGE
            )));
        }
        Ok(())
    }
}
