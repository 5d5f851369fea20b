use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::require_non_empty;
use crate::errors::OtResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: Uuid,
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub department: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /api/doctors` and `PUT /api/doctors/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorRequest {
    pub name: String,
    pub specialization: String,
    pub email: String,
    pub phone: String,
    pub department: String,
}

impl DoctorRequest {
    pub fn validate(&self) -> OtResult<()> {
        require_non_empty("name", &self.name)?;
        require_non_empty("specialization", &self.specialization)?;
        require_non_empty("department", &self.department)
    }
}
