use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use crate::errors::OtError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    SurgeryCreated,
    SurgeryUpdated,
    SurgeryCancelled,
    EmergencySurgeryScheduled,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::SurgeryCreated => "surgery_created",
            AuditAction::SurgeryUpdated => "surgery_updated",
            AuditAction::SurgeryCancelled => "surgery_cancelled",
            AuditAction::EmergencySurgeryScheduled => "emergency_surgery_scheduled",
        }
    }
}

impl fmt::Display for AuditAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuditAction {
    type Err = OtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "surgery_created" => Ok(AuditAction::SurgeryCreated),
            "surgery_updated" => Ok(AuditAction::SurgeryUpdated),
            "surgery_cancelled" => Ok(AuditAction::SurgeryCancelled),
            "emergency_surgery_scheduled" => Ok(AuditAction::EmergencySurgeryScheduled),
            other => Err(OtError::Validation(format!("unknown audit action '{}'", other))),
        }
    }
}

/// One entry of the surgery audit trail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: Uuid,
    pub action: AuditAction,
    pub surgery_id: Uuid,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub details: Option<String>,
}
