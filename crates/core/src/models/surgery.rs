use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use uuid::Uuid;

use super::require_non_empty;
use crate::{
    errors::{OtError, OtResult},
    scheduling::{Booking, Candidate},
};

pub const DEFAULT_DURATION_MINUTES: i32 = 120;
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurgeryStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl SurgeryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SurgeryStatus::Scheduled => "scheduled",
            SurgeryStatus::InProgress => "in_progress",
            SurgeryStatus::Completed => "completed",
            SurgeryStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, SurgeryStatus::Cancelled)
    }
}

impl fmt::Display for SurgeryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SurgeryStatus {
    type Err = OtError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(SurgeryStatus::Scheduled),
            "in_progress" => Ok(SurgeryStatus::InProgress),
            "completed" => Ok(SurgeryStatus::Completed),
            "cancelled" => Ok(SurgeryStatus::Cancelled),
            other => Err(OtError::Validation(format!(
                "unknown surgery status '{}'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Surgery {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub surgery_date: NaiveDate,
    #[serde(with = "crate::time_format")]
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
    pub status: SurgeryStatus,
    pub is_emergency: bool,
    pub duration_minutes: i32,
    pub needs_manual_resolution: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub cancelled_at: Option<DateTime<Utc>>,
}

impl Surgery {
    /// The scheduling view of this surgery.
    pub fn booking(&self) -> Booking {
        Booking {
            id: self.id,
            ot_id: self.ot_id.clone(),
            date: self.surgery_date,
            start: self.surgery_time,
            duration_minutes: self.duration_minutes,
            status: self.status,
            is_emergency: self.is_emergency,
        }
    }
}

fn default_duration() -> i32 {
    DEFAULT_DURATION_MINUTES
}

/// Body of the create, update and emergency surgery endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurgeryRequest {
    pub patient_id: Uuid,
    pub doctor_id: Uuid,
    pub surgery_date: NaiveDate,
    #[serde(with = "crate::time_format")]
    pub surgery_time: NaiveTime,
    pub ot_id: String,
    pub anesthesiologist: String,
    pub anesthesia_type: String,
    #[serde(default)]
    pub assistant_surgeon: Option<String>,
    #[serde(default)]
    pub nurses: Vec<String>,
    #[serde(default)]
    pub pre_op_events: Option<String>,
    #[serde(default)]
    pub post_op_events: Option<String>,
    #[serde(default)]
    pub surgical_report_url: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub required_instruments: Option<String>,
    #[serde(default)]
    pub status: SurgeryStatus,
    #[serde(default)]
    pub is_emergency: bool,
    #[serde(default = "default_duration")]
    pub duration_minutes: i32,
}

impl SurgeryRequest {
    pub fn validate(&self) -> OtResult<()> {
        require_non_empty("ot_id", &self.ot_id)?;
        require_non_empty("anesthesiologist", &self.anesthesiologist)?;
        require_non_empty("anesthesia_type", &self.anesthesia_type)?;
        validate_schedule(self.surgery_date, self.surgery_time, self.duration_minutes)
    }

    /// Builds the conflict-check candidate for this request.
    pub fn candidate(&self, exclude_id: Option<Uuid>) -> Candidate {
        Candidate {
            ot_id: self.ot_id.clone(),
            date: self.surgery_date,
            start: self.surgery_time,
            duration_minutes: self.duration_minutes,
            exclude_id,
        }
    }
}

pub fn validate_duration(duration_minutes: i32) -> OtResult<()> {
    if !(1..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
        return Err(OtError::Validation(format!(
            "duration_minutes must be between 1 and {}",
            MAX_DURATION_MINUTES
        )));
    }
    Ok(())
}

/// Checks the duration and that the surgery ends on a representable date.
pub fn validate_schedule(date: NaiveDate, time: NaiveTime, duration_minutes: i32) -> OtResult<()> {
    validate_duration(duration_minutes)?;
    date.and_time(time)
        .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
        .map(|_| ())
        .ok_or_else(|| {
            OtError::Validation(format!(
                "surgery on {} at {} ends outside the supported date range",
                date,
                time.format(crate::time_format::FORMAT)
            ))
        })
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckRequest {
    pub surgery_date: NaiveDate,
    #[serde(with = "crate::time_format")]
    pub surgery_time: NaiveTime,
    pub ot_id: String,
    pub duration_minutes: i32,
    #[serde(default)]
    pub exclude_surgery_id: Option<Uuid>,
}

impl ConflictCheckRequest {
    pub fn validate(&self) -> OtResult<()> {
        require_non_empty("ot_id", &self.ot_id)?;
        validate_schedule(self.surgery_date, self.surgery_time, self.duration_minutes)
    }

    pub fn candidate(&self) -> Candidate {
        Candidate {
            ot_id: self.ot_id.clone(),
            date: self.surgery_date,
            start: self.surgery_time,
            duration_minutes: self.duration_minutes,
            exclude_id: self.exclude_surgery_id,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheckResponse {
    pub has_conflict: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmergencySurgeryResponse {
    pub id: Uuid,
    pub message: String,
    pub needs_manual_resolution: bool,
}
