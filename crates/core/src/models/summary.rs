use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Response of `GET /api/dashboard`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    pub date: Option<NaiveDate>,
    pub total_surgeries: usize,
    pub emergency_surgeries: usize,
    pub completed_surgeries: usize,
    pub in_progress_surgeries: usize,
    pub scheduled_surgeries: usize,
    pub total_doctors: i64,
    pub total_patients: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub surgery_count: usize,
    pub surgery_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalendarResponse {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    #[serde(with = "crate::time_format")]
    pub start: NaiveTime,
    #[serde(with = "crate::time_format")]
    pub end: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    #[serde(with = "crate::time_format")]
    pub start: NaiveTime,
    #[serde(with = "crate::time_format")]
    pub end: NaiveTime,
    pub surgery_id: Uuid,
}

/// Response of `GET /api/ots/:ot_id/available-slots`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailableSlotsResponse {
    pub available_slots: Vec<TimeWindow>,
    pub booked_slots: Vec<BookedSlot>,
}
