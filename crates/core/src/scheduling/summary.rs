use chrono::{Datelike, NaiveDate};

use super::Booking;
use crate::{
    errors::{OtError, OtResult},
    models::{
        summary::{CalendarDay, DashboardResponse},
        surgery::SurgeryStatus,
    },
};

/// Surgery counts for one day. Cancelled bookings are left out entirely.
///
/// Doctor and patient totals are not known here and stay zero.
pub fn summarize_day(date: NaiveDate, bookings: &[Booking]) -> DashboardResponse {
    let mut summary = DashboardResponse {
        date: Some(date),
        ..Default::default()
    };
    for booking in bookings.iter().filter(|b| b.is_active() && b.date == date) {
        summary.total_surgeries += 1;
        if booking.is_emergency {
            summary.emergency_surgeries += 1;
        }
        match booking.status {
            SurgeryStatus::Scheduled => summary.scheduled_surgeries += 1,
            SurgeryStatus::InProgress => summary.in_progress_surgeries += 1,
            SurgeryStatus::Completed => summary.completed_surgeries += 1,
            SurgeryStatus::Cancelled => {}
        }
    }
    summary
}

/// One entry per day of the month with the active bookings on it.
pub fn month_calendar(
    year: i32,
    month: u32,
    bookings: &[Booking],
) -> OtResult<Vec<CalendarDay>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| OtError::Validation(format!("invalid month {}-{:02}", year, month)))?;

    let days = first
        .iter_days()
        .take_while(|day| day.month() == month)
        .map(|date| {
            let mut active: Vec<&Booking> = bookings
                .iter()
                .filter(|b| b.is_active() && b.date == date)
                .collect();
            active.sort_by_key(|b| b.start);
            CalendarDay {
                date,
                surgery_count: active.len(),
                surgery_ids: active.iter().map(|b| b.id).collect(),
            }
        })
        .collect();
    Ok(days)
}
