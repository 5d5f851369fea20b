use chrono::{Duration, NaiveDate, NaiveTime};

use super::{Booking, Interval};
use crate::{
    errors::{OtError, OtResult},
    models::summary::{BookedSlot, TimeWindow},
};

/// Opening hours of a theater and the granularity of offered windows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OperatingDay {
    pub opens: NaiveTime,
    pub closes: NaiveTime,
    pub slot_minutes: i64,
    pub step_minutes: i64,
}

impl OperatingDay {
    pub fn new(
        opens: NaiveTime,
        closes: NaiveTime,
        slot_minutes: i64,
        step_minutes: i64,
    ) -> OtResult<Self> {
        if opens >= closes {
            return Err(OtError::Validation(
                "operating day must open before it closes".to_string(),
            ));
        }
        if slot_minutes <= 0 || step_minutes <= 0 {
            return Err(OtError::Validation(
                "slot and step lengths must be positive".to_string(),
            ));
        }
        Ok(Self {
            opens,
            closes,
            slot_minutes,
            step_minutes,
        })
    }
}

impl Default for OperatingDay {
    fn default() -> Self {
        Self {
            opens: NaiveTime::from_hms_opt(8, 0, 0).unwrap_or_default(),
            closes: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or_default(),
            slot_minutes: 120,
            step_minutes: 60,
        }
    }
}

/// Active bookings of `ot_id` on `date`, ordered by start time.
pub fn booked_slots(ot_id: &str, date: NaiveDate, bookings: &[Booking]) -> Vec<BookedSlot> {
    let mut booked: Vec<BookedSlot> = bookings
        .iter()
        .filter(|booking| booking.occupies(ot_id, date))
        .map(|booking| BookedSlot {
            start: booking.start,
            end: booking.end().time(),
            surgery_id: booking.id,
        })
        .collect();
    booked.sort_by_key(|slot| slot.start);
    booked
}

/// Windows of `day.slot_minutes` that fit inside opening hours and overlap
/// no active booking of `ot_id` on `date`.
pub fn available_slots(
    day: &OperatingDay,
    ot_id: &str,
    date: NaiveDate,
    bookings: &[Booking],
) -> Vec<TimeWindow> {
    let taken: Vec<Interval> = bookings
        .iter()
        .filter(|booking| booking.occupies(ot_id, date))
        .map(Booking::interval)
        .collect();

    let closes = date.and_time(day.closes);
    let slot = Duration::minutes(day.slot_minutes);
    let step = Duration::minutes(day.step_minutes);

    let mut windows = Vec::new();
    let mut start = date.and_time(day.opens);
    while let Some(end) = start.checked_add_signed(slot).filter(|end| *end <= closes) {
        let window = Interval { start, end };
        if !taken.iter().any(|busy| busy.overlaps(&window)) {
            windows.push(TimeWindow {
                start: window.start.time(),
                end: window.end.time(),
            });
        }
        match start.checked_add_signed(step) {
            Some(next) => start = next,
            None => break,
        }
    }
    windows
}
