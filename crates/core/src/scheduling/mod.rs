//! # Scheduling
//!
//! Pure functions over a snapshot of bookings. Callers load the bookings for
//! a theater (or a day) from storage and hand them in; nothing here reads or
//! writes state.
//!
//! Intervals are half-open: a booking occupies `[start, start + duration)`,
//! so a surgery ending at 10:00 and one starting at 10:00 in the same theater
//! do not conflict. Times are naive local date-times.

pub mod conflict;
pub mod slots;
pub mod summary;

pub use conflict::{conflicting_bookings, has_conflict};
pub use slots::{OperatingDay, available_slots, booked_slots};
pub use summary::{month_calendar, summarize_day};

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::models::surgery::SurgeryStatus;

/// A half-open `[start, end)` span of naive local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl Interval {
    pub fn starting_at(date: NaiveDate, start: NaiveTime, duration_minutes: i32) -> Self {
        let start = date.and_time(start);
        // Saturates at the last representable instant instead of overflowing
        let end = start
            .checked_add_signed(Duration::minutes(i64::from(duration_minutes)))
            .unwrap_or(NaiveDateTime::MAX);
        Self { start, end }
    }

    /// Strict overlap; touching endpoints do not count.
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// The subset of a surgery the scheduler cares about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub id: Uuid,
    pub ot_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: i32,
    pub status: SurgeryStatus,
    pub is_emergency: bool,
}

impl Booking {
    pub fn interval(&self) -> Interval {
        Interval::starting_at(self.date, self.start, self.duration_minutes)
    }

    pub fn end(&self) -> NaiveDateTime {
        self.interval().end
    }

    /// Cancelled bookings never hold a theater.
    pub fn is_active(&self) -> bool {
        !self.status.is_cancelled()
    }

    pub fn occupies(&self, ot_id: &str, date: NaiveDate) -> bool {
        self.is_active() && self.ot_id == ot_id && self.date == date
    }
}

/// A proposed booking to test against existing ones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub ot_id: String,
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub duration_minutes: i32,
    /// Booking to ignore, i.e. the one being edited.
    pub exclude_id: Option<Uuid>,
}

impl Candidate {
    pub fn interval(&self) -> Interval {
        Interval::starting_at(self.date, self.start, self.duration_minutes)
    }
}
