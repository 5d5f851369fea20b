use super::{Booking, Candidate};

/// Returns the bookings that would clash with `candidate`.
///
/// A booking is considered when it is in the same theater on the same date,
/// is not cancelled and is not the excluded booking.
pub fn conflicting_bookings<'a>(
    candidate: &'a Candidate,
    bookings: &'a [Booking],
) -> impl Iterator<Item = &'a Booking> + 'a {
    let wanted = candidate.interval();
    bookings
        .iter()
        .filter(move |booking| booking.occupies(&candidate.ot_id, candidate.date))
        .filter(move |booking| Some(booking.id) != candidate.exclude_id)
        .filter(move |booking| booking.interval().overlaps(&wanted))
}

pub fn has_conflict(candidate: &Candidate, bookings: &[Booking]) -> bool {
    conflicting_bookings(candidate, bookings).next().is_some()
}
