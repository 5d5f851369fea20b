//! # OT Scheduler Core
//!
//! Domain types shared by the database and API crates, the error type used
//! across the workspace, and the pure scheduling logic: conflict detection
//! between surgery bookings, free-slot search for a theater and the
//! dashboard/calendar summaries.
//!
//! Nothing in this crate performs I/O.

pub mod errors;
pub mod models;
pub mod scheduling;
pub mod time_format;
