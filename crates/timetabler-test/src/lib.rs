//! Shared test fixtures for Timetabler crates.
//!
//! This crate provides ready-made university catalogs for testing.
//! It depends on `timetabler-core` only.
//!
//! - [`calendar`] - Calendars and timeslot helpers
//! - [`university`] - Catalogs exercising specific scheduling situations
//!
//! # Usage
//!
//! Add as a dev-dependency in your crate's `Cargo.toml`:
//!
//! ```toml
//! [dev-dependencies]
//! timetabler-test = { workspace = true }
//! ```
//!
//! Then import the fixtures you need:
//!
//! ```
//! use timetabler_test::{reference_calendar, single_subject_university};
//!
//! assert_eq!(reference_calendar().len(), 49);
//! assert_eq!(single_subject_university().teachers.len(), 1);
//! ```

pub mod calendar;
pub mod university;

pub use calendar::{reference_calendar, single_day_calendar, REFERENCE_SLOTS_PER_DAY};
pub use university::{
    availability_university, balanced_week_university, no_capable_teacher_university,
    oversubscribed_room_university, single_subject_university, three_subject_university,
    two_promotion_university, TIMESLOT_DURATION,
};
