//! Timetabler Core - Domain types and errors for university timetabling
//!
//! This crate provides the fundamental abstractions shared by every
//! Timetabler crate:
//! - Catalog types describing the university (timeslots, rooms, teachers,
//!   promotions, groups, subjects)
//! - The resolved `Course` record produced from a solved model
//! - The `TimetableError` type

pub mod domain;
pub mod error;

pub use domain::{Course, Group, Promotion, Room, Subject, Teacher, Timeslot, University};
pub use error::{Result, TimetableError};
