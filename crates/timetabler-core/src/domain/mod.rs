//! Catalog types for defining a timetabling problem
//!
//! The catalog is immutable input:
//! - `Timeslot`: an atomic schedulable period, identified by its ordinal
//! - `Room`, `Teacher`, `Group`, `Subject`: static scheduling resources
//! - `Promotion`: a cohort of groups sharing a list of subjects
//! - `University`: the complete catalog
//!
//! `Course` is the only output type: a fully resolved decision.

mod course;
mod resource;
mod timeslot;
mod university;

pub use course::Course;
pub use resource::{Group, Room, Subject, Teacher};
pub use timeslot::Timeslot;
pub use university::{Promotion, University};

#[cfg(test)]
mod tests;
