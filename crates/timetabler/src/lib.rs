//! Timetabler - university timetabling on a constraint model
//!
//! Turns a [`University`] catalog into a finite-domain model where every
//! required course occurrence gets a timeslot, room and teacher variable,
//! solves it through any [`CpSolver`], and analyzes the resulting schedule.
//!
//! # Example
//!
//! ```
//! use timetabler::{Timetabler, TimetableConfig};
//! use timetabler::{Group, Promotion, Room, Subject, Teacher, Timeslot, University};
//!
//! let university = University::new("Goodwing", 1.75)
//!     .with_timeslots(Timeslot::calendar(7, 7))
//!     .with_room(Room::new("A101"))
//!     .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths"]))
//!     .with_promotion(
//!         Promotion::new("L1")
//!             .with_group(Group::new("L1-A"))
//!             .with_subject(Subject::new("Maths", 3.5)),
//!     );
//!
//! let config = TimetableConfig::new().with_termination_seconds(10);
//! let outcome = Timetabler::new(university, config).solve().unwrap();
//!
//! assert!(outcome.status.has_solution());
//! assert_eq!(outcome.courses.len(), 2);
//! ```

pub mod analysis;
pub mod builder;
pub mod constraints;
pub mod materialize;
pub mod objective;
pub mod occurrence;
pub mod timetabler;

pub use analysis::{
    analyze, AnalysisError, ConflictKind, ConflictRecord, ConflictReport, CourseDistribution,
    CourseRef, Placement, ResourceUtilization, ScheduleAnalysis, ScheduleReport, Tally,
};
pub use builder::TimetableModel;
pub use constraints::ConflictIndicator;
pub use materialize::materialize;
pub use occurrence::{GroupKey, Occurrence, OccurrenceId, OccurrencePlan, OccurrenceRegistry};
pub use timetabler::{TimetableOutcome, Timetabler};

pub use timetabler_config::{BlockedRange, CalendarConfig, ConfigError, ObjectiveConfig, TimetableConfig};
pub use timetabler_core::{
    Course, Group, Promotion, Result, Room, Subject, Teacher, Timeslot, TimetableError, University,
};
pub use timetabler_cp::{CpSolution, CpSolver, SatSolver, SolveParameters, SolveStatus};

use timetabler_cp::ModelError;

/// Lifts a model construction failure into the crate error.
pub(crate) fn model_error(err: ModelError) -> TimetableError {
    TimetableError::Model(err.to_string())
}
