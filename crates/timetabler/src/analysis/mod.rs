//! Post-solution schedule analysis.
//!
//! [`analyze`] is a pure function of a course list and the timeslot
//! ordering. It finds residual room and teacher overlaps, tallies how
//! rooms, teachers and timeslots are used, and groups courses by subject
//! and by group. [`ScheduleAnalysis::report`] renders the findings as text.

mod conflicts;
mod report;
mod utilization;

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;
use timetabler_core::{Course, Timeslot};

pub use crate::constraints::ConflictKind;
pub use conflicts::{ConflictRecord, ConflictReport};
pub use report::ScheduleReport;
pub use utilization::{CourseDistribution, ResourceUtilization, Tally};

/// Malformed input to the analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    /// A course is scheduled at a timeslot missing from the ordering.
    #[error("course {course} is scheduled at unknown timeslot `{timeslot}`")]
    UnknownTimeslot { timeslot: String, course: CourseRef },
}

/// The subject and group identifying a course in reports.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseRef {
    pub subject: String,
    pub group: String,
}

impl CourseRef {
    fn of(course: &Course) -> Self {
        Self {
            subject: course.subject.name.clone(),
            group: course.group.name.clone(),
        }
    }
}

impl fmt::Display for CourseRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.subject, self.group)
    }
}

/// Where and with whom a course takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub course: CourseRef,
    /// Position of the course's timeslot in the ordering.
    pub timeslot: usize,
    pub room: String,
    pub teacher: String,
}

/// Everything the analyzer found about one schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleAnalysis {
    pub conflicts: ConflictReport,
    pub utilization: ResourceUtilization,
    pub distribution: CourseDistribution,
}

impl ScheduleAnalysis {
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Text report with the top three rooms, teachers and timeslots.
    pub fn report(&self) -> ScheduleReport<'_> {
        ScheduleReport::new(self)
    }
}

/// Analyzes `courses` against the ordered `timeslots`.
///
/// # Example
///
/// ```
/// use timetabler::analyze;
/// use timetabler::{Course, Group, Room, Subject, Teacher, Timeslot};
///
/// let week = Timeslot::calendar(1, 7);
/// let course = |slot: usize, group: &str| {
///     Course::new(
///         week[slot].clone(),
///         Group::new(group),
///         Subject::new("Maths", 1.75),
///         Teacher::new("Ada", "Lovelace"),
///         Room::new("A101"),
///     )
/// };
///
/// let analysis = analyze(&[course(0, "G1"), course(0, "G2")], &week).unwrap();
/// assert_eq!(analysis.conflicts.room_overlaps.len(), 1);
/// assert_eq!(analysis.conflicts.teacher_overlaps.len(), 1);
/// ```
pub fn analyze(
    courses: &[Course],
    timeslots: &[Timeslot],
) -> Result<ScheduleAnalysis, AnalysisError> {
    let mut positions: HashMap<&Timeslot, usize> = HashMap::with_capacity(timeslots.len());
    for (idx, timeslot) in timeslots.iter().enumerate() {
        positions.entry(timeslot).or_insert(idx);
    }

    let placements = courses
        .iter()
        .map(|course| {
            let timeslot = positions.get(&course.timeslot).copied().ok_or_else(|| {
                AnalysisError::UnknownTimeslot {
                    timeslot: course.timeslot.to_string(),
                    course: CourseRef::of(course),
                }
            })?;
            Ok(Placement {
                course: CourseRef::of(course),
                timeslot,
                room: course.room.name.clone(),
                teacher: course.teacher.last_name.clone(),
            })
        })
        .collect::<Result<Vec<_>, AnalysisError>>()?;

    Ok(ScheduleAnalysis {
        conflicts: ConflictReport::detect(courses, &placements),
        utilization: ResourceUtilization::tally(&placements),
        distribution: CourseDistribution::tally(&placements),
    })
}

#[cfg(test)]
mod tests;
