//! Residual overlap detection.

use timetabler_core::Course;

use super::{ConflictKind, CourseRef, Placement};

/// Two courses sharing a timeslot and a resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictRecord {
    pub kind: ConflictKind,
    pub courses: [CourseRef; 2],
    pub timeslot: usize,
    /// Room name or teacher last name.
    pub resource: String,
}

/// Overlaps found in a schedule, in timeslot order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConflictReport {
    pub room_overlaps: Vec<ConflictRecord>,
    pub teacher_overlaps: Vec<ConflictRecord>,
}

impl ConflictReport {
    /// Compares every pair of courses placed in the same timeslot.
    ///
    /// `placements[i]` describes `courses[i]`. Courses are visited in
    /// timeslot order, ties kept in input order.
    pub(super) fn detect(courses: &[Course], placements: &[Placement]) -> Self {
        let mut order: Vec<usize> = (0..courses.len()).collect();
        order.sort_by_key(|&i| placements[i].timeslot);

        let mut report = Self::default();
        for (k, &i) in order.iter().enumerate() {
            for &j in &order[k + 1..] {
                if placements[j].timeslot != placements[i].timeslot {
                    break;
                }
                let (first, second) = (&courses[i], &courses[j]);
                let pair = || [placements[i].course.clone(), placements[j].course.clone()];

                if first.room == second.room {
                    report.room_overlaps.push(ConflictRecord {
                        kind: ConflictKind::Room,
                        courses: pair(),
                        timeslot: placements[i].timeslot,
                        resource: first.room.name.clone(),
                    });
                }
                if first.teacher == second.teacher {
                    report.teacher_overlaps.push(ConflictRecord {
                        kind: ConflictKind::Teacher,
                        courses: pair(),
                        timeslot: placements[i].timeslot,
                        resource: first.teacher.last_name.clone(),
                    });
                }
            }
        }
        report
    }

    pub fn len(&self) -> usize {
        self.room_overlaps.len() + self.teacher_overlaps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.room_overlaps.is_empty() && self.teacher_overlaps.is_empty()
    }

    /// Room overlaps, then teacher overlaps.
    pub fn iter(&self) -> impl Iterator<Item = &ConflictRecord> {
        self.room_overlaps.iter().chain(&self.teacher_overlaps)
    }
}
