//! Resolved scheduling decisions.

use std::fmt;

use super::{Group, Room, Subject, Teacher, Timeslot};

/// One taught occurrence with every decision resolved to a catalog entry.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Course {
    pub timeslot: Timeslot,
    pub group: Group,
    pub subject: Subject,
    pub teacher: Teacher,
    pub room: Room,
}

impl Course {
    pub fn new(
        timeslot: Timeslot,
        group: Group,
        subject: Subject,
        teacher: Teacher,
        room: Room,
    ) -> Self {
        Self {
            timeslot,
            group,
            subject,
            teacher,
            room,
        }
    }
}

impl fmt::Display for Course {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.subject.name, self.group.name, self.timeslot, self.room.name, self.teacher.last_name
        )
    }
}
