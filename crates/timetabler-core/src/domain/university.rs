//! The university catalog.

use std::collections::HashSet;

use crate::error::{Result, TimetableError};

use super::{Group, Room, Subject, Teacher, Timeslot};

/// A cohort of groups that all follow the same subjects.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Promotion {
    pub name: String,
    pub groups: Vec<Group>,
    pub subjects: Vec<Subject>,
}

impl Promotion {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            subjects: Vec::new(),
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }
}

/// The complete timetabling input.
///
/// Timeslot order matters: a timeslot's position in `timeslots` is the value
/// its model variable takes.
///
/// # Example
///
/// ```
/// use timetabler_core::{Group, Promotion, Room, Subject, Teacher, Timeslot, University};
///
/// let university = University::new("Goodwing", 1.75)
///     .with_timeslots(Timeslot::calendar(7, 7))
///     .with_room(Room::new("A101"))
///     .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths"]))
///     .with_promotion(
///         Promotion::new("L1")
///             .with_group(Group::new("L1-A"))
///             .with_subject(Subject::new("Maths", 3.5)),
///     );
///
/// assert!(university.validate().is_ok());
/// assert_eq!(university.capable_teachers("Maths"), vec![0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct University {
    pub name: String,
    /// Length of one timeslot, in hours.
    pub timeslot_duration: f64,
    pub timeslots: Vec<Timeslot>,
    pub rooms: Vec<Room>,
    pub teachers: Vec<Teacher>,
    pub promotions: Vec<Promotion>,
}

impl University {
    pub fn new(name: impl Into<String>, timeslot_duration: f64) -> Self {
        Self {
            name: name.into(),
            timeslot_duration,
            timeslots: Vec::new(),
            rooms: Vec::new(),
            teachers: Vec::new(),
            promotions: Vec::new(),
        }
    }

    pub fn with_timeslots(mut self, timeslots: Vec<Timeslot>) -> Self {
        self.timeslots = timeslots;
        self
    }

    pub fn with_room(mut self, room: Room) -> Self {
        self.rooms.push(room);
        self
    }

    pub fn with_teacher(mut self, teacher: Teacher) -> Self {
        self.teachers.push(teacher);
        self
    }

    pub fn with_promotion(mut self, promotion: Promotion) -> Self {
        self.promotions.push(promotion);
        self
    }

    /// Indices of the teachers able to teach `subject`, in catalog order.
    pub fn capable_teachers(&self, subject: &str) -> Vec<usize> {
        self.teachers
            .iter()
            .enumerate()
            .filter(|(_, teacher)| teacher.can_teach(subject))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Position of `timeslot` in the ordered timeslot list.
    pub fn timeslot_index(&self, timeslot: &Timeslot) -> Option<usize> {
        self.timeslots.iter().position(|t| t == timeslot)
    }

    /// Checks the structural soundness of the catalog.
    ///
    /// Group names must be unique across promotions, since schedules and
    /// reports identify groups by name.
    ///
    /// Subject coverage (a capable teacher per taught subject) is checked by
    /// occurrence expansion, where the set of taught subjects is known.
    pub fn validate(&self) -> Result<()> {
        if !(self.timeslot_duration.is_finite() && self.timeslot_duration > 0.0) {
            return Err(TimetableError::InvalidCatalog(format!(
                "timeslot duration must be positive, got {}",
                self.timeslot_duration
            )));
        }
        if self.timeslots.is_empty() {
            return Err(TimetableError::InvalidCatalog(
                "university has no timeslots".to_string(),
            ));
        }
        if self.rooms.is_empty() {
            return Err(TimetableError::InvalidCatalog(
                "university has no rooms".to_string(),
            ));
        }
        let mut group_names = HashSet::new();
        for group in self.promotions.iter().flat_map(|p| &p.groups) {
            if !group_names.insert(group.name.as_str()) {
                return Err(TimetableError::InvalidCatalog(format!(
                    "group name `{}` is used more than once",
                    group.name
                )));
            }
        }
        for teacher in &self.teachers {
            let Some(slots) = &teacher.available_slots else {
                continue;
            };
            if let Some(&slot) = slots.iter().find(|&&s| s >= self.timeslots.len()) {
                return Err(TimetableError::InvalidCatalog(format!(
                    "teacher {} is available at timeslot {} but only {} timeslots exist",
                    teacher,
                    slot,
                    self.timeslots.len()
                )));
            }
        }
        Ok(())
    }
}
