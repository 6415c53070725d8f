//! Static scheduling resources.

use std::collections::BTreeSet;
use std::fmt;

/// A teaching room.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Room {
    pub name: String,
}

impl Room {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A student group.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Group {
    pub name: String,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// A subject with the number of hours each group must receive.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Subject {
    pub name: String,
    pub hours: f64,
}

impl Subject {
    pub fn new(name: impl Into<String>, hours: f64) -> Self {
        Self {
            name: name.into(),
            hours,
        }
    }

    /// Number of occurrences needed to cover `hours` with slots of
    /// `timeslot_duration` hours.
    ///
    /// Partial slots are dropped: 5 hours of 2-hour slots is 2 occurrences.
    ///
    /// # Example
    ///
    /// ```
    /// use timetabler_core::Subject;
    ///
    /// assert_eq!(Subject::new("Maths", 5.0).occurrence_count(2.0), 2);
    /// assert_eq!(Subject::new("Maths", 1.0).occurrence_count(1.75), 0);
    /// ```
    pub fn occurrence_count(&self, timeslot_duration: f64) -> usize {
        if timeslot_duration <= 0.0 || self.hours <= 0.0 {
            return 0;
        }
        (self.hours / timeslot_duration).floor() as usize
    }
}

/// A teacher, with the subjects they can teach and an optional availability
/// window.
///
/// `available_slots == None` means the teacher is available at every
/// timeslot.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Teacher {
    pub first_name: String,
    pub last_name: String,
    pub subjects: BTreeSet<String>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub available_slots: Option<BTreeSet<usize>>,
}

impl Teacher {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            subjects: BTreeSet::new(),
            available_slots: None,
        }
    }

    pub fn with_subjects(mut self, subjects: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.subjects.extend(subjects.into_iter().map(Into::into));
        self
    }

    /// Restricts the teacher to the given timeslot indices.
    pub fn with_availability(mut self, slots: impl IntoIterator<Item = usize>) -> Self {
        self.available_slots = Some(slots.into_iter().collect());
        self
    }

    pub fn can_teach(&self, subject: &str) -> bool {
        self.subjects.contains(subject)
    }

    pub fn is_available(&self, timeslot: usize) -> bool {
        self.available_slots
            .as_ref()
            .map_or(true, |slots| slots.contains(&timeslot))
    }
}

impl fmt::Display for Teacher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.first_name, self.last_name)
    }
}
