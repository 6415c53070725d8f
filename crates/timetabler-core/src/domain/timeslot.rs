//! Timeslots and weekly calendars.

use std::fmt;

/// An atomic schedulable period.
///
/// A timeslot is identified by its position in the university's ordered
/// timeslot list; `day` and `period` are kept for display and for building
/// calendars.
///
/// # Example
///
/// ```
/// use timetabler_core::Timeslot;
///
/// let week = Timeslot::calendar(7, 7);
/// assert_eq!(week.len(), 49);
/// assert_eq!(week[9].day, 1);
/// assert_eq!(week[9].period, 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Timeslot {
    pub day: usize,
    pub period: usize,
    pub label: String,
}

const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

impl Timeslot {
    /// Creates a timeslot with a generated label such as `Tue#3`.
    pub fn new(day: usize, period: usize) -> Self {
        let day_name = DAY_NAMES.get(day).copied().unwrap_or("Day");
        Self {
            day,
            period,
            label: format!("{}#{}", day_name, period),
        }
    }

    /// Builds `days * slots_per_day` timeslots in day-major order.
    pub fn calendar(days: usize, slots_per_day: usize) -> Vec<Timeslot> {
        (0..days)
            .flat_map(|day| (0..slots_per_day).map(move |period| Timeslot::new(day, period)))
            .collect()
    }
}

impl fmt::Display for Timeslot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}
