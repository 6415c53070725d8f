//! Calendar fixtures.

use timetabler_core::Timeslot;

/// Periods per day in the reference week.
pub const REFERENCE_SLOTS_PER_DAY: usize = 7;

/// Seven days of seven periods, 49 timeslots in day-major order.
pub fn reference_calendar() -> Vec<Timeslot> {
    Timeslot::calendar(7, REFERENCE_SLOTS_PER_DAY)
}

/// A single Monday of seven periods.
pub fn single_day_calendar() -> Vec<Timeslot> {
    Timeslot::calendar(1, REFERENCE_SLOTS_PER_DAY)
}
