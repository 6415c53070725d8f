//! Plain-text rendering of a [`ScheduleAnalysis`].

use std::fmt;

use super::{ConflictRecord, ScheduleAnalysis, Tally};

const TOP_N: usize = 3;

/// Displays the analysis as the scheduling intelligence report.
#[derive(Debug, Clone, Copy)]
pub struct ScheduleReport<'a> {
    analysis: &'a ScheduleAnalysis,
}

impl<'a> ScheduleReport<'a> {
    pub fn new(analysis: &'a ScheduleAnalysis) -> Self {
        Self { analysis }
    }
}

impl fmt::Display for ScheduleReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let conflicts = &self.analysis.conflicts;
        let utilization = &self.analysis.utilization;

        writeln!(f, "==== SCHEDULING INTELLIGENCE REPORT ====")?;
        writeln!(f)?;
        writeln!(f, "1. CONFLICT ANALYSIS")?;
        write_overlaps(f, "Room", &conflicts.room_overlaps)?;
        write_overlaps(f, "Teacher", &conflicts.teacher_overlaps)?;

        writeln!(f)?;
        writeln!(f, "2. RESOURCE UTILIZATION")?;
        writeln!(f, "   Top {} Most Used Rooms:", TOP_N)?;
        write_top(f, &utilization.rooms, |room| room.to_string())?;
        writeln!(f, "   Top {} Most Used Teachers:", TOP_N)?;
        write_top(f, &utilization.teachers, |teacher| teacher.to_string())?;

        writeln!(f)?;
        writeln!(f, "3. TIMESLOT DISTRIBUTION")?;
        writeln!(f, "   Top {} Most Used Timeslots:", TOP_N)?;
        write_top(f, &utilization.timeslots, |slot| format!("Timeslot {}", slot))?;

        writeln!(f)?;
        write!(f, "==== END OF INTELLIGENCE REPORT ====")
    }
}

fn write_overlaps(
    f: &mut fmt::Formatter<'_>,
    resource: &str,
    overlaps: &[ConflictRecord],
) -> fmt::Result {
    writeln!(f, "   - {} Overlaps: {}", resource, overlaps.len())?;
    for overlap in overlaps {
        writeln!(
            f,
            "     * Timeslot {}, {} {}:",
            overlap.timeslot, resource, overlap.resource
        )?;
        for course in &overlap.courses {
            writeln!(f, "       - {}", course)?;
        }
    }
    Ok(())
}

fn write_top<K: PartialEq>(
    f: &mut fmt::Formatter<'_>,
    tally: &Tally<K>,
    label: impl Fn(&K) -> String,
) -> fmt::Result {
    for (key, count) in tally.top(TOP_N) {
        writeln!(f, "     * {}: {} courses", label(key), count)?;
    }
    Ok(())
}
