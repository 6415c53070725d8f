//! Hard scheduling rules posted over the occurrence variables.
//!
//! Room and teacher overlaps are reified per pair of occurrences: a conflict
//! indicator is true exactly when both occurrences share a timeslot and the
//! resource. Indicators always feed the objective; unless overlaps are
//! relaxed they are also forced false.

use std::fmt;

use timetabler_config::CalendarConfig;
use timetabler_core::University;
use timetabler_cp::{BoolVar, CpModel, IntVar, LinearExpr};

use crate::occurrence::{OccurrenceId, OccurrenceRegistry};

/// The resource two occurrences would share.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConflictKind {
    Room,
    Teacher,
}

impl fmt::Display for ConflictKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConflictKind::Room => write!(f, "room"),
            ConflictKind::Teacher => write!(f, "teacher"),
        }
    }
}

/// Reified "these two occurrences collide on a resource" variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConflictIndicator {
    pub kind: ConflictKind,
    pub first: OccurrenceId,
    pub second: OccurrenceId,
    pub var: BoolVar,
}

/// Posts `indicator <=> (lhs == rhs)`.
fn reify_equal(model: &mut CpModel, lhs: IntVar, rhs: IntVar, name: String) -> BoolVar {
    let indicator = model.new_bool_var(name);
    model.add_equality(lhs, rhs).only_enforce_if(indicator);
    model.add_not_equal(lhs, rhs).only_enforce_if(!indicator);
    indicator
}

/// Posts `indicator <=> (var == value)`.
pub(crate) fn reify_value(model: &mut CpModel, var: IntVar, value: i64, name: String) -> BoolVar {
    let indicator = model.new_bool_var(name);
    model
        .add_equality(var, LinearExpr::constant(value))
        .only_enforce_if(indicator);
    model
        .add_not_equal(var, LinearExpr::constant(value))
        .only_enforce_if(!indicator);
    indicator
}

/// Posts `conflict <=> (a && b)`, forbidding the conflict unless `relax`.
fn reify_conflict(
    model: &mut CpModel,
    a: BoolVar,
    b: BoolVar,
    name: String,
    relax: bool,
) -> BoolVar {
    let conflict = model.new_bool_var(name);
    model.add_bool_and([a, b]).only_enforce_if(conflict);
    model.add_bool_or([!a, !b]).only_enforce_if(!conflict);
    if !relax {
        model.add_bool_and([!conflict]);
    }
    conflict
}

/// No two occurrences share a timeslot and a room.
pub fn add_room_overlap(
    model: &mut CpModel,
    registry: &OccurrenceRegistry,
    relax: bool,
) -> Vec<ConflictIndicator> {
    let mut indicators = Vec::new();
    for (a, b) in registry.pairs() {
        let (i, j) = (a.id.0, b.id.0);
        let same_timeslot = reify_equal(
            model,
            a.timeslot,
            b.timeslot,
            format!("same_timeslot_{}_{}", i, j),
        );
        let same_room = reify_equal(model, a.room, b.room, format!("same_room_{}_{}", i, j));
        let var = reify_conflict(
            model,
            same_timeslot,
            same_room,
            format!("room_conflict_{}_{}", i, j),
            relax,
        );
        indicators.push(ConflictIndicator {
            kind: ConflictKind::Room,
            first: a.id,
            second: b.id,
            var,
        });
    }
    indicators
}

/// Occurrences of the same group never share a timeslot.
pub fn add_group_separation(model: &mut CpModel, registry: &OccurrenceRegistry) {
    for (_, members) in registry.groups() {
        for (k, &first) in members.iter().enumerate() {
            for &second in &members[k + 1..] {
                if let (Some(a), Some(b)) = (registry.get(first), registry.get(second)) {
                    model.add_not_equal(a.timeslot, b.timeslot);
                }
            }
        }
    }
}

/// No teacher is assigned two occurrences in the same timeslot.
pub fn add_teacher_overlap(
    model: &mut CpModel,
    registry: &OccurrenceRegistry,
    relax: bool,
) -> Vec<ConflictIndicator> {
    let mut indicators = Vec::new();
    for (a, b) in registry.pairs() {
        let (i, j) = (a.id.0, b.id.0);
        let same_timeslot = reify_equal(
            model,
            a.timeslot,
            b.timeslot,
            format!("same_timeslot_teacher_{}_{}", i, j),
        );
        let same_teacher = reify_equal(
            model,
            a.teacher,
            b.teacher,
            format!("same_teacher_{}_{}", i, j),
        );
        let var = reify_conflict(
            model,
            same_timeslot,
            same_teacher,
            format!("teacher_conflict_{}_{}", i, j),
            relax,
        );
        indicators.push(ConflictIndicator {
            kind: ConflictKind::Teacher,
            first: a.id,
            second: b.id,
            var,
        });
    }
    indicators
}

/// A teacher with an availability window only teaches inside it.
///
/// For every such teacher and every occurrence they could teach,
/// `is_selected <=> teacher == t` and, when selected, the timeslot must be
/// one of the window's slots. An empty window forbids the teacher.
pub fn add_teacher_availability(
    model: &mut CpModel,
    registry: &OccurrenceRegistry,
    university: &University,
) {
    for (t, teacher) in university.teachers.iter().enumerate() {
        if teacher.available_slots.is_none() {
            continue;
        }
        let window: Vec<usize> = (0..university.timeslots.len())
            .filter(|&slot| teacher.is_available(slot))
            .collect();

        for occurrence in registry.iter().filter(|o| o.can_be_taught_by(t)) {
            let id = occurrence.id;
            let is_selected = reify_value(
                model,
                occurrence.teacher,
                t as i64,
                format!("{}_teacher_{}_selected", id, t),
            );

            if window.is_empty() {
                model.add_bool_and([!is_selected]);
                continue;
            }

            let at_slot: Vec<BoolVar> = window
                .iter()
                .map(|&slot| {
                    reify_value(
                        model,
                        occurrence.timeslot,
                        slot as i64,
                        format!("{}_teacher_{}_at_{}", id, t, slot),
                    )
                })
                .collect();
            model.add_bool_or(at_slot).only_enforce_if(is_selected);
        }
    }
}

/// Nothing is scheduled in the daily lunch period.
pub fn add_lunch_break(
    model: &mut CpModel,
    registry: &OccurrenceRegistry,
    calendar: &CalendarConfig,
    timeslot_count: usize,
) {
    forbid_timeslots(model, registry, &calendar.lunch_timeslots(timeslot_count));
}

/// Nothing is scheduled in the blocked ranges (by default Saturday
/// afternoon and Sunday).
pub fn add_weekend_exclusion(
    model: &mut CpModel,
    registry: &OccurrenceRegistry,
    calendar: &CalendarConfig,
    timeslot_count: usize,
) {
    forbid_timeslots(model, registry, &calendar.blocked_timeslots(timeslot_count));
}

fn forbid_timeslots(model: &mut CpModel, registry: &OccurrenceRegistry, slots: &[usize]) {
    for occurrence in registry.iter() {
        for &slot in slots {
            model.add_not_equal(occurrence.timeslot, LinearExpr::constant(slot as i64));
        }
    }
}
