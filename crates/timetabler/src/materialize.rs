//! Mapping a solved assignment back onto the catalog.

use timetabler_core::{Course, Result, TimetableError, University};
use timetabler_cp::{CpSolution, IntVar};

use crate::occurrence::{Occurrence, OccurrenceRegistry};

/// Turns every occurrence into a [`Course`], in occurrence order.
///
/// A solution without assignment (infeasible or unknown) materializes to an
/// empty schedule. A value that does not index the catalog is reported as
/// [`TimetableError::Materialize`].
pub fn materialize(
    university: &University,
    registry: &OccurrenceRegistry,
    solution: &CpSolution,
) -> Result<Vec<Course>> {
    if !solution.is_solution_found() {
        return Ok(Vec::new());
    }
    registry
        .iter()
        .map(|occurrence| materialize_one(university, occurrence, solution))
        .collect()
}

fn materialize_one(
    university: &University,
    occurrence: &Occurrence,
    solution: &CpSolution,
) -> Result<Course> {
    let id = occurrence.id;
    let timeslot = lookup(&university.timeslots, solution, occurrence.timeslot, || {
        format!("{} has no valid timeslot", id)
    })?;
    let room = lookup(&university.rooms, solution, occurrence.room, || {
        format!("{} has no valid room", id)
    })?;
    let teacher = lookup(&university.teachers, solution, occurrence.teacher, || {
        format!("{} has no valid teacher", id)
    })?;
    let group = occurrence
        .group
        .resolve(university)
        .ok_or_else(|| TimetableError::Materialize(format!("{} has an unknown group", id)))?;
    let subject = occurrence
        .resolve_subject(university)
        .ok_or_else(|| TimetableError::Materialize(format!("{} has an unknown subject", id)))?;

    Ok(Course::new(
        timeslot.clone(),
        group.clone(),
        subject.clone(),
        teacher.clone(),
        room.clone(),
    ))
}

fn lookup<'a, T>(
    items: &'a [T],
    solution: &CpSolution,
    var: IntVar,
    describe: impl FnOnce() -> String,
) -> Result<&'a T> {
    solution
        .value(var)
        .and_then(|value| usize::try_from(value).ok())
        .and_then(|index| items.get(index))
        .ok_or_else(|| TimetableError::Materialize(describe()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::plan_occurrences;
    use std::time::Duration;
    use timetabler_cp::{CpModel, SolveStatus};
    use timetabler_test::single_subject_university;

    fn registry() -> (University, CpModel, OccurrenceRegistry) {
        let university = single_subject_university();
        let mut model = CpModel::new("t");
        let plans = plan_occurrences(&university).unwrap();
        let registry = OccurrenceRegistry::allocate(&mut model, &university, plans).unwrap();
        (university, model, registry)
    }

    #[test]
    fn test_materialize_resolves_catalog_entries() {
        let (university, model, registry) = registry();
        assert_eq!(model.num_variables(), 6);
        // timeslot, room, teacher per occurrence
        let values = vec![3, 0, 0, 10, 0, 0];
        let solution =
            CpSolution::with_values(SolveStatus::Feasible, values, Some(2), 5, Duration::ZERO);

        let courses = materialize(&university, &registry, &solution).unwrap();
        assert_eq!(courses.len(), 2);
        assert_eq!(courses[0].timeslot, university.timeslots[3]);
        assert_eq!(courses[1].timeslot, university.timeslots[10]);
        assert_eq!(courses[0].subject.name, "Maths");
        assert_eq!(courses[0].group.name, "L1-A");
        assert_eq!(courses[0].teacher.last_name, "Lovelace");
        assert_eq!(courses[0].room.name, "A101");
    }

    #[test]
    fn test_no_solution_materializes_nothing() {
        let (university, _, registry) = registry();
        let solution = CpSolution::without_solution(SolveStatus::Unknown, 0, Duration::ZERO);
        assert!(materialize(&university, &registry, &solution)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_out_of_range_value_is_an_error() {
        let (university, _, registry) = registry();
        let values = vec![3, 0, 0, 99, 0, 0];
        let solution =
            CpSolution::with_values(SolveStatus::Optimal, values, None, 1, Duration::ZERO);

        let err = materialize(&university, &registry, &solution).unwrap_err();
        assert!(matches!(err, TimetableError::Materialize(_)));
        assert!(err.to_string().contains("occ_1"));
    }
}
