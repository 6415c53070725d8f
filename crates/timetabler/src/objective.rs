//! Soft penalties and the minimization objective.

use timetabler_config::{CalendarConfig, ObjectiveConfig};
use timetabler_core::Result;
use timetabler_cp::{BoolVar, CpModel, IntVar, LinearExpr, Relation};

use crate::constraints::{reify_value, ConflictIndicator};
use crate::model_error;
use crate::occurrence::{GroupKey, OccurrenceId, OccurrenceRegistry};

/// Deviation of one group's daily load from its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayBalance {
    pub group: GroupKey,
    pub day: usize,
    /// `floor(group occurrences / days)`.
    pub target: i64,
    pub day_count: IntVar,
    pub above: IntVar,
    pub below: IntVar,
}

/// Posts the day-balance penalties of every group.
///
/// Each occurrence gets a day variable with `timeslot - slots_per_day * day`
/// in `[0, slots_per_day - 1]`, and one reified `day == d` indicator per
/// whole calendar day. An indicator also pins the timeslot inside that day's
/// range, and at most one indicator holds (exactly one when the catalog ends
/// on a day boundary). Per group and day, `day_count - target = above - below`
/// with `above, below >= 0`.
///
/// A catalog shorter than one day has no balance penalty.
pub fn add_day_balance(
    model: &mut CpModel,
    registry: &OccurrenceRegistry,
    calendar: &CalendarConfig,
    timeslot_count: usize,
) -> Result<Vec<DayBalance>> {
    let days = calendar.day_count(timeslot_count);
    if days == 0 || registry.is_empty() {
        return Ok(Vec::new());
    }

    let spd = calendar.slots_per_day as i64;
    let last_day = (timeslot_count as i64 - 1) / spd;
    let whole_week = timeslot_count % calendar.slots_per_day == 0;

    // on_day[occurrence][day]
    let mut on_day: Vec<Vec<BoolVar>> = Vec::with_capacity(registry.len());
    for occurrence in registry.iter() {
        let id = occurrence.id;
        let day = model
            .new_int_var(0, last_day, format!("{}_day", id))
            .map_err(model_error)?;
        let offset = LinearExpr::from(occurrence.timeslot) - day * spd;
        model.add_greater_or_equal(offset.clone(), LinearExpr::constant(0));
        model.add_less_or_equal(offset, LinearExpr::constant(spd - 1));

        let indicators: Vec<BoolVar> = (0..days)
            .map(|d| reify_value(model, day, d as i64, format!("{}_on_day_{}", id, d)))
            .collect();
        for (d, &indicator) in indicators.iter().enumerate() {
            let range = calendar.day_range(d);
            let first = LinearExpr::constant(range.start as i64);
            let last = LinearExpr::constant(range.end as i64 - 1);
            model
                .add_greater_or_equal(occurrence.timeslot, first)
                .only_enforce_if(indicator);
            model
                .add_less_or_equal(occurrence.timeslot, last)
                .only_enforce_if(indicator);
        }
        let relation = if whole_week { Relation::Eq } else { Relation::Le };
        model.add_linear(LinearExpr::sum(indicators.iter().copied()), relation, 1);
        on_day.push(indicators);
    }

    let mut balances = Vec::new();
    for (group, members) in registry.groups() {
        let total = members.len() as i64;
        let target = total / days as i64;

        for d in 0..days {
            let suffix = format!("{}_{}_{}", group.promotion, group.group, d);
            let day_count = model
                .new_int_var(0, total, format!("day_count_{}", suffix))
                .map_err(model_error)?;
            let above = model
                .new_int_var(0, total, format!("above_target_{}", suffix))
                .map_err(model_error)?;
            let below = model
                .new_int_var(0, total, format!("below_target_{}", suffix))
                .map_err(model_error)?;

            let indicators = members.iter().map(|&OccurrenceId(i)| on_day[i][d]);
            model.add_equality(day_count, LinearExpr::sum(indicators));
            model.add_linear(day_count - above + below, Relation::Eq, target);

            balances.push(DayBalance {
                group,
                day: d,
                target,
                day_count,
                above,
                below,
            });
        }
    }

    Ok(balances)
}

/// Minimizes the weighted sum of balance deviations and conflict
/// indicators. Leaves the model without objective when there is nothing to
/// penalize.
pub fn minimize_penalties(
    model: &mut CpModel,
    balances: &[DayBalance],
    conflicts: &[ConflictIndicator],
    weights: &ObjectiveConfig,
) {
    if balances.is_empty() && conflicts.is_empty() {
        return;
    }

    let balance = LinearExpr::sum(balances.iter().flat_map(|b| [b.above, b.below]));
    let conflict = LinearExpr::sum(conflicts.iter().map(|c| c.var));
    model.minimize(balance * weights.balance_weight + conflict * weights.conflict_weight);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::occurrence::plan_occurrences;
    use timetabler_cp::{ConstraintKind, CpSolver, SatSolver, SolveParameters, SolveStatus};
    use timetabler_test::{oversubscribed_room_university, single_subject_university};

    #[test]
    fn test_balance_variables_per_group_and_day() {
        let university = single_subject_university();
        let mut model = CpModel::new("t");
        let plans = plan_occurrences(&university).unwrap();
        let registry = OccurrenceRegistry::allocate(&mut model, &university, plans).unwrap();

        let balances =
            add_day_balance(&mut model, &registry, &CalendarConfig::default(), 49).unwrap();
        assert_eq!(balances.len(), 7);
        assert!(balances.iter().all(|b| b.target == 0));
        assert_eq!(model.var_name(balances[3].above), "above_target_0_0_3");
        assert!(model.find_var("occ_1_on_day_6").is_some());
        assert_eq!(model.domain(model.find_var("occ_0_day").unwrap()).max(), Some(6));
    }

    #[test]
    fn test_day_indicators_bound_timeslot() {
        let university = single_subject_university();
        let mut model = CpModel::new("t");
        let plans = plan_occurrences(&university).unwrap();
        let registry = OccurrenceRegistry::allocate(&mut model, &university, plans).unwrap();
        let before = model.num_constraints();

        add_day_balance(&mut model, &registry, &CalendarConfig::default(), 49).unwrap();
        // per occurrence: 2 offset bounds, 7 * (2 reification + 2 range), 1 day sum;
        // per group day: 2 balance links
        assert_eq!(model.num_constraints() - before, 2 * (2 + 7 * 4 + 1) + 7 * 2);

        let day_sum = model
            .constraints()
            .iter()
            .rev()
            .find_map(|c| match c.kind() {
                ConstraintKind::Linear { expr, relation, rhs } if expr.terms().len() == 7 => {
                    Some((*relation, *rhs))
                }
                _ => None,
            });
        assert_eq!(day_sum, Some((Relation::Eq, 1)));
    }

    #[test]
    fn test_balance_target_rounds_down() {
        let university = oversubscribed_room_university();
        let mut model = CpModel::new("t");
        let plans = plan_occurrences(&university).unwrap();
        let registry = OccurrenceRegistry::allocate(&mut model, &university, plans).unwrap();

        // 7 slots with 3-slot days: two whole days, four occurrences per group
        let calendar = CalendarConfig::unrestricted(3);
        let balances = add_day_balance(&mut model, &registry, &calendar, 7).unwrap();
        assert_eq!(balances.len(), 4);
        assert!(balances.iter().all(|b| b.target == 2));
    }

    #[test]
    fn test_no_whole_day_means_no_penalty() {
        let university = single_subject_university();
        let mut model = CpModel::new("t");
        let plans = plan_occurrences(&university).unwrap();
        let registry = OccurrenceRegistry::allocate(&mut model, &university, plans).unwrap();

        let calendar = CalendarConfig::unrestricted(100);
        let balances = add_day_balance(&mut model, &registry, &calendar, 49).unwrap();
        assert!(balances.is_empty());

        minimize_penalties(&mut model, &balances, &[], &ObjectiveConfig::default());
        assert!(model.objective().is_none());
    }

    #[test]
    fn test_day_indicator_matches_timeslot() {
        let university = single_subject_university();
        let mut model = CpModel::new("t");
        let plans = plan_occurrences(&university).unwrap();
        let registry = OccurrenceRegistry::allocate(&mut model, &university, plans).unwrap();
        let balances =
            add_day_balance(&mut model, &registry, &CalendarConfig::default(), 49).unwrap();

        let first = registry.get(OccurrenceId(0)).unwrap().timeslot;
        model.add_equality(first, LinearExpr::constant(17));
        minimize_penalties(&mut model, &balances, &[], &ObjectiveConfig::default());

        let params = SolveParameters::new().with_num_workers(1);
        let solution = SatSolver::new().solve(&model, &params);
        assert_eq!(solution.status, SolveStatus::Optimal);

        let on_day_2 = model.find_var("occ_0_on_day_2").unwrap();
        assert_eq!(solution.value(on_day_2), Some(1));
        // two occurrences, target 0: any placement costs 2
        assert_eq!(solution.objective_value, Some(2));
        let counted: i64 = balances
            .iter()
            .map(|b| solution.value(b.day_count).unwrap())
            .sum();
        assert_eq!(counted, 2);
    }
}
