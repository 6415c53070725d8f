//! Assembly of the complete timetabling model.

use timetabler_config::TimetableConfig;
use timetabler_core::{Result, University};
use timetabler_cp::{CpModel, VarSelection};
use tracing::{debug, info};

use crate::constraints::{
    add_group_separation, add_lunch_break, add_room_overlap, add_teacher_availability,
    add_teacher_overlap, add_weekend_exclusion, ConflictIndicator,
};
use crate::objective::{add_day_balance, minimize_penalties, DayBalance};
use crate::occurrence::{plan_occurrences, OccurrenceRegistry};

/// A constraint model together with the handles needed to read a solution
/// back.
#[derive(Debug, Clone)]
pub struct TimetableModel {
    pub model: CpModel,
    pub registry: OccurrenceRegistry,
    pub conflicts: Vec<ConflictIndicator>,
    pub balances: Vec<DayBalance>,
}

impl TimetableModel {
    /// Builds the model of `university` under `config`.
    ///
    /// Configuration and catalog are validated, and capable teachers are
    /// resolved, before any variable is created.
    ///
    /// # Errors
    ///
    /// [`TimetableError::Config`](timetabler_core::TimetableError::Config)
    /// for an unusable configuration,
    /// [`TimetableError::InvalidCatalog`](timetabler_core::TimetableError::InvalidCatalog)
    /// for a malformed catalog and
    /// [`TimetableError::NoCapableTeacher`](timetabler_core::TimetableError::NoCapableTeacher)
    /// when a taught subject has no teacher.
    pub fn build(university: &University, config: &TimetableConfig) -> Result<Self> {
        config.validate()?;
        university.validate()?;
        let plans = plan_occurrences(university)?;

        let timeslot_count = university.timeslots.len();
        let relax = config.objective.relax_overlaps;
        let calendar = &config.calendar;

        let mut model = CpModel::new(university.name.clone());
        let registry = OccurrenceRegistry::allocate(&mut model, university, plans)?;
        debug!(
            occurrences = registry.len(),
            variable_count = model.num_variables(),
            "Occurrences expanded"
        );

        let mut conflicts = add_room_overlap(&mut model, &registry, relax);
        add_group_separation(&mut model, &registry);
        conflicts.extend(add_teacher_overlap(&mut model, &registry, relax));
        add_teacher_availability(&mut model, &registry, university);
        add_lunch_break(&mut model, &registry, calendar, timeslot_count);
        add_weekend_exclusion(&mut model, &registry, calendar, timeslot_count);
        debug!(
            constraint_count = model.num_constraints(),
            conflict_indicators = conflicts.len(),
            relaxed = relax,
            "Hard constraints posted"
        );

        if timeslot_count % calendar.slots_per_day != 0 {
            debug!(
                timeslots = timeslot_count,
                slots_per_day = calendar.slots_per_day,
                "Trailing partial day is not balanced"
            );
        }
        let balances = add_day_balance(&mut model, &registry, calendar, timeslot_count)?;
        minimize_penalties(&mut model, &balances, &conflicts, &config.objective);

        model.add_decision_strategy(registry.timeslot_vars(), VarSelection::MinDomainSize);
        model.add_decision_strategy(registry.resource_vars(), VarSelection::FirstUnbound);

        info!(
            event = "model_built",
            occurrences = registry.len(),
            timeslots = timeslot_count,
            rooms = university.rooms.len(),
            teachers = university.teachers.len(),
            variable_count = model.num_variables(),
            constraint_count = model.num_constraints(),
        );

        Ok(Self {
            model,
            registry,
            conflicts,
            balances,
        })
    }
}
