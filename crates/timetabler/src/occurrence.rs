//! Expansion of the catalog into course occurrences.
//!
//! Expansion runs in two steps. [`plan_occurrences`] is a pure pass over
//! the catalog that counts occurrences and resolves capable teachers, so a
//! subject nobody can teach is reported before any variable exists.
//! [`OccurrenceRegistry::allocate`] then creates the timeslot, room and
//! teacher variables of every planned occurrence.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use timetabler_core::{Group, Result, Subject, TimetableError, University};
use timetabler_cp::{CpModel, IntVar};
use tracing::debug;

use crate::model_error;

/// Stable synthetic identity of an occurrence, assigned in expansion order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct OccurrenceId(pub usize);

impl fmt::Display for OccurrenceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "occ_{}", self.0)
    }
}

/// A group, addressed by its promotion and its position in that promotion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupKey {
    pub promotion: usize,
    pub group: usize,
}

impl GroupKey {
    pub fn resolve<'a>(&self, university: &'a University) -> Option<&'a Group> {
        university
            .promotions
            .get(self.promotion)?
            .groups
            .get(self.group)
    }
}

/// One occurrence to schedule, before any variable exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccurrencePlan {
    pub id: OccurrenceId,
    pub group: GroupKey,
    /// Position of the subject in its promotion.
    pub subject: usize,
    /// Catalog indices of the teachers able to teach the subject.
    pub capable_teachers: Vec<usize>,
}

/// Counts every (group, subject) occurrence of `university`.
///
/// For every promotion, group, and subject of that promotion, the subject
/// yields `floor(hours / timeslot_duration)` occurrences. A subject yielding
/// at least one occurrence without any capable teacher fails with
/// [`TimetableError::NoCapableTeacher`].
///
/// # Example
///
/// ```
/// use timetabler::occurrence::plan_occurrences;
/// use timetabler::{Group, Promotion, Room, Subject, Teacher, Timeslot, University};
///
/// let university = University::new("u", 2.0)
///     .with_timeslots(Timeslot::calendar(1, 7))
///     .with_room(Room::new("A"))
///     .with_teacher(Teacher::new("Ada", "Lovelace").with_subjects(["Maths"]))
///     .with_promotion(
///         Promotion::new("L1")
///             .with_group(Group::new("G1"))
///             .with_group(Group::new("G2"))
///             .with_subject(Subject::new("Maths", 5.0)),
///     );
///
/// let plans = plan_occurrences(&university).unwrap();
/// assert_eq!(plans.len(), 4);
/// assert_eq!(plans[3].id.to_string(), "occ_3");
/// ```
pub fn plan_occurrences(university: &University) -> Result<Vec<OccurrencePlan>> {
    log_unknown_capabilities(university);

    let mut capable: BTreeMap<&str, Vec<usize>> = BTreeMap::new();
    let mut plans = Vec::new();

    for (p, promotion) in university.promotions.iter().enumerate() {
        for g in 0..promotion.groups.len() {
            for (s, subject) in promotion.subjects.iter().enumerate() {
                let count = subject.occurrence_count(university.timeslot_duration);
                if count == 0 {
                    continue;
                }

                let teachers = capable
                    .entry(subject.name.as_str())
                    .or_insert_with(|| university.capable_teachers(&subject.name));
                if teachers.is_empty() {
                    return Err(TimetableError::NoCapableTeacher {
                        subject: subject.name.clone(),
                    });
                }

                for _ in 0..count {
                    plans.push(OccurrencePlan {
                        id: OccurrenceId(plans.len()),
                        group: GroupKey {
                            promotion: p,
                            group: g,
                        },
                        subject: s,
                        capable_teachers: teachers.clone(),
                    });
                }
            }
        }
    }

    Ok(plans)
}

fn log_unknown_capabilities(university: &University) {
    let taught: BTreeSet<&str> = university
        .promotions
        .iter()
        .flat_map(|promotion| promotion.subjects.iter().map(|s| s.name.as_str()))
        .collect();

    for teacher in &university.teachers {
        for subject in &teacher.subjects {
            if !taught.contains(subject.as_str()) {
                debug!(
                    teacher = %teacher,
                    subject = %subject,
                    "Teacher capability names a subject no promotion follows"
                );
            }
        }
    }
}

/// A planned occurrence with its decision variables.
#[derive(Debug, Clone)]
pub struct Occurrence {
    pub id: OccurrenceId,
    pub group: GroupKey,
    pub subject: usize,
    pub timeslot: IntVar,
    pub room: IntVar,
    pub teacher: IntVar,
    capable_teachers: Vec<usize>,
}

impl Occurrence {
    /// Whether `teacher` is in this occurrence's teacher domain.
    pub fn can_be_taught_by(&self, teacher: usize) -> bool {
        self.capable_teachers.contains(&teacher)
    }

    pub fn capable_teachers(&self) -> &[usize] {
        &self.capable_teachers
    }

    pub fn resolve_subject<'a>(&self, university: &'a University) -> Option<&'a Subject> {
        university
            .promotions
            .get(self.group.promotion)?
            .subjects
            .get(self.subject)
    }
}

/// Every occurrence of a timetable, indexed by [`OccurrenceId`].
#[derive(Debug, Clone, Default)]
pub struct OccurrenceRegistry {
    occurrences: Vec<Occurrence>,
    by_group: BTreeMap<GroupKey, Vec<OccurrenceId>>,
}

impl OccurrenceRegistry {
    /// Creates the variables of every planned occurrence.
    ///
    /// Per occurrence: `occ_{id}_timeslot` over every timeslot index,
    /// `occ_{id}_room` over every room index and `occ_{id}_teacher` over the
    /// capable teachers.
    pub fn allocate(
        model: &mut CpModel,
        university: &University,
        plans: Vec<OccurrencePlan>,
    ) -> Result<Self> {
        let last_timeslot = university.timeslots.len() as i64 - 1;
        let last_room = university.rooms.len() as i64 - 1;

        let mut registry = Self::default();
        for plan in plans {
            let id = OccurrenceId(registry.occurrences.len());
            let timeslot = model
                .new_int_var(0, last_timeslot, format!("{}_timeslot", id))
                .map_err(model_error)?;
            let room = model
                .new_int_var(0, last_room, format!("{}_room", id))
                .map_err(model_error)?;
            let teacher = model
                .new_int_var_from_values(
                    plan.capable_teachers.iter().map(|&t| t as i64),
                    format!("{}_teacher", id),
                )
                .map_err(model_error)?;

            registry.by_group.entry(plan.group).or_default().push(id);
            registry.occurrences.push(Occurrence {
                id,
                group: plan.group,
                subject: plan.subject,
                timeslot,
                room,
                teacher,
                capable_teachers: plan.capable_teachers,
            });
        }
        Ok(registry)
    }

    pub fn len(&self) -> usize {
        self.occurrences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty()
    }

    pub fn get(&self, id: OccurrenceId) -> Option<&Occurrence> {
        self.occurrences.get(id.0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter()
    }

    /// Every unordered pair of distinct occurrences.
    pub fn pairs(&self) -> impl Iterator<Item = (&Occurrence, &Occurrence)> {
        let all = &self.occurrences;
        (0..all.len()).flat_map(move |i| (i + 1..all.len()).map(move |j| (&all[i], &all[j])))
    }

    /// Groups with their occurrences, in group order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupKey, &[OccurrenceId])> {
        self.by_group.iter().map(|(key, ids)| (*key, ids.as_slice()))
    }

    pub fn group_members(&self, group: GroupKey) -> &[OccurrenceId] {
        self.by_group
            .get(&group)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn timeslot_vars(&self) -> Vec<IntVar> {
        self.occurrences.iter().map(|o| o.timeslot).collect()
    }

    /// Room and teacher variables, interleaved per occurrence.
    pub fn resource_vars(&self) -> Vec<IntVar> {
        self.occurrences
            .iter()
            .flat_map(|o| [o.room, o.teacher])
            .collect()
    }
}
