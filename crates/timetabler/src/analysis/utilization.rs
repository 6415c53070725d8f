//! Resource usage and course distribution tallies.

use std::borrow::Borrow;

use super::Placement;

/// Placements grouped by key, keys in first-encountered order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tally<K> {
    entries: Vec<(K, Vec<Placement>)>,
}

impl<K> Default for Tally<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> Tally<K> {
    fn push(&mut self, key: K, placement: Placement) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, placements)) => placements.push(placement),
            None => self.entries.push((key, vec![placement])),
        }
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&[Placement]>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(k, _)| k.borrow() == key)
            .map(|(_, placements)| placements.as_slice())
    }

    /// Number of placements under `key`, zero when absent.
    pub fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.get(key).map_or(0, <[Placement]>::len)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &[Placement])> {
        self.entries
            .iter()
            .map(|(key, placements)| (key, placements.as_slice()))
    }

    /// The `n` keys with the most placements, ties in first-encountered
    /// order.
    pub fn top(&self, n: usize) -> Vec<(&K, usize)> {
        let mut counts: Vec<(&K, usize)> = self
            .iter()
            .map(|(key, placements)| (key, placements.len()))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n);
        counts
    }
}

/// Courses per room, per teacher (by last name) and per timeslot position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResourceUtilization {
    pub rooms: Tally<String>,
    pub teachers: Tally<String>,
    pub timeslots: Tally<usize>,
}

impl ResourceUtilization {
    pub(super) fn tally(placements: &[Placement]) -> Self {
        let mut utilization = Self::default();
        for placement in placements {
            utilization
                .rooms
                .push(placement.room.clone(), placement.clone());
            utilization
                .teachers
                .push(placement.teacher.clone(), placement.clone());
            utilization
                .timeslots
                .push(placement.timeslot, placement.clone());
        }
        utilization
    }
}

/// Courses per subject and per group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseDistribution {
    pub by_subject: Tally<String>,
    pub by_group: Tally<String>,
}

impl CourseDistribution {
    pub(super) fn tally(placements: &[Placement]) -> Self {
        let mut distribution = Self::default();
        for placement in placements {
            distribution
                .by_subject
                .push(placement.course.subject.clone(), placement.clone());
            distribution
                .by_group
                .push(placement.course.group.clone(), placement.clone());
        }
        distribution
    }
}
