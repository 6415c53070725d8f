//! Finite integer domains.

use std::fmt;

/// A finite set of integers stored as sorted, disjoint, non-adjacent closed
/// intervals, the layout CP-SAT expects for variable domains.
///
/// # Example
///
/// ```
/// use timetabler_cp::Domain;
///
/// let domain = Domain::from_values([4, 1, 3, 2, 9]);
/// assert_eq!(domain.intervals(), &[(1, 4), (9, 9)]);
/// assert_eq!(domain.min(), Some(1));
/// assert!(domain.contains(9));
/// assert!(!domain.contains(5));
/// assert_eq!(domain.flattened(), vec![1, 4, 9, 9]);
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct Domain {
    intervals: Vec<(i64, i64)>,
}

impl Domain {
    /// Every integer in `[lb, ub]`. Empty when `lb > ub`.
    pub fn from_range(lb: i64, ub: i64) -> Self {
        let intervals = if lb <= ub { vec![(lb, ub)] } else { Vec::new() };
        Self { intervals }
    }

    pub fn from_values(values: impl IntoIterator<Item = i64>) -> Self {
        let mut values: Vec<i64> = values.into_iter().collect();
        values.sort_unstable();
        values.dedup();

        let mut intervals: Vec<(i64, i64)> = Vec::new();
        for value in values {
            match intervals.last_mut() {
                Some((_, hi)) if hi.checked_add(1) == Some(value) => *hi = value,
                _ => intervals.push((value, value)),
            }
        }
        Self { intervals }
    }

    pub fn boolean() -> Self {
        Self::from_range(0, 1)
    }

    pub fn intervals(&self) -> &[(i64, i64)] {
        &self.intervals
    }

    /// Interval bounds as `[lo0, hi0, lo1, hi1, ...]`.
    pub fn flattened(&self) -> Vec<i64> {
        self.intervals
            .iter()
            .flat_map(|&(lo, hi)| [lo, hi])
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Number of values, saturating at `u64::MAX`.
    pub fn size(&self) -> u64 {
        self.intervals.iter().fold(0u64, |acc, &(lo, hi)| {
            let width = hi.abs_diff(lo).saturating_add(1);
            acc.saturating_add(width)
        })
    }

    pub fn min(&self) -> Option<i64> {
        self.intervals.first().map(|&(lo, _)| lo)
    }

    pub fn max(&self) -> Option<i64> {
        self.intervals.last().map(|&(_, hi)| hi)
    }

    /// The single value, if the domain has exactly one.
    pub fn fixed_value(&self) -> Option<i64> {
        match self.intervals.as_slice() {
            [(lo, hi)] if lo == hi => Some(*lo),
            _ => None,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        let idx = self.intervals.partition_point(|&(_, hi)| hi < value);
        self.intervals
            .get(idx)
            .is_some_and(|&(lo, _)| lo <= value)
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for &(lo, hi) in &self.intervals {
            if lo == hi {
                set.entry(&lo);
            } else {
                set.entry(&(lo..=hi));
            }
        }
        set.finish()
    }
}
