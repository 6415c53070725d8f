//! The contract between a model and the engine that solves it.

use std::fmt;
use std::time::Duration;

use crate::model::{BoolVar, CpModel, IntVar};

/// Outcome of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    /// A solution was found and proven optimal (or the model has no
    /// objective).
    Optimal,
    /// A solution was found but the search stopped before proving it optimal.
    Feasible,
    /// The search space was exhausted without finding a solution.
    Infeasible,
    /// The search stopped before finding a solution or proving there is none.
    Unknown,
    /// The engine rejected the model.
    ModelInvalid,
}

impl SolveStatus {
    pub fn has_solution(self) -> bool {
        matches!(self, SolveStatus::Optimal | SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SolveStatus::Optimal => "OPTIMAL",
            SolveStatus::Feasible => "FEASIBLE",
            SolveStatus::Infeasible => "INFEASIBLE",
            SolveStatus::Unknown => "UNKNOWN",
            SolveStatus::ModelInvalid => "MODEL_INVALID",
        };
        f.write_str(name)
    }
}

/// Budget handed to a solver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveParameters {
    /// Wall-clock limit; `None` searches until optimality is proven.
    pub max_time: Option<Duration>,
    /// Number of parallel search workers.
    pub num_workers: usize,
}

impl Default for SolveParameters {
    fn default() -> Self {
        Self {
            max_time: Some(Duration::from_secs(60)),
            num_workers: 4,
        }
    }
}

impl SolveParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_time(mut self, max_time: Option<Duration>) -> Self {
        self.max_time = max_time;
        self
    }

    pub fn with_num_workers(mut self, num_workers: usize) -> Self {
        self.num_workers = num_workers;
        self
    }
}

/// Result of a solve: a status and, when a solution exists, a value per
/// model variable.
#[derive(Debug, Clone, PartialEq)]
pub struct CpSolution {
    pub status: SolveStatus,
    values: Vec<i64>,
    pub objective_value: Option<i64>,
    /// Search branches explored.
    pub branches: u64,
    pub wall_time: Duration,
}

impl CpSolution {
    /// A solution assigning `values[i]` to variable `i`.
    pub fn with_values(
        status: SolveStatus,
        values: Vec<i64>,
        objective_value: Option<i64>,
        branches: u64,
        wall_time: Duration,
    ) -> Self {
        Self {
            status,
            values,
            objective_value,
            branches,
            wall_time,
        }
    }

    /// A result carrying no assignment.
    pub fn without_solution(status: SolveStatus, branches: u64, wall_time: Duration) -> Self {
        Self {
            status,
            values: Vec::new(),
            objective_value: None,
            branches,
            wall_time,
        }
    }

    pub fn is_solution_found(&self) -> bool {
        self.status.has_solution()
    }

    /// Value assigned to `var`, if a solution was found.
    pub fn value(&self, var: impl Into<IntVar>) -> Option<i64> {
        self.values.get(var.into().index()).copied()
    }

    pub fn boolean_value(&self, var: BoolVar) -> Option<bool> {
        self.value(var).map(|v| v != 0)
    }

    pub fn values(&self) -> &[i64] {
        &self.values
    }
}

/// An engine able to solve a `CpModel`.
///
/// Implementations must honour `params.max_time` and return `Unknown` (or
/// `Feasible` if a solution is at hand) when it runs out, rather than
/// failing.
pub trait CpSolver: Send + Sync {
    fn solve(&self, model: &CpModel, params: &SolveParameters) -> CpSolution;

    /// Short engine name for logs.
    fn name(&self) -> &'static str {
        "cp-solver"
    }
}
