//! CP-SAT backend.
//!
//! Translates a `CpModel` into the OR-Tools `CpModelProto` and solves it
//! through the `cp_sat` bindings. Time limit and worker count map onto
//! `SatParameters`; the response status maps onto `SolveStatus`.

use std::time::Instant;

use cp_sat::proto::{
    constraint_proto, decision_strategy_proto, BoolArgumentProto, ConstraintProto,
    CpModelProto, CpObjectiveProto, CpSolverResponse, CpSolverStatus, DecisionStrategyProto,
    IntegerVariableProto, LinearConstraintProto, SatParameters,
};
use tracing::{error, info};

use crate::error::ModelError;
use crate::model::{ConstraintKind, CpModel, LinearExpr, Literal, Relation, VarSelection};
use crate::solver::{CpSolution, CpSolver, SolveParameters, SolveStatus};

/// `CpSolver` backed by the OR-Tools CP-SAT engine.
///
/// # Example
///
/// ```
/// use timetabler_cp::{CpModel, CpSolver, SatSolver, SolveParameters, SolveStatus};
///
/// let mut model = CpModel::new("pair");
/// let x = model.new_int_var(0, 3, "x").unwrap();
/// let y = model.new_int_var(0, 3, "y").unwrap();
/// model.add_not_equal(x, y);
/// model.minimize(x + y);
///
/// let solution = SatSolver::new().solve(&model, &SolveParameters::default());
/// assert_eq!(solution.status, SolveStatus::Optimal);
/// assert_eq!(solution.objective_value, Some(1));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct SatSolver {
    log_search_progress: bool,
}

impl SatSolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Lets CP-SAT print its own search log to stdout.
    pub fn with_search_log(mut self, enabled: bool) -> Self {
        self.log_search_progress = enabled;
        self
    }

    /// Engine parameters for a solve budget.
    pub fn parameters(&self, params: &SolveParameters) -> SatParameters {
        let mut sat = SatParameters::default();
        sat.max_time_in_seconds = params.max_time.map(|limit| limit.as_secs_f64());
        sat.num_search_workers = Some(i32::try_from(params.num_workers.max(1)).unwrap_or(i32::MAX));
        sat.log_search_progress = Some(self.log_search_progress);
        sat
    }
}

impl CpSolver for SatSolver {
    fn solve(&self, model: &CpModel, params: &SolveParameters) -> CpSolution {
        let started = Instant::now();
        let sat_params = self.parameters(params);

        info!(
            event = "solve_start",
            model = model.name(),
            variable_count = model.num_variables(),
            constraint_count = model.num_constraints(),
            time_limit_secs = sat_params.max_time_in_seconds,
            workers = sat_params.num_search_workers,
        );

        let proto = match to_proto(model) {
            Ok(proto) => proto,
            Err(err) => {
                error!(error = %err, "Model cannot be handed to CP-SAT");
                return CpSolution::without_solution(
                    SolveStatus::ModelInvalid,
                    0,
                    started.elapsed(),
                );
            }
        };

        let response = cp_sat::ffi::solve_with_parameters(&proto, &sat_params);
        let solution = into_solution(model, response, started);

        info!(
            event = "solve_end",
            status = %solution.status,
            objective = solution.objective_value,
            branches = solution.branches,
            duration_ms = solution.wall_time.as_millis() as u64,
        );
        solution
    }

    fn name(&self) -> &'static str {
        "cp-sat"
    }
}

fn into_solution(model: &CpModel, response: CpSolverResponse, started: Instant) -> CpSolution {
    let status = map_status(response.status());
    let branches = u64::try_from(response.num_branches).unwrap_or(0);
    let wall_time = started.elapsed();

    if !status.has_solution() {
        return CpSolution::without_solution(status, branches, wall_time);
    }

    let objective_value = model
        .objective()
        .map(|_| response.objective_value.round() as i64);
    CpSolution::with_values(status, response.solution, objective_value, branches, wall_time)
}

/// CP-SAT response status to the engine-neutral one.
pub fn map_status(status: CpSolverStatus) -> SolveStatus {
    match status {
        CpSolverStatus::Optimal => SolveStatus::Optimal,
        CpSolverStatus::Feasible => SolveStatus::Feasible,
        CpSolverStatus::Infeasible => SolveStatus::Infeasible,
        CpSolverStatus::ModelInvalid => SolveStatus::ModelInvalid,
        CpSolverStatus::Unknown => SolveStatus::Unknown,
    }
}

/// Builds the `CpModelProto` equivalent of `model`.
pub fn to_proto(model: &CpModel) -> Result<CpModelProto, ModelError> {
    let variables = model
        .variables()
        .map(|(name, domain)| IntegerVariableProto {
            name: name.to_string(),
            domain: domain.flattened(),
        })
        .collect();

    let constraints = model
        .constraints()
        .iter()
        .map(|constraint| {
            let enforcement_literal = constraint
                .enforcement()
                .iter()
                .map(|&literal| literal_ref(literal))
                .collect::<Result<Vec<_>, _>>()?;
            let body = match constraint.kind() {
                ConstraintKind::Linear { expr, relation, rhs } => {
                    let (vars, coeffs) = linear_terms(expr)?;
                    constraint_proto::Constraint::Linear(LinearConstraintProto {
                        vars,
                        coeffs,
                        domain: relation_domain(*relation, *rhs),
                    })
                }
                ConstraintKind::BoolAnd(literals) => {
                    constraint_proto::Constraint::BoolAnd(BoolArgumentProto {
                        literals: literal_refs(literals)?,
                    })
                }
                ConstraintKind::BoolOr(literals) => {
                    constraint_proto::Constraint::BoolOr(BoolArgumentProto {
                        literals: literal_refs(literals)?,
                    })
                }
            };
            Ok(ConstraintProto {
                enforcement_literal,
                constraint: Some(body),
                ..Default::default()
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    let objective = model
        .objective()
        .map(|expr| {
            let (vars, coeffs) = linear_terms(expr)?;
            Ok::<_, ModelError>(CpObjectiveProto {
                vars,
                coeffs,
                offset: expr.constant_term() as f64,
                ..Default::default()
            })
        })
        .transpose()?;

    let search_strategy = model
        .strategies()
        .iter()
        .map(|strategy| {
            let variables = strategy
                .vars
                .iter()
                .map(|var| var_ref(var.index()))
                .collect::<Result<Vec<_>, _>>()?;
            let selection = match strategy.selection {
                VarSelection::FirstUnbound => {
                    decision_strategy_proto::VariableSelectionStrategy::ChooseFirst
                }
                VarSelection::MinDomainSize => {
                    decision_strategy_proto::VariableSelectionStrategy::ChooseMinDomainSize
                }
            };
            Ok(DecisionStrategyProto {
                variables,
                variable_selection_strategy: selection as i32,
                domain_reduction_strategy:
                    decision_strategy_proto::DomainReductionStrategy::SelectMinValue as i32,
                ..Default::default()
            })
        })
        .collect::<Result<Vec<_>, ModelError>>()?;

    Ok(CpModelProto {
        name: model.name().to_string(),
        variables,
        constraints,
        objective,
        search_strategy,
        ..Default::default()
    })
}

fn var_ref(index: usize) -> Result<i32, ModelError> {
    i32::try_from(index).map_err(|_| ModelError::TooLarge { count: index })
}

/// Positive literals are the variable index, negated ones `-index - 1`.
fn literal_ref(literal: Literal) -> Result<i32, ModelError> {
    let index = var_ref(literal.var().index())?;
    Ok(if literal.is_positive() { index } else { -index - 1 })
}

fn literal_refs(literals: &[Literal]) -> Result<Vec<i32>, ModelError> {
    literals.iter().map(|&literal| literal_ref(literal)).collect()
}

fn linear_terms(expr: &LinearExpr) -> Result<(Vec<i32>, Vec<i64>), ModelError> {
    let mut vars = Vec::with_capacity(expr.terms().len());
    let mut coeffs = Vec::with_capacity(expr.terms().len());
    for &(var, coef) in expr.terms() {
        vars.push(var_ref(var)?);
        coeffs.push(coef);
    }
    Ok((vars, coeffs))
}

/// Admissible values of `expr` for `expr relation rhs`, as flattened
/// intervals.
fn relation_domain(relation: Relation, rhs: i64) -> Vec<i64> {
    match relation {
        Relation::Eq => vec![rhs, rhs],
        Relation::Le => vec![i64::MIN, rhs],
        Relation::Ge => vec![rhs, i64::MAX],
        Relation::Ne => {
            let mut domain = Vec::with_capacity(4);
            if let Some(below) = rhs.checked_sub(1) {
                domain.extend([i64::MIN, below]);
            }
            if let Some(above) = rhs.checked_add(1) {
                domain.extend([above, i64::MAX]);
            }
            domain
        }
    }
}

#[cfg(test)]
mod tests;
