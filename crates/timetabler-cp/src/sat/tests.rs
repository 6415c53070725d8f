//! Tests for the CP-SAT backend.

use std::time::Duration;

use super::*;
use crate::model::BoolVar;

fn single_worker() -> SolveParameters {
    SolveParameters::new()
        .with_max_time(Some(Duration::from_secs(10)))
        .with_num_workers(1)
}

/// Three 0/1 variables with a reified "same value" indicator per pair.
fn pigeonhole_model() -> (CpModel, Vec<BoolVar>) {
    let mut model = CpModel::new("pigeonhole");
    let vars: Vec<_> = (0..3)
        .map(|i| model.new_int_var(0, 1, format!("v{}", i)).unwrap())
        .collect();
    let mut indicators = Vec::new();
    for i in 0..vars.len() {
        for j in (i + 1)..vars.len() {
            let same = model.new_bool_var(format!("same_{}_{}", i, j));
            model.add_equality(vars[i], vars[j]).only_enforce_if(same);
            model.add_not_equal(vars[i], vars[j]).only_enforce_if(!same);
            indicators.push(same);
        }
    }
    model.minimize(LinearExpr::sum(indicators.iter().copied()));
    (model, indicators)
}

#[test]
fn test_parameters_carry_budget() {
    let params = SolveParameters::new()
        .with_max_time(Some(Duration::from_millis(2500)))
        .with_num_workers(6);

    let sat = SatSolver::new().parameters(&params);
    assert_eq!(sat.max_time_in_seconds, Some(2.5));
    assert_eq!(sat.num_search_workers, Some(6));
    assert_eq!(sat.log_search_progress, Some(false));

    let unbounded = SatSolver::new()
        .with_search_log(true)
        .parameters(&params.with_max_time(None).with_num_workers(0));
    assert_eq!(unbounded.max_time_in_seconds, None);
    assert_eq!(unbounded.num_search_workers, Some(1));
    assert_eq!(unbounded.log_search_progress, Some(true));
}

#[test]
fn test_status_mapping() {
    assert_eq!(map_status(CpSolverStatus::Optimal), SolveStatus::Optimal);
    assert_eq!(map_status(CpSolverStatus::Feasible), SolveStatus::Feasible);
    assert_eq!(map_status(CpSolverStatus::Infeasible), SolveStatus::Infeasible);
    assert_eq!(map_status(CpSolverStatus::Unknown), SolveStatus::Unknown);
    assert_eq!(
        map_status(CpSolverStatus::ModelInvalid),
        SolveStatus::ModelInvalid
    );
}

#[test]
fn test_proto_encoding() {
    let mut model = CpModel::new("encode");
    let x = model.new_int_var_from_values([0, 1, 4], "x").unwrap();
    let b = model.new_bool_var("b");
    model.add_not_equal(x, LinearExpr::constant(1)).only_enforce_if(!b);
    model.add_bool_or([b]);
    model.minimize(x * 2 + LinearExpr::constant(5));
    model.add_decision_strategy([x], VarSelection::MinDomainSize);

    let proto = to_proto(&model).unwrap();
    assert_eq!(proto.name, "encode");
    assert_eq!(proto.variables[0].domain, vec![0, 1, 4, 4]);
    assert_eq!(proto.variables[1].domain, vec![0, 1]);

    let ne = &proto.constraints[0];
    assert_eq!(ne.enforcement_literal, vec![-2]);
    match &ne.constraint {
        Some(constraint_proto::Constraint::Linear(linear)) => {
            assert_eq!(linear.vars, vec![0]);
            assert_eq!(linear.coeffs, vec![1]);
            assert_eq!(linear.domain, vec![i64::MIN, 0, 2, i64::MAX]);
        }
        other => panic!("unexpected constraint {:?}", other),
    }
    match &proto.constraints[1].constraint {
        Some(constraint_proto::Constraint::BoolOr(or)) => assert_eq!(or.literals, vec![1]),
        other => panic!("unexpected constraint {:?}", other),
    }

    let objective = proto.objective.unwrap();
    assert_eq!(objective.vars, vec![0]);
    assert_eq!(objective.coeffs, vec![2]);
    assert_eq!(objective.offset, 5.0);

    assert_eq!(proto.search_strategy[0].variables, vec![0]);
    assert_eq!(
        proto.search_strategy[0].variable_selection_strategy,
        decision_strategy_proto::VariableSelectionStrategy::ChooseMinDomainSize as i32
    );
}

#[test]
fn test_relation_domains() {
    assert_eq!(relation_domain(Relation::Eq, 3), vec![3, 3]);
    assert_eq!(relation_domain(Relation::Le, 3), vec![i64::MIN, 3]);
    assert_eq!(relation_domain(Relation::Ge, 3), vec![3, i64::MAX]);
    assert_eq!(relation_domain(Relation::Ne, i64::MIN), vec![i64::MIN + 1, i64::MAX]);
    assert_eq!(relation_domain(Relation::Ne, i64::MAX), vec![i64::MIN, i64::MAX - 1]);
}

#[test]
fn test_satisfiable_model() {
    let mut model = CpModel::new("sat");
    let x = model.new_int_var(0, 3, "x").unwrap();
    let y = model.new_int_var(0, 3, "y").unwrap();
    model.add_linear(x + y, Relation::Eq, 5);
    model.add_not_equal(x, LinearExpr::constant(2));

    let solution = SatSolver::new().solve(&model, &single_worker());
    assert!(solution.is_solution_found());
    let (xv, yv) = (solution.value(x).unwrap(), solution.value(y).unwrap());
    assert_eq!(xv + yv, 5);
    assert_ne!(xv, 2);
    assert_eq!(solution.objective_value, None);
}

#[test]
fn test_infeasible_model() {
    let mut model = CpModel::new("coloring");
    let vars: Vec<_> = (0..3)
        .map(|i| model.new_int_var(0, 1, format!("c{}", i)).unwrap())
        .collect();
    for i in 0..vars.len() {
        for j in (i + 1)..vars.len() {
            model.add_not_equal(vars[i], vars[j]);
        }
    }

    let solution = SatSolver::new().solve(&model, &single_worker());
    assert_eq!(solution.status, SolveStatus::Infeasible);
    assert!(!solution.is_solution_found());
    assert_eq!(solution.value(vars[0]), None);
}

#[test]
fn test_minimizes_objective() {
    let mut model = CpModel::new("min");
    let x = model.new_int_var(0, 5, "x").unwrap();
    let y = model.new_int_var(0, 5, "y").unwrap();
    model.add_greater_or_equal(x + y, LinearExpr::constant(4));
    model.add_less_or_equal(x, LinearExpr::constant(1));
    model.minimize(x * 3 + y);

    let solution = SatSolver::new().solve(&model, &single_worker());
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.objective_value, Some(4));
    assert_eq!(solution.value(x), Some(0));
    assert_eq!(solution.value(y), Some(4));
}

#[test]
fn test_reified_indicators_minimized() {
    let (model, indicators) = pigeonhole_model();

    let solution = SatSolver::new().solve(&model, &single_worker());
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.objective_value, Some(1));
    let active = indicators
        .iter()
        .filter(|&&b| solution.boolean_value(b) == Some(true))
        .count();
    assert_eq!(active, 1);
}

#[test]
fn test_parallel_workers_agree() {
    let (model, _) = pigeonhole_model();
    let params = SolveParameters::new()
        .with_max_time(Some(Duration::from_secs(10)))
        .with_num_workers(4);

    let solution = SatSolver::new().solve(&model, &params);
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert_eq!(solution.objective_value, Some(1));
}

#[test]
fn test_empty_model_is_optimal() {
    let model = CpModel::new("empty");
    let solution = SatSolver::new().solve(&model, &SolveParameters::default());
    assert_eq!(solution.status, SolveStatus::Optimal);
    assert!(solution.values().is_empty());
}
