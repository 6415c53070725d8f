//! Tests for model construction.

use super::*;

#[test]
fn test_int_var_bounds() {
    let mut model = CpModel::new("t");
    let x = model.new_int_var(2, 4, "x").unwrap();
    assert_eq!(model.domain(x).intervals(), &[(2, 4)]);
    assert_eq!(model.var_name(x), "x");

    let err = model.new_int_var(5, 1, "bad").unwrap_err();
    assert_eq!(
        err,
        ModelError::InvertedBounds {
            name: "bad".to_string(),
            lb: 5,
            ub: 1
        }
    );
}

#[test]
fn test_int_var_from_values() {
    let mut model = CpModel::new("t");
    let x = model.new_int_var_from_values([3, 0, 3], "x").unwrap();
    assert_eq!(model.domain(x).intervals(), &[(0, 0), (3, 3)]);

    let err = model
        .new_int_var_from_values(Vec::<i64>::new(), "empty")
        .unwrap_err();
    assert!(matches!(err, ModelError::EmptyDomain { .. }));
}

#[test]
fn test_linear_constant_folded_into_rhs() {
    let mut model = CpModel::new("t");
    let x = model.new_int_var(0, 9, "x").unwrap();
    let y = model.new_int_var(0, 9, "y").unwrap();

    // x + 3 == y  ->  x - y == -3
    model.add_equality(x + LinearExpr::constant(3), y);

    match model.constraints()[0].kind() {
        ConstraintKind::Linear {
            expr,
            relation,
            rhs,
        } => {
            assert_eq!(expr.terms(), &[(0, 1), (1, -1)]);
            assert_eq!(*relation, Relation::Eq);
            assert_eq!(*rhs, -3);
        }
        other => panic!("unexpected constraint {:?}", other),
    }
}

#[test]
fn test_duplicate_terms_merged() {
    let mut model = CpModel::new("t");
    let x = model.new_int_var(0, 9, "x").unwrap();
    model.add_linear(x + x - x, Relation::Le, 4);

    match model.constraints()[0].kind() {
        ConstraintKind::Linear { expr, .. } => assert_eq!(expr.terms(), &[(0, 1)]),
        other => panic!("unexpected constraint {:?}", other),
    }
}

#[test]
fn test_enforcement_literals() {
    let mut model = CpModel::new("t");
    let b = model.new_bool_var("b");
    let c = model.new_bool_var("c");
    model
        .add_bool_or([b, c])
        .only_enforce_if(!b)
        .only_enforce_if(c);

    let constraint = &model.constraints()[0];
    assert_eq!(constraint.enforcement().len(), 2);
    assert!(!constraint.enforcement()[0].is_positive());
    assert_eq!(constraint.enforcement()[1].var(), c);
}

#[test]
fn test_literal_negation_roundtrip() {
    let mut model = CpModel::new("t");
    let b = model.new_bool_var("b");
    let lit: Literal = b.into();
    assert_eq!(!!lit, lit);
    assert_eq!((!b).var(), b);
}

#[test]
fn test_objective_and_strategies() {
    let mut model = CpModel::new("t");
    let x = model.new_int_var(0, 3, "x").unwrap();
    let y = model.new_int_var(0, 3, "y").unwrap();
    model.minimize(LinearExpr::sum([x, y]));
    model.add_decision_strategy([y, x], VarSelection::MinDomainSize);

    assert_eq!(model.objective().map(|o| o.terms().len()), Some(2));
    assert_eq!(model.strategies()[0].vars, vec![y, x]);
    assert_eq!(model.find_var("y"), Some(y));
    assert_eq!(model.find_var("z"), None);
}

#[test]
fn test_variables_in_creation_order() {
    let mut model = CpModel::new("t");
    model.new_int_var(1, 3, "x").unwrap();
    model.new_bool_var("b");

    let vars: Vec<_> = model
        .variables()
        .map(|(name, domain)| (name, domain.intervals().to_vec()))
        .collect();
    assert_eq!(vars, vec![("x", vec![(1, 3)]), ("b", vec![(0, 1)])]);
}

#[test]
fn test_extreme_constants_saturate() {
    let mut model = CpModel::new("t");
    let x = model.new_int_var(0, 1, "x").unwrap();
    model.add_linear(x + LinearExpr::constant(i64::MIN), Relation::Le, i64::MAX);

    match model.constraints()[0].kind() {
        ConstraintKind::Linear { rhs, .. } => assert_eq!(*rhs, i64::MAX),
        other => panic!("unexpected constraint {:?}", other),
    }
}
