//! The finite-domain constraint model.
//!
//! A `CpModel` is a passive description: variables with finite domains,
//! constraints over them, an optional minimization objective, and optional
//! decision strategies. Solving is done by any `CpSolver`.
//!
//! Every constraint may be *half-reified* with `only_enforce_if`: it is
//! required only when all of its enforcement literals are true. Posting a
//! constraint under a literal and its negation under the negated literal
//! yields full reification.

mod expr;

use std::fmt;

use smallvec::SmallVec;

use crate::domain::Domain;
use crate::error::ModelError;

pub use expr::{BoolVar, IntVar, LinearExpr, Literal};

/// Comparison between a linear expression and a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Relation {
    Eq,
    Ne,
    Le,
    Ge,
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Relation::Eq => write!(f, "=="),
            Relation::Ne => write!(f, "!="),
            Relation::Le => write!(f, "<="),
            Relation::Ge => write!(f, ">="),
        }
    }
}

/// What a constraint requires once enforced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConstraintKind {
    /// `expr relation rhs`, with the expression constant folded into `rhs`.
    Linear {
        expr: LinearExpr,
        relation: Relation,
        rhs: i64,
    },
    /// Every literal is true.
    BoolAnd(Vec<Literal>),
    /// At least one literal is true.
    BoolOr(Vec<Literal>),
}

/// A posted constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constraint {
    kind: ConstraintKind,
    enforcement: SmallVec<[Literal; 2]>,
}

impl Constraint {
    fn new(kind: ConstraintKind) -> Self {
        Self {
            kind,
            enforcement: SmallVec::new(),
        }
    }

    /// Requires the constraint only when `literal` is true.
    ///
    /// Calling this several times enforces on the conjunction.
    pub fn only_enforce_if(&mut self, literal: impl Into<Literal>) -> &mut Self {
        self.enforcement.push(literal.into());
        self
    }

    pub fn kind(&self) -> &ConstraintKind {
        &self.kind
    }

    pub fn enforcement(&self) -> &[Literal] {
        &self.enforcement
    }
}

/// How a decision strategy picks its next variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VarSelection {
    /// The first unfixed variable in strategy order.
    #[default]
    FirstUnbound,
    /// The unfixed variable with the fewest remaining values, ties broken by
    /// strategy order.
    MinDomainSize,
}

/// A group of variables to branch on before any other variable.
///
/// Strategies are applied in the order they were added; values are tried in
/// ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionStrategy {
    pub vars: Vec<IntVar>,
    pub selection: VarSelection,
}

#[derive(Debug, Clone)]
struct VarDef {
    name: String,
    domain: Domain,
}

/// A finite-domain constraint model.
///
/// # Example
///
/// ```
/// use timetabler_cp::{CpModel, LinearExpr};
///
/// let mut model = CpModel::new("demo");
/// let x = model.new_int_var(0, 5, "x").unwrap();
/// let y = model.new_int_var(0, 5, "y").unwrap();
/// let same = model.new_bool_var("same");
///
/// // same <=> (x == y)
/// model.add_equality(x, y).only_enforce_if(same);
/// model.add_not_equal(x, y).only_enforce_if(!same);
/// model.minimize(LinearExpr::from(same));
///
/// assert_eq!(model.num_variables(), 3);
/// assert_eq!(model.num_constraints(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct CpModel {
    name: String,
    variables: Vec<VarDef>,
    constraints: Vec<Constraint>,
    objective: Option<LinearExpr>,
    strategies: Vec<DecisionStrategy>,
}

impl CpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            variables: Vec::new(),
            constraints: Vec::new(),
            objective: None,
            strategies: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Creates an integer variable over `[lb, ub]`.
    pub fn new_int_var(
        &mut self,
        lb: i64,
        ub: i64,
        name: impl Into<String>,
    ) -> Result<IntVar, ModelError> {
        let name = name.into();
        if lb > ub {
            return Err(ModelError::InvertedBounds { name, lb, ub });
        }
        Ok(self.push_var(name, Domain::from_range(lb, ub)))
    }

    /// Creates an integer variable restricted to `values`.
    pub fn new_int_var_from_values(
        &mut self,
        values: impl IntoIterator<Item = i64>,
        name: impl Into<String>,
    ) -> Result<IntVar, ModelError> {
        let name = name.into();
        let domain = Domain::from_values(values);
        if domain.is_empty() {
            return Err(ModelError::EmptyDomain { name });
        }
        Ok(self.push_var(name, domain))
    }

    pub fn new_bool_var(&mut self, name: impl Into<String>) -> BoolVar {
        BoolVar(self.push_var(name.into(), Domain::boolean()).0)
    }

    fn push_var(&mut self, name: String, domain: Domain) -> IntVar {
        self.variables.push(VarDef { name, domain });
        IntVar(self.variables.len() - 1)
    }

    /// Posts `expr relation rhs`.
    pub fn add_linear(
        &mut self,
        expr: impl Into<LinearExpr>,
        relation: Relation,
        rhs: i64,
    ) -> &mut Constraint {
        let expr = expr.into().normalized();
        let rhs = rhs.saturating_sub(expr.constant);
        let expr = LinearExpr {
            terms: expr.terms,
            constant: 0,
        };
        self.push_constraint(ConstraintKind::Linear { expr, relation, rhs })
    }

    /// Posts `lhs == rhs`.
    pub fn add_equality(
        &mut self,
        lhs: impl Into<LinearExpr>,
        rhs: impl Into<LinearExpr>,
    ) -> &mut Constraint {
        self.add_linear(lhs.into() - rhs.into(), Relation::Eq, 0)
    }

    /// Posts `lhs != rhs`.
    pub fn add_not_equal(
        &mut self,
        lhs: impl Into<LinearExpr>,
        rhs: impl Into<LinearExpr>,
    ) -> &mut Constraint {
        self.add_linear(lhs.into() - rhs.into(), Relation::Ne, 0)
    }

    /// Posts `lhs <= rhs`.
    pub fn add_less_or_equal(
        &mut self,
        lhs: impl Into<LinearExpr>,
        rhs: impl Into<LinearExpr>,
    ) -> &mut Constraint {
        self.add_linear(lhs.into() - rhs.into(), Relation::Le, 0)
    }

    /// Posts `lhs >= rhs`.
    pub fn add_greater_or_equal(
        &mut self,
        lhs: impl Into<LinearExpr>,
        rhs: impl Into<LinearExpr>,
    ) -> &mut Constraint {
        self.add_linear(lhs.into() - rhs.into(), Relation::Ge, 0)
    }

    /// Posts "every literal is true".
    pub fn add_bool_and<L: Into<Literal>>(
        &mut self,
        literals: impl IntoIterator<Item = L>,
    ) -> &mut Constraint {
        let literals = literals.into_iter().map(Into::into).collect();
        self.push_constraint(ConstraintKind::BoolAnd(literals))
    }

    /// Posts "at least one literal is true".
    pub fn add_bool_or<L: Into<Literal>>(
        &mut self,
        literals: impl IntoIterator<Item = L>,
    ) -> &mut Constraint {
        let literals = literals.into_iter().map(Into::into).collect();
        self.push_constraint(ConstraintKind::BoolOr(literals))
    }

    fn push_constraint(&mut self, kind: ConstraintKind) -> &mut Constraint {
        self.constraints.push(Constraint::new(kind));
        let last = self.constraints.len() - 1;
        &mut self.constraints[last]
    }

    /// Sets the expression to minimize, replacing any previous objective.
    pub fn minimize(&mut self, expr: impl Into<LinearExpr>) {
        self.objective = Some(expr.into().normalized());
    }

    /// Registers variables to branch on first.
    pub fn add_decision_strategy(
        &mut self,
        vars: impl IntoIterator<Item = IntVar>,
        selection: VarSelection,
    ) {
        self.strategies.push(DecisionStrategy {
            vars: vars.into_iter().collect(),
            selection,
        });
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    pub fn objective(&self) -> Option<&LinearExpr> {
        self.objective.as_ref()
    }

    pub fn strategies(&self) -> &[DecisionStrategy] {
        &self.strategies
    }

    pub fn var_name(&self, var: impl Into<IntVar>) -> &str {
        &self.variables[var.into().0].name
    }

    /// Initial domain of `var`.
    pub fn domain(&self, var: impl Into<IntVar>) -> &Domain {
        &self.variables[var.into().0].domain
    }

    /// `(name, domain)` of every variable, in creation order.
    pub fn variables(&self) -> impl Iterator<Item = (&str, &Domain)> {
        self.variables.iter().map(|v| (v.name.as_str(), &v.domain))
    }

    /// Index of the first variable named `name`.
    pub fn find_var(&self, name: &str) -> Option<IntVar> {
        self.variables
            .iter()
            .position(|v| v.name == name)
            .map(IntVar)
    }
}

#[cfg(test)]
mod tests;
