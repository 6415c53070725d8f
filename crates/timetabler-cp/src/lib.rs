//! Timetabler CP - finite-domain constraint modelling
//!
//! This crate provides:
//! - `CpModel`: bounded integer and boolean variables, linear constraints,
//!   boolean conjunctions and disjunctions, each optionally enforced by
//!   literals, and a minimization objective
//! - `CpSolver`: the contract any solving engine fulfils
//! - `SatSolver`: the OR-Tools CP-SAT engine behind that contract

pub mod domain;
pub mod error;
pub mod model;
pub mod sat;
pub mod solver;

pub use domain::Domain;
pub use error::ModelError;
pub use model::{
    BoolVar, Constraint, ConstraintKind, CpModel, DecisionStrategy, IntVar, LinearExpr, Literal,
    Relation, VarSelection,
};
pub use sat::SatSolver;
pub use solver::{CpSolution, CpSolver, SolveParameters, SolveStatus};
