//! Variables, literals and linear expressions.

use std::ops::{Add, Mul, Neg, Not, Sub};

/// Handle to an integer variable of a `CpModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IntVar(pub(crate) usize);

impl IntVar {
    /// Position of the variable in its model.
    pub fn index(self) -> usize {
        self.0
    }
}

/// Handle to a 0/1 variable of a `CpModel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoolVar(pub(crate) usize);

impl BoolVar {
    pub fn index(self) -> usize {
        self.0
    }

    /// The same variable viewed as an integer in `[0, 1]`.
    pub fn as_int(self) -> IntVar {
        IntVar(self.0)
    }
}

impl From<BoolVar> for IntVar {
    fn from(var: BoolVar) -> Self {
        var.as_int()
    }
}

impl Not for BoolVar {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.0,
            positive: false,
        }
    }
}

/// A boolean variable or its negation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Literal {
    pub(crate) var: usize,
    pub(crate) positive: bool,
}

impl Literal {
    pub fn var(self) -> BoolVar {
        BoolVar(self.var)
    }

    pub fn is_positive(self) -> bool {
        self.positive
    }
}

impl From<BoolVar> for Literal {
    fn from(var: BoolVar) -> Self {
        Literal {
            var: var.0,
            positive: true,
        }
    }
}

impl Not for Literal {
    type Output = Literal;

    fn not(self) -> Literal {
        Literal {
            var: self.var,
            positive: !self.positive,
        }
    }
}

/// `sum(coefficient * variable) + constant`.
///
/// # Example
///
/// ```
/// use timetabler_cp::{CpModel, LinearExpr};
///
/// let mut model = CpModel::new("expr");
/// let x = model.new_int_var(0, 9, "x").unwrap();
/// let y = model.new_int_var(0, 9, "y").unwrap();
///
/// let expr = x * 2 + y - LinearExpr::constant(3);
/// assert_eq!(expr.terms(), &[(0, 2), (1, 1)]);
/// assert_eq!(expr.constant_term(), -3);
///
/// let total = LinearExpr::sum([x, y]);
/// assert_eq!(total.terms(), &[(0, 1), (1, 1)]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinearExpr {
    pub(crate) terms: Vec<(usize, i64)>,
    pub(crate) constant: i64,
}

impl LinearExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn constant(value: i64) -> Self {
        Self {
            terms: Vec::new(),
            constant: value,
        }
    }

    /// Adds `coefficient * var`.
    pub fn with_term(mut self, var: impl Into<IntVar>, coefficient: i64) -> Self {
        self.terms.push((var.into().0, coefficient));
        self
    }

    pub fn sum<T: Into<LinearExpr>>(items: impl IntoIterator<Item = T>) -> Self {
        items
            .into_iter()
            .fold(LinearExpr::new(), |acc, item| acc + item)
    }

    /// `(variable index, coefficient)` pairs.
    pub fn terms(&self) -> &[(usize, i64)] {
        &self.terms
    }

    pub fn constant_term(&self) -> i64 {
        self.constant
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Merges duplicate variables and drops zero coefficients.
    pub(crate) fn normalized(mut self) -> Self {
        self.terms.sort_unstable_by_key(|&(var, _)| var);
        let mut merged: Vec<(usize, i64)> = Vec::with_capacity(self.terms.len());
        for (var, coef) in self.terms {
            match merged.last_mut() {
                Some((last, acc)) if *last == var => *acc = acc.saturating_add(coef),
                _ => merged.push((var, coef)),
            }
        }
        merged.retain(|&(_, coef)| coef != 0);
        self.terms = merged;
        self
    }
}

impl From<IntVar> for LinearExpr {
    fn from(var: IntVar) -> Self {
        LinearExpr::new().with_term(var, 1)
    }
}

impl From<BoolVar> for LinearExpr {
    fn from(var: BoolVar) -> Self {
        LinearExpr::new().with_term(var, 1)
    }
}

impl From<i64> for LinearExpr {
    fn from(value: i64) -> Self {
        LinearExpr::constant(value)
    }
}

impl<T: Into<LinearExpr>> Add<T> for LinearExpr {
    type Output = LinearExpr;

    fn add(mut self, rhs: T) -> LinearExpr {
        let rhs = rhs.into();
        self.terms.extend(rhs.terms);
        self.constant = self.constant.saturating_add(rhs.constant);
        self
    }
}

impl<T: Into<LinearExpr>> Sub<T> for LinearExpr {
    type Output = LinearExpr;

    fn sub(self, rhs: T) -> LinearExpr {
        self + (-rhs.into())
    }
}

impl Neg for LinearExpr {
    type Output = LinearExpr;

    fn neg(self) -> LinearExpr {
        self * -1
    }
}

impl Mul<i64> for LinearExpr {
    type Output = LinearExpr;

    fn mul(mut self, factor: i64) -> LinearExpr {
        for (_, coef) in &mut self.terms {
            *coef = coef.saturating_mul(factor);
        }
        self.constant = self.constant.saturating_mul(factor);
        self
    }
}

macro_rules! impl_var_ops {
    ($($var:ty),+) => {
        $(
            impl<T: Into<LinearExpr>> Add<T> for $var {
                type Output = LinearExpr;

                fn add(self, rhs: T) -> LinearExpr {
                    LinearExpr::from(self) + rhs
                }
            }

            impl<T: Into<LinearExpr>> Sub<T> for $var {
                type Output = LinearExpr;

                fn sub(self, rhs: T) -> LinearExpr {
                    LinearExpr::from(self) - rhs
                }
            }

            impl Mul<i64> for $var {
                type Output = LinearExpr;

                fn mul(self, factor: i64) -> LinearExpr {
                    LinearExpr::new().with_term(self, factor)
                }
            }
        )+
    };
}

impl_var_ops!(IntVar, BoolVar);
