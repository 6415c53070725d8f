//! Model construction errors.

use thiserror::Error;

/// Error raised while building a `CpModel` or handing it to an engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// The requested domain contains no value.
    #[error("variable `{name}` has an empty domain")]
    EmptyDomain { name: String },

    /// Lower bound above upper bound.
    #[error("variable `{name}` has inverted bounds [{lb}, {ub}]")]
    InvertedBounds { name: String, lb: i64, ub: i64 },

    /// More variables than the engine can address.
    #[error("variable index {count} exceeds the engine limit")]
    TooLarge { count: usize },
}
