//! Error types for Timetabler

use thiserror::Error;

/// Main error type for timetable construction.
#[derive(Debug, Error)]
pub enum TimetableError {
    /// A subject that must be taught has no teacher able to teach it.
    #[error("Configuration error: no teacher can teach subject `{subject}`")]
    NoCapableTeacher { subject: String },

    /// The university catalog is structurally unusable.
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    /// Error in timetabler configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// The constraint model could not be built
    #[error("Model error: {0}")]
    Model(String),

    /// A solved assignment could not be mapped back onto the catalog
    #[error("Materialization error: {0}")]
    Materialize(String),
}

/// Result type alias for Timetabler operations
pub type Result<T> = std::result::Result<T, TimetableError>;
