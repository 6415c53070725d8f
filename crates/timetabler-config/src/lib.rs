//! Configuration system for Timetabler.
//!
//! Load the solve budget, calendar rules, and objective weights from TOML or
//! YAML files without code changes.
//!
//! # Examples
//!
//! Load configuration from TOML string:
//!
//! ```
//! use timetabler_config::TimetableConfig;
//! use std::time::Duration;
//!
//! let config = TimetableConfig::from_toml_str(r#"
//!     [solver]
//!     seconds_spent_limit = 30
//!     num_workers = 8
//!
//!     [calendar]
//!     slots_per_day = 7
//!     lunch_period = 2
//!
//!     [[calendar.blocked_ranges]]
//!     day = 6
//!     from_period = 0
//!     to_period = 7
//! "#).unwrap();
//!
//! assert_eq!(config.time_limit(), Some(Duration::from_secs(30)));
//! assert_eq!(config.solver.num_workers, 8);
//! assert_eq!(config.calendar.blocked_ranges.len(), 1);
//! ```
//!
//! Use default config when file is missing:
//!
//! ```
//! use timetabler_config::TimetableConfig;
//!
//! let config = TimetableConfig::load("timetabler.toml").unwrap_or_default();
//! assert_eq!(config.calendar.slots_per_day, 7);
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use timetabler_core::TimetableError;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for TimetableError {
    fn from(err: ConfigError) -> Self {
        TimetableError::Config(err.to_string())
    }
}

/// Main timetabler configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct TimetableConfig {
    /// Budget handed to the constraint solver.
    #[serde(default)]
    pub solver: SolverSettings,

    /// Calendar shape and excluded periods.
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Soft-penalty weights.
    #[serde(default)]
    pub objective: ObjectiveConfig,
}

impl TimetableConfig {
    /// Creates a new default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns error if file doesn't exist or contains invalid TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_toml_file(path)
    }

    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parses configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Loads configuration from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(s)?)
    }

    /// Sets the solve time limit in seconds, clearing any millisecond limit.
    pub fn with_termination_seconds(mut self, seconds: u64) -> Self {
        self.solver.seconds_spent_limit = Some(seconds);
        self.solver.millis_spent_limit = None;
        self
    }

    /// Sets the solve time limit in milliseconds, clearing any second limit.
    pub fn with_termination_millis(mut self, millis: u64) -> Self {
        self.solver.seconds_spent_limit = None;
        self.solver.millis_spent_limit = Some(millis);
        self
    }

    /// Sets the number of parallel search workers.
    pub fn with_num_workers(mut self, workers: usize) -> Self {
        self.solver.num_workers = workers;
        self
    }

    /// Keeps room and teacher overlaps as soft penalties only.
    pub fn with_relaxed_overlaps(mut self, relax: bool) -> Self {
        self.objective.relax_overlaps = relax;
        self
    }

    /// Replaces the calendar rules.
    pub fn with_calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = calendar;
        self
    }

    /// Returns the solve time limit, if configured.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetabler_config::TimetableConfig;
    /// use std::time::Duration;
    ///
    /// let config = TimetableConfig::new().with_termination_millis(250);
    /// assert_eq!(config.time_limit(), Some(Duration::from_millis(250)));
    /// ```
    pub fn time_limit(&self) -> Option<Duration> {
        self.solver.time_limit()
    }

    /// Checks that the configuration describes a usable calendar and budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.solver.num_workers == 0 {
            return Err(ConfigError::Invalid(
                "num_workers must be at least 1".to_string(),
            ));
        }
        self.calendar.validate()?;
        self.objective.validate()
    }
}

/// Solve budget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct SolverSettings {
    /// Maximum seconds to spend solving.
    pub seconds_spent_limit: Option<u64>,

    /// Maximum milliseconds to spend solving, added to the second limit.
    pub millis_spent_limit: Option<u64>,

    /// Number of parallel search workers.
    pub num_workers: usize,

    /// Print the CP-SAT search log to stdout.
    pub log_search_progress: bool,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            seconds_spent_limit: Some(60),
            millis_spent_limit: None,
            num_workers: 4,
            log_search_progress: false,
        }
    }
}

impl SolverSettings {
    /// Returns the time limit as a Duration, if any.
    ///
    /// A total of zero means no limit. Totals beyond `Duration::MAX`
    /// saturate.
    pub fn time_limit(&self) -> Option<Duration> {
        let limit = Duration::from_secs(self.seconds_spent_limit.unwrap_or(0))
            .saturating_add(Duration::from_millis(self.millis_spent_limit.unwrap_or(0)));
        if limit.is_zero() {
            None
        } else {
            Some(limit)
        }
    }
}

/// A block of periods on one day where nothing may be scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BlockedRange {
    pub day: usize,
    /// First blocked period (inclusive).
    pub from_period: usize,
    /// End of the block (exclusive).
    pub to_period: usize,
}

impl BlockedRange {
    pub fn new(day: usize, from_period: usize, to_period: usize) -> Self {
        Self {
            day,
            from_period,
            to_period,
        }
    }
}

/// Calendar rules shared by every timeslot.
///
/// Timeslot `i` falls on day `i / slots_per_day`, period `i % slots_per_day`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct CalendarConfig {
    pub slots_per_day: usize,

    /// Period kept free every day for lunch.
    pub lunch_period: Option<usize>,

    /// Excluded blocks, by default Saturday afternoon and Sunday.
    pub blocked_ranges: Vec<BlockedRange>,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            slots_per_day: 7,
            lunch_period: Some(2),
            blocked_ranges: vec![BlockedRange::new(5, 3, 7), BlockedRange::new(6, 0, 7)],
        }
    }
}

impl CalendarConfig {
    /// A calendar with no lunch break and no blocked ranges.
    pub fn unrestricted(slots_per_day: usize) -> Self {
        Self {
            slots_per_day,
            lunch_period: None,
            blocked_ranges: Vec::new(),
        }
    }

    /// Number of whole days covered by `timeslot_count` timeslots.
    pub fn day_count(&self, timeslot_count: usize) -> usize {
        timeslot_count / self.slots_per_day
    }

    /// Half-open timeslot range of `day`.
    pub fn day_range(&self, day: usize) -> std::ops::Range<usize> {
        let start = day.saturating_mul(self.slots_per_day);
        start..start.saturating_add(self.slots_per_day)
    }

    /// Lunch timeslot indices below `timeslot_count`.
    ///
    /// # Examples
    ///
    /// ```
    /// use timetabler_config::CalendarConfig;
    ///
    /// let calendar = CalendarConfig::default();
    /// assert_eq!(calendar.lunch_timeslots(21), vec![2, 9, 16]);
    /// ```
    pub fn lunch_timeslots(&self, timeslot_count: usize) -> Vec<usize> {
        match self.lunch_period {
            Some(lunch) => (0..timeslot_count)
                .filter(|idx| idx % self.slots_per_day == lunch)
                .collect(),
            None => Vec::new(),
        }
    }

    /// Blocked timeslot indices below `timeslot_count`, ascending and
    /// without duplicates.
    pub fn blocked_timeslots(&self, timeslot_count: usize) -> Vec<usize> {
        let mut blocked: Vec<usize> = self
            .blocked_ranges
            .iter()
            .flat_map(|range| {
                let day = self.day_range(range.day);
                let from = day.start.saturating_add(range.from_period);
                from..day.start.saturating_add(range.to_period)
            })
            .filter(|&idx| idx < timeslot_count)
            .collect();
        blocked.sort_unstable();
        blocked.dedup();
        blocked
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.slots_per_day == 0 {
            return Err(ConfigError::Invalid(
                "slots_per_day must be at least 1".to_string(),
            ));
        }
        if let Some(lunch) = self.lunch_period {
            if lunch >= self.slots_per_day {
                return Err(ConfigError::Invalid(format!(
                    "lunch_period {} is outside a {}-slot day",
                    lunch, self.slots_per_day
                )));
            }
        }
        for range in &self.blocked_ranges {
            if range.from_period > range.to_period || range.to_period > self.slots_per_day {
                return Err(ConfigError::Invalid(format!(
                    "blocked range {}..{} on day {} does not fit a {}-slot day",
                    range.from_period, range.to_period, range.day, self.slots_per_day
                )));
            }
        }
        Ok(())
    }
}

/// Soft-penalty weights.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "snake_case")]
pub struct ObjectiveConfig {
    /// Weight of each unit of day-balance deviation.
    pub balance_weight: i64,

    /// Weight of each room or teacher conflict indicator.
    pub conflict_weight: i64,

    /// When set, room and teacher overlaps are only penalized, not forbidden.
    pub relax_overlaps: bool,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            balance_weight: 1,
            conflict_weight: 1,
            relax_overlaps: false,
        }
    }
}

impl ObjectiveConfig {
    /// Largest accepted weight.
    pub const MAX_WEIGHT: i64 = 1_000_000;

    fn validate(&self) -> Result<(), ConfigError> {
        for (name, weight) in [
            ("balance_weight", self.balance_weight),
            ("conflict_weight", self.conflict_weight),
        ] {
            if !(0..=Self::MAX_WEIGHT).contains(&weight) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be between 0 and {}, got {}",
                    name,
                    Self::MAX_WEIGHT,
                    weight
                )));
            }
        }
        Ok(())
    }
}
