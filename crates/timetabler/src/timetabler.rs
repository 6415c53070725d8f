//! Pipeline entry point: build, solve, materialize, analyze.

use std::fmt;
use std::time::Duration;

use timetabler_config::TimetableConfig;
use timetabler_console::Chronometer;
use timetabler_core::{Course, Result, University};
use timetabler_cp::{CpSolver, SatSolver, SolveParameters, SolveStatus};
use tracing::{debug, error, info, warn};

use crate::analysis::{analyze, AnalysisError, ScheduleAnalysis};
use crate::builder::TimetableModel;
use crate::materialize::materialize;

const CHRONOMETER_INTERVAL: Duration = Duration::from_secs(1);

/// Runs the whole timetabling pipeline for one university.
#[derive(Debug, Clone)]
pub struct Timetabler {
    university: University,
    config: TimetableConfig,
}

impl Timetabler {
    pub fn new(university: University, config: TimetableConfig) -> Self {
        Self { university, config }
    }

    pub fn university(&self) -> &University {
        &self.university
    }

    pub fn config(&self) -> &TimetableConfig {
        &self.config
    }

    /// Builds the constraint model without solving it.
    pub fn build(&self) -> Result<TimetableModel> {
        TimetableModel::build(&self.university, &self.config)
    }

    /// Solves with CP-SAT, printing elapsed time while it runs and the
    /// schedule with its report afterwards.
    ///
    /// Installs the console subscriber on first use.
    pub fn solve(&self) -> Result<TimetableOutcome> {
        timetabler_console::init();

        let solver = SatSolver::new().with_search_log(self.config.solver.log_search_progress);

        let chronometer = Chronometer::start(CHRONOMETER_INTERVAL);
        let outcome = self.solve_with(&solver);
        let elapsed = chronometer.stop();
        debug!(elapsed_ms = elapsed.as_millis() as u64, "Chronometer stopped");

        let outcome = outcome?;
        println!("{}", outcome);
        Ok(outcome)
    }

    /// Solves with `solver`.
    ///
    /// Infeasible and timed out searches are reported through
    /// [`TimetableOutcome::status`] with an empty schedule. A failing
    /// analysis is logged and kept in [`TimetableOutcome::analysis`]; the
    /// schedule is still returned.
    pub fn solve_with<S>(&self, solver: &S) -> Result<TimetableOutcome>
    where
        S: CpSolver + ?Sized,
    {
        let built = self.build()?;
        let params = SolveParameters::new()
            .with_max_time(self.config.time_limit())
            .with_num_workers(self.config.solver.num_workers);
        debug!(solver = solver.name(), "Handing model to solver");

        let solution = solver.solve(&built.model, &params);
        let courses = materialize(&self.university, &built.registry, &solution)?;
        info!(event = "materialized", courses = courses.len());

        let analysis = if solution.is_solution_found() {
            let analysis = analyze(&courses, &self.university.timeslots);
            match &analysis {
                Ok(analysis) => {
                    for conflict in analysis.conflicts.iter() {
                        debug!(
                            kind = %conflict.kind,
                            timeslot = conflict.timeslot,
                            resource = %conflict.resource,
                            "Residual overlap"
                        );
                    }
                }
                Err(e) => error!(error = %e, "Schedule analysis failed"),
            }
            Some(analysis)
        } else {
            warn!(status = %solution.status, "No complete solution found");
            None
        };

        Ok(TimetableOutcome {
            status: solution.status,
            courses,
            analysis,
            objective: solution.objective_value,
            elapsed: solution.wall_time,
            branches: solution.branches,
        })
    }
}

/// What a pipeline run produced.
#[derive(Debug, Clone)]
pub struct TimetableOutcome {
    pub status: SolveStatus,
    /// Empty unless `status` carries a solution.
    pub courses: Vec<Course>,
    /// `None` when there was no schedule to analyze.
    pub analysis: Option<std::result::Result<ScheduleAnalysis, AnalysisError>>,
    /// Total penalty of the schedule.
    pub objective: Option<i64>,
    pub elapsed: Duration,
    /// Search branches the engine explored.
    pub branches: u64,
}

impl TimetableOutcome {
    pub fn has_solution(&self) -> bool {
        self.status.has_solution()
    }

    /// The analysis, if one ran and succeeded.
    pub fn schedule_analysis(&self) -> Option<&ScheduleAnalysis> {
        self.analysis.as_ref().and_then(|a| a.as_ref().ok())
    }
}

/// Course listing followed by the analysis report.
impl fmt::Display for TimetableOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.has_solution() {
            return write!(f, "No complete solution found ({})", self.status);
        }

        writeln!(f, "Solution found:")?;
        for course in &self.courses {
            writeln!(
                f,
                "{} ({}) | Timeslot: {} | Room: {} | Teacher: {}",
                course.subject.name,
                course.group.name,
                course.timeslot,
                course.room.name,
                course.teacher.last_name
            )?;
        }

        match &self.analysis {
            Some(Ok(analysis)) => write!(f, "\n{}", analysis.report()),
            Some(Err(e)) => write!(f, "\nSchedule analysis failed: {}", e),
            None => Ok(()),
        }
    }
}
