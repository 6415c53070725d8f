//! Colorful console output for timetabling runs.
//!
//! Provides a custom `tracing` layer that formats model and solver events
//! with colors, and a [`Chronometer`] that prints elapsed time while a solve
//! is running.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (model built, solve start/end, materialization)
//! - **DEBUG**: Construction details (constraint families)

mod chronometer;

pub use chronometer::Chronometer;

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SOLVE_START_NANOS: AtomicU64 = AtomicU64::new(0);

const DEFAULT_FILTER: &str = "timetabler=info,timetabler_cp=info";

/// Initializes console output.
///
/// Safe to call multiple times - only the first call has effect. The filter
/// is read from `RUST_LOG` and defaults to `timetabler=info,timetabler_cp=info`.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(TimetableConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats timetabling events with colors.
pub struct TimetableConsoleLayer;

impl<S: Subscriber> Layer<S> for TimetableConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("timetabler") {
            return;
        }

        let mut visitor = EventVisitor::default();
        event.record(&mut visitor);

        let output = format_event(&visitor, *metadata.level());
        if !output.is_empty() {
            let _ = writeln!(io::stdout(), "{}", output);
        }
    }
}

#[derive(Default)]
struct EventVisitor {
    event: Option<String>,
    message: Option<String>,
    model: Option<String>,
    status: Option<String>,
    error: Option<String>,
    objective: Option<i64>,
    branches: Option<u64>,
    duration_ms: Option<u64>,
    occurrences: Option<u64>,
    timeslots: Option<u64>,
    rooms: Option<u64>,
    teachers: Option<u64>,
    courses: Option<u64>,
    variable_count: Option<u64>,
    constraint_count: Option<u64>,
    workers: Option<u64>,
    time_limit_secs: Option<f64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "message" => self.message = Some(s),
            "model" => self.model = Some(s),
            "status" => self.status = Some(s),
            "error" => self.error = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "branches" => self.branches = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "occurrences" => self.occurrences = Some(value),
            "timeslots" => self.timeslots = Some(value),
            "rooms" => self.rooms = Some(value),
            "teachers" => self.teachers = Some(value),
            "courses" => self.courses = Some(value),
            "variable_count" => self.variable_count = Some(value),
            "constraint_count" => self.constraint_count = Some(value),
            "workers" => self.workers = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        if field.name() == "time_limit_secs" {
            self.time_limit_secs = Some(value);
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "message" => self.message = Some(value.to_string()),
            "model" => self.model = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "error" => self.error = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref() {
        Some("model_built") => format_model_built(v),
        Some("solve_start") => format_solve_start(v),
        Some("solve_end") => format_solve_end(v),
        Some("materialized") => format_materialized(v),
        _ if level <= Level::WARN => format_problem(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_model_built(v: &EventVisitor) -> String {
    let occurrences = v.occurrences.unwrap_or(0);
    let timeslots = v.timeslots.unwrap_or(0);
    let rooms = v.rooms.unwrap_or(0);
    let teachers = v.teachers.unwrap_or(0);
    let scale = calculate_problem_scale(
        occurrences as usize,
        timeslots
            .saturating_mul(rooms)
            .saturating_mul(teachers.max(1)) as usize,
    );

    format!(
        "{} {} Model built │ {} occurrences │ {} timeslots │ {} rooms │ {} teachers │ scale {}",
        format_elapsed(),
        "◆".bright_blue().bold(),
        occurrences.to_formatted_string(&Locale::en).bright_yellow(),
        timeslots.to_formatted_string(&Locale::en).bright_yellow(),
        rooms.to_formatted_string(&Locale::en).bright_yellow(),
        teachers.to_formatted_string(&Locale::en).bright_yellow(),
        scale.bright_magenta()
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let variables = v.variable_count.unwrap_or(0);
    let constraints = v.constraint_count.unwrap_or(0);

    let mut output = format!(
        "{} {} Solving │ {} variables │ {} constraints",
        format_elapsed(),
        "▶".bright_green().bold(),
        variables.to_formatted_string(&Locale::en).bright_yellow(),
        constraints.to_formatted_string(&Locale::en).bright_yellow(),
    );

    if let Some(workers) = v.workers {
        output.push_str(&format!(
            " │ {} workers",
            workers.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }

    if let Some(limit) = v.time_limit_secs {
        output.push_str(&format!(" │ {}s limit", format!("{:.1}", limit).bright_yellow()));
    }

    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let branches = v.branches.unwrap_or(0);
    let duration = v.duration_ms.unwrap_or(0);
    let objective = v
        .objective
        .map(|o| o.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    let mut output = format!(
        "{} {} Solving complete │ {} │ {} branches │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(duration).yellow(),
        branches.to_formatted_string(&Locale::en).white(),
        format_status(status)
    );

    // Summary box
    output.push_str("\n\n");
    output.push_str(
        &"╔══════════════════════════════════════════════════════════╗"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    let status_text = match status {
        "OPTIMAL" => "OPTIMAL TIMETABLE FOUND",
        "FEASIBLE" => "FEASIBLE TIMETABLE FOUND",
        "INFEASIBLE" => "NO TIMETABLE SATISFIES THE RULES",
        "MODEL_INVALID" => "MODEL REJECTED BY THE SOLVER",
        _ => "NO COMPLETE SOLUTION FOUND",
    };
    let inner_width: usize = 58;
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        format_status(status_text),
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╠══════════════════════════════════════════════════════════╣"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Penalty:",
        objective,
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(
        &"╚══════════════════════════════════════════════════════════╝"
            .bright_cyan()
            .to_string(),
    );
    output.push('\n');

    output
}

fn format_materialized(v: &EventVisitor) -> String {
    let courses = v.courses.unwrap_or(0);
    format!(
        "{} {} {} courses scheduled",
        format_elapsed(),
        "✓".bright_green(),
        courses.to_formatted_string(&Locale::en).bright_yellow()
    )
}

fn format_problem(v: &EventVisitor, level: Level) -> String {
    let message = v.message.as_deref().unwrap_or("");
    let icon = if level == Level::ERROR {
        "✗".bright_red().bold().to_string()
    } else {
        "!".yellow().bold().to_string()
    };
    let mut output = format!("{} {} {}", format_elapsed(), icon, message);
    if let Some(ref error) = v.error {
        output.push_str(&format!(" │ {}", error.bright_red()));
    }
    output
}

fn format_status(status: &str) -> String {
    if status.starts_with("OPTIMAL") {
        status.bright_green().bold().to_string()
    } else if status.starts_with("FEASIBLE") {
        status.green().bold().to_string()
    } else if status.starts_with("INFEASIBLE")
        || status.starts_with("NO TIMETABLE")
        || status.starts_with("MODEL") {
        status.bright_red().bold().to_string()
    } else {
        status.yellow().bold().to_string()
    }
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1000;
        format!("{}m {}s", mins, secs)
    }
}

/// Size of the raw assignment space, `choices ^ occurrences`, in scientific
/// notation.
fn calculate_problem_scale(occurrences: usize, choices: usize) -> String {
    if occurrences == 0 || choices == 0 {
        return "0".to_string();
    }

    let log_scale = (occurrences as f64) * (choices as f64).log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
