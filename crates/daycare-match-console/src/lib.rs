//! Colorful console output for matching runs.
//!
//! Provides a custom `tracing` layer that formats matching events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (model built, solve start/end)
//! - **DEBUG**: Solver progress (each improving solution)
//! - **TRACE**: Per-group eligibility while the model is built

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

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "daycare_match=info";

/// Initializes the console output.
///
/// Safe to call multiple times - only the first call has effect.
pub fn init() {
    INIT.get_or_init(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(MatchConsoleLayer)
            .try_init();
    });
}

// Marks the start of solving for elapsed time tracking.
fn mark_solve_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SOLVE_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since solve start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SOLVE_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

/// A tracing layer that formats matching events with colors.
pub struct MatchConsoleLayer;

impl<S: Subscriber> Layer<S> for MatchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !metadata.target().starts_with("daycare_match") {
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
    status: Option<String>,
    families: Option<u64>,
    children: Option<u64>,
    variables: Option<u64>,
    constraints: Option<u64>,
    blocking_budget: Option<u64>,
    time_limit_secs: Option<u64>,
    worker_count: Option<u64>,
    nodes: Option<u64>,
    objective: Option<i64>,
    matched: Option<u64>,
    blocking: Option<u64>,
    duration_ms: Option<u64>,
    family: Option<String>,
    daycare: Option<String>,
    age: Option<u64>,
    size: Option<u64>,
    better: Option<u64>,
    capacity: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value).trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "status" => self.status = Some(s),
            "family" => self.family = Some(s),
            "daycare" => self.daycare = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "families" => self.families = Some(value),
            "children" => self.children = Some(value),
            "variables" => self.variables = Some(value),
            "constraints" => self.constraints = Some(value),
            "blocking_budget" => self.blocking_budget = Some(value),
            "time_limit_secs" => self.time_limit_secs = Some(value),
            "worker_count" => self.worker_count = Some(value),
            "nodes" => self.nodes = Some(value),
            "objective" => self.objective = i64::try_from(value).ok(),
            "matched" => self.matched = Some(value),
            "blocking" => self.blocking = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "age" => self.age = Some(value),
            "size" => self.size = Some(value),
            "better" => self.better = Some(value),
            "capacity" => self.capacity = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        match field.name() {
            "objective" => self.objective = Some(value),
            _ => self.record_u64(field, value.max(0) as u64),
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        match field.name() {
            "event" => self.event = Some(value.to_string()),
            "status" => self.status = Some(value.to_string()),
            "family" => self.family = Some(value.to_string()),
            "daycare" => self.daycare = Some(value.to_string()),
            _ => {}
        }
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    match v.event.as_deref().unwrap_or("") {
        "model_built" => format_model_built(v),
        "solve_start" => format_solve_start(v),
        "solve_end" => format_solve_end(v),
        "progress" => format_progress(v),
        "group_eligibility" => format_group(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn count(n: Option<u64>) -> String {
    n.unwrap_or(0).to_formatted_string(&Locale::en)
}

fn format_model_built(v: &EventVisitor) -> String {
    format!(
        "{} {} Model built │ {} families │ {} children │ {} variables │ {} constraints │ budget {}",
        format_elapsed(),
        "◆".bright_blue().bold(),
        count(v.families).bright_yellow(),
        count(v.children).bright_yellow(),
        count(v.variables).bright_yellow(),
        count(v.constraints).bright_yellow(),
        count(v.blocking_budget).bright_magenta(),
    )
}

fn format_solve_start(v: &EventVisitor) -> String {
    mark_solve_start();
    let mut output = format!("{} {} Solving", format_elapsed(), "▶".bright_green().bold());

    if let Some(limit) = v.time_limit_secs {
        output.push_str(&format!(
            " │ {}s limit",
            limit.to_formatted_string(&Locale::en).bright_yellow()
        ));
    }
    if let Some(workers) = v.worker_count {
        output.push_str(&format!(" │ {} workers", workers.bright_yellow()));
    }
    output
}

fn format_solve_end(v: &EventVisitor) -> String {
    let status = v.status.as_deref().unwrap_or("UNKNOWN");
    let status_colored = match status {
        "OPTIMAL" | "FEASIBLE" => status.bright_green().bold().to_string(),
        _ => status.bright_red().bold().to_string(),
    };

    format!(
        "{} {} Matching complete │ {} │ {} matched │ {} blocking │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        status_colored,
        count(v.matched).bright_yellow().bold(),
        count(v.blocking).white(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
    )
}

fn format_progress(v: &EventVisitor) -> String {
    format!(
        "{} {} {:>10} nodes │ objective {}",
        format_elapsed(),
        "⚡".bright_cyan(),
        count(v.nodes).white(),
        v.objective
            .map_or_else(|| "N/A".to_string(), |o| o.to_string())
            .bright_magenta()
            .bold(),
    )
}

fn format_group(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }
    let size = v.size.unwrap_or(0);
    let better = v.better.unwrap_or(0);
    let capacity = v.capacity.unwrap_or(0);
    let mark = if better + size <= capacity {
        "✓".bright_green().to_string()
    } else {
        "·".bright_black().to_string()
    };

    format!(
        "{}   {} family {} → daycare {} age {} │ {} + {} / {}",
        format_elapsed(),
        mark,
        v.family.as_deref().unwrap_or("?"),
        v.daycare.as_deref().unwrap_or("?"),
        v.age.unwrap_or(0),
        size,
        better,
        capacity,
    )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.2}s", ms as f64 / 1_000.0)
    } else {
        let mins = ms / 60_000;
        let secs = (ms % 60_000) / 1_000;
        format!("{}m {}s", mins, secs)
    }
}
