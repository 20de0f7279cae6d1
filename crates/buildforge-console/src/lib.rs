//! Colorful console output for search metrics.
//!
//! Provides a custom `tracing` layer that formats search events with colors.
//!
//! ## Log Levels
//!
//! - **INFO**: Lifecycle events (search/phase start/end)
//! - **WARN**: Rejected requests and strategy fallbacks
//! - **DEBUG**: Per-slot expansion and progress updates
//! - **TRACE**: Individual partial-assignment estimates

use num_format::{Locale, ToFormattedString};
use owo_colors::OwoColorize;
use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::Instant;
use tracing::field::{Field, Visit};
use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::Directive;
use tracing_subscriber::layer::Context;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

static INIT: OnceLock<()> = OnceLock::new();
static EPOCH: OnceLock<Instant> = OnceLock::new();
static SEARCH_START_NANOS: AtomicU64 = AtomicU64::new(0);

/// Package version for banner display.
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Target prefix of the events this layer renders.
const SOLVER_TARGET: &str = "buildforge_solver";

/// Initializes the search console output.
///
/// Safe to call multiple times - only the first call has effect.
/// Prints the BuildForge banner and sets up tracing. `RUST_LOG` overrides
/// the default `buildforge_solver=info` directive.
pub fn init() {
    INIT.get_or_init(|| {
        print_banner();

        let default = "buildforge_solver=info"
            .parse::<Directive>()
            .unwrap_or_else(|_| LevelFilter::INFO.into());
        let filter = EnvFilter::builder()
            .with_default_directive(default)
            .from_env_lossy();

        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(SearchConsoleLayer)
            .try_init();
    });
}

// Marks the start of a search for elapsed time tracking.
fn mark_search_start() {
    let epoch = EPOCH.get_or_init(Instant::now);
    let nanos = epoch.elapsed().as_nanos() as u64;
    SEARCH_START_NANOS.store(nanos, Ordering::Relaxed);
}

// Returns elapsed time since search start.
fn elapsed_secs() -> f64 {
    let Some(epoch) = EPOCH.get() else {
        return 0.0;
    };
    let start_nanos = SEARCH_START_NANOS.load(Ordering::Relaxed);
    let now_nanos = epoch.elapsed().as_nanos() as u64;
    now_nanos.saturating_sub(start_nanos) as f64 / 1_000_000_000.0
}

fn print_banner() {
    let banner = r#"
 ____        _ _     _ _____
| __ ) _   _(_) | __| |  ___|__  _ __ __ _  ___
|  _ \| | | | | |/ _` | |_ / _ \| '__/ _` |/ _ \
| |_) | |_| | | | (_| |  _| (_) | | | (_| |  __/
|____/ \__,_|_|_|\__,_|_|  \___/|_|  \__, |\___|
                                     |___/
"#;

    let version_line = format!("              v{} - Combinatorial Build Search\n", VERSION);

    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", banner.bright_cyan());
    let _ = writeln!(stdout, "{}", version_line.bright_white().bold());
    let _ = stdout.flush();
}

/// A tracing layer that formats search events with colors.
pub struct SearchConsoleLayer;

impl<S: Subscriber> Layer<S> for SearchConsoleLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();

        // Accept events from solver modules
        if !metadata.target().starts_with(SOLVER_TARGET) {
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
    phase: Option<String>,
    phase_index: Option<u64>,
    strategy: Option<String>,
    reason: Option<String>,
    slot: Option<String>,
    detail: Option<String>,
    assignment: Option<String>,
    score: Option<String>,
    best: Option<f64>,
    steps: Option<u64>,
    speed: Option<u64>,
    duration_ms: Option<u64>,
    slot_count: Option<u64>,
    slot_index: Option<u64>,
    state_count: Option<u64>,
    states: Option<u64>,
    pool: Option<u64>,
    beam: Option<u64>,
    slots: Option<u64>,
    total_slots: Option<u64>,
    evaluations: Option<u64>,
    results: Option<u64>,
    step: Option<u64>,
}

impl Visit for EventVisitor {
    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        let s = format!("{:?}", value);
        let s = s.trim_matches('"').to_string();
        match field.name() {
            "event" => self.event = Some(s),
            "phase" => self.phase = Some(s),
            "strategy" => self.strategy = Some(s),
            "reason" => self.reason = Some(s),
            "slot" => self.slot = Some(s),
            "detail" => self.detail = Some(s),
            "assignment" => self.assignment = Some(s),
            "score" => self.score = Some(s),
            _ => {}
        }
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        match field.name() {
            "phase_index" => self.phase_index = Some(value),
            "steps" => self.steps = Some(value),
            "speed" => self.speed = Some(value),
            "duration_ms" => self.duration_ms = Some(value),
            "slot_count" => self.slot_count = Some(value),
            "slot_index" => self.slot_index = Some(value),
            "state_count" => self.state_count = Some(value),
            "states" => self.states = Some(value),
            "pool" => self.pool = Some(value),
            "beam" => self.beam = Some(value),
            "slots" => self.slots = Some(value),
            "total_slots" => self.total_slots = Some(value),
            "evaluations" => self.evaluations = Some(value),
            "results" => self.results = Some(value),
            "step" => self.step = Some(value),
            _ => {}
        }
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record_u64(field, value.max(0) as u64);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        match field.name() {
            "best" => self.best = Some(value),
            "score" => self.score = Some(format!("{value:.4}")),
            _ => {}
        }
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.record_debug(field, &value);
    }
}

fn format_event(v: &EventVisitor, level: Level) -> String {
    let event = v.event.as_deref().unwrap_or("");

    match event {
        "search_start" => format_search_start(v),
        "search_end" => format_search_end(v),
        "phase_start" => format_phase_start(v),
        "phase_end" => format_phase_end(v),
        "slot_expanded" => format_slot_expanded(v),
        "progress" => format_progress(v),
        "validation_failed" | "strategy_fallback" | "weight_override_ignored" => {
            format_warning(event, v)
        }
        "step" => format_step(v, level),
        _ => String::new(),
    }
}

fn format_elapsed() -> String {
    format!("{:>7.3}s", elapsed_secs())
        .bright_black()
        .to_string()
}

fn format_search_start(v: &EventVisitor) -> String {
    mark_search_start();
    let slots = v.slot_count.unwrap_or(0);
    let states = v.state_count.unwrap_or(0);
    let strategy = v.strategy.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} Searching │ {} slots │ {} states │ {}",
        format_elapsed(),
        "▶".bright_green().bold(),
        slots.to_formatted_string(&Locale::en).bright_yellow(),
        format_state_count(states).bright_magenta(),
        strategy.white().bold()
    )
}

fn format_search_end(v: &EventVisitor) -> String {
    let score = v.score.as_deref().unwrap_or("N/A");
    let results = v.results.unwrap_or(0);
    let evaluations = v.evaluations.unwrap_or(0);
    let found = results > 0;

    let status = if found {
        "FOUND".bright_green().bold().to_string()
    } else {
        "EMPTY".bright_red().bold().to_string()
    };

    let mut output = format!(
        "{} {} Search complete │ {} │ {} evaluations │ {}/s │ {}",
        format_elapsed(),
        "■".bright_cyan().bold(),
        format_duration_ms(v.duration_ms.unwrap_or(0)).yellow(),
        evaluations.to_formatted_string(&Locale::en).white(),
        v.speed
            .unwrap_or(0)
            .to_formatted_string(&Locale::en)
            .bright_magenta()
            .bold(),
        status
    );

    // Summary box
    let inner_width: usize = 58;
    let rule = "═".repeat(inner_width);
    output.push_str("\n\n");
    output.push_str(&format!("╔{rule}╗").bright_cyan().to_string());
    output.push('\n');

    let status_text = if found {
        format!("{} BUILDS RANKED", results)
    } else {
        "NO BUILD MATCHES THE REQUEST".to_string()
    };
    let total_pad = inner_width.saturating_sub(status_text.len());
    let left_pad = total_pad / 2;
    let right_pad = total_pad - left_pad;
    let status_colored = if found {
        status_text.bright_green().bold().to_string()
    } else {
        status_text.bright_red().bold().to_string()
    };
    output.push_str(&format!(
        "{}{}{}{}{}",
        "║".bright_cyan(),
        " ".repeat(left_pad),
        status_colored,
        " ".repeat(right_pad),
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&format!("╠{rule}╣").bright_cyan().to_string());
    output.push('\n');

    output.push_str(&format!(
        "{}  {:<18}{:>36}  {}",
        "║".bright_cyan(),
        "Best Score:",
        score,
        "║".bright_cyan()
    ));
    output.push('\n');

    output.push_str(&format!("╚{rule}╝").bright_cyan().to_string());
    output.push('\n');

    output
}

fn format_phase_start(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");

    format!(
        "{} {} {} started",
        format_elapsed(),
        "▶".bright_blue(),
        phase.white().bold()
    )
}

fn format_phase_end(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("Unknown");
    let steps = v.steps.unwrap_or(0);
    let speed = v.speed.unwrap_or(0);
    let score = v.score.as_deref().unwrap_or("N/A");
    let duration = v.duration_ms.unwrap_or(0);

    format!(
        "{} {} {} ended │ {} │ {} states │ {} states/s │ {}",
        format_elapsed(),
        "◀".bright_blue(),
        phase.white().bold(),
        format_duration_ms(duration).yellow(),
        steps.to_formatted_string(&Locale::en).white(),
        speed.to_formatted_string(&Locale::en).bright_magenta().bold(),
        format_score(score)
    )
}

fn format_slot_expanded(v: &EventVisitor) -> String {
    let slot = v.slot.as_deref().unwrap_or("?");
    let index = v.slot_index.unwrap_or(0);
    let pool = v.pool.unwrap_or(0);
    let beam = v.beam.unwrap_or(0);
    let best = v
        .best
        .map_or_else(|| "N/A".to_string(), |b| format!("{b:.4}"));

    format!(
        "{} {} Slot {:>2} {:<12} │ pool {:>5} │ beam {:>7} │ {}",
        format_elapsed(),
        "◆".bright_blue(),
        index,
        slot.white(),
        pool.to_formatted_string(&Locale::en).white(),
        beam.to_formatted_string(&Locale::en).white(),
        format_score(&best)
    )
}

fn format_progress(v: &EventVisitor) -> String {
    let phase = v.phase.as_deref().unwrap_or("unknown");
    let states = v.states.unwrap_or(0);
    let slots = v.slots.unwrap_or(0);
    let total = v.total_slots.unwrap_or(0);

    let mut output = format!(
        "{} {} {:<18} │ {:>12} states │ {}/{} slots",
        format_elapsed(),
        "⚡".bright_cyan(),
        phase.white(),
        states.to_formatted_string(&Locale::en).bright_magenta(),
        slots,
        total
    );
    if let Some(detail) = v.detail.as_deref().filter(|d| !d.is_empty()) {
        output.push_str(&format!(" │ {}", detail.bright_black()));
    }
    output
}

fn format_warning(event: &str, v: &EventVisitor) -> String {
    let mut output = format!(
        "{} {} {}",
        format_elapsed(),
        "!".bright_yellow().bold(),
        event.replace('_', " ").yellow()
    );
    if let Some(reason) = v.reason.as_deref() {
        output.push_str(&format!(" │ {}", reason));
    }
    if let Some(states) = v.state_count {
        output.push_str(&format!(" │ {} states", format_state_count(states)));
    }
    output
}

fn format_step(v: &EventVisitor, level: Level) -> String {
    if level != Level::TRACE {
        return String::new();
    }

    let step = v.step.unwrap_or(0);
    let assignment = v.assignment.as_deref().unwrap_or("");
    let score = v.score.as_deref().unwrap_or("N/A");

    format!(
        "{} {} Step {:>10} │ {} │ {}",
        format_elapsed(),
        "·".bright_black(),
        step.to_formatted_string(&Locale::en).bright_black(),
        assignment.bright_black(),
        format_score(score).bright_black()
    )
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

fn format_score(score: &str) -> String {
    match score.parse::<f64>() {
        Ok(n) if n < 0.0 => score.bright_red().to_string(),
        Ok(n) if n > 0.0 => score.bright_green().to_string(),
        _ => score.white().to_string(),
    }
}

// Saturated state counts come through as u64::MAX.
fn format_state_count(states: u64) -> String {
    if states == u64::MAX {
        return "> 1.8 x 10^19".to_string();
    }
    if states < 1_000_000 {
        return states.to_formatted_string(&Locale::en);
    }
    let log_scale = (states as f64).log10();
    let exponent = log_scale.floor() as i32;
    let mantissa = 10f64.powf(log_scale - exponent as f64);

    format!("{:.3} x 10^{}", mantissa, exponent)
}
