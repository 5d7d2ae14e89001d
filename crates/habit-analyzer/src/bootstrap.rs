use std::path::Path;

use chrono::{Datelike, NaiveDate};
use habits_core::settings::Settings;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

// ── Logging bootstrap ──────────────────────────────────────────────────────────

/// Initialise the global `tracing` subscriber.
///
/// `log_level` is mapped to a [`tracing_subscriber::EnvFilter`] directive.
/// Falls back to `"info"` if the level string is not recognised.
pub fn setup_logging(log_level: &str) -> anyhow::Result<()> {
    // Map logging-style level names to tracing directives (tracing uses lowercase).
    let upper = log_level.to_uppercase();
    let normalised = match upper.as_str() {
        "DEBUG" | "CRITICAL" => "debug",
        "INFO" => "info",
        "WARNING" => "warn",
        "ERROR" => "error",
        other => other,
    };

    let filter = EnvFilter::try_new(normalised).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = fmt::layer().with_target(false).with_thread_ids(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(subscriber)
        .init();

    Ok(())
}

// ── Directory bootstrap ────────────────────────────────────────────────────────

/// Create the output directory (and any missing parents) if absent.
pub fn ensure_output_dir(path: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(path)?;
    Ok(())
}

// ── Report month resolution ────────────────────────────────────────────────────

/// Resolve the report (year, month) from explicit CLI flags, falling back to
/// `today` for whichever part was not given.
///
/// The local clock is read once in `main` and passed in here; the pipeline
/// itself never consults ambient time.
pub fn resolve_report_month(settings: &Settings, today: NaiveDate) -> (i32, u32) {
    (
        settings.year.unwrap_or_else(|| today.year()),
        settings.month.unwrap_or_else(|| today.month()),
    )
}

// ── Tests ──────────────────────────────────────────────────────────────────────
