use clap::Parser;
use std::path::PathBuf;

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Habit-tracking CSV analysis and reporting
#[derive(Parser, Debug, Clone)]
#[command(
    name = "habit-analyzer",
    about = "Habit-tracking CSV analysis and reporting",
    version
)]
pub struct Settings {
    /// Directory containing Checkmarks.csv, Habits.csv and Scores.csv
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Directory where report CSVs are written
    #[arg(long, default_value = "output")]
    pub output_dir: PathBuf,

    /// Report year (defaults to the current year)
    #[arg(long)]
    pub year: Option<i32>,

    /// Report month, 1-12 (defaults to the current month)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
    pub month: Option<u32>,

    /// Grouping period for completion rates
    #[arg(long, default_value = "monthly", value_parser = ["daily", "monthly", "yearly"])]
    pub period: String,

    /// Logging level
    #[arg(long, default_value = "INFO", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long)]
    pub debug: bool,
}

impl Settings {
    /// Parse CLI arguments and apply the `--debug` override.
    pub fn load() -> Self {
        Self::from_args(std::env::args_os().collect())
    }

    /// Same as [`Settings::load`] but accepts an explicit argument list,
    /// enabling unit-testing without spawning subprocesses.
    pub fn from_args(args: Vec<std::ffi::OsString>) -> Self {
        let mut settings = Settings::parse_from(args);

        // --debug overrides log level.
        if settings.debug {
            settings.log_level = "DEBUG".to_string();
        }

        settings
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
