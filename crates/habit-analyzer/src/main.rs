mod bootstrap;

use anyhow::Result;
use chrono::Local;
use habits_core::models::Granularity;
use habits_core::settings::Settings;
use habits_data::analysis::analyze_habits;
use habits_data::reporter::{save_monthly_report, save_summary};

fn main() -> Result<()> {
    let settings = Settings::load();

    bootstrap::setup_logging(&settings.log_level)?;

    tracing::info!("Habit Analyzer v{} starting", env!("CARGO_PKG_VERSION"));

    // Read the clock once; the pipeline takes the report month explicitly.
    let (year, month) = bootstrap::resolve_report_month(&settings, Local::now().date_naive());
    let granularity = Granularity::parse(&settings.period).unwrap_or_default();

    tracing::info!(
        "Analyzing {} for report month {}/{}",
        settings.data_dir.display(),
        month,
        year
    );

    let result = analyze_habits(&settings.data_dir, year, month, granularity)?;

    tracing::info!(
        "Loaded {} observations across {} habits ({} rate rows)",
        result.metadata.observations_loaded,
        result.metadata.habits_tracked,
        result.rates.len()
    );

    bootstrap::ensure_output_dir(&settings.output_dir)?;

    let report_path = save_monthly_report(&result.comparison, year, month, &settings.output_dir)?;
    let summary_path = save_summary(&result.summary, &settings.output_dir)?;

    tracing::info!("Monthly CSV report: {}", report_path.display());
    tracing::info!("Habit summary: {}", summary_path.display());

    Ok(())
}
