//! Main analysis pipeline for the habit analyzer.
//!
//! Orchestrates loading, rate aggregation, the month-over-month comparison
//! and the summary table, returning an [`AnalysisResult`] ready for the
//! reporting layer.

use std::collections::HashSet;
use std::path::Path;

use chrono::Utc;
use habits_core::error::Result;
use habits_core::models::{CompletionRate, ComparisonRow, Granularity, Observation};

use crate::aggregator::CompletionAggregator;
use crate::loader::load_observations;
use crate::reporter::{summarize, SummaryRow};

// ── Input file names ──────────────────────────────────────────────────────────

/// Wide per-date-per-habit raw checkmark export.
pub const CHECKMARKS_FILE: &str = "Checkmarks.csv";
/// Habit metadata catalog.
pub const HABITS_FILE: &str = "Habits.csv";
/// Wide per-date-per-habit score export.
pub const SCORES_FILE: &str = "Scores.csv";

// ── Public types ──────────────────────────────────────────────────────────────

/// Metadata produced alongside the analysis result.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AnalysisMetadata {
    /// ISO-8601 timestamp when this result was generated.
    pub generated_at: String,
    /// Number of merged observations loaded.
    pub observations_loaded: usize,
    /// Number of distinct habits in the observations table.
    pub habits_tracked: usize,
    /// Year of the comparison report.
    pub report_year: i32,
    /// Month of the comparison report (1-12).
    pub report_month: u32,
    /// Wall-clock seconds spent loading and merging the CSV files.
    pub load_time_seconds: f64,
    /// Wall-clock seconds spent on aggregation and summary.
    pub aggregate_time_seconds: f64,
}

/// The complete output of [`analyze_habits`].
#[derive(Debug, Clone)]
pub struct AnalysisResult {
    /// The merged observations table.
    pub observations: Vec<Observation>,
    /// Per-(period, habit) completion rates.
    pub rates: Vec<CompletionRate>,
    /// Month-over-month comparison for the report month.
    pub comparison: Vec<ComparisonRow>,
    /// Per-habit overall rate and streak.
    pub summary: Vec<SummaryRow>,
    /// Metadata about this analysis run.
    pub metadata: AnalysisMetadata,
}

// ── Public function ───────────────────────────────────────────────────────────

/// Run the full analysis pipeline.
///
/// 1. Load and merge `Checkmarks.csv`, `Habits.csv` and `Scores.csv` from
///    `data_dir`.
/// 2. Compute completion rates at the requested granularity.
/// 3. Build the comparison for (`year`, `month`) against the month before.
/// 4. Build the per-habit summary.
///
/// The report month is an explicit parameter; callers resolve "the current
/// month" themselves. Everything is recomputed from the source files, so a
/// second run over unchanged input yields identical tables.
pub fn analyze_habits(
    data_dir: &Path,
    year: i32,
    month: u32,
    granularity: Granularity,
) -> Result<AnalysisResult> {
    // ── Step 1: Load and merge ────────────────────────────────────────────────
    let load_start = std::time::Instant::now();
    let observations = load_observations(
        &data_dir.join(CHECKMARKS_FILE),
        &data_dir.join(HABITS_FILE),
        &data_dir.join(SCORES_FILE),
    )?;
    let load_time = load_start.elapsed().as_secs_f64();

    // ── Step 2-4: Aggregate ───────────────────────────────────────────────────
    let aggregate_start = std::time::Instant::now();
    let rates = CompletionAggregator::completion_rates(&observations, granularity);
    let comparison = CompletionAggregator::monthly_report(&observations, year, month)?;
    let summary = summarize(&observations);
    let aggregate_time = aggregate_start.elapsed().as_secs_f64();

    let habits_tracked = observations
        .iter()
        .map(|o| o.habit.as_str())
        .collect::<HashSet<_>>()
        .len();

    let metadata = AnalysisMetadata {
        generated_at: Utc::now().to_rfc3339(),
        observations_loaded: observations.len(),
        habits_tracked,
        report_year: year,
        report_month: month,
        load_time_seconds: load_time,
        aggregate_time_seconds: aggregate_time,
    };

    Ok(AnalysisResult {
        observations,
        rates,
        comparison,
        summary,
        metadata,
    })
}

// ── Tests ─────────────────────────────────────────────────────────────────────
