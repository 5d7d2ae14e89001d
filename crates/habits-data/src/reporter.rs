//! Percentage-formatted report tables and CSV persistence.
//!
//! Turns the aggregator's fractional tables into the two report artifacts:
//! the monthly comparison CSV (rates in percent, one decimal) and the habit
//! summary CSV (overall rate plus current streak).

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use habits_core::error::Result;
use habits_core::formatting::{format_percent, percent_value};
use habits_core::models::{ComparisonRow, Observation};
use serde::Serialize;
use tracing::debug;

// ── Monthly comparison report ─────────────────────────────────────────────────

/// One row of the percentage-styled monthly comparison CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PercentComparisonRow {
    #[serde(rename = "Habit")]
    pub habit: String,
    #[serde(rename = "Current Month (%)")]
    pub current_month: f64,
    #[serde(rename = "Previous Month (%)")]
    pub previous_month: f64,
    #[serde(rename = "Change (%)")]
    pub change: f64,
}

/// Convert fractional comparison rows to percentages rounded to 1 decimal.
pub fn to_percent_table(rows: &[ComparisonRow]) -> Vec<PercentComparisonRow> {
    rows.iter()
        .map(|row| PercentComparisonRow {
            habit: row.habit.clone(),
            current_month: percent_value(row.current_rate, 1),
            previous_month: percent_value(row.previous_rate, 1),
            change: percent_value(row.change, 1),
        })
        .collect()
}

/// Write the monthly comparison report to
/// `{output_dir}/monthly_habit_report_{year}_{month}.csv`.
///
/// Creates `output_dir` if absent. Returns the path written.
pub fn save_monthly_report(
    rows: &[ComparisonRow],
    year: i32,
    month: u32,
    output_dir: &Path,
) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join(format!("monthly_habit_report_{}_{}.csv", year, month));

    let mut writer = csv::Writer::from_path(&path)?;
    for row in to_percent_table(rows) {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!("Wrote monthly report: {}", path.display());
    Ok(path)
}

// ── Habit summary ─────────────────────────────────────────────────────────────

/// One row of the habit summary CSV.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    #[serde(rename = "Habit")]
    pub habit: String,
    /// Overall completion rate formatted as a percentage string, e.g. `"85.3%"`.
    #[serde(rename = "Completion Rate")]
    pub completion_rate: String,
    /// Consecutive completed days counting back from the most recent record.
    #[serde(rename = "Current Streak")]
    pub current_streak: u32,
}

/// Build the per-habit summary: overall completion rate and current streak.
///
/// Rows are sorted by completion rate descending; habit name breaks ties so
/// repeated runs produce identical output.
pub fn summarize(observations: &[Observation]) -> Vec<SummaryRow> {
    let mut groups: BTreeMap<&str, Vec<&Observation>> = BTreeMap::new();
    for obs in observations {
        groups.entry(obs.habit.as_str()).or_default().push(obs);
    }

    let mut rows: Vec<(f64, SummaryRow)> = groups
        .into_iter()
        .map(|(habit, group)| {
            let completed = group.iter().filter(|o| o.completed).count();
            let rate = completed as f64 / group.len() as f64;
            let row = SummaryRow {
                habit: habit.to_string(),
                completion_rate: format_percent(rate),
                current_streak: current_streak(&group),
            };
            (rate, row)
        })
        .collect();

    rows.sort_by(|a, b| {
        b.0.partial_cmp(&a.0)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.1.habit.cmp(&b.1.habit))
    });

    rows.into_iter().map(|(_, row)| row).collect()
}

/// Write the habit summary to `{output_dir}/habit_summary.csv`.
///
/// Creates `output_dir` if absent. Returns the path written.
pub fn save_summary(rows: &[SummaryRow], output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let path = output_dir.join("habit_summary.csv");

    let mut writer = csv::Writer::from_path(&path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;

    debug!("Wrote habit summary: {}", path.display());
    Ok(path)
}

// ── Private helpers ───────────────────────────────────────────────────────────

/// Count consecutive completed days starting from the most recent record.
///
/// The streak breaks at the first non-completed observation; a habit whose
/// latest record is not completed has streak 0.
fn current_streak(group: &[&Observation]) -> u32 {
    let mut sorted: Vec<&Observation> = group.to_vec();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));

    let mut streak = 0;
    for obs in sorted {
        if obs.completed {
            streak += 1;
        } else {
            break;
        }
    }
    streak
}

// ── Tests ─────────────────────────────────────────────────────────────────────
