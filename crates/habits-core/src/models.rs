use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One entry from the habit metadata catalog (`Habits.csv`).
///
/// The export carries more columns (position, question, repetitions, ...);
/// only the name and display color matter downstream, so the rest are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    /// Habit name, the join key across all three input files.
    #[serde(rename = "Name")]
    pub name: String,
    /// Display color (hex string, e.g. `"#4CAF50"`), used by rendering only.
    #[serde(rename = "Color")]
    pub color: String,
}

/// One merged record per habit per date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    /// Calendar date of the record.
    pub date: NaiveDate,
    /// Habit name; always a member of the metadata catalog.
    pub habit: String,
    /// Raw value as recorded. `-1` is the missing-data sentinel.
    pub raw_value: i32,
    /// Derived score in `[0, 1]`, or `None` when the scores file has no
    /// value for this (date, habit) pair.
    pub score: Option<f64>,
    /// Display color inherited from the habit catalog.
    pub color: String,
    /// Calendar year of `date`.
    pub year: i32,
    /// Calendar month of `date` (1-12).
    pub month: u32,
    /// Day of month (1-31).
    pub day: u32,
    /// Weekday with Monday = 0 through Sunday = 6.
    pub weekday: u32,
    /// Whether the habit counts as completed on this date.
    pub completed: bool,
}

/// Completion rate for one (period, habit) group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRate {
    /// Period key, e.g. `"2024-01"` (monthly) or `"2024-01-15"` (daily).
    pub period: String,
    /// Habit name.
    pub habit: String,
    /// Fraction of observations completed in the group, in `[0, 1]`.
    pub rate: f64,
}

/// Month-over-month comparison for one habit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    /// Habit name.
    pub habit: String,
    /// Completion rate in the report month, in `[0, 1]`.
    pub current_rate: f64,
    /// Completion rate in the month before, in `[0, 1]`.
    pub previous_rate: f64,
    /// `current_rate - previous_rate`, in `[-1, 1]`.
    pub change: f64,
}

/// Time-window granularity for completion-rate grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Granularity {
    /// One period per calendar day, keyed `"%Y-%m-%d"`.
    Daily,
    /// One period per calendar month, keyed `"%Y-%m"`.
    #[default]
    Monthly,
    /// One period per calendar year, keyed `"%Y"`.
    Yearly,
}

impl Granularity {
    /// Map a date to its string period key.
    pub fn period_key(&self, date: NaiveDate) -> String {
        let fmt = match self {
            Granularity::Daily => "%Y-%m-%d",
            Granularity::Monthly => "%Y-%m",
            Granularity::Yearly => "%Y",
        };
        date.format(fmt).to_string()
    }

    /// Parse a CLI period name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "daily" => Some(Granularity::Daily),
            "monthly" => Some(Granularity::Monthly),
            "yearly" => Some(Granularity::Yearly),
            _ => None,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
