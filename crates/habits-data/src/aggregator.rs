//! Completion-rate aggregation over time windows.

use std::collections::{BTreeMap, BTreeSet};

use habits_core::error::{AnalyzerError, Result};
use habits_core::models::{CompletionRate, ComparisonRow, Granularity, Observation};
use habits_core::time_utils::previous_month;

// ── RateAccumulator ───────────────────────────────────────────────────────────

/// Running completed/total counts for one (period, habit) group.
#[derive(Debug, Clone, Copy, Default)]
struct RateAccumulator {
    completed: u32,
    total: u32,
}

impl RateAccumulator {
    fn add(&mut self, completed: bool) {
        self.total += 1;
        if completed {
            self.completed += 1;
        }
    }

    /// `completed / total`; an empty group maps to 0, never NaN.
    fn rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.completed) / f64::from(self.total)
        }
    }
}

// ── CompletionAggregator ──────────────────────────────────────────────────────

/// Stateless helper that groups observations by time period and habit.
pub struct CompletionAggregator;

impl CompletionAggregator {
    /// Compute per-(period, habit) completion rates.
    ///
    /// Returns rows sorted by period key, then habit name (ascending).
    pub fn completion_rates(
        observations: &[Observation],
        granularity: Granularity,
    ) -> Vec<CompletionRate> {
        // BTreeMap keeps the output deterministically sorted.
        let mut map: BTreeMap<(String, String), RateAccumulator> = BTreeMap::new();

        for obs in observations {
            let key = (granularity.period_key(obs.date), obs.habit.clone());
            map.entry(key).or_default().add(obs.completed);
        }

        map.into_iter()
            .map(|((period, habit), acc)| CompletionRate {
                period,
                habit,
                rate: acc.rate(),
            })
            .collect()
    }

    /// Build the month-over-month comparison for (`year`, `month`).
    ///
    /// The previous month is the calendar month before; January compares
    /// against December of the preceding year. A habit with no observations
    /// in one of the two months gets rate 0 there, so every habit seen in
    /// either month yields exactly one row. Rows are ordered by habit name.
    pub fn monthly_report(
        observations: &[Observation],
        year: i32,
        month: u32,
    ) -> Result<Vec<ComparisonRow>> {
        if !(1..=12).contains(&month) {
            return Err(AnalyzerError::InvalidMonth(month));
        }

        let (prev_year, prev_month) = previous_month(year, month);

        let current = Self::rates_for_month(observations, year, month);
        let previous = Self::rates_for_month(observations, prev_year, prev_month);

        let habits: BTreeSet<&String> = current.keys().chain(previous.keys()).collect();

        let rows = habits
            .into_iter()
            .map(|habit| {
                let current_rate = current.get(habit).map_or(0.0, RateAccumulator::rate);
                let previous_rate = previous.get(habit).map_or(0.0, RateAccumulator::rate);
                ComparisonRow {
                    habit: habit.clone(),
                    current_rate,
                    previous_rate,
                    change: current_rate - previous_rate,
                }
            })
            .collect();

        Ok(rows)
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Per-habit accumulators for the observations falling in one month.
    fn rates_for_month(
        observations: &[Observation],
        year: i32,
        month: u32,
    ) -> BTreeMap<String, RateAccumulator> {
        let mut map: BTreeMap<String, RateAccumulator> = BTreeMap::new();
        for obs in observations {
            if obs.year == year && obs.month == month {
                map.entry(obs.habit.clone()).or_default().add(obs.completed);
            }
        }
        map
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
