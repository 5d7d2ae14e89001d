//! CSV loading and merging for the habit analyzer.
//!
//! Reads the three tracker exports (habit catalog, wide checkmarks table,
//! wide scores table), melts the wide tables into long form, joins them on
//! (date, habit) and produces one [`Observation`] per pair.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use chrono::{Datelike, NaiveDate};
use habits_core::classify::{classify, HabitKind, MISSING_SENTINEL};
use habits_core::error::{AnalyzerError, Result};
use habits_core::models::{Habit, Observation};
use habits_core::time_utils::weekday_number;
use tracing::debug;

// ── Public API ────────────────────────────────────────────────────────────────

/// Read the habit metadata catalog from `path`.
///
/// Columns beyond `Name` and `Color` are ignored.
pub fn read_habit_catalog(path: &Path) -> Result<Vec<Habit>> {
    let file = open_file(path)?;
    let mut reader = csv::Reader::from_reader(file);

    let mut habits: Vec<Habit> = Vec::new();
    for record in reader.deserialize() {
        let habit: Habit = record?;
        habits.push(habit);
    }

    debug!("Loaded {} habits from {}", habits.len(), path.display());
    Ok(habits)
}

/// Load and merge the three tracker exports into the observations table.
///
/// * Habit columns absent from the catalog are silently dropped.
/// * Checkmarks left-join scores on (date, habit); an unmatched score stays
///   `None`.
/// * Duplicate (date, habit) rows are deduplicated, first row wins.
/// * A malformed date is fatal; an unknown habit name is not.
///
/// The result is sorted by (date, habit) so repeated runs over unchanged
/// input produce identical output.
pub fn load_observations(
    checkmarks_path: &Path,
    habits_path: &Path,
    scores_path: &Path,
) -> Result<Vec<Observation>> {
    let catalog = read_habit_catalog(habits_path)?;
    let colors: HashMap<String, String> = catalog
        .into_iter()
        .map(|h| (h.name, h.color))
        .collect();

    // Scores first, keyed for the left join below.
    let mut scores: HashMap<(NaiveDate, String), f64> = HashMap::new();
    for cell in melt_wide_csv(scores_path)? {
        if !colors.contains_key(&cell.habit) {
            continue;
        }
        if cell.value.is_empty() {
            continue;
        }
        let score: f64 = cell.value.parse().map_err(|_| AnalyzerError::ValueParse {
            column: cell.habit.clone(),
            value: cell.value.clone(),
        })?;
        scores.insert((cell.date, cell.habit), score);
    }

    let mut seen: HashSet<(NaiveDate, String)> = HashSet::new();
    let mut dropped: HashSet<String> = HashSet::new();
    let mut observations: Vec<Observation> = Vec::new();

    for cell in melt_wide_csv(checkmarks_path)? {
        let Some(color) = colors.get(&cell.habit) else {
            dropped.insert(cell.habit);
            continue;
        };

        let key = (cell.date, cell.habit.clone());
        if !seen.insert(key) {
            continue;
        }

        // An empty cell means no record for the day, same as the sentinel.
        let raw_value: i32 = if cell.value.is_empty() {
            MISSING_SENTINEL
        } else {
            cell.value.parse().map_err(|_| AnalyzerError::ValueParse {
                column: cell.habit.clone(),
                value: cell.value.clone(),
            })?
        };

        let kind = HabitKind::for_name(&cell.habit);
        let score = scores.get(&(cell.date, cell.habit.clone())).copied();

        observations.push(Observation {
            date: cell.date,
            habit: cell.habit,
            raw_value,
            score,
            color: color.clone(),
            year: cell.date.year(),
            month: cell.date.month(),
            day: cell.date.day(),
            weekday: weekday_number(cell.date),
            completed: classify(raw_value, kind),
        });
    }

    if !dropped.is_empty() {
        let mut names: Vec<&String> = dropped.iter().collect();
        names.sort();
        debug!("Dropped columns not in the habit catalog: {:?}", names);
    }

    observations.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.habit.cmp(&b.habit)));

    debug!(
        "Merged {} observations from {}",
        observations.len(),
        checkmarks_path.display()
    );

    Ok(observations)
}

// ── Internal helpers ──────────────────────────────────────────────────────────

/// One melted cell from a wide per-date-per-habit table.
struct LongCell {
    date: NaiveDate,
    habit: String,
    value: String,
}

/// Open a file for reading, attaching the path to any I/O error.
fn open_file(path: &Path) -> Result<std::fs::File> {
    std::fs::File::open(path).map_err(|source| AnalyzerError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}

/// Reshape a wide CSV (first column `Date`, one column per habit) into long
/// form, one cell per date × habit.
///
/// Dates must be `%Y-%m-%d`; a malformed date aborts the load.
fn melt_wide_csv(path: &Path) -> Result<Vec<LongCell>> {
    let file = open_file(path)?;
    let mut reader = csv::Reader::from_reader(file);
    let headers = reader.headers()?.clone();

    if headers.get(0) != Some("Date") {
        return Err(AnalyzerError::MissingColumn {
            column: "Date".to_string(),
            path: path.to_path_buf(),
        });
    }

    let mut cells: Vec<LongCell> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let date_str = record.get(0).unwrap_or("").trim();
        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
            .map_err(|_| AnalyzerError::DateParse(date_str.to_string()))?;

        for (idx, habit) in headers.iter().enumerate().skip(1) {
            cells.push(LongCell {
                date,
                habit: habit.to_string(),
                value: record.get(idx).unwrap_or("").trim().to_string(),
            });
        }
    }

    Ok(cells)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn write_csv(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        for line in lines {
            writeln!(file, "{}", line).unwrap();
        }
        path
    }

    /// Standard three-file fixture: Exercise (numeric) and Quit coffee
    /// (boolean) over three days of January 2024.
    fn fixture(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
        let habits = write_csv(
            dir,
            "Habits.csv",
            &[
                "Name,Color",
                "Exercise,#4CAF50",
                "Quit coffee,#2196F3",
            ],
        );
        let checkmarks = write_csv(
            dir,
            "Checkmarks.csv",
            &[
                "Date,Exercise,Quit coffee",
                "2024-01-01,1,2",
                "2024-01-02,0,1",
                "2024-01-03,-1,2",
            ],
        );
        let scores = write_csv(
            dir,
            "Scores.csv",
            &[
                "Date,Exercise,Quit coffee",
                "2024-01-01,0.5,0.9",
                "2024-01-02,0.4,",
            ],
        );
        (checkmarks, habits, scores)
    }

    fn obs<'a>(observations: &'a [Observation], date: &str, habit: &str) -> &'a Observation {
        let d = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        observations
            .iter()
            .find(|o| o.date == d && o.habit == habit)
            .unwrap()
    }

    // ── read_habit_catalog ────────────────────────────────────────────────────

    #[test]
    fn test_read_habit_catalog_basic() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "Habits.csv",
            &["Name,Color", "Exercise,#4CAF50", "Read,#FF9800"],
        );

        let habits = read_habit_catalog(&path).unwrap();
        assert_eq!(habits.len(), 2);
        assert_eq!(habits[0].name, "Exercise");
        assert_eq!(habits[0].color, "#4CAF50");
    }

    #[test]
    fn test_read_habit_catalog_ignores_extra_columns() {
        let dir = TempDir::new().unwrap();
        let path = write_csv(
            dir.path(),
            "Habits.csv",
            &[
                "Position,Name,Question,Color",
                "1,Exercise,Did you train?,#4CAF50",
            ],
        );

        let habits = read_habit_catalog(&path).unwrap();
        assert_eq!(habits.len(), 1);
        assert_eq!(habits[0].name, "Exercise");
    }

    #[test]
    fn test_read_habit_catalog_missing_file() {
        let err = read_habit_catalog(Path::new("/tmp/does-not-exist-habits-xyz.csv")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file"));
    }

    // ── load_observations: merge semantics ────────────────────────────────────

    #[test]
    fn test_load_observations_one_row_per_date_habit() {
        let dir = TempDir::new().unwrap();
        let (checkmarks, habits, scores) = fixture(dir.path());

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        // 3 dates x 2 habits
        assert_eq!(observations.len(), 6);

        let mut keys: Vec<(NaiveDate, &str)> = observations
            .iter()
            .map(|o| (o.date, o.habit.as_str()))
            .collect();
        let before = keys.len();
        keys.dedup();
        assert_eq!(keys.len(), before, "no duplicate (date, habit) pairs");
    }

    #[test]
    fn test_load_observations_left_join_scores() {
        let dir = TempDir::new().unwrap();
        let (checkmarks, habits, scores) = fixture(dir.path());

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();

        assert_eq!(obs(&observations, "2024-01-01", "Exercise").score, Some(0.5));
        // Empty score cell.
        assert_eq!(obs(&observations, "2024-01-02", "Quit coffee").score, None);
        // Date missing from the scores file entirely.
        assert_eq!(obs(&observations, "2024-01-03", "Exercise").score, None);
    }

    #[test]
    fn test_load_observations_attaches_catalog_color() {
        let dir = TempDir::new().unwrap();
        let (checkmarks, habits, scores) = fixture(dir.path());

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        assert_eq!(obs(&observations, "2024-01-01", "Exercise").color, "#4CAF50");
        assert_eq!(obs(&observations, "2024-01-01", "Quit coffee").color, "#2196F3");
    }

    #[test]
    fn test_load_observations_drops_unknown_habits() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(dir.path(), "Habits.csv", &["Name,Color", "Exercise,#4CAF50"]);
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &["Date,Exercise,Archived habit", "2024-01-01,1,2"],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].habit, "Exercise");
    }

    #[test]
    fn test_load_observations_duplicate_rows_first_wins() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(dir.path(), "Habits.csv", &["Name,Color", "Exercise,#4CAF50"]);
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &["Date,Exercise", "2024-01-01,1", "2024-01-01,0"],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].raw_value, 1);
        assert!(observations[0].completed);
    }

    // ── load_observations: derived fields ─────────────────────────────────────

    #[test]
    fn test_load_observations_date_parts() {
        let dir = TempDir::new().unwrap();
        let (checkmarks, habits, scores) = fixture(dir.path());

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        let o = obs(&observations, "2024-01-02", "Exercise");
        assert_eq!(o.year, 2024);
        assert_eq!(o.month, 1);
        assert_eq!(o.day, 2);
        // 2024-01-02 was a Tuesday; Monday = 0.
        assert_eq!(o.weekday, 1);
    }

    #[test]
    fn test_load_observations_classification() {
        let dir = TempDir::new().unwrap();
        let (checkmarks, habits, scores) = fixture(dir.path());

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();

        // Numeric habit: positive / zero / sentinel.
        assert!(obs(&observations, "2024-01-01", "Exercise").completed);
        assert!(!obs(&observations, "2024-01-02", "Exercise").completed);
        assert!(!obs(&observations, "2024-01-03", "Exercise").completed);

        // Boolean habit: only value 2 counts.
        assert!(obs(&observations, "2024-01-01", "Quit coffee").completed);
        assert!(!obs(&observations, "2024-01-02", "Quit coffee").completed);
        assert!(obs(&observations, "2024-01-03", "Quit coffee").completed);
    }

    #[test]
    fn test_load_observations_empty_checkmark_cell_is_missing() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(dir.path(), "Habits.csv", &["Name,Color", "Exercise,#4CAF50"]);
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &["Date,Exercise", "2024-01-01,"],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        assert_eq!(observations[0].raw_value, MISSING_SENTINEL);
        assert!(!observations[0].completed);
    }

    #[test]
    fn test_load_observations_sorted_by_date_then_habit() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(
            dir.path(),
            "Habits.csv",
            &["Name,Color", "Exercise,#4CAF50", "Read,#FF9800"],
        );
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &[
                "Date,Read,Exercise",
                "2024-01-02,1,1",
                "2024-01-01,1,1",
            ],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let observations = load_observations(&checkmarks, &habits, &scores).unwrap();
        let keys: Vec<(String, String)> = observations
            .iter()
            .map(|o| (o.date.to_string(), o.habit.clone()))
            .collect();
        let mut sorted = keys.clone();
        sorted.sort();
        assert_eq!(keys, sorted);
    }

    // ── load_observations: error paths ────────────────────────────────────────

    #[test]
    fn test_load_observations_malformed_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(dir.path(), "Habits.csv", &["Name,Color", "Exercise,#4CAF50"]);
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &["Date,Exercise", "01/15/2024,1"],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let err = load_observations(&checkmarks, &habits, &scores).unwrap_err();
        assert!(matches!(err, AnalyzerError::DateParse(_)), "got {err}");
    }

    #[test]
    fn test_load_observations_malformed_value_is_fatal() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(dir.path(), "Habits.csv", &["Name,Color", "Exercise,#4CAF50"]);
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &["Date,Exercise", "2024-01-01,lots"],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let err = load_observations(&checkmarks, &habits, &scores).unwrap_err();
        assert!(matches!(err, AnalyzerError::ValueParse { .. }), "got {err}");
    }

    #[test]
    fn test_load_observations_missing_date_column() {
        let dir = TempDir::new().unwrap();
        let habits = write_csv(dir.path(), "Habits.csv", &["Name,Color", "Exercise,#4CAF50"]);
        let checkmarks = write_csv(
            dir.path(),
            "Checkmarks.csv",
            &["Day,Exercise", "2024-01-01,1"],
        );
        let scores = write_csv(dir.path(), "Scores.csv", &["Date,Exercise", "2024-01-01,0.5"]);

        let err = load_observations(&checkmarks, &habits, &scores).unwrap_err();
        assert!(matches!(err, AnalyzerError::MissingColumn { .. }), "got {err}");
    }
}
