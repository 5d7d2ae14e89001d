//! Per-row completion classification.
//!
//! A raw checkmark value maps to a completed flag through a pure function of
//! the value and the habit's kind. The kind is resolved once per habit from
//! a static lookup table; no per-row dispatch beyond a two-variant enum.

/// Sentinel raw value meaning "no data recorded for this day".
pub const MISSING_SENTINEL: i32 = -1;

/// Raw value a boolean-style habit records for an explicit "yes".
///
/// The tracker encodes a tri-state signal (0 = no, 1 = skipped, 2 = yes);
/// only the top value counts as completed.
pub const BOOLEAN_DONE_VALUE: i32 = 2;

/// Habits whose raw value is the tri-state quality signal rather than a
/// count. Everything else is numeric-style.
const BOOLEAN_HABITS: &[&str] = &["Stay away from sugar", "Quit coffee"];

/// How a habit's raw values encode completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HabitKind {
    /// Tri-state signal; completed iff the raw value is [`BOOLEAN_DONE_VALUE`].
    Boolean,
    /// Count or magnitude; any positive raw value counts as completed.
    Numeric,
}

impl HabitKind {
    /// Resolve the kind for a habit name via the static lookup table.
    pub fn for_name(name: &str) -> Self {
        if BOOLEAN_HABITS.contains(&name) {
            HabitKind::Boolean
        } else {
            HabitKind::Numeric
        }
    }
}

/// Classify a raw checkmark value as completed or not.
///
/// Priority order: the missing sentinel always loses, then the habit kind
/// decides.
pub fn classify(raw_value: i32, kind: HabitKind) -> bool {
    if raw_value == MISSING_SENTINEL {
        return false;
    }
    match kind {
        HabitKind::Boolean => raw_value == BOOLEAN_DONE_VALUE,
        HabitKind::Numeric => raw_value > 0,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── HabitKind::for_name ───────────────────────────────────────────────────

    #[test]
    fn test_for_name_boolean_habits() {
        assert_eq!(HabitKind::for_name("Stay away from sugar"), HabitKind::Boolean);
        assert_eq!(HabitKind::for_name("Quit coffee"), HabitKind::Boolean);
    }

    #[test]
    fn test_for_name_numeric_habits() {
        assert_eq!(HabitKind::for_name("Exercise"), HabitKind::Numeric);
        assert_eq!(HabitKind::for_name("Read"), HabitKind::Numeric);
    }

    // ── classify ──────────────────────────────────────────────────────────────

    #[test]
    fn test_missing_sentinel_never_completed() {
        assert!(!classify(MISSING_SENTINEL, HabitKind::Boolean));
        assert!(!classify(MISSING_SENTINEL, HabitKind::Numeric));
    }

    #[test]
    fn test_boolean_completed_only_at_done_value() {
        assert!(!classify(0, HabitKind::Boolean));
        assert!(!classify(1, HabitKind::Boolean));
        assert!(classify(2, HabitKind::Boolean));
        assert!(!classify(3, HabitKind::Boolean));
    }

    #[test]
    fn test_numeric_completed_when_positive() {
        assert!(!classify(0, HabitKind::Numeric));
        assert!(classify(1, HabitKind::Numeric));
        assert!(classify(2, HabitKind::Numeric));
        assert!(classify(45, HabitKind::Numeric));
    }

    #[test]
    fn test_numeric_negative_not_completed() {
        // Negative values other than the sentinel should not appear in real
        // exports, but must still classify as not completed.
        assert!(!classify(-5, HabitKind::Numeric));
    }
}
