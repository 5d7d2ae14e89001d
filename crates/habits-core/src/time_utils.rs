//! Calendar helpers shared by the aggregation and reporting layers.

use chrono::{Datelike, NaiveDate};

/// Return the (year, month) immediately before the given month.
///
/// January wraps to December of the previous year.
///
/// # Examples
///
/// ```
/// use habits_core::time_utils::previous_month;
///
/// assert_eq!(previous_month(2024, 5), (2024, 4));
/// assert_eq!(previous_month(2024, 1), (2023, 12));
/// ```
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month == 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Weekday number with Monday = 0 through Sunday = 6.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use habits_core::time_utils::weekday_number;
///
/// // 2024-01-01 was a Monday.
/// let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// assert_eq!(weekday_number(monday), 0);
/// ```
pub fn weekday_number(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_monday()
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── previous_month ────────────────────────────────────────────────────────

    #[test]
    fn test_previous_month_mid_year() {
        assert_eq!(previous_month(2024, 7), (2024, 6));
    }

    #[test]
    fn test_previous_month_february() {
        assert_eq!(previous_month(2024, 2), (2024, 1));
    }

    #[test]
    fn test_previous_month_january_wraps_to_december() {
        assert_eq!(previous_month(2024, 1), (2023, 12));
    }

    #[test]
    fn test_previous_month_december() {
        assert_eq!(previous_month(2024, 12), (2024, 11));
    }

    // ── weekday_number ────────────────────────────────────────────────────────

    #[test]
    fn test_weekday_number_monday_is_zero() {
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(weekday_number(monday), 0);
    }

    #[test]
    fn test_weekday_number_sunday_is_six() {
        let sunday = NaiveDate::from_ymd_opt(2024, 1, 7).unwrap();
        assert_eq!(weekday_number(sunday), 6);
    }
}
