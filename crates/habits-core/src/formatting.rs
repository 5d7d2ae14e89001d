/// Convert a rate in `[0, 1]` to a percentage value rounded to
/// `decimal_places`.
///
/// # Examples
///
/// ```
/// use habits_core::formatting::percent_value;
///
/// assert!((percent_value(0.3333, 1) - 33.3).abs() < 1e-9);
/// assert!((percent_value(1.0, 1) - 100.0).abs() < 1e-9);
/// assert!((percent_value(-0.25, 1) - -25.0).abs() < 1e-9);
/// ```
pub fn percent_value(rate: f64, decimal_places: u32) -> f64 {
    let factor = 10_f64.powi(decimal_places as i32);
    (rate * 100.0 * factor).round() / factor
}

/// Format a rate in `[0, 1]` as a percentage string with one decimal place.
///
/// # Examples
///
/// ```
/// use habits_core::formatting::format_percent;
///
/// assert_eq!(format_percent(0.8534), "85.3%");
/// assert_eq!(format_percent(1.0), "100.0%");
/// assert_eq!(format_percent(0.0), "0.0%");
/// ```
pub fn format_percent(rate: f64) -> String {
    format!("{:.1}%", rate * 100.0)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
