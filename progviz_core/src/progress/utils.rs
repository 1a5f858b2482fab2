//! Formatting helpers for the progress line

/// Unit table for [`format_duration`], largest first.
///
/// Each entry is the unit suffix and how many of the next smaller unit it
/// holds. Months are a flat four weeks.
const DURATION_UNITS: &[(&str, u64)] = &[
    ("y", 12),
    ("mo", 4),
    ("w", 7),
    ("d", 24),
    ("h", 60),
    ("m", 60),
];

/// Split the bar into `(filled, pending)` cells
///
/// `total` must be at least 1.
pub fn bar_fill(bar_length: usize, progress: usize, total: usize) -> (usize, usize) {
    let filled = (bar_length as u128 * progress as u128 / total as u128) as usize;
    let filled = filled.min(bar_length);
    (filled, bar_length - filled)
}

/// Completion percentage rounded to two decimal places
pub fn percentage(progress: usize, total: usize) -> f64 {
    let ratio = progress as f64 / total as f64;
    (ratio * 10_000.0).round() / 100.0
}

/// Format whole seconds as `"1h 0m 1s"`
///
/// Renders every unit from the largest non-zero one down to seconds.
pub fn format_duration(seconds: u64) -> String {
    // seconds, minutes, hours, ... up to years
    let mut amounts = Vec::with_capacity(DURATION_UNITS.len() + 1);
    let mut rest = seconds;
    for &(_, per_unit) in DURATION_UNITS.iter().rev() {
        amounts.push(rest % per_unit);
        rest /= per_unit;
    }
    amounts.push(rest);

    let suffixes = DURATION_UNITS
        .iter()
        .map(|&(suffix, _)| suffix)
        .chain(std::iter::once("s"));

    amounts
        .iter()
        .rev()
        .zip(suffixes)
        .skip_while(|&(&amount, suffix)| amount == 0 && suffix != "s")
        .map(|(amount, suffix)| format!("{amount}{suffix}"))
        .collect::<Vec<_>>()
        .join(" ")
}
