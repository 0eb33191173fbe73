//! Numeric helpers shared by the views.

/// Percentage of `part` within `total`, zero when the total is zero.
pub fn pct(part: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// Rounds to one decimal place with ties to even, the precision used by
/// every rate and mean in the output document.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round_ties_even() / 10.0
}
