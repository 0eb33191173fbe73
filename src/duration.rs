//! Assigns trip durations to histogram buckets.

/// Ordered (label, ceiling-in-minutes) pairs. A duration belongs to the
/// first bucket whose ceiling it does not exceed, so ceilings are inclusive:
/// exactly 5.0 minutes is still `0-5 min`.
pub static BUCKETS: &[(&str, f64)] = &[
    ("0-5 min", 5.0),
    ("5-10 min", 10.0),
    ("10-15 min", 15.0),
    ("15-20 min", 20.0),
    ("20-30 min", 30.0),
    ("30-60 min", 60.0),
    ("60+ min", f64::INFINITY),
];

/// Returns the bucket label for a duration in minutes.
///
/// Callers only pass durations from the valid range (0, 1440); anything at
/// or above 60 minutes resolves to `60+ min` regardless.
pub fn bucket_label(minutes: f64) -> &'static str {
    for (label, ceiling) in BUCKETS {
        if minutes <= *ceiling {
            return label;
        }
    }
    "60+ min"
}
