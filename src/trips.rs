//! Trip records: the raw rows as loaded and their enriched form.
//!
//! Enrichment is where cleaning happens: rows outside the configured year or
//! without a station name on either endpoint are dropped, and the derived
//! calendar/duration/membership/municipality fields are computed once.
//! Implausible durations are kept at this stage; the valid-duration filter
//! belongs to aggregation.

use chrono::{Datelike, NaiveDateTime, Timelike};
use tracing::debug;

use crate::municipality;

/// One row of a trip CSV, fields null when absent or unparseable.
#[derive(Debug, Default, Clone)]
pub struct RawTrip {
    pub started_at: Option<String>,
    pub ended_at: Option<String>,
    pub start_station_id: Option<String>,
    pub end_station_id: Option<String>,
    pub start_station_name: Option<String>,
    pub end_station_name: Option<String>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    pub member_casual: Option<String>,
}

/// A cleaned trip with its derived fields, immutable once computed.
#[derive(Debug, Clone)]
pub struct Trip {
    pub start_station_name: Option<String>,
    pub end_station_name: Option<String>,
    pub start_lat: Option<f64>,
    pub start_lng: Option<f64>,
    /// Minutes from start to end; `None` when the end timestamp is missing
    /// or unparseable. May be negative or implausibly large.
    pub duration_min: Option<f64>,
    /// `YYYY-MM` label of the start time.
    pub month: String,
    /// 0=Sunday .. 6=Saturday (dashboard convention).
    pub day_of_week: u32,
    /// 0..=23, start-time hour.
    pub hour: u32,
    pub is_member: bool,
    /// Never empty; `"Other"` when no rule matched.
    pub municipality: &'static str,
}

impl Trip {
    /// Builds the enriched record, or `None` when the row fails the base
    /// filters (year prefix on the raw start text, at least one endpoint
    /// name, parseable start time).
    pub fn from_raw(raw: RawTrip, year_prefix: &str) -> Option<Trip> {
        let started_raw = raw.started_at.as_deref()?;
        if !started_raw.starts_with(year_prefix) {
            return None;
        }
        if raw.start_station_name.is_none() && raw.end_station_name.is_none() {
            return None;
        }
        let started = parse_timestamp(started_raw)?;

        let duration_min = raw
            .ended_at
            .as_deref()
            .and_then(parse_timestamp)
            .map(|ended| (ended - started).num_milliseconds() as f64 / 60_000.0);

        let municipality = municipality::resolve(
            raw.start_station_id.as_deref(),
            raw.start_station_name.as_deref(),
        );

        Some(Trip {
            start_station_name: raw.start_station_name,
            end_station_name: raw.end_station_name,
            start_lat: raw.start_lat,
            start_lng: raw.start_lng,
            duration_min,
            month: started.format("%Y-%m").to_string(),
            day_of_week: started.weekday().num_days_from_sunday(),
            hour: started.hour(),
            is_member: raw.member_casual.as_deref() == Some("member"),
            municipality,
        })
    }

    /// True when the trip belongs to the valid-duration subset used by
    /// every duration aggregate: strictly positive and under one day.
    pub fn has_valid_duration(&self) -> bool {
        matches!(self.duration_min, Some(d) if d > 0.0 && d < 1440.0)
    }
}

/// Cleans and enriches a batch of raw rows, logging how many were dropped by
/// the base filters.
pub fn enrich(rows: Vec<RawTrip>, year_prefix: &str) -> Vec<Trip> {
    let total = rows.len();
    let trips: Vec<Trip> = rows
        .into_iter()
        .filter_map(|raw| Trip::from_raw(raw, year_prefix))
        .collect();

    debug!(
        kept = trips.len(),
        dropped = total - trips.len(),
        "Base filters applied"
    );
    trips
}

/// Parses a trip-export timestamp, with or without fractional seconds, in
/// either the space-separated or `T`-separated form.
fn parse_timestamp(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(started: &str, ended: &str) -> RawTrip {
        RawTrip {
            started_at: Some(started.to_string()),
            ended_at: Some(ended.to_string()),
            start_station_name: Some("Main St".to_string()),
            end_station_name: Some("Elm St".to_string()),
            member_casual: Some("member".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_year_filter_drops_other_years() {
        let t = Trip::from_raw(raw("2024-12-31 23:59:00", "2025-01-01 00:09:00"), "2025");
        assert!(t.is_none());
    }

    #[test]
    fn test_missing_start_time_is_dropped() {
        let mut r = raw("2025-01-01 10:00:00", "2025-01-01 10:10:00");
        r.started_at = None;
        assert!(Trip::from_raw(r, "2025").is_none());
    }

    #[test]
    fn test_unparseable_start_time_is_dropped() {
        let t = Trip::from_raw(raw("2025-99-99 10:00:00", "2025-01-01 10:10:00"), "2025");
        assert!(t.is_none());
    }

    #[test]
    fn test_requires_a_station_name_on_at_least_one_endpoint() {
        let mut r = raw("2025-01-01 10:00:00", "2025-01-01 10:10:00");
        r.start_station_name = None;
        r.end_station_name = None;
        assert!(Trip::from_raw(r, "2025").is_none());

        let mut r = raw("2025-01-01 10:00:00", "2025-01-01 10:10:00");
        r.start_station_name = None;
        assert!(Trip::from_raw(r, "2025").is_some());
    }

    #[test]
    fn test_calendar_fields() {
        // 2025-03-05 is a Wednesday
        let t = Trip::from_raw(raw("2025-03-05 14:30:00", "2025-03-05 14:45:30"), "2025").unwrap();
        assert_eq!(t.month, "2025-03");
        assert_eq!(t.day_of_week, 3);
        assert_eq!(t.hour, 14);
        assert_eq!(t.duration_min, Some(15.5));
    }

    #[test]
    fn test_sunday_maps_to_zero() {
        // 2025-06-01 is a Sunday
        let t = Trip::from_raw(raw("2025-06-01 08:00:00", "2025-06-01 08:05:00"), "2025").unwrap();
        assert_eq!(t.day_of_week, 0);
    }

    #[test]
    fn test_fractional_seconds_parse() {
        let t = Trip::from_raw(
            raw("2025-01-01 00:03:22.123", "2025-01-01 00:05:22.123"),
            "2025",
        )
        .unwrap();
        assert_eq!(t.duration_min, Some(2.0));
    }

    #[test]
    fn test_negative_duration_is_kept_but_invalid() {
        let t = Trip::from_raw(raw("2025-01-01 10:00:00", "2025-01-01 09:00:00"), "2025").unwrap();
        assert_eq!(t.duration_min, Some(-60.0));
        assert!(!t.has_valid_duration());
    }

    #[test]
    fn test_unparseable_end_time_nulls_the_duration() {
        let t = Trip::from_raw(raw("2025-01-01 10:00:00", "not a time"), "2025").unwrap();
        assert_eq!(t.duration_min, None);
        assert!(!t.has_valid_duration());
    }

    #[test]
    fn test_valid_duration_bounds() {
        let mk = |ended: &str| {
            Trip::from_raw(raw("2025-01-01 00:00:00", ended), "2025")
                .unwrap()
                .has_valid_duration()
        };
        assert!(mk("2025-01-01 00:00:30")); // 0.5 min
        assert!(mk("2025-01-01 23:59:00")); // 1439 min
        assert!(!mk("2025-01-01 00:00:00")); // exactly zero
        assert!(!mk("2025-01-02 00:00:00")); // exactly one day
    }

    #[test]
    fn test_membership_flag() {
        let t = Trip::from_raw(raw("2025-01-01 10:00:00", "2025-01-01 10:10:00"), "2025").unwrap();
        assert!(t.is_member);

        let mut r = raw("2025-01-01 10:00:00", "2025-01-01 10:10:00");
        r.member_casual = Some("casual".to_string());
        assert!(!Trip::from_raw(r, "2025").unwrap().is_member);

        let mut r = raw("2025-01-01 10:00:00", "2025-01-01 10:10:00");
        r.member_casual = None;
        assert!(!Trip::from_raw(r, "2025").unwrap().is_member);
    }

    #[test]
    fn test_municipality_resolved_from_start_station_only() {
        let mut r = raw("2025-01-01 10:00:00", "2025-01-01 10:10:00");
        r.start_station_id = Some("M32005".to_string());
        r.end_station_name = Some("Davis Sq".to_string());
        let t = Trip::from_raw(r, "2025").unwrap();
        assert_eq!(t.municipality, "Cambridge");
    }

    #[test]
    fn test_t_separated_timestamps_parse() {
        let t = Trip::from_raw(
            raw("2025-01-01T10:00:00", "2025-01-01T10:10:00"),
            "2025",
        )
        .unwrap();
        assert_eq!(t.duration_min, Some(10.0));
    }
}
