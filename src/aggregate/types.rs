//! Row and document types for the dashboard JSON.
//!
//! Everything here is serialize-only. Field declaration order is the key
//! order the dashboard expects, so none of these should be reordered
//! casually.

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Headline numbers for the dashboard's KPI cards.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpis {
    pub total_trips: u64,
    pub avg_duration_min: f64,
    pub active_stations: u64,
    pub member_pct: f64,
}

/// Member/casual totals for one month.
#[derive(Debug, Serialize)]
pub struct MonthlyTripsRow {
    pub month: String,
    pub member: u64,
    pub casual: u64,
}

/// Member/casual totals for one weekday.
#[derive(Debug, Serialize)]
pub struct DayOfWeekRow {
    pub day: &'static str,
    pub member: u64,
    pub casual: u64,
}

/// Trip count for one (weekday, hour) cell.
#[derive(Debug, Serialize)]
pub struct HourlyByDayRow {
    pub day: &'static str,
    pub hour: u32,
    pub trips: u64,
}

/// One of the busiest stations, with its first-seen start coordinates.
#[derive(Debug, Serialize)]
pub struct TopStationRow {
    pub name: String,
    pub trips: u64,
    pub lat: f64,
    pub lng: f64,
}

/// Departure/arrival imbalance for one station.
#[derive(Debug, Serialize)]
pub struct StationFlowRow {
    pub name: String,
    pub departures: u64,
    pub arrivals: u64,
    pub net: i64,
}

/// Trip count for one ride-length bucket.
#[derive(Debug, Serialize)]
pub struct DurationBucketRow {
    pub bucket: &'static str,
    pub count: u64,
}

/// Volume and member/casual split for one municipality.
#[derive(Debug, Serialize)]
pub struct MunicipalityRow {
    pub municipality: &'static str,
    pub trips: u64,
    pub member: u64,
    pub casual: u64,
}

/// Overall member/casual totals.
#[derive(Debug, Serialize)]
pub struct UserTypeSplit {
    pub member: u64,
    pub casual: u64,
}

/// The municipalities the trend chart follows: the three busiest and the
/// three quietest, `"Other"` excluded from both.
#[derive(Debug, Serialize)]
pub struct TrendMunicipalities {
    pub top3: Vec<&'static str>,
    pub bottom3: Vec<&'static str>,
}

impl TrendMunicipalities {
    /// Union of both lists with duplicates removed, top-3 entries first.
    /// This is the column set of the monthly-by-municipality table.
    pub fn combined(&self) -> Vec<&'static str> {
        let mut all = self.top3.clone();
        for muni in &self.bottom3 {
            if !all.contains(muni) {
                all.push(muni);
            }
        }
        all
    }
}

/// One row of the monthly trend table. Municipality names become dynamic
/// JSON keys, so serialization is written out by hand: `month` first, then
/// one entry per trend municipality in ranked order.
#[derive(Debug)]
pub struct MonthlyByMunicipalityRow {
    pub month: String,
    pub counts: Vec<(&'static str, u64)>,
}

impl Serialize for MonthlyByMunicipalityRow {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1 + self.counts.len()))?;
        map.serialize_entry("month", &self.month)?;
        for (municipality, trips) in &self.counts {
            map.serialize_entry(municipality, trips)?;
        }
        map.end()
    }
}

/// Duration sums and counts per user type for one month. Sums are rounded
/// to one decimal; the dashboard divides them back into means.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyDurationRow {
    pub month: String,
    pub member_dur_sum: f64,
    pub member_dur_count: u64,
    pub casual_dur_sum: f64,
    pub casual_dur_count: u64,
}

/// Distinct active stations for one month.
#[derive(Debug, Serialize)]
pub struct MonthlyStationCountRow {
    pub month: String,
    pub count: u64,
}

/// Member/casual totals for one (month, weekday) cell.
#[derive(Debug, Serialize)]
pub struct MonthlyDayOfWeekRow {
    pub month: String,
    pub day: &'static str,
    pub member: u64,
    pub casual: u64,
}

/// Trip count for one (month, weekday, hour) cell.
#[derive(Debug, Serialize)]
pub struct MonthlyHourlyRow {
    pub month: String,
    pub day: &'static str,
    pub hour: u32,
    pub trips: u64,
}

/// Monthly volume for one station of the overall top-station cohort.
#[derive(Debug, Serialize)]
pub struct MonthlyTopStationRow {
    pub month: String,
    pub name: String,
    pub trips: u64,
}

/// Monthly flow for one station of the overall flow cohort.
#[derive(Debug, Serialize)]
pub struct MonthlyStationFlowRow {
    pub month: String,
    pub name: String,
    pub departures: u64,
    pub arrivals: u64,
    pub net: i64,
}

/// Trip count for one (month, ride-length bucket) cell.
#[derive(Debug, Serialize)]
pub struct MonthlyDurationDistRow {
    pub month: String,
    pub bucket: &'static str,
    pub count: u64,
}

/// Volume and member/casual split for one (month, municipality) cell.
#[derive(Debug, Serialize)]
pub struct MonthlyMunicipalityRow {
    pub month: String,
    pub municipality: &'static str,
    pub trips: u64,
    pub member: u64,
    pub casual: u64,
}

/// The complete dashboard document. Top-level key order is part of the
/// contract with the frontend and follows field order here.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub kpis: Kpis,
    pub monthly_trips: Vec<MonthlyTripsRow>,
    pub day_of_week: Vec<DayOfWeekRow>,
    pub hourly_by_day: Vec<HourlyByDayRow>,
    pub top_stations: Vec<TopStationRow>,
    pub station_flow: Vec<StationFlowRow>,
    pub duration_distribution: Vec<DurationBucketRow>,
    pub municipality_trips: Vec<MunicipalityRow>,
    pub user_type_split: UserTypeSplit,
    pub monthly_by_municipality: Vec<MonthlyByMunicipalityRow>,
    pub trend_municipalities: TrendMunicipalities,
    pub monthly_duration: Vec<MonthlyDurationRow>,
    pub monthly_station_count: Vec<MonthlyStationCountRow>,
    pub monthly_day_of_week: Vec<MonthlyDayOfWeekRow>,
    pub monthly_hourly_by_day: Vec<MonthlyHourlyRow>,
    pub monthly_top_stations: Vec<MonthlyTopStationRow>,
    pub monthly_station_flow: Vec<MonthlyStationFlowRow>,
    pub monthly_duration_dist: Vec<MonthlyDurationDistRow>,
    pub monthly_municipality_all: Vec<MonthlyMunicipalityRow>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monthly_by_municipality_serializes_month_first() {
        let row = MonthlyByMunicipalityRow {
            month: "2025-04".to_string(),
            counts: vec![("Boston", 120), ("Salem", 0)],
        };
        let json = serde_json::to_string(&row).unwrap();
        assert_eq!(json, r#"{"month":"2025-04","Boston":120,"Salem":0}"#);
    }

    #[test]
    fn test_combined_dedupes_preserving_top_order() {
        let trend = TrendMunicipalities {
            top3: vec!["Boston", "Cambridge", "Somerville"],
            bottom3: vec!["Somerville", "Salem", "Revere"],
        };
        assert_eq!(
            trend.combined(),
            vec!["Boston", "Cambridge", "Somerville", "Salem", "Revere"]
        );
    }

    #[test]
    fn test_kpis_use_camel_case_keys() {
        let kpis = Kpis {
            total_trips: 10,
            avg_duration_min: 12.5,
            active_stations: 3,
            member_pct: 70.0,
        };
        let json = serde_json::to_string(&kpis).unwrap();
        assert_eq!(
            json,
            r#"{"totalTrips":10,"avgDurationMin":12.5,"activeStations":3,"memberPct":70.0}"#
        );
    }
}
