//! The aggregation engine.
//!
//! [`build_summary`] computes every dashboard view over the enriched
//! records and assembles the output document. Views are independent
//! groupings over the same slice, with two shared inputs fixed up front:
//! the valid-duration subset, and the station/municipality cohorts that
//! the month-sliced views reuse verbatim.

pub mod dense;
pub mod monthly;
pub mod types;
pub mod util;
pub mod views;

use std::collections::BTreeSet;

use tracing::debug;

use crate::aggregate::types::DashboardSummary;
use crate::trips::Trip;

/// Day labels indexed by Sunday-based weekday number.
pub static DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// Monday-first display order over [`DAY_NAMES`] indices, Sunday last.
pub static DOW_DISPLAY_ORDER: [usize; 7] = [1, 2, 3, 4, 5, 6, 0];

/// Computes every view and assembles the final document.
pub fn build_summary(trips: &[Trip]) -> DashboardSummary {
    let months = month_labels(trips);
    let valid: Vec<&Trip> = trips.iter().filter(|t| t.has_valid_duration()).collect();
    debug!(
        trips = trips.len(),
        valid = valid.len(),
        months = months.len(),
        "Building summary"
    );

    let stations = views::station_stats(trips);
    let top_stations = views::top_stations(&stations);
    let station_flow = views::station_flow(&stations);
    let top_cohort: Vec<String> = top_stations.iter().map(|r| r.name.clone()).collect();
    let flow_cohort: Vec<String> = station_flow.iter().map(|r| r.name.clone()).collect();

    let municipality_trips = views::municipality_trips(trips);
    let trend_municipalities = views::trend_municipalities(&municipality_trips);
    let trend_cohort = trend_municipalities.combined();
    let muni_cohort: Vec<&'static str> =
        municipality_trips.iter().map(|r| r.municipality).collect();

    let (departures, arrivals) = monthly::station_tallies(trips);

    DashboardSummary {
        kpis: views::kpis(trips, &valid, stations.len() as u64),
        monthly_trips: views::monthly_trips(trips),
        day_of_week: views::day_of_week(trips),
        hourly_by_day: views::hourly_by_day(trips),
        duration_distribution: views::duration_distribution(&valid),
        user_type_split: views::user_type_split(trips),
        monthly_by_municipality: monthly::monthly_by_municipality(trips, &months, &trend_cohort),
        monthly_duration: monthly::monthly_duration(&valid, &months),
        monthly_station_count: monthly::monthly_station_count(trips, &months),
        monthly_day_of_week: monthly::monthly_day_of_week(trips, &months),
        monthly_hourly_by_day: monthly::monthly_hourly_by_day(trips, &months),
        monthly_top_stations: monthly::monthly_top_stations(
            &months,
            &top_cohort,
            &departures,
            &arrivals,
        ),
        monthly_station_flow: monthly::monthly_station_flow(
            &months,
            &flow_cohort,
            &departures,
            &arrivals,
        ),
        monthly_duration_dist: monthly::monthly_duration_dist(&valid, &months),
        monthly_municipality_all: monthly::monthly_municipality_all(trips, &months, &muni_cohort),
        top_stations,
        station_flow,
        municipality_trips,
        trend_municipalities,
    }
}

/// Distinct `YYYY-MM` labels present in the dataset, ascending.
fn month_labels(trips: &[Trip]) -> Vec<&str> {
    let months: BTreeSet<&str> = trips.iter().map(|t| t.month.as_str()).collect();
    months.into_iter().collect()
}
