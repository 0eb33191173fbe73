//! Month-sliced views.
//!
//! Each view here re-slices its whole-dataset counterpart per calendar
//! month and materializes the full month × category grid, zeros included,
//! so the frontend can index cells positionally. Station and municipality
//! cohorts are fixed by the whole-dataset rankings and reused verbatim,
//! never re-ranked per month, so months stay comparable.

use std::collections::{HashMap, HashSet};

use crate::duration;
use crate::trips::Trip;

use super::dense::Tally;
use super::types::{
    MonthlyByMunicipalityRow, MonthlyDayOfWeekRow, MonthlyDurationDistRow, MonthlyDurationRow,
    MonthlyHourlyRow, MonthlyMunicipalityRow, MonthlyStationCountRow, MonthlyStationFlowRow,
    MonthlyTopStationRow,
};
use super::util::round1;
use super::{DAY_NAMES, DOW_DISPLAY_ORDER};

/// Trip counts per (month, trend municipality), months ascending, rows
/// restricted to records with a start station name.
pub fn monthly_by_municipality(
    trips: &[Trip],
    months: &[&str],
    cohort: &[&'static str],
) -> Vec<MonthlyByMunicipalityRow> {
    let mut tally = Tally::new();
    for trip in trips {
        if trip.start_station_name.is_none() {
            continue;
        }
        tally.add((trip.month.as_str(), trip.municipality));
    }
    months
        .iter()
        .map(|&month| MonthlyByMunicipalityRow {
            month: month.to_string(),
            counts: cohort
                .iter()
                .map(|&muni| (muni, tally.get(&(month, muni))))
                .collect(),
        })
        .collect()
}

/// Duration sums and counts per (month, user type) over the valid-duration
/// subset. Sums are rounded to one decimal place.
pub fn monthly_duration(valid: &[&Trip], months: &[&str]) -> Vec<MonthlyDurationRow> {
    let mut sums: HashMap<(&str, bool), (f64, u64)> = HashMap::new();
    for trip in valid {
        if let Some(minutes) = trip.duration_min {
            let slot = sums
                .entry((trip.month.as_str(), trip.is_member))
                .or_insert((0.0, 0));
            slot.0 += minutes;
            slot.1 += 1;
        }
    }
    months
        .iter()
        .map(|&month| {
            let (member_sum, member_count) = sums.get(&(month, true)).copied().unwrap_or((0.0, 0));
            let (casual_sum, casual_count) = sums.get(&(month, false)).copied().unwrap_or((0.0, 0));
            MonthlyDurationRow {
                month: month.to_string(),
                member_dur_sum: round1(member_sum),
                member_dur_count: member_count,
                casual_dur_sum: round1(casual_sum),
                casual_dur_count: casual_count,
            }
        })
        .collect()
}

/// Distinct station names active per month, counting both endpoints.
pub fn monthly_station_count(trips: &[Trip], months: &[&str]) -> Vec<MonthlyStationCountRow> {
    let mut stations: HashMap<&str, HashSet<&str>> = HashMap::new();
    for trip in trips {
        for name in [trip.start_station_name.as_deref(), trip.end_station_name.as_deref()] {
            if let Some(name) = name {
                stations.entry(trip.month.as_str()).or_default().insert(name);
            }
        }
    }
    months
        .iter()
        .map(|&month| MonthlyStationCountRow {
            month: month.to_string(),
            count: stations.get(month).map_or(0, |set| set.len() as u64),
        })
        .collect()
}

/// Member/casual totals per (month, weekday), Monday-first day order within
/// each month, zero-filled.
pub fn monthly_day_of_week(trips: &[Trip], months: &[&str]) -> Vec<MonthlyDayOfWeekRow> {
    let mut tally = Tally::new();
    for trip in trips {
        tally.add((trip.month.as_str(), trip.day_of_week, trip.is_member));
    }
    let mut rows = Vec::with_capacity(months.len() * DAY_NAMES.len());
    for &month in months {
        for &day in &DOW_DISPLAY_ORDER {
            rows.push(MonthlyDayOfWeekRow {
                month: month.to_string(),
                day: DAY_NAMES[day],
                member: tally.get(&(month, day as u32, true)),
                casual: tally.get(&(month, day as u32, false)),
            });
        }
    }
    rows
}

/// Trip counts per (month, weekday, hour), all 7 × 24 cells per month. Days
/// run in Sunday-based index order here, unlike the weekday views.
pub fn monthly_hourly_by_day(trips: &[Trip], months: &[&str]) -> Vec<MonthlyHourlyRow> {
    let mut tally = Tally::new();
    for trip in trips {
        tally.add((trip.month.as_str(), trip.day_of_week, trip.hour));
    }
    let mut rows = Vec::with_capacity(months.len() * 7 * 24);
    for &month in months {
        for day in 0..7u32 {
            for hour in 0..24u32 {
                rows.push(MonthlyHourlyRow {
                    month: month.to_string(),
                    day: DAY_NAMES[day as usize],
                    hour,
                    trips: tally.get(&(month, day, hour)),
                });
            }
        }
    }
    rows
}

/// Per-month departure and arrival tallies keyed by station name, shared by
/// the monthly top-station and flow views.
pub fn station_tallies<'a>(
    trips: &'a [Trip],
) -> (Tally<(&'a str, &'a str)>, Tally<(&'a str, &'a str)>) {
    let mut departures = Tally::new();
    let mut arrivals = Tally::new();
    for trip in trips {
        if let Some(name) = trip.start_station_name.as_deref() {
            departures.add((trip.month.as_str(), name));
        }
        if let Some(name) = trip.end_station_name.as_deref() {
            arrivals.add((trip.month.as_str(), name));
        }
    }
    (departures, arrivals)
}

/// Monthly volumes for the overall top-station cohort, every station in
/// every month.
pub fn monthly_top_stations<'a>(
    months: &[&'a str],
    cohort: &'a [String],
    departures: &Tally<(&'a str, &'a str)>,
    arrivals: &Tally<(&'a str, &'a str)>,
) -> Vec<MonthlyTopStationRow> {
    let mut rows = Vec::with_capacity(months.len() * cohort.len());
    for &month in months {
        for name in cohort {
            let key = (month, name.as_str());
            rows.push(MonthlyTopStationRow {
                month: month.to_string(),
                name: name.clone(),
                trips: departures.get(&key) + arrivals.get(&key),
            });
        }
    }
    rows
}

/// Monthly flows for the overall flow cohort, every station in every month.
pub fn monthly_station_flow<'a>(
    months: &[&'a str],
    cohort: &'a [String],
    departures: &Tally<(&'a str, &'a str)>,
    arrivals: &Tally<(&'a str, &'a str)>,
) -> Vec<MonthlyStationFlowRow> {
    let mut rows = Vec::with_capacity(months.len() * cohort.len());
    for &month in months {
        for name in cohort {
            let key = (month, name.as_str());
            let dep = departures.get(&key);
            let arr = arrivals.get(&key);
            rows.push(MonthlyStationFlowRow {
                month: month.to_string(),
                name: name.clone(),
                departures: dep,
                arrivals: arr,
                net: arr as i64 - dep as i64,
            });
        }
    }
    rows
}

/// Trip counts per (month, ride-length bucket) over the valid-duration
/// subset, all seven buckets per month.
pub fn monthly_duration_dist(valid: &[&Trip], months: &[&str]) -> Vec<MonthlyDurationDistRow> {
    let mut tally = Tally::new();
    for trip in valid {
        if let Some(minutes) = trip.duration_min {
            tally.add((trip.month.as_str(), duration::bucket_label(minutes)));
        }
    }
    let mut rows = Vec::with_capacity(months.len() * duration::BUCKETS.len());
    for &month in months {
        for &(bucket, _) in duration::BUCKETS {
            rows.push(MonthlyDurationDistRow {
                month: month.to_string(),
                bucket,
                count: tally.get(&(month, bucket)),
            });
        }
    }
    rows
}

/// Volume and member/casual split per (month, municipality) for every
/// municipality in the ranked list, zero-filled, start-station-gated like
/// its parent view.
pub fn monthly_municipality_all(
    trips: &[Trip],
    months: &[&str],
    cohort: &[&'static str],
) -> Vec<MonthlyMunicipalityRow> {
    let mut tally = Tally::new();
    for trip in trips {
        if trip.start_station_name.is_none() {
            continue;
        }
        tally.add((trip.month.as_str(), trip.municipality, trip.is_member));
    }
    let mut rows = Vec::with_capacity(months.len() * cohort.len());
    for &month in months {
        for &municipality in cohort {
            let member = tally.get(&(month, municipality, true));
            let casual = tally.get(&(month, municipality, false));
            rows.push(MonthlyMunicipalityRow {
                month: month.to_string(),
                municipality,
                trips: member + casual,
                member,
                casual,
            });
        }
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trip(month: &str, day: u32, hour: u32, member: bool) -> Trip {
        Trip {
            start_station_name: Some("Alpha".to_string()),
            end_station_name: Some("Beta".to_string()),
            start_lat: None,
            start_lng: None,
            duration_min: Some(10.0),
            month: month.to_string(),
            day_of_week: day,
            hour,
            is_member: member,
            municipality: "Boston",
        }
    }

    #[test]
    fn test_monthly_by_municipality_zero_fills_cohort() {
        let trips = vec![trip("2025-01", 1, 8, true), trip("2025-02", 1, 8, false)];
        let rows = monthly_by_municipality(&trips, &["2025-01", "2025-02"], &["Boston", "Salem"]);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].month, "2025-01");
        assert_eq!(rows[0].counts, vec![("Boston", 1), ("Salem", 0)]);
        assert_eq!(rows[1].counts, vec![("Boston", 1), ("Salem", 0)]);
    }

    #[test]
    fn test_monthly_duration_sums_and_counts() {
        let mut long = trip("2025-01", 1, 8, true);
        long.duration_min = Some(22.5);
        let trips = vec![trip("2025-01", 1, 8, true), long, trip("2025-01", 1, 8, false)];
        let valid: Vec<&Trip> = trips.iter().collect();

        let rows = monthly_duration(&valid, &["2025-01", "2025-02"]);
        assert_eq!(rows[0].member_dur_sum, 32.5);
        assert_eq!(rows[0].member_dur_count, 2);
        assert_eq!(rows[0].casual_dur_sum, 10.0);
        assert_eq!(rows[0].casual_dur_count, 1);
        // Months with no valid trips still get a row.
        assert_eq!(rows[1].month, "2025-02");
        assert_eq!(rows[1].member_dur_count, 0);
        assert_eq!(rows[1].member_dur_sum, 0.0);
    }

    #[test]
    fn test_monthly_station_count_distinct_over_both_endpoints() {
        let mut back = trip("2025-01", 1, 9, true);
        back.start_station_name = Some("Beta".to_string());
        back.end_station_name = Some("Alpha".to_string());
        let trips = vec![trip("2025-01", 1, 8, true), back];

        let rows = monthly_station_count(&trips, &["2025-01", "2025-02"]);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[1].count, 0);
    }

    #[test]
    fn test_monthly_day_of_week_grid_shape() {
        let rows = monthly_day_of_week(&[trip("2025-01", 0, 8, true)], &["2025-01", "2025-02"]);
        assert_eq!(rows.len(), 14);
        assert_eq!(rows[0].day, "Mon");
        // Sunday sits last within the month block.
        assert_eq!(rows[6].day, "Sun");
        assert_eq!(rows[6].member, 1);
        assert!(rows[7..].iter().all(|r| r.member == 0 && r.casual == 0));
    }

    #[test]
    fn test_monthly_hourly_by_day_dense_grid() {
        let rows = monthly_hourly_by_day(&[trip("2025-01", 3, 17, true)], &["2025-01"]);
        assert_eq!(rows.len(), 7 * 24);
        assert_eq!(rows[0].day, "Sun");
        assert_eq!(rows[0].hour, 0);
        let hit = &rows[3 * 24 + 17];
        assert_eq!(hit.day, "Wed");
        assert_eq!(hit.trips, 1);
        assert_eq!(rows.iter().map(|r| r.trips).sum::<u64>(), 1);
    }

    #[test]
    fn test_monthly_top_stations_use_fixed_cohort() {
        let trips = vec![trip("2025-01", 1, 8, true), trip("2025-02", 1, 8, true)];
        let (dep, arr) = station_tallies(&trips);
        let cohort = vec!["Alpha".to_string()];

        let rows = monthly_top_stations(&["2025-01", "2025-02"], &cohort, &dep, &arr);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].trips, 1);
        assert_eq!(rows[1].trips, 1);
    }

    #[test]
    fn test_monthly_station_flow_nets_per_month() {
        let mut back = trip("2025-02", 1, 9, true);
        back.start_station_name = Some("Beta".to_string());
        back.end_station_name = Some("Alpha".to_string());
        let trips = vec![trip("2025-01", 1, 8, true), back];
        let (dep, arr) = station_tallies(&trips);
        let cohort = vec!["Alpha".to_string()];

        let rows = monthly_station_flow(&["2025-01", "2025-02"], &cohort, &dep, &arr);
        assert_eq!(rows[0].departures, 1);
        assert_eq!(rows[0].arrivals, 0);
        assert_eq!(rows[0].net, -1);
        assert_eq!(rows[1].departures, 0);
        assert_eq!(rows[1].arrivals, 1);
        assert_eq!(rows[1].net, 1);
    }

    #[test]
    fn test_monthly_duration_dist_grid_shape() {
        let trips = vec![trip("2025-01", 1, 8, true)];
        let valid: Vec<&Trip> = trips.iter().collect();
        let rows = monthly_duration_dist(&valid, &["2025-01", "2025-02"]);

        assert_eq!(rows.len(), 14);
        assert_eq!(rows[1].bucket, "5-10 min");
        assert_eq!(rows[1].count, 1);
        assert_eq!(rows.iter().map(|r| r.count).sum::<u64>(), 1);
    }

    #[test]
    fn test_monthly_municipality_all_zero_fills() {
        let mut cambridge = trip("2025-02", 1, 8, false);
        cambridge.municipality = "Cambridge";
        let trips = vec![trip("2025-01", 1, 8, true), cambridge];

        let rows =
            monthly_municipality_all(&trips, &["2025-01", "2025-02"], &["Boston", "Cambridge"]);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].municipality, "Boston");
        assert_eq!(rows[0].trips, 1);
        assert_eq!(rows[0].member, 1);
        assert_eq!(rows[1].municipality, "Cambridge");
        assert_eq!(rows[1].trips, 0);
        assert_eq!(rows[3].casual, 1);
    }
}
