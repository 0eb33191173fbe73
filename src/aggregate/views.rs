//! Whole-dataset views.
//!
//! Each function here is an independent pass over the enriched records.
//! Ranked views use stable sorts on the count alone, so ties keep
//! first-appearance order and reruns over the same input produce identical
//! output.

use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::duration;
use crate::municipality::OTHER;
use crate::trips::Trip;

use super::dense::Tally;
use super::types::{
    DayOfWeekRow, DurationBucketRow, HourlyByDayRow, Kpis, MonthlyTripsRow, MunicipalityRow,
    StationFlowRow, TopStationRow, TrendMunicipalities, UserTypeSplit,
};
use super::util::{pct, round1};
use super::{DAY_NAMES, DOW_DISPLAY_ORDER};

/// Departure/arrival totals and first-seen start coordinates for one
/// station.
pub struct StationStat {
    pub name: String,
    pub departures: u64,
    pub arrivals: u64,
    pub coords: Option<(f64, f64)>,
}

impl StationStat {
    pub fn volume(&self) -> u64 {
        self.departures + self.arrivals
    }

    /// Arrivals minus departures; positive means the station fills up.
    pub fn net(&self) -> i64 {
        self.arrivals as i64 - self.departures as i64
    }
}

/// Accumulates per-station totals in one pass. A station enters the list
/// the first time its name appears (start endpoint before end endpoint
/// within a record), and that order is the tie-break for every ranking
/// built on top.
pub fn station_stats(trips: &[Trip]) -> Vec<StationStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<StationStat> = Vec::new();

    for trip in trips {
        if let Some(name) = trip.start_station_name.as_deref() {
            let i = slot(&mut index, &mut stats, name);
            stats[i].departures += 1;
            if stats[i].coords.is_none() {
                if let (Some(lat), Some(lng)) = (trip.start_lat, trip.start_lng) {
                    stats[i].coords = Some((lat, lng));
                }
            }
        }
        if let Some(name) = trip.end_station_name.as_deref() {
            let i = slot(&mut index, &mut stats, name);
            stats[i].arrivals += 1;
        }
    }
    stats
}

fn slot<'a>(
    index: &mut HashMap<&'a str, usize>,
    stats: &mut Vec<StationStat>,
    name: &'a str,
) -> usize {
    *index.entry(name).or_insert_with(|| {
        stats.push(StationStat {
            name: name.to_string(),
            departures: 0,
            arrivals: 0,
            coords: None,
        });
        stats.len() - 1
    })
}

/// Headline numbers. The average duration is taken over the valid-duration
/// subset only, and is zero when that subset is empty.
pub fn kpis(trips: &[Trip], valid: &[&Trip], active_stations: u64) -> Kpis {
    let total = trips.len() as u64;
    let members = trips.iter().filter(|t| t.is_member).count() as u64;

    let avg_duration_min = if valid.is_empty() {
        0.0
    } else {
        let sum: f64 = valid.iter().filter_map(|t| t.duration_min).sum();
        round1(sum / valid.len() as f64)
    };

    Kpis {
        total_trips: total,
        avg_duration_min,
        active_stations,
        member_pct: round1(pct(members, total)),
    }
}

/// Member/casual totals per month, months ascending.
pub fn monthly_trips(trips: &[Trip]) -> Vec<MonthlyTripsRow> {
    let mut by_month: BTreeMap<&str, (u64, u64)> = BTreeMap::new();
    for trip in trips {
        let counts = by_month.entry(trip.month.as_str()).or_insert((0, 0));
        if trip.is_member {
            counts.0 += 1;
        } else {
            counts.1 += 1;
        }
    }
    by_month
        .into_iter()
        .map(|(month, (member, casual))| MonthlyTripsRow {
            month: month.to_string(),
            member,
            casual,
        })
        .collect()
}

/// Member/casual totals per weekday, Monday first, all seven days present.
pub fn day_of_week(trips: &[Trip]) -> Vec<DayOfWeekRow> {
    let mut member = [0u64; 7];
    let mut casual = [0u64; 7];
    for trip in trips {
        let d = trip.day_of_week as usize;
        if trip.is_member {
            member[d] += 1;
        } else {
            casual[d] += 1;
        }
    }
    DOW_DISPLAY_ORDER
        .iter()
        .map(|&d| DayOfWeekRow {
            day: DAY_NAMES[d],
            member: member[d],
            casual: casual[d],
        })
        .collect()
}

/// Trips per (weekday, hour) pair, ordered by Sunday-based day index then
/// hour. Pairs with no trips are left out.
pub fn hourly_by_day(trips: &[Trip]) -> Vec<HourlyByDayRow> {
    let mut counts: BTreeMap<(u32, u32), u64> = BTreeMap::new();
    for trip in trips {
        *counts.entry((trip.day_of_week, trip.hour)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((day, hour), trips)| HourlyByDayRow {
            day: DAY_NAMES[day as usize],
            hour,
            trips,
        })
        .collect()
}

/// The 30 busiest stations by combined departures and arrivals. Stations
/// that never start a trip with coordinates report 0.0/0.0.
pub fn top_stations(stations: &[StationStat]) -> Vec<TopStationRow> {
    let mut ranked: Vec<&StationStat> = stations.iter().collect();
    ranked.sort_by_key(|s| Reverse(s.volume()));
    ranked
        .into_iter()
        .take(30)
        .map(|s| {
            let (lat, lng) = s.coords.unwrap_or((0.0, 0.0));
            TopStationRow {
                name: s.name.clone(),
                trips: s.volume(),
                lat,
                lng,
            }
        })
        .collect()
}

/// The 20 stations with the largest absolute departure/arrival imbalance.
pub fn station_flow(stations: &[StationStat]) -> Vec<StationFlowRow> {
    let mut ranked: Vec<&StationStat> = stations.iter().collect();
    ranked.sort_by_key(|s| Reverse(s.net().unsigned_abs()));
    ranked
        .into_iter()
        .take(20)
        .map(|s| StationFlowRow {
            name: s.name.clone(),
            departures: s.departures,
            arrivals: s.arrivals,
            net: s.net(),
        })
        .collect()
}

/// Trip counts per ride-length bucket over the valid-duration subset. All
/// seven buckets are present, in table order.
pub fn duration_distribution(valid: &[&Trip]) -> Vec<DurationBucketRow> {
    let mut tally = Tally::new();
    for trip in valid {
        if let Some(minutes) = trip.duration_min {
            tally.add(duration::bucket_label(minutes));
        }
    }
    duration::BUCKETS
        .iter()
        .map(|&(bucket, _)| DurationBucketRow {
            bucket,
            count: tally.get(&bucket),
        })
        .collect()
}

/// Volume and member/casual split per municipality, busiest first. Only
/// records with a start station name count here.
pub fn municipality_trips(trips: &[Trip]) -> Vec<MunicipalityRow> {
    let mut by_muni: BTreeMap<&'static str, (u64, u64, u64)> = BTreeMap::new();
    for trip in trips {
        if trip.start_station_name.is_none() {
            continue;
        }
        let counts = by_muni.entry(trip.municipality).or_insert((0, 0, 0));
        counts.0 += 1;
        if trip.is_member {
            counts.1 += 1;
        } else {
            counts.2 += 1;
        }
    }
    let mut rows: Vec<MunicipalityRow> = by_muni
        .into_iter()
        .map(|(municipality, (trips, member, casual))| MunicipalityRow {
            municipality,
            trips,
            member,
            casual,
        })
        .collect();
    rows.sort_by_key(|r| Reverse(r.trips));
    rows
}

/// The three busiest and three quietest municipalities from the ranked
/// list, skipping `"Other"`. With fewer than three named municipalities the
/// lists overlap rather than pad.
pub fn trend_municipalities(ranked: &[MunicipalityRow]) -> TrendMunicipalities {
    let named: Vec<&'static str> = ranked
        .iter()
        .map(|r| r.municipality)
        .filter(|m| *m != OTHER)
        .collect();
    TrendMunicipalities {
        top3: named.iter().take(3).copied().collect(),
        bottom3: named[named.len().saturating_sub(3)..].to_vec(),
    }
}

/// Overall member/casual totals.
pub fn user_type_split(trips: &[Trip]) -> UserTypeSplit {
    let member = trips.iter().filter(|t| t.is_member).count() as u64;
    UserTypeSplit {
        member,
        casual: trips.len() as u64 - member,
    }
}
