//! Discovery and loading of the monthly trip CSV exports.
//!
//! Discovery and per-file schema problems are fatal; individual rows are
//! never worth failing a run over, so unreadable rows are skipped and
//! missing or unparseable values load as `None`.

use anyhow::{Context, Result, bail};
use csv::StringRecord;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::trips::RawTrip;

/// Finds all `*.csv` files in `dir`, sorted by filename so multi-month
/// datasets concatenate in calendar order.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir)
        .with_context(|| format!("cannot read input directory {}", dir.display()))?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && path.extension().and_then(|e| e.to_str()) == Some("csv") {
            files.push(path);
        }
    }
    files.sort_by_key(|p| p.file_name().map(|n| n.to_os_string()));

    if files.is_empty() {
        bail!("no trip files found in {}", dir.display());
    }
    Ok(files)
}

/// Reads every file and concatenates the rows, preserving order within and
/// across files.
pub fn load_all(files: &[PathBuf]) -> Result<Vec<RawTrip>> {
    let mut rows = Vec::new();
    for path in files {
        info!(file = %path.display(), "Reading trip file");
        let mut file_rows = read_trip_file(path)?;
        debug!(file = %path.display(), rows = file_rows.len(), "Trip file loaded");
        rows.append(&mut file_rows);
    }
    Ok(rows)
}

fn read_trip_file(path: &Path) -> Result<Vec<RawTrip>> {
    let file =
        File::open(path).with_context(|| format!("cannot open trip file {}", path.display()))?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let headers = reader
        .headers()
        .with_context(|| format!("cannot read header row of {}", path.display()))?
        .clone();
    let columns = ColumnIndex::from_headers(&headers, path)?;

    let mut rows = Vec::new();
    for (i, result) in reader.records().enumerate() {
        match result {
            Ok(record) => rows.push(columns.extract(&record)),
            Err(e) => {
                // +2: 1-based line numbers, after the header row
                warn!(file = %path.display(), line = i + 2, error = %e, "Skipping unreadable row");
            }
        }
    }
    Ok(rows)
}

/// Positions of the expected columns within one file's header row. Files may
/// carry extra columns (ride id, end coordinates); those are ignored.
struct ColumnIndex {
    started_at: usize,
    ended_at: usize,
    start_station_id: usize,
    end_station_id: usize,
    start_station_name: usize,
    end_station_name: usize,
    start_lat: usize,
    start_lng: usize,
    member_casual: usize,
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord, path: &Path) -> Result<ColumnIndex> {
        let find = |name: &str| {
            headers.iter().position(|h| h == name).with_context(|| {
                format!("{}: missing expected column `{}`", path.display(), name)
            })
        };
        Ok(ColumnIndex {
            started_at: find("started_at")?,
            ended_at: find("ended_at")?,
            start_station_id: find("start_station_id")?,
            end_station_id: find("end_station_id")?,
            start_station_name: find("start_station_name")?,
            end_station_name: find("end_station_name")?,
            start_lat: find("start_lat")?,
            start_lng: find("start_lng")?,
            member_casual: find("member_casual")?,
        })
    }

    fn extract(&self, record: &StringRecord) -> RawTrip {
        RawTrip {
            started_at: text(record, self.started_at),
            ended_at: text(record, self.ended_at),
            start_station_id: text(record, self.start_station_id),
            end_station_id: text(record, self.end_station_id),
            start_station_name: text(record, self.start_station_name),
            end_station_name: text(record, self.end_station_name),
            start_lat: number(record, self.start_lat),
            start_lng: number(record, self.start_lng),
            member_casual: text(record, self.member_casual),
        }
    }
}

fn text(record: &StringRecord, idx: usize) -> Option<String> {
    match record.get(idx) {
        None | Some("") => None,
        Some(s) => Some(s.to_string()),
    }
}

fn number(record: &StringRecord, idx: usize) -> Option<f64> {
    record.get(idx).and_then(|s| s.trim().parse().ok())
}
