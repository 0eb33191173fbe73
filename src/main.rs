//! CLI entry point for the Bluebikes rollup tool.
//!
//! Takes no arguments by design: it reads the season's monthly trip CSVs
//! from the fixed data directory, writes the aggregated dashboard JSON to
//! the fixed output path the frontend imports, and prints a short run
//! summary to stdout. Diagnostics go to stderr via `RUST_LOG`.

use anyhow::Result;
use bluebikes_rollup::config::{DATA_DIR, OUT_FILE, YEAR_PREFIX};
use bluebikes_rollup::pipeline;
use std::path::Path;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse().unwrap()));

    tracing_subscriber::registry().with(stderr_layer).init();

    let report = pipeline::run(Path::new(DATA_DIR), Path::new(OUT_FILE), YEAR_PREFIX)?;
    let kpis = &report.summary.kpis;
    let municipalities: Vec<&str> = report
        .summary
        .municipality_trips
        .iter()
        .map(|r| r.municipality)
        .collect();

    println!("Found {} trip files, {} rows", report.files, report.rows_loaded);
    println!("Total trips: {}", kpis.total_trips);
    println!("Active stations: {}", kpis.active_stations);
    println!("Avg duration: {} min", kpis.avg_duration_min);
    println!("Member share: {}%", kpis.member_pct);
    println!("Municipalities: {}", municipalities.join(", "));
    println!("Done! Output written to {OUT_FILE}");

    Ok(())
}
