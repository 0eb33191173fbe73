//! End-to-end batch run: discover, load, enrich, aggregate, write.

use anyhow::Result;
use std::path::Path;
use tracing::info;

use crate::aggregate::{self, types::DashboardSummary};
use crate::loader;
use crate::output;
use crate::trips;

/// What a completed run produced, for the caller's console summary.
#[derive(Debug)]
pub struct RunReport {
    pub files: usize,
    pub rows_loaded: usize,
    pub summary: DashboardSummary,
}

/// Runs the whole pipeline: reads every trip file under `data_dir`, keeps
/// rides whose start time carries `year_prefix`, computes all views, and
/// writes the document to `out_file`. Nothing is written unless every
/// stage before the write succeeds.
#[tracing::instrument(skip_all, fields(data_dir = %data_dir.display()))]
pub fn run(data_dir: &Path, out_file: &Path, year_prefix: &str) -> Result<RunReport> {
    let files = loader::discover_files(data_dir)?;
    info!(files = files.len(), "Found trip files");

    let rows = loader::load_all(&files)?;
    let rows_loaded = rows.len();
    info!(rows = rows_loaded, "Loaded raw rows");

    let dataset = trips::enrich(rows, year_prefix);
    info!(trips = dataset.len(), "Enriched dataset ready");

    let summary = aggregate::build_summary(&dataset);
    output::write_document(out_file, &summary)?;

    Ok(RunReport {
        files: files.len(),
        rows_loaded,
        summary,
    })
}
