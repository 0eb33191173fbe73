//! Persistence for the assembled dashboard document.

use anyhow::{Context, Result};
use tracing::info;

use crate::aggregate::types::DashboardSummary;
use std::fs;
use std::path::Path;

/// Serializes the document and writes it to `path`, creating parent
/// directories as needed.
///
/// Serialization happens fully in memory before the file is touched, so a
/// failing run never leaves a truncated document behind.
pub fn write_document(path: &Path, summary: &DashboardSummary) -> Result<()> {
    let body = serde_json::to_vec_pretty(summary).context("failed to serialize summary document")?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| {
                format!("failed to create output directory {}", parent.display())
            })?;
        }
    }
    fs::write(path, &body)
        .with_context(|| format!("failed to write output file {}", path.display()))?;

    info!(path = %path.display(), bytes = body.len(), "Wrote summary document");
    Ok(())
}
