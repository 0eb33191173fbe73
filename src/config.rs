//! Fixed run configuration.
//!
//! The tool is deliberately argument-less: it always reads the monthly trip
//! exports from [`DATA_DIR`] and writes the dashboard document to
//! [`OUT_FILE`], both relative to the working directory.

/// Directory containing the monthly trip CSV exports.
pub const DATA_DIR: &str = "BluebikeData_2025";

/// Path of the aggregated JSON document consumed by the dashboard.
pub const OUT_FILE: &str = "public/data/bluebikes-2025.json";

/// Trips are kept only when their raw start timestamp begins with this
/// prefix. One dataset covers exactly one year.
pub const YEAR_PREFIX: &str = "2025";
