//! Maps a station to the municipality it belongs to.
//!
//! Resolution is a two-tier lookup, first match wins: the station ID's
//! 3-character prefix against a fixed table, then case-insensitive name
//! keywords against an ordered rule list. Stations matching neither tier
//! land in the `"Other"` bucket.

/// Station-ID prefix (exactly 3 characters) to municipality.
static PREFIX_MUNICIPALITY: &[(&str, &str)] = &[
    ("A32", "Boston"),
    ("B32", "Boston"),
    ("BCB", "Hingham"),
    ("C23", "Boston"),
    ("C32", "Boston"),
    ("D32", "Boston"),
    ("E32", "Boston"),
    ("F32", "Medford"),
    ("G32", "Malden"),
    ("H32", "Chelsea"),
    ("K32", "Brookline"),
    ("L32", "Arlington"),
    ("M32", "Cambridge"),
    ("N32", "Newton"),
    ("R32", "Revere"),
    ("S32", "Somerville"),
    ("T32", "Salem"),
    ("V32", "Everett"),
    ("W32", "Watertown"),
    ("X32", "Boston"),
    ("Z32", "Boston"),
    ("ZZ3", "Somerville"),
];

/// Name-keyword rules, evaluated in order. Keyword sets are not mutually
/// exclusive (a compound name can mention two municipalities), so the first
/// listed rule wins. Keywords with a trailing space ("mit ", "harvard ")
/// only match the word-plus-separator form.
static KEYWORD_MUNICIPALITY: &[(&[&str], &str)] = &[
    (
        &["cambridge", "mit ", "harvard ", "kendall", "central sq", "porter sq", "inman"],
        "Cambridge",
    ),
    (&["somerville", "davis sq", "union sq", "magoun"], "Somerville"),
    (&["brookline", "coolidge corner", "washington sq"], "Brookline"),
    (&["watertown"], "Watertown"),
    (&["everett"], "Everett"),
    (&["arlington"], "Arlington"),
    (&["newton"], "Newton"),
    (&["medford"], "Medford"),
    (&["revere"], "Revere"),
    (&["salem"], "Salem"),
];

/// Fallback when neither tier matches.
pub const OTHER: &str = "Other";

/// Resolves a station's municipality from its ID and name.
///
/// Pure and deterministic: the same `(id, name)` pair always yields the same
/// municipality. Callers pass the start-station fields only.
pub fn resolve(station_id: Option<&str>, station_name: Option<&str>) -> &'static str {
    // `get` rather than slicing: IDs shorter than 3 bytes (or with a
    // multi-byte character straddling the cut) simply skip this tier.
    if let Some(prefix) = station_id.and_then(|id| id.get(..3)) {
        if let Some((_, muni)) = PREFIX_MUNICIPALITY.iter().find(|(p, _)| *p == prefix) {
            return muni;
        }
    }

    if let Some(name) = station_name {
        let lower = name.to_lowercase();
        for (keywords, muni) in KEYWORD_MUNICIPALITY {
            if keywords.iter().any(|k| lower.contains(k)) {
                return muni;
            }
        }
    }

    OTHER
}
