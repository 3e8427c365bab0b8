// src/types.rs

use std::fmt;

use serde::Serialize;

use crate::error::RowError;

/// Placeholder written into output cells whose value could not be extracted.
pub const NOT_FOUND: &str = "Not Found";

/// One raw row as read from the input spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRow {
    pub url: String,
}

/// An input row after trimming and deduplication. No two normalized rows
/// share a url within one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedRow {
    pub url: String,
}

/// A dotted UNSPSC standard version, e.g. `17.1001`. Ordering is numeric
/// component-wise, so `17.1001 > 10.0 > 4.03`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Version(Vec<u32>);

impl Version {
    /// Parse a dotted version string. `None` when any component is not an
    /// unsigned integer, or the string is empty.
    pub fn parse(s: &str) -> Option<Self> {
        let parts: Result<Vec<u32>, _> = s.split('.').map(str::parse).collect();
        parts.ok().filter(|p| !p.is_empty()).map(Version)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Per-URL extraction outcome. Success iff `error` is `None`; fields that
/// were found stay populated even when the row failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowResult {
    pub url: String,
    pub part_number: Option<String>,
    /// Full UNSPSC attribute label, e.g. `UNSPSC (17.1001)`.
    pub feature: Option<String>,
    pub code: Option<String>,
    pub version: Option<Version>,
    pub error: Option<RowError>,
}

impl RowResult {
    /// A row that produced nothing, carrying the reason.
    pub fn failed(url: impl Into<String>, error: RowError) -> Self {
        Self {
            url: url.into(),
            part_number: None,
            feature: None,
            code: None,
            version: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// One output spreadsheet row, derived 1:1 from a `RowResult`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub part_number: String,
    pub feature: String,
    pub unspsc: String,
}

impl OutputRow {
    pub const HEADER: [&'static str; 3] = ["Part Number", "Feature", "UNSPSC"];
}

impl From<&RowResult> for OutputRow {
    fn from(r: &RowResult) -> Self {
        let cell = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_FOUND.to_string());
        Self {
            part_number: cell(&r.part_number),
            feature: cell(&r.feature),
            unspsc: cell(&r.code),
        }
    }
}
