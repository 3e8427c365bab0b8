// src/error.rs

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal spreadsheet errors. Any of these aborts the batch run.
#[derive(Debug, Error)]
pub enum SheetError {
    #[error("required column {0:?} not found in input header")]
    MissingColumn(String),

    #[error("input has no data rows")]
    EmptyFile,

    #[error("unsupported spreadsheet format {0:?} (expected .csv, .xlsx or .xls)")]
    UnsupportedFormat(String),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse input: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to open workbook: {0}")]
    Workbook(#[from] calamine::Error),

    #[error("failed to write output {path:?}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl SheetError {
    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }
}

/// Why a single row failed. These never abort the batch; they travel with
/// the row into the output and the summary counts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    #[error("invalid url {0:?}")]
    InvalidUrl(String),

    #[error("timeout after {0}s")]
    Timeout(u64),

    #[error("http status {0}")]
    Status(u16),

    #[error("connection error: {0}")]
    Connect(String),

    #[error("page is missing {}", join_fields(.0))]
    MissingFields(Vec<PageField>),
}

/// Fields the extractor looks for on a product page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageField {
    PartNumber,
    UnspscCode,
}

impl fmt::Display for PageField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageField::PartNumber => write!(f, "part number"),
            PageField::UnspscCode => write!(f, "UNSPSC code"),
        }
    }
}

fn join_fields(fields: &[PageField]) -> String {
    fields
        .iter()
        .map(PageField::to_string)
        .collect::<Vec<_>>()
        .join(" and ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_names_the_field() {
        let err = RowError::MissingFields(vec![PageField::UnspscCode]);
        assert_eq!(err.to_string(), "page is missing UNSPSC code");

        let both = RowError::MissingFields(vec![PageField::PartNumber, PageField::UnspscCode]);
        assert_eq!(both.to_string(), "page is missing part number and UNSPSC code");
    }
}
