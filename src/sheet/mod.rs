// src/sheet/mod.rs

pub mod read;
pub mod write;

use std::path::Path;

use crate::error::SheetError;

/// Input spreadsheet formats, detected by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetFormat {
    Csv,
    Excel,
}

impl SheetFormat {
    pub fn from_path(path: &Path) -> Result<Self, SheetError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "xls" => Ok(Self::Excel),
            other => Err(SheetError::UnsupportedFormat(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_format_case_insensitively() {
        assert_eq!(
            SheetFormat::from_path(Path::new("in.CSV")).unwrap(),
            SheetFormat::Csv
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("in.xlsx")).unwrap(),
            SheetFormat::Excel
        );
        assert_eq!(
            SheetFormat::from_path(Path::new("in.xls")).unwrap(),
            SheetFormat::Excel
        );
    }

    #[test]
    fn rejects_unknown_extension() {
        assert!(matches!(
            SheetFormat::from_path(Path::new("in.pdf")),
            Err(SheetError::UnsupportedFormat(_))
        ));
        assert!(matches!(
            SheetFormat::from_path(Path::new("no_extension")),
            Err(SheetError::UnsupportedFormat(_))
        ));
    }
}
