// src/sheet/write.rs

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::SheetError;
use crate::types::{OutputRow, RowResult};

/// Serialize results to `path` in input order, one row per result. Failed
/// rows are included, with `Not Found` in each cell that could not be
/// extracted.
pub fn write_results(path: &Path, results: &[RowResult]) -> Result<(), SheetError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(|e| SheetError::write(path, e))?;

    writer
        .write_record(OutputRow::HEADER)
        .map_err(|e| SheetError::write(path, e))?;
    for result in results {
        writer
            .serialize(OutputRow::from(result))
            .map_err(|e| SheetError::write(path, e))?;
    }
    writer.flush().map_err(|e| SheetError::write(path, e))?;

    info!(rows = results.len(), path = %path.display(), "wrote output");
    Ok(())
}

/// Where mid-run snapshots of a batch go, next to the final output.
pub fn checkpoint_path(output: &Path) -> PathBuf {
    output.with_extension("checkpoint.csv")
}
