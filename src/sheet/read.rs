// src/sheet/read.rs

use std::fs::File;
use std::path::Path;

use calamine::{open_workbook_auto, DataType, Reader};
use tracing::info;

use super::SheetFormat;
use crate::error::SheetError;
use crate::types::InputRow;

/// Load the input spreadsheet and pull the URL column out of it.
///
/// The header row must contain a cell exactly equal to `url_column`; the
/// check happens once here so a misnamed file fails before any fetching.
pub fn load_rows(path: &Path, url_column: &str) -> Result<Vec<InputRow>, SheetError> {
    let (header, rows) = match SheetFormat::from_path(path)? {
        SheetFormat::Csv => read_csv(path)?,
        SheetFormat::Excel => read_excel(path)?,
    };

    let col = header
        .iter()
        .position(|h| h == url_column)
        .ok_or_else(|| SheetError::MissingColumn(url_column.to_string()))?;

    if rows.is_empty() {
        return Err(SheetError::EmptyFile);
    }

    info!(rows = rows.len(), column = %url_column, path = %path.display(), "loaded input");
    Ok(rows
        .into_iter()
        .map(|r| InputRow {
            url: r.get(col).cloned().unwrap_or_default(),
        })
        .collect())
}

fn read_csv(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), SheetError> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(file);

    let header: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok((header, rows))
}

fn read_excel(path: &Path) -> Result<(Vec<String>, Vec<Vec<String>>), SheetError> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or(SheetError::EmptyFile)?;
    let range = workbook
        .worksheet_range(&sheet)
        .ok_or(SheetError::EmptyFile)??;

    let mut rows_iter = range.rows();
    let header: Vec<String> = rows_iter
        .next()
        .ok_or(SheetError::EmptyFile)?
        .iter()
        .map(|cell: &DataType| cell.to_string().trim().to_string())
        .collect();
    let rows = rows_iter
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect();
    Ok((header, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn csv_file(content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_url_column_in_order() {
        let file = csv_file("Name,URL\nfitting,http://a.example/1\nvalve,http://a.example/2\n");
        let rows = load_rows(file.path(), "URL").unwrap();
        let urls: Vec<&str> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["http://a.example/1", "http://a.example/2"]);
    }

    #[test]
    fn missing_column_is_fatal() {
        let file = csv_file("Link\nhttp://a.example/1\n");
        assert!(matches!(
            load_rows(file.path(), "URL"),
            Err(SheetError::MissingColumn(c)) if c == "URL"
        ));
    }

    #[test]
    fn column_match_is_exact() {
        let file = csv_file("url\nhttp://a.example/1\n");
        assert!(matches!(
            load_rows(file.path(), "URL"),
            Err(SheetError::MissingColumn(_))
        ));
    }

    #[test]
    fn header_only_file_is_empty() {
        let file = csv_file("URL\n");
        assert!(matches!(load_rows(file.path(), "URL"), Err(SheetError::EmptyFile)));
    }

    #[test]
    fn short_rows_become_blank_urls() {
        let file = csv_file("Name,URL\nonly-name\nvalve,http://a.example/2\n");
        let rows = load_rows(file.path(), "URL").unwrap();
        assert_eq!(rows[0].url, "");
        assert_eq!(rows[1].url, "http://a.example/2");
    }
}
