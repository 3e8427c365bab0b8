// src/extract/mod.rs

pub mod part;
pub mod unspsc;

use scraper::Html;

use crate::error::{PageField, RowError};
use crate::types::RowResult;

/// Pull all target fields out of one fetched page. Deterministic for fixed
/// content, no retries; fields that were found stay populated even when the
/// row fails for a missing one.
pub fn extract_fields(url: &str, html: &str) -> RowResult {
    let doc = Html::parse_document(html);

    let part_number = part::extract_part(html, url);
    let unspsc = unspsc::extract_unspsc(&doc, html);

    let mut missing = Vec::new();
    if part_number.is_none() {
        missing.push(PageField::PartNumber);
    }
    if unspsc.is_none() {
        missing.push(PageField::UnspscCode);
    }

    let (feature, code, version) = match unspsc {
        Some(e) => (Some(e.feature), Some(e.code), Some(e.version)),
        None => (None, None, None),
    };

    RowResult {
        url: url.to_string(),
        part_number,
        feature,
        code,
        version,
        error: if missing.is_empty() {
            None
        } else {
            Some(RowError::MissingFields(missing))
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_PAGE: &str = r#"<html><body>
        <p>Part #: SS-4BMRG-TW</p>
        <table>
        <tr><td>UNSPSC (10.0)</td><td>40141609</td></tr>
        <tr><td>UNSPSC (17.1001)</td><td>40183102</td></tr>
        </table></body></html>"#;

    #[test]
    fn full_page_succeeds_with_all_three_values() {
        let result = extract_fields("http://vendor.example/p/SS-4BMRG-TW", FULL_PAGE);
        assert!(result.is_success());
        assert_eq!(result.part_number.as_deref(), Some("SS-4BMRG-TW"));
        assert_eq!(result.feature.as_deref(), Some("UNSPSC (17.1001)"));
        assert_eq!(result.code.as_deref(), Some("40183102"));
    }

    #[test]
    fn missing_code_fails_naming_the_code_field() {
        let html = "<p>Part #: SS-4BMRG-TW</p>";
        let result = extract_fields("http://vendor.example/x", html);
        assert_eq!(result.part_number.as_deref(), Some("SS-4BMRG-TW"));
        assert_eq!(
            result.error,
            Some(RowError::MissingFields(vec![PageField::UnspscCode]))
        );
    }

    #[test]
    fn missing_part_keeps_the_code() {
        let html = r#"<table><tr><td>UNSPSC (17.1001)</td><td>40183102</td></tr></table>"#;
        let result = extract_fields("http://vendor.example/x", html);
        assert_eq!(result.code.as_deref(), Some("40183102"));
        assert_eq!(
            result.error,
            Some(RowError::MissingFields(vec![PageField::PartNumber]))
        );
    }

    #[test]
    fn empty_page_names_both_fields() {
        let result = extract_fields("http://vendor.example/x", "<html></html>");
        assert_eq!(
            result.error,
            Some(RowError::MissingFields(vec![
                PageField::PartNumber,
                PageField::UnspscCode
            ]))
        );
    }
}
