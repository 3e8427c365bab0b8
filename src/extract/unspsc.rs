// src/extract/unspsc.rs

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

use crate::types::Version;

static TR_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("valid tr selector"));
static TD_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("valid td selector"));

/// Versioned attribute label, e.g. `UNSPSC (17.1001)`.
static VERSION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)UNSPSC\s*\(([\d.]+)\)").expect("valid version regex"));

/// A bare 6-8 digit classification code.
static CODE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6,8}$").expect("valid code regex"));

/// Label + code pairs in running text, for pages without an attribute table.
static TEXT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)UNSPSC\s*\(([\d.]+)\)[^\d]*?(\d{6,8})").expect("valid text regex")
});

/// One UNSPSC attribute row as it appears on the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnspscEntry {
    pub version: Version,
    pub feature: String,
    pub code: String,
}

/// Pick the UNSPSC entry to report: the highest version on the page, and
/// among rows tied on that version, the one lowest in the document. Vendor
/// pages repeat the current version with a corrected code at the bottom of
/// the attribute table, so the last occurrence is the one that counts.
pub fn extract_unspsc(doc: &Html, html: &str) -> Option<UnspscEntry> {
    let mut entries = table_entries(doc);
    if entries.is_empty() {
        entries = text_entries(html);
    }

    let max = entries.iter().map(|e| e.version.clone()).max()?;
    entries.into_iter().rev().find(|e| e.version == max)
}

/// Attribute-table rows, in document order. A row qualifies when its first
/// cell is a versioned `UNSPSC (...)` label (eClass and friends are skipped)
/// and its second cell is a bare code.
fn table_entries(doc: &Html) -> Vec<UnspscEntry> {
    let mut entries = Vec::new();
    for row in doc.select(&TR_SEL) {
        let cells: Vec<ElementRef> = row.select(&TD_SEL).collect();
        if cells.len() < 2 {
            continue;
        }
        let attr = cell_text(&cells[0]);
        let code = cell_text(&cells[1]);
        if !attr.to_uppercase().starts_with("UNSPSC") || !CODE_RE.is_match(&code) {
            continue;
        }
        if let Some(cap) = VERSION_RE.captures(&attr) {
            if let Some(version) = Version::parse(&cap[1]) {
                entries.push(UnspscEntry {
                    version,
                    feature: attr,
                    code,
                });
            }
        }
    }
    entries
}

fn text_entries(html: &str) -> Vec<UnspscEntry> {
    TEXT_RE
        .captures_iter(html)
        .filter_map(|cap| {
            Version::parse(&cap[1]).map(|version| UnspscEntry {
                feature: format!("UNSPSC ({})", &cap[1]),
                code: cap[2].to_string(),
                version,
            })
        })
        .collect()
}

/// Concatenated, per-fragment-trimmed text of a table cell.
fn cell_text(el: &ElementRef) -> String {
    el.text().map(str::trim).collect::<Vec<_>>().concat()
}
