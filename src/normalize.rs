// src/normalize.rs

use std::collections::HashSet;

use crate::types::{InputRow, NormalizedRow};

/// Trim urls, drop rows that are empty after trimming, and deduplicate by
/// exact string equality. First occurrence wins; original order is kept.
pub fn normalize(rows: Vec<InputRow>) -> Vec<NormalizedRow> {
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let url = row.url.trim();
        if url.is_empty() {
            continue;
        }
        if seen.insert(url.to_string()) {
            out.push(NormalizedRow {
                url: url.to_string(),
            });
        }
    }
    out
}
