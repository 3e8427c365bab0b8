// src/extract/part.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// `Part #:` label in the raw page, tolerating one markup tag between the
/// label and the value.
static PART_LABEL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)Part\s*#\s*:\s*(?:<[^>]+>)?\s*([A-Z0-9][A-Z0-9.\-_/]*)")
        .expect("valid part label regex")
});

/// Part candidates embedded in product URLs: `/p/<part>` or `?part=<part>`.
static URL_PART_RES: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"(?i)/p/([A-Z0-9.\-_/%]+)", r"(?i)[?&]part=([A-Z0-9.\-_/%]+)"]
        .iter()
        .map(|p| Regex::new(p).expect("valid url part regex"))
        .collect()
});

/// Strings that match the part-number shape but never are one.
const EXCLUDED: &[&str] = &["charset", "utf", "html", "http"];

/// Extract the part number from page text, cross-checked against a part
/// candidate embedded in the URL when one exists. With a URL candidate
/// present, a label match counts only if both agree after separator
/// stripping; the URL candidate itself is the fallback.
pub fn extract_part(html: &str, url: &str) -> Option<String> {
    let url_part = part_from_url(url);

    for cap in PART_LABEL_RE.captures_iter(html) {
        let candidate = cap[1].trim();
        if candidate.is_empty() {
            continue;
        }
        match &url_part {
            Some(expected) if canonical(candidate) == canonical(expected) => {
                return Some(candidate.to_string());
            }
            Some(_) => continue,
            None if is_plausible_part(candidate) => return Some(candidate.to_string()),
            None => continue,
        }
    }

    url_part.filter(|p| is_plausible_part(p))
}

fn part_from_url(url: &str) -> Option<String> {
    for re in URL_PART_RES.iter() {
        if let Some(cap) = re.captures(url) {
            let part = cap[1].replace("%252F", "/").replace("%2F", "/");
            return Some(part.trim().to_string());
        }
    }
    None
}

/// Comparison key ignoring case and separator punctuation, so
/// `SS-4BMRG-TW` and `SS.4BMRG.TW` match.
fn canonical(part: &str) -> String {
    part.chars()
        .filter(|c| !matches!(c, '.' | '-' | '/'))
        .collect::<String>()
        .to_lowercase()
}

/// Shape check for part candidates. Letters anywhere qualify; all-digit
/// strings must be longer than 3 to rule out table indices and years.
pub fn is_plausible_part(part: &str) -> bool {
    let len = part.len();
    if !(2..=100).contains(&len) {
        return false;
    }
    let has_alpha = part.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = part.chars().any(|c| c.is_ascii_digit());
    if !(has_alpha || (has_digit && len > 3)) {
        return false;
    }
    let lower = part.to_lowercase();
    !EXCLUDED.iter().any(|kw| lower.contains(kw))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_part_label() {
        let html = "<p>Part #: SS-4BMRG-TW</p>";
        assert_eq!(
            extract_part(html, "http://vendor.example/product"),
            Some("SS-4BMRG-TW".to_string())
        );
    }

    #[test]
    fn tolerates_tag_between_label_and_value() {
        let html = "Part #: <strong>SS-400-SET</strong>";
        assert_eq!(
            extract_part(html, "http://vendor.example/product"),
            Some("SS-400-SET".to_string())
        );
    }

    #[test]
    fn url_candidate_vetoes_mismatched_label() {
        let html = "<p>Part #: OTHER-99</p>";
        let url = "http://vendor.example/p/SS-4BMRG-TW";
        // Label disagrees with the URL part, so the URL part wins.
        assert_eq!(extract_part(html, url), Some("SS-4BMRG-TW".to_string()));
    }

    #[test]
    fn url_candidate_confirms_matching_label() {
        let html = "<p>Part #: SS.4BMRG.TW</p>";
        let url = "http://vendor.example/catalog?part=SS-4BMRG-TW";
        assert_eq!(extract_part(html, url), Some("SS.4BMRG.TW".to_string()));
    }

    #[test]
    fn percent_encoded_slash_is_decoded() {
        let html = "";
        let url = "http://vendor.example/p/SS-8-VCR-9%2F16";
        assert_eq!(extract_part(html, url), Some("SS-8-VCR-9/16".to_string()));
    }

    #[test]
    fn no_part_anywhere_is_none() {
        assert_eq!(extract_part("<p>no labels here</p>", "http://vendor.example/x"), None);
    }

    #[test]
    fn plausibility_rules() {
        assert!(is_plausible_part("SS-4BMRG-TW"));
        assert!(is_plausible_part("1234"));
        assert!(!is_plausible_part("123"));
        assert!(!is_plausible_part("A"));
        assert!(!is_plausible_part("utf-8"));
        assert!(!is_plausible_part("charset"));
    }
}
