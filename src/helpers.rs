//! Small parsing helpers shared by the source adapters.

use regex::Regex;
use std::sync::LazyLock;

static CHAPTER_NUMBER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(\.\d+)?").expect("valid chapter number regex"));

/// Truncates (not rounds) a number to three decimal places.
pub fn truncate_3(value: f64) -> f64 {
    (value * 1000.0).trunc() / 1000.0
}

/// First `\d+(\.\d+)?` match in a display name, e.g. `"Chapter 12.5"` gives `12.5`.
pub fn extract_chapter_number(name: &str) -> Option<f64> {
    CHAPTER_NUMBER_RE
        .find(name)
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parses a provider chapter/volume number, truncated to three decimals.
pub fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|n| n.is_finite()).map(truncate_3)
}

/// Blank and `unknown` volume labels collapse into volume `1`.
pub fn normalize_volume_label(raw: &str) -> String {
    let label = raw.trim();
    if label.is_empty() || label.eq_ignore_ascii_case("unknown") {
        "1".to_string()
    } else {
        label.to_string()
    }
}

/// Second-to-last non-empty path segment, e.g. the id in `/series/<id>/<slug>`.
pub fn second_to_last_segment(path: &str) -> Option<&str> {
    let mut segments = path.split('/').filter(|s| !s.is_empty()).rev();
    segments.next()?;
    segments.next()
}

pub fn last_segment(path: &str) -> Option<&str> {
    path.split('/').filter(|s| !s.is_empty()).next_back()
}

/// Collapses runs of whitespace left over by HTML text nodes.
pub fn clean_text(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}
