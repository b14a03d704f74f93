//! Two-value range parsing (`500 #to 700` and `500-700`).

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static MARKER_REGEX: OnceLock<Regex> = OnceLock::new();
static DANGLING_MARKER_REGEX: OnceLock<Regex> = OnceLock::new();

fn marker_regex() -> &'static Regex {
    MARKER_REGEX.get_or_init(|| {
        Regex::new(r"(?i)^(.*?)\s*#to(?:\s+|$)(.*)$").expect("range marker regex is valid")
    })
}

fn dangling_marker_regex() -> &'static Regex {
    DANGLING_MARKER_REGEX
        .get_or_init(|| Regex::new(r"(?i)^(.+?)\s*#to\s*$").expect("dangling marker regex is valid"))
}

/// Both ends of a parsed range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeValue {
    pub value: String,
    pub value_to: String,
}

/// Parses a two-value range out of one value segment.
///
/// The `#to` marker form is always accepted. The dash form is only tried
/// when `is_confirmed` is true, so a value such as `500-7` that is still
/// being typed is not split early. Returns `None` when only one value is
/// present.
///
/// # Example
///
/// ```
/// use hashquery_rs::filter::parse_range;
///
/// let range = parse_range("500 #to 700", false).unwrap();
/// assert_eq!((range.value.as_str(), range.value_to.as_str()), ("500", "700"));
///
/// assert!(parse_range("500-700", true).is_some());
/// assert!(parse_range("500-700", false).is_none());
/// ```
pub fn parse_range(text: &str, is_confirmed: bool) -> Option<RangeValue> {
    let text = text.trim();

    if let Some(caps) = marker_regex().captures(text) {
        let value = caps.get(1).map_or("", |m| m.as_str()).trim();
        let value_to = caps.get(2).map_or("", |m| m.as_str()).trim();
        if !value.is_empty() && !value_to.is_empty() {
            return Some(RangeValue {
                value: value.to_string(),
                value_to: value_to.to_string(),
            });
        }
    }

    if is_confirmed {
        return split_on_dash(text);
    }

    None
}

/// Splits at the first dash that has text on its left, so a leading minus
/// sign stays with the lower bound.
fn split_on_dash(text: &str) -> Option<RangeValue> {
    let (index, _) = text.char_indices().skip(1).find(|&(_, c)| c == '-')?;
    let value = text[..index].trim();
    let value_to = text[index + 1..].trim();
    if value.is_empty() || value_to.is_empty() {
        return None;
    }
    Some(RangeValue {
        value: value.to_string(),
        value_to: value_to.to_string(),
    })
}

/// Returns the lower bound when `text` ends with a `#to` marker that has no
/// second value yet.
pub(crate) fn dangling_range_start(text: &str) -> Option<&str> {
    dangling_marker_regex()
        .captures(text.trim())
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
}
