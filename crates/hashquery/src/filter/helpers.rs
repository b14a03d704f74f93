//! Shared helpers for hashtag pattern detection and normalization.

use std::sync::OnceLock;

use regex::Regex;

use super::ast::JoinOperator;

/// Marker committing the typed pattern. Only valid at the end of input.
pub const CONFIRM_MARKER: &str = "##";

/// Trailing hash after a finished value, asking for the join selector.
pub const JOIN_TRIGGER: &str = " #";

/// Opens an explicit group.
pub const GROUP_OPEN: &str = "#(";

/// Closes an explicit group.
pub const GROUP_CLOSE: &str = "#)";

static JOIN_REGEX: OnceLock<Regex> = OnceLock::new();
static JOIN_THEN_HASH_REGEX: OnceLock<Regex> = OnceLock::new();
static FIRST_OPERATOR_REGEX: OnceLock<Regex> = OnceLock::new();
static SAME_COLUMN_OPERATOR_REGEX: OnceLock<Regex> = OnceLock::new();
static MULTI_COLUMN_OPERATOR_REGEX: OnceLock<Regex> = OnceLock::new();

fn join_regex() -> &'static Regex {
    JOIN_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:^|\s)#(and|or)\b").expect("join keyword regex is valid")
    })
}

fn join_then_hash_regex() -> &'static Regex {
    JOIN_THEN_HASH_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:^|\s)#(?:and|or)\s+#$").expect("join trigger regex is valid")
    })
}

fn first_operator_regex() -> &'static Regex {
    FIRST_OPERATOR_REGEX.get_or_init(|| {
        Regex::new(r"^#[^\s#]+\s+#([^\s#]*)$").expect("first operator regex is valid")
    })
}

fn same_column_operator_regex() -> &'static Regex {
    SAME_COLUMN_OPERATOR_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:^|\s)#(?:and|or)\s+#([^\s#]*)$")
            .expect("same-column operator regex is valid")
    })
}

fn multi_column_operator_regex() -> &'static Regex {
    MULTI_COLUMN_OPERATOR_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(?:^|\s)#(?:and|or)\s+#[^\s#]+\s+#([^\s#]*)$")
            .expect("multi-column operator regex is valid")
    })
}

/// Counts the `#and` / `#or` join keywords in `text`.
///
/// Keywords are case-insensitive and must stand alone: `#order` is not a
/// join.
///
/// # Example
///
/// ```
/// use hashquery_rs::filter::count_joins;
///
/// assert_eq!(count_joins("#a #eq 1 #AND #b #eq 2 #or #c #eq 3"), 2);
/// assert_eq!(count_joins("#order #eq 1"), 0);
/// ```
pub fn count_joins(text: &str) -> usize {
    join_regex().find_iter(text).count()
}

/// Splits `text` on join keywords.
///
/// Returns N raw (untrimmed) segments and the N-1 joins between them.
pub(crate) fn split_on_joins(text: &str) -> (Vec<&str>, Vec<JoinOperator>) {
    let mut segments = Vec::new();
    let mut joins = Vec::new();
    let mut last = 0;

    for caps in join_regex().captures_iter(text) {
        let Some(join) = JoinOperator::from_keyword(&caps[1]) else {
            continue;
        };
        let Some(whole) = caps.get(0) else {
            continue;
        };
        segments.push(&text[last..whole.start()]);
        joins.push(join);
        last = whole.end();
    }
    segments.push(&text[last..]);

    (segments, joins)
}

/// Returns true when `text` ends with a join keyword followed by a bare hash.
pub(crate) fn ends_with_join_then_hash(text: &str) -> bool {
    join_then_hash_regex().is_match(text)
}

/// Removes a trailing join-selector trigger, then a trailing confirmation marker.
///
/// The order matters because a value can carry both suffixes, as in
/// `"600## #"`.
///
/// # Example
///
/// ```
/// use hashquery_rs::filter::strip_confirmation;
///
/// assert_eq!(strip_confirmation("600## #"), "600");
/// assert_eq!(strip_confirmation("#stock #gt 10##"), "#stock #gt 10");
/// ```
pub fn strip_confirmation(text: &str) -> &str {
    let mut stripped = text.trim();
    if let Some(rest) = stripped.strip_suffix(JOIN_TRIGGER) {
        stripped = rest.trim();
    }
    if let Some(rest) = stripped.strip_suffix(CONFIRM_MARKER) {
        stripped = rest.trim();
    }
    stripped
}

/// Returns true when `text` (trimmed) ends with the confirmation marker.
pub fn is_confirmed(text: &str) -> bool {
    text.trim_end().ends_with(CONFIRM_MARKER)
}

/// Returns true when a condition value holds a `#`-prefixed word.
///
/// Such a word is a join keyword or an operator still being typed, never
/// part of the value. `#to` is allowed when `allow_range_marker` is set.
pub(crate) fn has_stray_hashtag(value: &str, allow_range_marker: bool) -> bool {
    value.split_whitespace().any(|word| {
        word.starts_with('#') && !(allow_range_marker && word.eq_ignore_ascii_case("#to"))
    })
}

/// Returns true when the text should be handled by the hashtag DSL.
///
/// A bare `#` always qualifies. Otherwise the text must start with `#` and
/// contain no `:`; the colon form is the implicit-contains shorthand.
pub fn is_hashtag_mode(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed == "#" || (trimmed.starts_with('#') && !trimmed.contains(':'))
}

/// Extracts the partial operator name being typed, for filtering the operator picker.
///
/// Shapes are checked in priority order:
/// 1. first condition: `#column #op`
/// 2. same-column second condition: `... #and #op`
/// 3. multi-column second condition: `... #and #column #op`
///
/// Returns the (possibly empty) text after the last `#`, or `None` when the
/// text is not at an operator position.
pub fn operator_search_term(text: &str) -> Option<String> {
    let text = text.trim_start();
    [
        first_operator_regex(),
        same_column_operator_regex(),
        multi_column_operator_regex(),
    ]
    .into_iter()
    .find_map(|re| re.captures(text))
    .and_then(|caps| caps.get(1))
    .map(|m| m.as_str().to_string())
}
