//! Single-condition parsing.

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::ast::{Condition, FilterSearch};
use super::helpers::{has_stray_hashtag, strip_confirmation};
use super::range::parse_range;
use crate::column::{resolve_column, Column};
use crate::operator::{resolve_operator, Operator};

static EXPLICIT_REGEX: OnceLock<Regex> = OnceLock::new();
static SAME_COLUMN_REGEX: OnceLock<Regex> = OnceLock::new();
static IMPLICIT_REGEX: OnceLock<Regex> = OnceLock::new();

/// `#column #operator value`
pub(crate) fn explicit_regex() -> &'static Regex {
    EXPLICIT_REGEX.get_or_init(|| {
        Regex::new(r"^#([^\s#]+)\s+#([^\s#]+)\s+([^#\s].*)$").expect("explicit condition regex is valid")
    })
}

/// `#operator value`
pub(crate) fn same_column_regex() -> &'static Regex {
    SAME_COLUMN_REGEX.get_or_init(|| {
        Regex::new(r"^#([^\s#]+)\s+([^#\s].*)$").expect("same-column condition regex is valid")
    })
}

/// `#column:value`
fn implicit_regex() -> &'static Regex {
    IMPLICIT_REGEX
        .get_or_init(|| Regex::new(r"^#([^\s#:]+):(.*)$").expect("implicit search regex is valid"))
}

/// Builds a condition, splitting the value when the operator is a range.
///
/// A range operator whose value holds only one bound keeps that bound as
/// `value` with `value_to` unset. A value holding another hashtag word is
/// rejected; only range operators accept `#to`.
fn build_condition(column: &Column, operator: Operator, raw_value: &str) -> Option<Condition> {
    let value = raw_value.trim();
    if value.is_empty() {
        return None;
    }
    if has_stray_hashtag(value, operator.is_range()) {
        trace!(value, "value holds a hashtag word");
        return None;
    }

    if operator.is_range() {
        if let Some(range) = parse_range(value, true) {
            return Some(Condition::new(column, operator, range.value).with_value_to(range.value_to));
        }
    }

    Some(Condition::new(column, operator, value))
}

/// Parses one `#column #operator value` or `#operator value` segment.
///
/// A trailing confirmation marker is stripped first. The explicit form is
/// tried before the same-column form, which applies the operator to
/// `default_column`. Returns `None` when no column or operator resolves.
///
/// # Example
///
/// ```
/// use hashquery_rs::{Column, Operator, ValueType};
/// use hashquery_rs::filter::parse_condition;
///
/// let catalog = vec![
///     Column::new("name", "Name", ValueType::Text),
///     Column::new("stock", "Stock", ValueType::Number),
/// ];
///
/// let condition = parse_condition("#stock #greaterThan 10##", None, &catalog).unwrap();
/// assert_eq!(condition.operator, Operator::GreaterThan);
/// assert_eq!(condition.value, "10");
///
/// let condition = parse_condition("#equals aspirin", Some(&catalog[0]), &catalog).unwrap();
/// assert_eq!(condition.field, "name");
/// ```
pub fn parse_condition(
    segment: &str,
    default_column: Option<&Column>,
    catalog: &[Column],
) -> Option<Condition> {
    let segment = strip_confirmation(segment);

    if let Some(caps) = explicit_regex().captures(segment) {
        if let Some(column) = resolve_column(catalog, &caps[1]) {
            if let Some(operator) = resolve_operator(column.value_type, &caps[2]) {
                return build_condition(column, operator, &caps[3]);
            }
        }
    }

    let column = default_column?;
    let caps = same_column_regex().captures(segment)?;
    let Some(operator) = resolve_operator(column.value_type, &caps[1]) else {
        trace!(segment, operator = &caps[1], "operator not valid for default column");
        return None;
    };
    build_condition(column, operator, &caps[2])
}

/// Parses the `#column:value` contains shorthand.
///
/// The result is a single `contains` search (`equals` for non-text
/// columns) with `is_explicit_operator` unset, so that
/// [`build_search_pattern`](super::build_search_pattern) renders it back in
/// the same shape.
pub fn parse_implicit_search(text: &str, catalog: &[Column]) -> Option<FilterSearch> {
    let caps = implicit_regex().captures(text.trim())?;
    let column = resolve_column(catalog, &caps[1])?;
    let value = strip_confirmation(&caps[2]);
    if value.is_empty() {
        return None;
    }

    let operator = if Operator::Contains.supports(column.value_type) {
        Operator::Contains
    } else {
        Operator::Equals
    };
    let mut search = FilterSearch::single(Condition::new(column, operator, value));
    search.is_explicit_operator = false;
    Some(search)
}
