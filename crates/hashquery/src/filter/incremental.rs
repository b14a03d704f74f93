//! Live parsing of multi-condition text that is still being typed.
//!
//! Nothing is carried between calls: the whole [`EnhancedSearchState`] is
//! derived again from the raw text on every keystroke.

use std::sync::OnceLock;

use regex::Regex;
use tracing::trace;

use super::ast::{EnhancedSearchState, FilterSearch, JoinOperator, PartialCondition};
use super::condition::{explicit_regex, same_column_regex};
use super::helpers::{
    count_joins, ends_with_join_then_hash, has_stray_hashtag, is_confirmed, split_on_joins,
    strip_confirmation, CONFIRM_MARKER, JOIN_TRIGGER,
};
use super::range::{dangling_range_start, parse_range};
use crate::column::{resolve_column, Column};
use crate::operator::{resolve_operator, Operator};

static COLUMN_OPERATOR_REGEX: OnceLock<Regex> = OnceLock::new();
static COLUMN_HASH_REGEX: OnceLock<Regex> = OnceLock::new();
static BARE_TOKEN_REGEX: OnceLock<Regex> = OnceLock::new();

/// `#column #operator` with no value yet.
fn column_operator_regex() -> &'static Regex {
    COLUMN_OPERATOR_REGEX.get_or_init(|| {
        Regex::new(r"^#([^\s#]+)\s+#([^\s#]+)$").expect("column-operator regex is valid")
    })
}

/// `#column #` waiting for an operator.
fn column_hash_regex() -> &'static Regex {
    COLUMN_HASH_REGEX
        .get_or_init(|| Regex::new(r"^#([^\s#]+)\s+#$").expect("column-hash regex is valid"))
}

/// A single `#token`.
fn bare_token_regex() -> &'static Regex {
    BARE_TOKEN_REGEX
        .get_or_init(|| Regex::new(r"^#([^\s#]+)$").expect("bare token regex is valid"))
}

/// Builds a partial with column, operator and whatever value has been typed.
///
/// Range values use the `#to` marker, then the dash form when the segment is
/// confirmed. A dangling `#to` keeps the lower bound and flags the partial
/// as waiting for the upper one. A value holding another hashtag word is
/// left unset, since that word is still being typed.
fn partial_with_value(
    column: &Column,
    operator: Operator,
    raw_value: &str,
    confirmed: bool,
) -> PartialCondition {
    let mut partial = PartialCondition::with_column(column);
    partial.operator = Some(operator);
    let value = strip_confirmation(raw_value);
    if has_stray_hashtag(value, operator.is_range()) {
        return partial;
    }

    if operator.is_range() {
        if let Some(range) = parse_range(value, confirmed) {
            partial.value = Some(range.value);
            partial.value_to = Some(range.value_to);
            return partial;
        }
        if let Some(start) = dangling_range_start(value) {
            partial.value = Some(start.to_string());
            partial.waiting_for_value_to = true;
            return partial;
        }
    }

    if !value.is_empty() {
        partial.value = Some(value.to_string());
    }
    partial
}

/// Parses the first segment, which must use the explicit form.
fn classify_first(segment: &str, catalog: &[Column]) -> Option<PartialCondition> {
    let caps = explicit_regex().captures(segment.trim())?;
    let column = resolve_column(catalog, &caps[1])?;
    let operator = resolve_operator(column.value_type, &caps[2])?;
    Some(partial_with_value(column, operator, &caps[3], true))
}

/// Classifies a segment after a join.
///
/// `base_column` is the first segment's column, used by `#operator value`
/// segments. `running_column` is the column of the previous partial, tried
/// first when a bare `#token` could be an operator.
fn classify_segment(
    segment: &str,
    base_column: &Column,
    running_column: &Column,
    catalog: &[Column],
    confirmed: bool,
) -> PartialCondition {
    let segment = segment.trim();
    if segment.is_empty() || segment == "#" {
        return PartialCondition::default();
    }

    if let Some(caps) = explicit_regex().captures(segment) {
        if let Some(column) = resolve_column(catalog, &caps[1]) {
            if let Some(operator) = resolve_operator(column.value_type, &caps[2]) {
                return partial_with_value(column, operator, &caps[3], confirmed);
            }
        }
    }

    if let Some(caps) = column_operator_regex().captures(segment) {
        if let Some(column) = resolve_column(catalog, &caps[1]) {
            let mut partial = PartialCondition::with_column(column);
            partial.operator = resolve_operator(column.value_type, &caps[2]);
            return partial;
        }
    }

    if let Some(caps) = column_hash_regex().captures(segment) {
        if let Some(column) = resolve_column(catalog, &caps[1]) {
            return PartialCondition::with_column(column);
        }
    }

    if let Some(caps) = same_column_regex().captures(segment) {
        if let Some(operator) = resolve_operator(base_column.value_type, &caps[1]) {
            return partial_with_value(base_column, operator, &caps[2], confirmed);
        }
    }

    if let Some(caps) = bare_token_regex().captures(segment) {
        let token = &caps[1];
        if let Some(operator) = resolve_operator(running_column.value_type, token) {
            let mut partial = PartialCondition::with_column(running_column);
            partial.operator = Some(operator);
            return partial;
        }
        if let Some(column) = resolve_column(catalog, token) {
            return PartialCondition::with_column(column);
        }
    }

    trace!(segment, "unrecognized segment");
    PartialCondition::default()
}

/// Derives live UI state from multi-condition text that is not confirmed yet.
///
/// Requires at least one join keyword and no trailing `##` (confirmed text
/// goes to [`parse_multi_condition`](super::parse_multi_condition)). Returns
/// `None` when the first segment is not a complete explicit condition.
///
/// Selector triggers, in priority order:
/// 1. a trailing ` #` after a finished value opens the join selector and
///    confirms that condition;
/// 2. a last segment ending in `##` with a value is confirmed;
/// 3. otherwise the column or operator selector opens for whatever the last
///    partial is missing.
///
/// # Example
///
/// ```
/// use hashquery_rs::{Column, ValueType};
/// use hashquery_rs::filter::parse_incremental;
///
/// let catalog = vec![Column::new("stock", "Stock", ValueType::Number)];
///
/// let state = parse_incremental("#stock #gt 10 #and #", &catalog).unwrap();
/// assert!(state.show_column_selector);
/// assert_eq!(state.active_condition_index, 1);
///
/// let state = parse_incremental("#stock #gt 10 #and #lt 50 #", &catalog).unwrap();
/// assert!(state.show_join_operator_selector);
/// assert_eq!(state.filter_search.unwrap().conditions.len(), 2);
/// ```
pub fn parse_incremental(text: &str, catalog: &[Column]) -> Option<EnhancedSearchState> {
    if count_joins(text) == 0 || text.ends_with(CONFIRM_MARKER) {
        return None;
    }

    let (segments, joins) = split_on_joins(text);
    let first = classify_first(segments.first()?, catalog)?;
    let base_column = first.column.clone()?;

    let last_index = segments.len() - 1;
    let ends_with_trigger = text.ends_with(JOIN_TRIGGER) && !ends_with_join_then_hash(text);

    let mut partials = vec![first];
    for (index, segment) in segments.iter().enumerate().skip(1) {
        let confirmed = index < last_index || ends_with_trigger || is_confirmed(segment);
        let running_column = partials
            .last()
            .and_then(|p| p.column.clone())
            .unwrap_or_else(|| base_column.clone());
        partials.push(classify_segment(
            segment,
            &base_column,
            &running_column,
            catalog,
            confirmed,
        ));
    }

    let mut state = EnhancedSearchState {
        partial_conditions: partials,
        joins,
        ..EnhancedSearchState::default()
    };
    let last = &state.partial_conditions[last_index];
    let last_has_value = last.has_value();

    if ends_with_trigger && last_has_value {
        state.show_join_operator_selector = true;
        state.is_confirmed = true;
        state.active_condition_index = state.partial_conditions.len();
    } else if is_confirmed(segments[last_index]) && last_has_value {
        state.is_confirmed = true;
        state.active_condition_index = state.partial_conditions.len();
    } else {
        state.active_condition_index = last_index;
        if last.column.is_none() {
            state.show_column_selector = true;
        } else if last.operator.is_none() {
            state.show_operator_selector = true;
        }
    }

    state.filter_search = preview_search(&state);
    Some(state)
}

/// Builds the preview from complete conditions.
///
/// The last condition only counts once it is confirmed, or when no selector
/// is open and it is not waiting for a range's upper bound.
fn preview_search(state: &EnhancedSearchState) -> Option<FilterSearch> {
    let last_index = state.partial_conditions.len().checked_sub(1)?;
    let last = &state.partial_conditions[last_index];
    let include_last =
        state.is_confirmed || (!state.has_open_selector() && !last.waiting_for_value_to);

    let mut conditions = Vec::new();
    let mut joins: Vec<JoinOperator> = Vec::new();
    for (index, partial) in state.partial_conditions.iter().enumerate() {
        if index == last_index && !include_last {
            continue;
        }
        let Some(condition) = partial.to_condition() else {
            continue;
        };
        if !conditions.is_empty() {
            if let Some(join) = index.checked_sub(1).and_then(|i| state.joins.get(i)) {
                joins.push(*join);
            }
        }
        conditions.push(condition);
    }

    FilterSearch::from_conditions(conditions, joins)
}
