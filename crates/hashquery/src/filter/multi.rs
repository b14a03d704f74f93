//! Confirmed multi-condition parsing (`... #and ... ##`).

use tracing::debug;

use super::ast::FilterSearch;
use super::condition::parse_condition;
use super::helpers::{count_joins, is_confirmed, split_on_joins, CONFIRM_MARKER};
use crate::column::Column;

/// Parses fully typed multi-condition text.
///
/// Requires at least one join keyword and the `##` suffix. Segment 0 must
/// use the explicit `#column #operator value` form; its column becomes the
/// default for later `#operator value` segments. Segments that do not parse
/// are dropped together with the join in front of them, and at least two
/// conditions must remain.
///
/// # Example
///
/// ```
/// use hashquery_rs::{Column, ValueType};
/// use hashquery_rs::filter::{parse_multi_condition, JoinOperator};
///
/// let catalog = vec![Column::new("stock", "Stock", ValueType::Number)];
/// let search = parse_multi_condition("#stock #gt 10 #and #lt 50##", &catalog).unwrap();
/// assert_eq!(search.conditions.len(), 2);
/// assert_eq!(search.joins, vec![JoinOperator::And]);
/// assert!(!search.is_multi_column);
/// ```
pub fn parse_multi_condition(text: &str, catalog: &[Column]) -> Option<FilterSearch> {
    if count_joins(text) == 0 || !is_confirmed(text) {
        return None;
    }

    let body = text.trim_end().strip_suffix(CONFIRM_MARKER)?;
    let (segments, joins) = split_on_joins(body);

    let default_column = segments
        .first()
        .and_then(|segment| parse_condition(segment, None, catalog))
        .map(|condition| condition.column);

    let mut conditions = Vec::new();
    let mut kept_joins = Vec::new();
    for (index, segment) in segments.iter().enumerate() {
        let Some(condition) = parse_condition(segment, default_column.as_ref(), catalog) else {
            debug!(index, segment = segment.trim(), "skipping unparseable segment");
            continue;
        };
        if !conditions.is_empty() {
            if let Some(join) = index.checked_sub(1).and_then(|i| joins.get(i)) {
                kept_joins.push(*join);
            }
        }
        conditions.push(condition);
    }

    if conditions.len() < 2 {
        return None;
    }

    FilterSearch::from_conditions(conditions, kept_joins)
}
