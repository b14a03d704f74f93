//! Filter evaluation against data rows.
//!
//! This module provides the [`FilterEvaluator`] for applying a parsed
//! [`FilterSearch`] to rows of JSON data, which is how the search bar's
//! collaborators use the parser output.
//!
//! # Example
//!
//! ```
//! use hashquery_rs::{Column, ValueType};
//! use hashquery_rs::filter::{parse_search, FilterEvaluator, Row};
//! use serde_json::json;
//!
//! let catalog = vec![Column::new("stock", "Stock", ValueType::Number)];
//! let outcome = parse_search("#stock #gt 10##", None, &catalog);
//! let search = outcome.filter().unwrap();
//!
//! let row: Row = json!({"stock": 12}).as_object().unwrap().clone();
//! assert!(FilterEvaluator::new(search).matches(&row));
//! ```

use std::cmp::Ordering;

use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::ast::{Condition, Expression, FilterGroup, FilterSearch, JoinOperator};
use crate::column::{Column, ValueType};
use crate::operator::Operator;

/// A data row keyed by column field.
pub type Row = Map<String, Value>;

/// Date format accepted for date columns.
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Evaluates a parsed search against rows.
///
/// The group tree is used when present. Otherwise the flat `conditions` are
/// folded left to right with their `joins`, and a single-condition search
/// falls back to its flattened first condition.
#[derive(Debug)]
pub struct FilterEvaluator<'a> {
    search: &'a FilterSearch,
}

impl<'a> FilterEvaluator<'a> {
    /// Creates a new filter evaluator.
    pub fn new(search: &'a FilterSearch) -> Self {
        Self { search }
    }

    /// Returns true if the row matches the search.
    pub fn matches(&self, row: &Row) -> bool {
        if let Some(group) = &self.search.filter_group {
            return evaluate_group(group, row);
        }

        let Some((first, rest)) = self.search.conditions.split_first() else {
            return evaluate_condition(&self.search.primary_condition(), row);
        };

        let mut result = evaluate_condition(first, row);
        for (condition, join) in rest.iter().zip(&self.search.joins) {
            result = match join {
                JoinOperator::And => result && evaluate_condition(condition, row),
                JoinOperator::Or => result || evaluate_condition(condition, row),
            };
        }
        result
    }

    /// Filters a slice of rows, returning only those that match.
    pub fn filter_rows<'b>(&self, rows: &'b [Row]) -> Vec<&'b Row> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}

/// Evaluates a group: every node for AND, any node for OR.
fn evaluate_group(group: &FilterGroup, row: &Row) -> bool {
    let mut nodes = group.nodes.iter().map(|node| match node {
        Expression::Condition(condition) => evaluate_condition(condition, row),
        Expression::Group(inner) => evaluate_group(inner, row),
    });
    match group.join {
        JoinOperator::And => nodes.all(|matched| matched),
        JoinOperator::Or => nodes.any(|matched| matched),
    }
}

/// Renders a cell as text for string comparisons.
fn cell_text(cell: &Value) -> Option<String> {
    match cell {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(cell_text)
                .collect::<Vec<_>>()
                .join(", "),
        ),
        other => Some(other.to_string()),
    }
}

fn parse_number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok()
}

fn cell_number(cell: &Value) -> Option<f64> {
    match cell {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

fn parse_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    // Datetimes are compared on their date part
    let date_part = text.get(..10).unwrap_or(text);
    NaiveDate::parse_from_str(date_part, DATE_FORMAT).ok()
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn cell_bool(cell: &Value) -> Option<bool> {
    match cell {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_i64().map(|n| n != 0),
        Value::String(s) => parse_bool(s),
        _ => None,
    }
}

/// Compares a cell with a typed value according to the column's value type.
fn compare(column: &Column, cell: &Value, value: &str) -> Option<Ordering> {
    match column.value_type {
        ValueType::Text => Some(cell_text(cell)?.to_lowercase().cmp(&value.to_lowercase())),
        ValueType::Number => cell_number(cell)?.partial_cmp(&parse_number(value)?),
        ValueType::Date => Some(parse_date(&cell_text(cell)?)?.cmp(&parse_date(value)?)),
        ValueType::Boolean => Some(cell_bool(cell)?.cmp(&parse_bool(value)?)),
    }
}

/// Evaluates one condition against a row.
///
/// Missing or unparseable cells never match, except for the negated
/// operators which treat a missing cell as "not equal" / "not containing".
fn evaluate_condition(condition: &Condition, row: &Row) -> bool {
    let cell = row.get(&condition.field).filter(|v| !v.is_null());

    let Some(cell) = cell else {
        return matches!(
            condition.operator,
            Operator::NotEquals | Operator::NotContains
        );
    };

    let value = condition.value.as_str();
    match condition.operator {
        Operator::Contains | Operator::NotContains | Operator::StartsWith | Operator::EndsWith => {
            let Some(text) = cell_text(cell) else {
                return false;
            };
            let text = text.to_lowercase();
            let needle = value.to_lowercase();
            match condition.operator {
                Operator::Contains => text.contains(&needle),
                Operator::NotContains => !text.contains(&needle),
                Operator::StartsWith => text.starts_with(&needle),
                _ => text.ends_with(&needle),
            }
        }
        Operator::Equals => compare(&condition.column, cell, value) == Some(Ordering::Equal),
        Operator::NotEquals => compare(&condition.column, cell, value) != Some(Ordering::Equal),
        Operator::GreaterThan => compare(&condition.column, cell, value) == Some(Ordering::Greater),
        Operator::GreaterThanOrEqual => matches!(
            compare(&condition.column, cell, value),
            Some(Ordering::Greater | Ordering::Equal)
        ),
        Operator::LessThan => compare(&condition.column, cell, value) == Some(Ordering::Less),
        Operator::LessThanOrEqual => matches!(
            compare(&condition.column, cell, value),
            Some(Ordering::Less | Ordering::Equal)
        ),
        Operator::InRange => {
            let above_low = matches!(
                compare(&condition.column, cell, value),
                Some(Ordering::Greater | Ordering::Equal)
            );
            // An incomplete range acts as a lower bound
            let below_high = match &condition.value_to {
                Some(value_to) => matches!(
                    compare(&condition.column, cell, value_to),
                    Some(Ordering::Less | Ordering::Equal)
                ),
                None => true,
            };
            above_low && below_high
        }
    }
}

/// Returns true if any searchable column of the row contains `text`.
///
/// This backs plain (non-hashtag) search-bar input.
pub fn matches_free_text(row: &Row, text: &str, catalog: &[Column]) -> bool {
    let needle = text.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    catalog
        .iter()
        .filter(|column| column.searchable)
        .filter_map(|column| row.get(&column.field))
        .filter_map(cell_text)
        .any(|cell| cell.to_lowercase().contains(&needle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::{parse_search, GroupedParser};
    use serde_json::json;

    // ==================== Test Helpers ====================

    fn catalog() -> Vec<Column> {
        vec![
            Column::new("name", "Name", ValueType::Text),
            Column::new("stock", "Stock", ValueType::Number),
            Column::new("price", "Price", ValueType::Number),
            Column::new("expires", "Expires", ValueType::Date),
            Column::new("otc", "Over The Counter", ValueType::Boolean),
            Column::new("notes", "Notes", ValueType::Text).not_searchable(),
        ]
    }

    fn row(value: Value) -> Row {
        value.as_object().cloned().unwrap_or_default()
    }

    fn rows() -> Vec<Row> {
        vec![
            row(json!({"name": "Aspirin", "stock": 40, "price": 4.5, "expires": "2026-03-01", "otc": true, "notes": "blister"})),
            row(json!({"name": "Ibuprofen", "stock": 5, "price": 6.0, "expires": "2025-11-15", "otc": true})),
            row(json!({"name": "Amoxicillin", "stock": "120", "price": 12.25, "expires": "2027-01-20", "otc": false})),
            row(json!({"name": "Vitamin C", "stock": null, "price": 3, "expires": "2026-08-30"})),
        ]
    }

    fn names(search: &FilterSearch, rows: &[Row]) -> Vec<String> {
        FilterEvaluator::new(search)
            .filter_rows(rows)
            .into_iter()
            .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
            .collect()
    }

    fn search(text: &str) -> FilterSearch {
        let catalog = catalog();
        parse_search(text, Some(&catalog[0]), &catalog)
            .filter()
            .cloned()
            .expect("pattern should resolve")
    }

    // ==================== Text Tests ====================

    #[test]
    fn test_contains_case_insensitive() {
        assert_eq!(names(&search("#name #contains CILL##"), &rows()), vec!["Amoxicillin"]);
    }

    #[test]
    fn test_starts_and_ends_with() {
        assert_eq!(names(&search("#name #startsWith a##"), &rows()), vec!["Aspirin", "Amoxicillin"]);
        assert_eq!(names(&search("#name #endsWith fen##"), &rows()), vec!["Ibuprofen"]);
    }

    #[test]
    fn test_not_contains_matches_missing_cell() {
        let rows = vec![row(json!({"stock": 1})), row(json!({"name": "Aspirin"}))];
        let search = search("#name #notContains asp##");
        assert_eq!(FilterEvaluator::new(&search).filter_rows(&rows).len(), 1);
    }

    #[test]
    fn test_implicit_contains() {
        assert_eq!(names(&search("#name:vit"), &rows()), vec!["Vitamin C"]);
    }

    // ==================== Number Tests ====================

    #[test]
    fn test_number_comparisons() {
        assert_eq!(names(&search("#stock #gt 10##"), &rows()), vec!["Aspirin", "Amoxicillin"]);
        assert_eq!(names(&search("#stock #lte 5##"), &rows()), vec!["Ibuprofen"]);
        assert_eq!(names(&search("#price #equals 3##"), &rows()), vec!["Vitamin C"]);
    }

    #[test]
    fn test_null_cell_does_not_match() {
        assert!(!names(&search("#stock #lt 1000##"), &rows()).contains(&"Vitamin C".to_string()));
    }

    #[test]
    fn test_number_range() {
        assert_eq!(names(&search("#price #inRange 4 #to 7##"), &rows()), vec!["Aspirin", "Ibuprofen"]);
        assert_eq!(names(&search("#price #between 3-4.5##"), &rows()), vec!["Aspirin", "Vitamin C"]);
    }

    #[test]
    fn test_incomplete_range_is_lower_bound() {
        let search = search("#price #inRange 6##");
        assert!(search.value_to.is_none());
        assert_eq!(names(&search, &rows()), vec!["Ibuprofen", "Amoxicillin"]);
    }

    // ==================== Date and Boolean Tests ====================

    #[test]
    fn test_date_comparisons() {
        assert_eq!(names(&search("#expires #before 2026-01-01##"), &rows()), vec!["Ibuprofen"]);
        assert_eq!(
            names(&search("#expires #between 2026-01-01 #to 2026-12-31##"), &rows()),
            vec!["Aspirin", "Vitamin C"]
        );
    }

    #[test]
    fn test_boolean_equals() {
        assert_eq!(names(&search("#otc #equals yes##"), &rows()), vec!["Aspirin", "Ibuprofen"]);
        assert_eq!(names(&search("#otc #is false##"), &rows()), vec!["Amoxicillin"]);
    }

    // ==================== Combination Tests ====================

    #[test]
    fn test_multi_condition_and() {
        assert_eq!(names(&search("#stock #gt 1 #and #lt 50##"), &rows()), vec!["Aspirin", "Ibuprofen"]);
    }

    #[test]
    fn test_multi_condition_or_across_columns() {
        assert_eq!(
            names(&search("#stock #lt 10 #or #name #contains vit##"), &rows()),
            vec!["Ibuprofen", "Vitamin C"]
        );
    }

    #[test]
    fn test_flat_joins_fold_left_to_right() {
        // (stock > 100 OR name contains asp) AND price < 5
        assert_eq!(
            names(&search("#stock #gt 100 #or #name #contains asp #and #price #lt 5##"), &rows()),
            vec!["Aspirin"]
        );
    }

    #[test]
    fn test_nested_group() {
        let catalog = catalog();
        let search = GroupedParser::parse(
            "#( #name #startsWith a #and #( #stock #gt 100 #or #price #lt 5 #) #)##",
            &catalog,
        )
        .unwrap();
        assert_eq!(names(&search, &rows()), vec!["Aspirin", "Amoxicillin"]);
    }

    // ==================== Free Text Tests ====================

    #[test]
    fn test_free_text_uses_searchable_columns() {
        let catalog = catalog();
        let rows = rows();
        assert!(matches_free_text(&rows[0], "aspi", &catalog));
        assert!(!matches_free_text(&rows[0], "blister", &catalog));
        assert!(matches_free_text(&rows[0], "", &catalog));
    }
}
