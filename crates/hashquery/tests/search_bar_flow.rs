//! End-to-end tests for the search-bar flow.
//!
//! These tests replay text the way a user types it, one keystroke at a
//! time, and check the picker state and resulting rows at each step.

use hashquery_rs::filter::{
    build_column_pattern, operator_search_term, parse_search, FilterEvaluator, JoinOperator,
    PatternMode, Row, SearchOutcome,
};
use hashquery_rs::{column_suggestions, operator_suggestions, validate_catalog, Column, Operator};
use serde_json::{json, Value};

fn catalog() -> Vec<Column> {
    let catalog: Vec<Column> = serde_json::from_value(json!([
        {"field": "name", "displayName": "Name"},
        {"field": "stock", "displayName": "Stock", "valueType": "number"},
        {"field": "price", "displayName": "Unit Price", "valueType": "number"},
        {"field": "expires", "displayName": "Expires", "valueType": "date"},
        {"field": "notes", "searchable": false}
    ]))
    .expect("catalog json is valid");
    validate_catalog(&catalog).expect("catalog is valid");
    catalog
}

fn rows() -> Vec<Row> {
    let rows = json!([
        {"name": "Aspirin", "stock": 40, "price": 4.5, "expires": "2026-03-01"},
        {"name": "Ibuprofen", "stock": 5, "price": 6.0, "expires": "2025-11-15"},
        {"name": "Amoxicillin", "stock": 120, "price": 12.25, "expires": "2027-01-20"},
        {"name": "Paracetamol", "stock": 60, "price": 2.1, "expires": "2026-06-10"}
    ]);
    rows.as_array()
        .unwrap()
        .iter()
        .filter_map(Value::as_object)
        .cloned()
        .collect()
}

fn names(outcome: &SearchOutcome, rows: &[Row]) -> Vec<String> {
    let search = outcome.filter().expect("outcome should carry a filter");
    FilterEvaluator::new(search)
        .filter_rows(rows)
        .into_iter()
        .filter_map(|r| r.get("name").and_then(Value::as_str).map(str::to_string))
        .collect()
}

// ============================================================================
// Typing Flow Tests
// ============================================================================

#[test]
fn test_typing_multi_condition_keystroke_by_keystroke() {
    let catalog = catalog();
    let rows = rows();
    let target = "#stock #gt 10 #and #lt 100##";

    // No step of typing may panic or open more than one picker
    for end in 1..=target.len() {
        let outcome = parse_search(&target[..end], None, &catalog);
        if let SearchOutcome::Typing(state) = &outcome {
            let open = [
                state.show_column_selector,
                state.show_operator_selector,
                state.show_join_operator_selector,
            ]
            .iter()
            .filter(|open| **open)
            .count();
            assert!(open <= 1, "{}", &target[..end]);
        }
    }

    let outcome = parse_search(target, None, &catalog);
    let search = outcome.filter().unwrap();
    assert_eq!(search.joins, vec![JoinOperator::And]);
    assert_eq!(names(&outcome, &rows), vec!["Aspirin", "Paracetamol"]);
}

#[test]
fn test_column_picker_then_operator_picker() {
    let catalog = catalog();

    let picked: Vec<&str> = column_suggestions(&catalog, "#st")
        .iter()
        .map(|c| c.field.as_str())
        .collect();
    assert_eq!(picked, vec!["stock"]);

    let mut text = build_column_pattern(&catalog[1], PatternMode::Space);
    text.push('#');
    assert_eq!(operator_search_term(&text).as_deref(), Some(""));

    text.push_str("gre");
    let term = operator_search_term(&text).unwrap();
    let suggestions = operator_suggestions(catalog[1].value_type, &term);
    assert!(suggestions.contains(&Operator::GreaterThan));
    assert!(suggestions.contains(&Operator::GreaterThanOrEqual));
}

#[test]
fn test_join_picker_after_second_condition() {
    let catalog = catalog();
    let SearchOutcome::Typing(state) = parse_search("#stock #gt 10 #and #price #lt 5 #", None, &catalog)
    else {
        panic!("expected typing state");
    };
    assert!(state.show_join_operator_selector);
    let preview = state.filter_search.unwrap();
    assert!(preview.is_multi_column);
    assert_eq!(preview.conditions.len(), 2);
}

// ============================================================================
// Filtering Tests
// ============================================================================

#[test]
fn test_grouped_search_filters_rows() {
    let catalog = catalog();
    let rows = rows();
    let outcome = parse_search(
        "#( #name #startsWith a #or #name #endsWith mol #) #and #price #lt 5##",
        None,
        &catalog,
    );
    assert_eq!(names(&outcome, &rows), vec!["Aspirin", "Paracetamol"]);
}

#[test]
fn test_date_range_with_marker() {
    let catalog = catalog();
    let rows = rows();
    let outcome = parse_search("#expires #between 2026-01-01 #to 2026-12-31##", None, &catalog);
    assert_eq!(names(&outcome, &rows), vec!["Aspirin", "Paracetamol"]);
}

#[test]
fn test_default_column_shorthand() {
    let catalog = catalog();
    let rows = rows();
    let outcome = parse_search("#endsWith cillin", Some(&catalog[0]), &catalog);
    assert_eq!(names(&outcome, &rows), vec!["Amoxicillin"]);
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let catalog = vec![
        Column::new("stock", "Stock", hashquery_rs::ValueType::Number),
        Column::new("Stock", "Units", hashquery_rs::ValueType::Number),
    ];
    assert!(validate_catalog(&catalog).is_err());
}
