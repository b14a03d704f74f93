//! Parsed search and picker state output formatting.

use hashquery_rs::filter::{
    Condition, EnhancedSearchState, Expression, FilterGroup, FilterSearch, SearchOutcome,
};
use owo_colors::OwoColorize;

use super::helpers::{format_join, truncate_str};

/// Formats a search outcome as JSON.
pub fn format_outcome_json(outcome: &SearchOutcome) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(outcome)
}

/// Formats a search outcome as human-readable text.
pub fn format_outcome_table(outcome: &SearchOutcome, use_colors: bool) -> String {
    match outcome {
        SearchOutcome::Empty => "Empty search.\n".to_string(),
        SearchOutcome::FreeText(text) => format!("Free text: {text}\n"),
        SearchOutcome::Filter(search) => format_search_table(search, use_colors),
        SearchOutcome::Typing(state) => format_state_table(state, use_colors),
        SearchOutcome::Unresolved => "Unresolved.\n".to_string(),
    }
}

fn heading(text: &str, use_colors: bool) -> String {
    if use_colors {
        format!("{}\n", text.green().bold())
    } else {
        format!("{text}\n")
    }
}

fn table_header(use_colors: bool) -> String {
    let header = format!(
        "{:<4} {:<5} {:<16} {:<20} {:<16} {}",
        "#", "Join", "Field", "Operator", "Value", "To"
    );
    if use_colors {
        format!("{}\n", header.dimmed())
    } else {
        format!("{header}\n")
    }
}

fn table_line(
    marker: &str,
    join: &str,
    field: &str,
    operator: &str,
    value: &str,
    value_to: &str,
) -> String {
    format!(
        "{:<4} {:<5} {:<16} {:<20} {:<16} {}\n",
        marker,
        join,
        truncate_str(field, 16),
        operator,
        truncate_str(value, 16),
        value_to
    )
}

/// Formats one condition on a single line.
fn format_condition(condition: &Condition) -> String {
    match &condition.value_to {
        Some(value_to) => format!(
            "{} {} {} .. {}",
            condition.field, condition.operator, condition.value, value_to
        ),
        None => format!("{} {} {}", condition.field, condition.operator, condition.value),
    }
}

/// Renders a group tree, one node per line, children indented.
fn format_group(group: &FilterGroup, depth: usize, use_colors: bool, output: &mut String) {
    let indent = "  ".repeat(depth);
    let kind = if group.is_explicit { "group" } else { "root" };
    output.push_str(&format!(
        "{indent}{} ({kind})\n",
        format_join(group.join, use_colors)
    ));
    for node in &group.nodes {
        match node {
            Expression::Condition(condition) => {
                output.push_str(&format!("{indent}  {}\n", format_condition(condition)));
            }
            Expression::Group(inner) => format_group(inner, depth + 1, use_colors, output),
        }
    }
}

/// Formats a resolved filter as text.
fn format_search_table(search: &FilterSearch, use_colors: bool) -> String {
    let mut output = heading("Filter", use_colors);

    if let Some(group) = &search.filter_group {
        if search.conditions.is_empty() {
            format_group(group, 0, use_colors, &mut output);
            return output;
        }
    }

    output.push_str(&table_header(use_colors));
    if search.conditions.is_empty() {
        output.push_str(&table_line(
            "1",
            "",
            &search.field,
            search.operator.as_str(),
            &search.value,
            search.value_to.as_deref().unwrap_or(""),
        ));
    } else {
        for (index, condition) in search.conditions.iter().enumerate() {
            let join = index
                .checked_sub(1)
                .and_then(|i| search.joins.get(i))
                .map(|j| j.to_string())
                .unwrap_or_default();
            output.push_str(&table_line(
                &(index + 1).to_string(),
                &join,
                &condition.field,
                condition.operator.as_str(),
                &condition.value,
                condition.value_to.as_deref().unwrap_or(""),
            ));
        }
    }

    if !search.is_explicit_operator {
        output.push_str("(shorthand)\n");
    }
    output
}

/// Formats live picker state as text.
pub fn format_state_table(state: &EnhancedSearchState, use_colors: bool) -> String {
    let mut output = heading("Typing", use_colors);
    output.push_str(&table_header(use_colors));

    for (index, partial) in state.partial_conditions.iter().enumerate() {
        let marker = if index == state.active_condition_index {
            format!(">{}", index + 1)
        } else {
            (index + 1).to_string()
        };
        let join = index
            .checked_sub(1)
            .and_then(|i| state.joins.get(i))
            .map(|j| j.to_string())
            .unwrap_or_default();
        let value_to = if partial.waiting_for_value_to {
            "...".to_string()
        } else {
            partial.value_to.clone().unwrap_or_default()
        };
        output.push_str(&table_line(
            &marker,
            &join,
            partial.field.as_deref().unwrap_or("?"),
            partial.operator.map(|op| op.as_str()).unwrap_or("?"),
            partial.value.as_deref().unwrap_or(""),
            &value_to,
        ));
    }

    let selector = if state.show_column_selector {
        "column"
    } else if state.show_operator_selector {
        "operator"
    } else if state.show_join_operator_selector {
        "join"
    } else {
        "none"
    };
    output.push_str(&format!("\nSelector: {selector}\n"));
    output.push_str(&format!(
        "Confirmed: {}\n",
        if state.is_confirmed { "yes" } else { "no" }
    ));

    match &state.filter_search {
        Some(preview) => {
            let count = preview.conditions.len().max(1);
            output.push_str(&format!("Preview: {count} condition(s)\n"));
        }
        None => output.push_str("Preview: none\n"),
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashquery_rs::filter::{parse_incremental, parse_search};
    use hashquery_rs::{Column, ValueType};

    fn catalog() -> Vec<Column> {
        vec![
            Column::new("name", "Name", ValueType::Text),
            Column::new("stock", "Stock", ValueType::Number),
        ]
    }

    #[test]
    fn test_format_free_text() {
        let outcome = SearchOutcome::FreeText("asp".to_string());
        assert_eq!(format_outcome_table(&outcome, false), "Free text: asp\n");
    }

    #[test]
    fn test_format_single_filter() {
        let catalog = catalog();
        let outcome = parse_search("#stock #between 1 #to 5##", None, &catalog);
        let output = format_outcome_table(&outcome, false);
        assert!(output.starts_with("Filter\n"));
        assert!(output.contains("inRange"));
        assert!(output.contains("5"));
    }

    #[test]
    fn test_format_multi_filter_shows_joins() {
        let catalog = catalog();
        let outcome = parse_search("#stock #gt 1 #or #name #contains asp##", None, &catalog);
        let output = format_outcome_table(&outcome, false);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[3].contains("OR"));
    }

    #[test]
    fn test_format_nested_group() {
        let catalog = catalog();
        let outcome = parse_search(
            "#( #name #contains a #and #( #stock #gt 1 #or #stock #lt 0 #) #)##",
            None,
            &catalog,
        );
        let output = format_outcome_table(&outcome, false);
        assert!(output.contains("AND (group)"));
        assert!(output.contains("\n  OR (group)\n"));
        assert!(output.contains("\n    stock lessThan 0\n"));
    }

    #[test]
    fn test_format_state() {
        let catalog = catalog();
        let state = parse_incremental("#stock #gt 1 #and #", &catalog).unwrap();
        let output = format_state_table(&state, false);
        assert!(output.contains(">2"));
        assert!(output.contains("Selector: column"));
        assert!(output.contains("Preview: 1 condition(s)"));
    }

    #[test]
    fn test_format_outcome_json_kind() {
        let catalog = catalog();
        let outcome = parse_search("#stock #gt 1##", None, &catalog);
        let json: serde_json::Value =
            serde_json::from_str(&format_outcome_json(&outcome).unwrap()).unwrap();
        assert_eq!(json["kind"], "filter");
        assert_eq!(json["result"]["operator"], "greaterThan");
    }
}
