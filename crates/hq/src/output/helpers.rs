//! Common helper functions for output formatting.

use hashquery_rs::filter::JoinOperator;
use hashquery_rs::ValueType;
use owo_colors::OwoColorize;
use serde_json::Value;

/// Truncates a string to a maximum number of characters.
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() > max_len {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    } else {
        s.to_string()
    }
}

/// Formats a value type for display.
pub fn format_value_type(value_type: ValueType, use_colors: bool) -> String {
    let label = value_type.as_str();
    if use_colors {
        match value_type {
            ValueType::Text => label.to_string(),
            ValueType::Number => label.cyan().to_string(),
            ValueType::Date => label.magenta().to_string(),
            ValueType::Boolean => label.yellow().to_string(),
        }
    } else {
        label.to_string()
    }
}

/// Formats a join keyword for display.
pub fn format_join(join: JoinOperator, use_colors: bool) -> String {
    let label = join.to_string();
    if use_colors {
        label.bold().to_string()
    } else {
        label
    }
}

/// Renders a row cell as plain text.
pub fn format_cell(cell: Option<&Value>) -> String {
    match cell {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short", 10), "short");
        assert_eq!(truncate_str("a longer string", 10), "a longe...");
        assert_eq!(truncate_str("ééééééé", 5), "éé...");
    }

    #[test]
    fn test_format_value_type_plain() {
        assert_eq!(format_value_type(ValueType::Number, false), "number");
        assert_eq!(format_value_type(ValueType::Boolean, false), "boolean");
    }

    #[test]
    fn test_format_join_plain() {
        assert_eq!(format_join(JoinOperator::Or, false), "OR");
    }

    #[test]
    fn test_format_cell() {
        assert_eq!(format_cell(None), "");
        assert_eq!(format_cell(Some(&Value::Null)), "");
        assert_eq!(format_cell(Some(&json!("Aspirin"))), "Aspirin");
        assert_eq!(format_cell(Some(&json!(4.5))), "4.5");
        assert_eq!(format_cell(Some(&json!(true))), "true");
    }
}
