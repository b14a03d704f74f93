//! Operator suggestion output formatting.

use hashquery_rs::{Column, Operator};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for operators command.
#[derive(Serialize)]
pub struct OperatorsOutput<'a> {
    pub column: &'a str,
    pub term: &'a str,
    pub operators: Vec<OperatorOutput>,
}

/// JSON output structure for a single operator.
#[derive(Serialize)]
pub struct OperatorOutput {
    pub name: &'static str,
    pub label: &'static str,
    pub aliases: &'static [&'static str],
}

/// Formats operator suggestions as JSON.
pub fn format_operators_json(
    column: &Column,
    term: &str,
    operators: &[Operator],
) -> Result<String, serde_json::Error> {
    let output = OperatorsOutput {
        column: &column.field,
        term,
        operators: operators
            .iter()
            .map(|op| OperatorOutput {
                name: op.as_str(),
                label: op.label(),
                aliases: op.aliases(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output)
}

/// Formats operator suggestions as a table.
pub fn format_operators_table(operators: &[Operator], use_colors: bool) -> String {
    if operators.is_empty() {
        return "No operators found.\n".to_string();
    }

    let mut output = String::new();

    let header = format!("{:<20} {:<22} {}", "Operator", "Label", "Aliases");
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for op in operators {
        let line = format!(
            "{:<20} {:<22} {}",
            format!("#{}", op.as_str()),
            op.label(),
            op.aliases().join(" ")
        );
        output.push_str(&line);
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashquery_rs::ValueType;

    #[test]
    fn test_format_operators_table() {
        let output = format_operators_table(&[Operator::GreaterThan], false);
        assert!(output.contains("#greaterThan"));
        assert!(output.contains("greater than"));
        assert!(output.contains("gt after >"));
    }

    #[test]
    fn test_format_operators_json() {
        let column = Column::new("stock", "Stock", ValueType::Number);
        let json: serde_json::Value = serde_json::from_str(
            &format_operators_json(&column, "l", &[Operator::LessThan]).unwrap(),
        )
        .unwrap();
        assert_eq!(json["column"], "stock");
        assert_eq!(json["term"], "l");
        assert_eq!(json["operators"][0]["name"], "lessThan");
    }
}
