//! Inverse direction: rendering search text from structured values.

use serde::{Deserialize, Serialize};

use super::ast::FilterSearch;
use crate::column::Column;

/// How a column hashtag is rendered into the search bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// `#field:` ready for a contains value.
    #[default]
    Colon,
    /// `#field ` ready for an operator.
    Space,
    /// `#field` with nothing after it.
    Bare,
}

/// Renders the text that selects `column` in the given mode.
pub fn build_column_pattern(column: &Column, mode: PatternMode) -> String {
    match mode {
        PatternMode::Colon => format!("#{}:", column.field),
        PatternMode::Space => format!("#{} ", column.field),
        PatternMode::Bare => format!("#{}", column.field),
    }
}

/// Renders `search` back to text with `new_value` in place of its value.
///
/// The shorthand form `#field:value` is kept for searches that came from it;
/// everything else becomes `#field #operator value`.
///
/// # Example
///
/// ```
/// use hashquery_rs::{Column, ValueType};
/// use hashquery_rs::filter::{build_search_pattern, parse_condition, FilterSearch};
///
/// let catalog = vec![Column::new("stock", "Stock", ValueType::Number)];
/// let condition = parse_condition("#stock #gt 10", None, &catalog).unwrap();
/// let search = FilterSearch::single(condition);
/// assert_eq!(build_search_pattern(&search, "25"), "#stock #greaterThan 25");
/// ```
pub fn build_search_pattern(search: &FilterSearch, new_value: &str) -> String {
    let value = new_value.trim();
    if search.is_explicit_operator {
        format!("#{} #{} {}", search.field, search.operator.as_str(), value)
    } else {
        format!("#{}:{}", search.field, value)
    }
}
