//! Routes raw search-bar text to the parser that fits its shape.

use serde::Serialize;
use tracing::trace;

use super::ast::{EnhancedSearchState, FilterSearch};
use super::condition::{parse_condition, parse_implicit_search};
use super::helpers::{count_joins, is_confirmed, is_hashtag_mode, GROUP_OPEN};
use super::incremental::parse_incremental;
use super::multi::parse_multi_condition;
use super::parser::GroupedParser;
use crate::column::Column;

/// What the search bar should do with the current text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "result", rename_all = "camelCase")]
pub enum SearchOutcome {
    /// Nothing typed.
    Empty,
    /// Plain text without hashtags: a global free-text search.
    FreeText(String),
    /// A resolved filter ready to apply.
    Filter(FilterSearch),
    /// Multi-condition text still being typed.
    Typing(EnhancedSearchState),
    /// Hashtag text that cannot be interpreted yet.
    Unresolved,
}

impl SearchOutcome {
    /// Returns the filter to apply, if any.
    pub fn filter(&self) -> Option<&FilterSearch> {
        match self {
            SearchOutcome::Filter(search) => Some(search),
            SearchOutcome::Typing(state) => state.filter_search.as_ref(),
            SearchOutcome::Empty | SearchOutcome::FreeText(_) | SearchOutcome::Unresolved => None,
        }
    }
}

/// Parses search-bar text, picking the parser from the shape of the text.
///
/// - `#(` goes to the grouped parser;
/// - join keywords go to the confirmed multi-condition parser when the text
///   ends with `##`, and to the incremental parser otherwise;
/// - `#field:value` is the contains shorthand;
/// - other hashtag text is a single condition, using `default_column` for
///   the `#operator value` form;
/// - anything else is free text.
///
/// # Example
///
/// ```
/// use hashquery_rs::{Column, ValueType};
/// use hashquery_rs::filter::{parse_search, SearchOutcome};
///
/// let catalog = vec![Column::new("stock", "Stock", ValueType::Number)];
///
/// assert!(matches!(parse_search("#stock #gt 10##", None, &catalog), SearchOutcome::Filter(_)));
/// assert!(matches!(parse_search("aspirin", None, &catalog), SearchOutcome::FreeText(_)));
/// assert_eq!(parse_search("#weight #gt 1##", None, &catalog), SearchOutcome::Unresolved);
/// ```
pub fn parse_search(text: &str, default_column: Option<&Column>, catalog: &[Column]) -> SearchOutcome {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return SearchOutcome::Empty;
    }

    if !trimmed.starts_with('#') {
        return SearchOutcome::FreeText(trimmed.to_string());
    }

    let resolved = if trimmed.contains(GROUP_OPEN) {
        trace!("routing to grouped parser");
        GroupedParser::parse(text, catalog).map(SearchOutcome::Filter)
    } else if count_joins(text) > 0 {
        if is_confirmed(text) {
            trace!("routing to confirmed multi-condition parser");
            parse_multi_condition(text, catalog).map(SearchOutcome::Filter)
        } else {
            trace!("routing to incremental parser");
            parse_incremental(text, catalog).map(SearchOutcome::Typing)
        }
    } else if is_hashtag_mode(text) {
        trace!("routing to single-condition parser");
        parse_condition(text, default_column, catalog)
            .map(FilterSearch::single)
            .map(SearchOutcome::Filter)
    } else {
        trace!("routing to contains shorthand");
        parse_implicit_search(text, catalog).map(SearchOutcome::Filter)
    };

    resolved.unwrap_or(SearchOutcome::Unresolved)
}
