//! Hashtag query language for search bars.
//!
//! This module parses the text typed into a search bar into a structured
//! [`FilterSearch`], and evaluates it against rows of data.
//!
//! # Supported Syntax
//!
//! ## Single Conditions
//! - `#column #operator value` - Explicit condition
//! - `#operator value` - Condition on the default column
//! - `#column:value` - Contains shorthand
//!
//! ## Ranges
//! - `#price #inRange 10 #to 20` - Marker form
//! - `#price #between 10-20##` - Dash form, only once confirmed
//!
//! ## Joins
//! - `#and` - AND
//! - `#or` - OR
//! - `#( ... #)` - Grouping (one join kind per group)
//!
//! ## Confirmation
//! - `##` - Trailing marker that confirms the pattern
//!
//! # Example
//!
//! ```
//! use hashquery_rs::{Column, ValueType};
//! use hashquery_rs::filter::{parse_search, FilterEvaluator, JoinOperator, SearchOutcome};
//!
//! let catalog = vec![
//!     Column::new("name", "Name", ValueType::Text),
//!     Column::new("stock", "Stock", ValueType::Number),
//! ];
//!
//! let outcome = parse_search("#stock #gt 10 #or #name #contains asp##", None, &catalog);
//! let SearchOutcome::Filter(search) = outcome else { panic!("expected a filter") };
//! assert_eq!(search.joins, vec![JoinOperator::Or]);
//! assert!(search.is_multi_column);
//!
//! // Filter rows (empty example)
//! let rows: Vec<hashquery_rs::filter::Row> = vec![];
//! assert!(FilterEvaluator::new(&search).filter_rows(&rows).is_empty());
//! ```

mod ast;
mod condition;
mod dispatch;
mod evaluator;
mod helpers;
mod incremental;
mod lexer;
mod multi;
mod parser;
mod pattern;
mod range;

pub use ast::{
    Condition, EnhancedSearchState, Expression, FilterGroup, FilterSearch, JoinOperator,
    PartialCondition,
};
pub use condition::{parse_condition, parse_implicit_search};
pub use dispatch::{parse_search, SearchOutcome};
pub use evaluator::{matches_free_text, FilterEvaluator, Row};
pub use helpers::{
    count_joins, is_confirmed, is_hashtag_mode, operator_search_term, strip_confirmation,
    CONFIRM_MARKER, GROUP_CLOSE, GROUP_OPEN, JOIN_TRIGGER,
};
pub use incremental::parse_incremental;
pub use lexer::{Lexer, PositionedToken, Token};
pub use multi::parse_multi_condition;
pub use parser::{parse_grouped, GroupedParser, MAX_GROUP_DEPTH};
pub use pattern::{build_column_pattern, build_search_pattern, PatternMode};
pub use range::{parse_range, RangeValue};
