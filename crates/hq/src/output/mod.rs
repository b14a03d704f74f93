//! Output formatting utilities for the hq CLI.
//!
//! This module provides functions for formatting data as tables or JSON.
//! It is organized into submodules by entity type:
//!
//! - [`search`] - Parsed searches and live picker state
//! - [`columns`] - Column catalog listings
//! - [`operators`] - Operator suggestions
//! - [`rows`] - Filtered data rows
//! - [`helpers`] - Common formatting utilities (truncation, value types)

mod columns;
pub mod helpers;
mod operators;
mod rows;
mod search;

// Re-export all public functions from submodules

// Search
pub use search::{format_outcome_json, format_outcome_table, format_state_table};

// Columns
pub use columns::{format_columns_json, format_columns_table};

// Operators
pub use operators::{format_operators_json, format_operators_table};

// Rows
pub use rows::{format_rows_json, format_rows_table};
