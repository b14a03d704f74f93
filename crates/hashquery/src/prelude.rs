//! Prelude module for convenient imports.
//!
//! # Example
//!
//! ```
//! use hashquery_rs::prelude::*;
//!
//! // Now you have access to:
//! // - Column, ValueType, Operator (catalog)
//! // - parse_search, SearchOutcome (entry point)
//! // - FilterSearch, Condition, JoinOperator (parsed result)
//! // - FilterEvaluator, Row (evaluation)
//! ```

// Catalog types
pub use crate::column::{resolve_column, Column, ValueType};
pub use crate::operator::{resolve_operator, Operator};

// Error types
pub use crate::error::{CatalogError, CatalogResult};

// Parsing
pub use crate::filter::{
    parse_incremental, parse_search, EnhancedSearchState, PartialCondition, SearchOutcome,
};

// Parsed result
pub use crate::filter::{Condition, Expression, FilterGroup, FilterSearch, JoinOperator};

// Evaluation
pub use crate::filter::{matches_free_text, FilterEvaluator, Row};
