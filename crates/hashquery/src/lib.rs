//! Hashtag search-bar query language.
//!
//! Parses text such as `#stock #gt 10 #and #lt 50##` into a structured
//! [`filter::FilterSearch`] against a catalog of [`Column`]s, derives live
//! picker state while the text is still being typed, and evaluates the
//! result against rows of data.
//!
//! # Quick Start
//!
//! For convenient imports, use the prelude:
//!
//! ```
//! use hashquery_rs::prelude::*;
//!
//! let catalog = vec![Column::new("stock", "Stock", ValueType::Number)];
//! assert_eq!(resolve_column(&catalog, "STOCK").map(|c| c.field.as_str()), Some("stock"));
//! assert_eq!(resolve_operator(ValueType::Number, "gt"), Some(Operator::GreaterThan));
//! ```

pub mod column;
pub mod error;
pub mod filter;
pub mod operator;
pub mod prelude;

pub use column::{column_suggestions, resolve_column, validate_catalog, Column, ValueType};
pub use error::{CatalogError, CatalogResult};
pub use operator::{operator_suggestions, operators_for, resolve_operator, Operator};
