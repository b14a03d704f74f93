//! Error types for column catalogs.
//!
//! The parsers themselves never fail with an error: anything they cannot
//! interpret yet yields `None`. Errors only arise when a catalog is built
//! from untrusted configuration.

use thiserror::Error;

/// A specialized Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors found while validating a column catalog.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// A column has an empty field identifier.
    #[error("column #{index} has an empty field identifier")]
    EmptyField {
        /// Position of the column in the catalog.
        index: usize,
    },

    /// Two columns share a field identifier.
    #[error("duplicate column field: {field}")]
    DuplicateField {
        /// The repeated field identifier.
        field: String,
    },

    /// A field identifier cannot be typed as a hashtag atom, or is a
    /// reserved keyword (`and`, `or`, `to`).
    #[error("invalid column field: {field} (whitespace, '#' and the keywords and/or/to are not allowed)")]
    InvalidField {
        /// The offending field identifier.
        field: String,
    },
}

impl CatalogError {
    /// Creates a duplicate field error.
    pub fn duplicate_field(field: impl Into<String>) -> Self {
        CatalogError::DuplicateField {
            field: field.into(),
        }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>) -> Self {
        CatalogError::InvalidField {
            field: field.into(),
        }
    }
}
