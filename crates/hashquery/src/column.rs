//! Column catalog and the column resolver.
//!
//! The catalog is supplied by the caller (usually from configuration) and is
//! never mutated by the parser. Columns are looked up by field identifier or
//! display name with separator-insensitive matching.

use serde::{Deserialize, Serialize};

use crate::error::{CatalogError, CatalogResult};

/// The kind of value stored in a column.
///
/// The value type decides which operators are valid for the column and how
/// the evaluator compares cell values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValueType {
    /// Free text.
    #[default]
    Text,
    /// Integer or floating point numbers.
    Number,
    /// Calendar dates in `YYYY-MM-DD` form.
    Date,
    /// True/false flags.
    Boolean,
}

impl ValueType {
    /// Returns the lowercase name used in configuration files.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValueType::Text => "text",
            ValueType::Number => "number",
            ValueType::Date => "date",
            ValueType::Boolean => "boolean",
        }
    }
}

impl std::fmt::Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A searchable column of the underlying data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    /// Field identifier used in row data.
    pub field: String,

    /// Human-readable name shown in the column picker.
    #[serde(default)]
    pub display_name: String,

    /// Whether the column takes part in suggestions and free-text search.
    #[serde(default = "default_searchable")]
    pub searchable: bool,

    /// Type of the values stored in this column.
    #[serde(default)]
    pub value_type: ValueType,
}

fn default_searchable() -> bool {
    true
}

impl Column {
    /// Creates a searchable column.
    ///
    /// # Example
    ///
    /// ```
    /// use hashquery_rs::{Column, ValueType};
    ///
    /// let column = Column::new("stock", "Stock", ValueType::Number);
    /// assert!(column.searchable);
    /// ```
    pub fn new(field: impl Into<String>, display_name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            field: field.into(),
            display_name: display_name.into(),
            searchable: true,
            value_type,
        }
    }

    /// Marks the column as hidden from suggestions and free-text search.
    pub fn not_searchable(mut self) -> Self {
        self.searchable = false;
        self
    }

    /// Returns the display name, falling back to the field identifier.
    pub fn label(&self) -> &str {
        if self.display_name.is_empty() {
            &self.field
        } else {
            &self.display_name
        }
    }
}

/// Lowercases and strips whitespace, underscores and dashes.
pub(crate) fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Resolves a typed column token against the catalog.
///
/// The input is trimmed and compared case-insensitively against each
/// column's field and display name. Only when no column matches exactly are
/// both sides normalized by dropping whitespace, `_` and `-`. There is no
/// prefix or substring matching.
///
/// # Example
///
/// ```
/// use hashquery_rs::{resolve_column, Column, ValueType};
///
/// let catalog = vec![Column::new("unit_price", "Unit Price", ValueType::Number)];
/// assert!(resolve_column(&catalog, "unit price").is_some());
/// assert!(resolve_column(&catalog, "unitprice").is_some());
/// assert!(resolve_column(&catalog, "unit").is_none());
/// ```
pub fn resolve_column<'a>(catalog: &'a [Column], input: &str) -> Option<&'a Column> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let exact = catalog.iter().find(|c| {
        c.field.to_lowercase() == needle || c.display_name.to_lowercase() == needle
    });
    if exact.is_some() {
        return exact;
    }

    let needle = normalize(&needle);
    if needle.is_empty() {
        return None;
    }
    catalog
        .iter()
        .find(|c| normalize(&c.field) == needle || normalize(&c.display_name) == needle)
}

/// Lists searchable columns whose field or display name starts with `partial`.
///
/// Used to populate the column picker while a column token is being typed.
/// An empty partial returns every searchable column.
pub fn column_suggestions<'a>(catalog: &'a [Column], partial: &str) -> Vec<&'a Column> {
    let needle = normalize(partial.trim_start_matches('#'));
    catalog
        .iter()
        .filter(|c| c.searchable)
        .filter(|c| {
            needle.is_empty()
                || normalize(&c.field).starts_with(&needle)
                || normalize(&c.display_name).starts_with(&needle)
        })
        .collect()
}

/// Words the lexer always reads as joins or the range marker.
const RESERVED_FIELDS: [&str; 3] = ["and", "or", "to"];

/// Checks that every column has a field identifier and that identifiers are unique.
///
/// Fields must also be typeable as a hashtag, so whitespace, `#` and the
/// reserved keywords are rejected.
pub fn validate_catalog(catalog: &[Column]) -> CatalogResult<()> {
    let mut seen = std::collections::HashSet::new();
    for (index, column) in catalog.iter().enumerate() {
        let field = column.field.trim();
        if field.is_empty() {
            return Err(CatalogError::EmptyField { index });
        }
        if field.contains(char::is_whitespace)
            || field.contains('#')
            || RESERVED_FIELDS.iter().any(|k| field.eq_ignore_ascii_case(k))
        {
            return Err(CatalogError::invalid_field(field));
        }
        if !seen.insert(field.to_lowercase()) {
            return Err(CatalogError::duplicate_field(field));
        }
    }
    Ok(())
}
