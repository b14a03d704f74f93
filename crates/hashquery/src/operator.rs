//! Comparison operators and operator resolution.

use serde::{Deserialize, Serialize};

use crate::column::{normalize, ValueType};

/// A comparison operator that can appear after a column hashtag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operator {
    Contains,
    NotContains,
    Equals,
    NotEquals,
    StartsWith,
    EndsWith,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    /// Two-value range, inclusive on both ends.
    InRange,
}

const ALL_OPERATORS: [Operator; 11] = [
    Operator::Contains,
    Operator::NotContains,
    Operator::Equals,
    Operator::NotEquals,
    Operator::StartsWith,
    Operator::EndsWith,
    Operator::GreaterThan,
    Operator::GreaterThanOrEqual,
    Operator::LessThan,
    Operator::LessThanOrEqual,
    Operator::InRange,
];

impl Operator {
    /// Returns the canonical name typed after `#`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Contains => "contains",
            Operator::NotContains => "notContains",
            Operator::Equals => "equals",
            Operator::NotEquals => "notEquals",
            Operator::StartsWith => "startsWith",
            Operator::EndsWith => "endsWith",
            Operator::GreaterThan => "greaterThan",
            Operator::GreaterThanOrEqual => "greaterThanOrEqual",
            Operator::LessThan => "lessThan",
            Operator::LessThanOrEqual => "lessThanOrEqual",
            Operator::InRange => "inRange",
        }
    }

    /// Returns the label shown in the operator picker.
    pub fn label(&self) -> &'static str {
        match self {
            Operator::Contains => "contains",
            Operator::NotContains => "does not contain",
            Operator::Equals => "equals",
            Operator::NotEquals => "does not equal",
            Operator::StartsWith => "starts with",
            Operator::EndsWith => "ends with",
            Operator::GreaterThan => "greater than",
            Operator::GreaterThanOrEqual => "greater than or equal",
            Operator::LessThan => "less than",
            Operator::LessThanOrEqual => "less than or equal",
            Operator::InRange => "between",
        }
    }

    /// Short forms accepted in addition to the canonical name and label.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Operator::Contains => &["has", "like"],
            Operator::NotContains => &["excludes"],
            Operator::Equals => &["eq", "is", "="],
            Operator::NotEquals => &["neq", "ne", "not", "!="],
            Operator::StartsWith => &["begins", "prefix"],
            Operator::EndsWith => &["suffix"],
            Operator::GreaterThan => &["gt", "after", ">"],
            Operator::GreaterThanOrEqual => &["gte", "ge", ">="],
            Operator::LessThan => &["lt", "before", "<"],
            Operator::LessThanOrEqual => &["lte", "le", "<="],
            Operator::InRange => &["between", "range"],
        }
    }

    /// Returns true when the operator takes two values (`value` and `valueTo`).
    pub fn is_range(&self) -> bool {
        matches!(self, Operator::InRange)
    }

    /// Returns true when the operator can be applied to the value type.
    pub fn supports(&self, value_type: ValueType) -> bool {
        match self {
            Operator::Equals | Operator::NotEquals => true,
            Operator::Contains
            | Operator::NotContains
            | Operator::StartsWith
            | Operator::EndsWith => value_type == ValueType::Text,
            Operator::GreaterThan
            | Operator::GreaterThanOrEqual
            | Operator::LessThan
            | Operator::LessThanOrEqual
            | Operator::InRange => matches!(value_type, ValueType::Number | ValueType::Date),
        }
    }

    fn names(&self) -> impl Iterator<Item = &'static str> {
        [self.as_str(), self.label()]
            .into_iter()
            .chain(self.aliases().iter().copied())
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lists the operators valid for a value type, in picker order.
pub fn operators_for(value_type: ValueType) -> Vec<Operator> {
    ALL_OPERATORS
        .into_iter()
        .filter(|op| op.supports(value_type))
        .collect()
}

/// Resolves a typed operator token for a column of the given value type.
///
/// Matching mirrors [`resolve_column`](crate::resolve_column): an exact
/// case-insensitive pass over canonical names, labels and aliases, then a
/// separator-normalized pass. Operators that do not support the value type
/// are never returned.
///
/// # Example
///
/// ```
/// use hashquery_rs::{resolve_operator, Operator, ValueType};
///
/// assert_eq!(resolve_operator(ValueType::Number, "gt"), Some(Operator::GreaterThan));
/// assert_eq!(resolve_operator(ValueType::Number, "Greater Than"), Some(Operator::GreaterThan));
/// assert_eq!(resolve_operator(ValueType::Number, "contains"), None);
/// ```
pub fn resolve_operator(value_type: ValueType, input: &str) -> Option<Operator> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    let candidates = operators_for(value_type);
    let exact = candidates
        .iter()
        .copied()
        .find(|op| op.names().any(|name| name.to_lowercase() == needle));
    if exact.is_some() {
        return exact;
    }

    let needle = normalize(&needle);
    if needle.is_empty() {
        return None;
    }
    candidates
        .into_iter()
        .find(|op| op.names().any(|name| normalize(name) == needle))
}

/// Lists operators for the value type whose name, label or alias starts with `term`.
pub fn operator_suggestions(value_type: ValueType, term: &str) -> Vec<Operator> {
    let needle = normalize(term);
    operators_for(value_type)
        .into_iter()
        .filter(|op| needle.is_empty() || op.names().any(|name| normalize(name).starts_with(&needle)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_canonical_name() {
        assert_eq!(
            resolve_operator(ValueType::Number, "greaterThan"),
            Some(Operator::GreaterThan)
        );
        assert_eq!(
            resolve_operator(ValueType::Text, "contains"),
            Some(Operator::Contains)
        );
    }

    #[test]
    fn test_resolve_case_insensitive() {
        assert_eq!(
            resolve_operator(ValueType::Number, "GREATERTHAN"),
            Some(Operator::GreaterThan)
        );
        assert_eq!(
            resolve_operator(ValueType::Text, "StartsWith"),
            Some(Operator::StartsWith)
        );
    }

    #[test]
    fn test_resolve_aliases() {
        assert_eq!(resolve_operator(ValueType::Number, "gt"), Some(Operator::GreaterThan));
        assert_eq!(resolve_operator(ValueType::Number, "lte"), Some(Operator::LessThanOrEqual));
        assert_eq!(resolve_operator(ValueType::Number, "between"), Some(Operator::InRange));
        assert_eq!(resolve_operator(ValueType::Date, "before"), Some(Operator::LessThan));
        assert_eq!(resolve_operator(ValueType::Text, "eq"), Some(Operator::Equals));
    }

    #[test]
    fn test_resolve_normalized_label() {
        assert_eq!(
            resolve_operator(ValueType::Number, "greater_than"),
            Some(Operator::GreaterThan)
        );
        assert_eq!(
            resolve_operator(ValueType::Text, "starts-with"),
            Some(Operator::StartsWith)
        );
    }

    #[test]
    fn test_resolve_respects_value_type() {
        assert_eq!(resolve_operator(ValueType::Number, "contains"), None);
        assert_eq!(resolve_operator(ValueType::Text, "gt"), None);
        assert_eq!(resolve_operator(ValueType::Boolean, "between"), None);
        assert_eq!(resolve_operator(ValueType::Boolean, "equals"), Some(Operator::Equals));
    }

    #[test]
    fn test_resolve_unknown() {
        assert_eq!(resolve_operator(ValueType::Text, "frobnicate"), None);
        assert_eq!(resolve_operator(ValueType::Text, ""), None);
        assert_eq!(resolve_operator(ValueType::Text, "cont"), None);
    }

    #[test]
    fn test_is_range() {
        assert!(Operator::InRange.is_range());
        assert!(!Operator::GreaterThan.is_range());
    }

    #[test]
    fn test_operators_for_number() {
        let ops = operators_for(ValueType::Number);
        assert!(ops.contains(&Operator::InRange));
        assert!(!ops.contains(&Operator::Contains));
        assert_eq!(ops[0], Operator::Equals);
    }

    #[test]
    fn test_operator_suggestions() {
        let ops = operator_suggestions(ValueType::Number, "gre");
        assert_eq!(ops, vec![Operator::GreaterThan, Operator::GreaterThanOrEqual]);

        let ops = operator_suggestions(ValueType::Text, "");
        assert_eq!(ops.len(), operators_for(ValueType::Text).len());
    }

    #[test]
    fn test_serde_wire_name() {
        let json = serde_json::to_string(&Operator::GreaterThanOrEqual).unwrap();
        assert_eq!(json, "\"greaterThanOrEqual\"");
        let op: Operator = serde_json::from_str("\"inRange\"").unwrap();
        assert_eq!(op, Operator::InRange);
    }
}
