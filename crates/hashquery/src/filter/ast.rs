//! Structured results produced by the parsers.

use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::operator::Operator;

/// The keyword joining two sibling expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum JoinOperator {
    And,
    Or,
}

impl JoinOperator {
    /// Parses a join keyword (without the leading `#`), case-insensitively.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        if keyword.eq_ignore_ascii_case("and") {
            Some(JoinOperator::And)
        } else if keyword.eq_ignore_ascii_case("or") {
            Some(JoinOperator::Or)
        } else {
            None
        }
    }

    /// Returns the lowercase keyword typed after `#`.
    pub fn keyword(&self) -> &'static str {
        match self {
            JoinOperator::And => "and",
            JoinOperator::Or => "or",
        }
    }
}

impl std::fmt::Display for JoinOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinOperator::And => f.write_str("AND"),
            JoinOperator::Or => f.write_str("OR"),
        }
    }
}

/// A single field/operator/value comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Field identifier of the resolved column.
    pub field: String,
    /// The resolved column.
    pub column: Column,
    pub operator: Operator,
    pub value: String,
    /// Upper bound for range operators. `None` on a range operator means the
    /// range is incomplete.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_to: Option<String>,
}

impl Condition {
    /// Creates a condition for `column`.
    pub fn new(column: &Column, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: column.field.clone(),
            column: column.clone(),
            operator,
            value: value.into(),
            value_to: None,
        }
    }

    /// Sets the upper bound of a range condition.
    pub fn with_value_to(mut self, value_to: impl Into<String>) -> Self {
        self.value_to = Some(value_to.into());
        self
    }

    /// Returns true for a range operator that is still missing its second value.
    pub fn is_incomplete_range(&self) -> bool {
        self.operator.is_range() && self.value_to.is_none()
    }
}

/// A node of the filter tree: either a leaf condition or a nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Expression {
    Condition(Condition),
    Group(FilterGroup),
}

impl Expression {
    /// Returns the first condition in depth-first order.
    pub fn first_condition(&self) -> Option<&Condition> {
        match self {
            Expression::Condition(condition) => Some(condition),
            Expression::Group(group) => group.first_condition(),
        }
    }

    fn collect_conditions<'a>(&'a self, out: &mut Vec<&'a Condition>) {
        match self {
            Expression::Condition(condition) => out.push(condition),
            Expression::Group(group) => {
                for node in &group.nodes {
                    node.collect_conditions(out);
                }
            }
        }
    }
}

/// A join-connected collection of expressions.
///
/// Every direct child is joined by the same operator; mixing `AND` and `OR`
/// at one level requires an explicit nested group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterGroup {
    pub join: JoinOperator,
    pub nodes: Vec<Expression>,
    /// True for a user-typed `#( ... #)` group, false for the implicit
    /// top-level wrapper.
    pub is_explicit: bool,
}

impl FilterGroup {
    /// Returns the first condition in depth-first order.
    pub fn first_condition(&self) -> Option<&Condition> {
        self.nodes.iter().find_map(Expression::first_condition)
    }

    /// Returns every condition in the tree, depth-first.
    pub fn conditions(&self) -> Vec<&Condition> {
        let mut out = Vec::new();
        for node in &self.nodes {
            node.collect_conditions(&mut out);
        }
        out
    }

    /// Returns the direct children as conditions, or `None` if any child is a group.
    pub fn flat_conditions(&self) -> Option<Vec<&Condition>> {
        self.nodes
            .iter()
            .map(|node| match node {
                Expression::Condition(condition) => Some(condition),
                Expression::Group(_) => None,
            })
            .collect()
    }
}

/// The structured result of a fully resolved search pattern.
///
/// The top-level `field`/`column`/`operator`/`value` fields mirror the first
/// condition for consumers that only understand single conditions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSearch {
    pub field: String,
    pub column: Column,
    pub operator: Operator,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_to: Option<String>,
    /// False only for the `#field:value` contains shorthand.
    pub is_explicit_operator: bool,
    /// Flat condition list. Empty when the pattern nests groups.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Joins between consecutive `conditions`.
    #[serde(default)]
    pub joins: Vec<JoinOperator>,
    pub is_multi_condition: bool,
    pub is_multi_column: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_group: Option<FilterGroup>,
}

impl FilterSearch {
    /// Builds a search for a single explicit condition.
    pub fn single(condition: Condition) -> Self {
        Self {
            field: condition.field.clone(),
            column: condition.column.clone(),
            operator: condition.operator,
            value: condition.value.clone(),
            value_to: condition.value_to.clone(),
            is_explicit_operator: true,
            conditions: Vec::new(),
            joins: Vec::new(),
            is_multi_condition: false,
            is_multi_column: false,
            filter_group: None,
        }
    }

    /// Builds a search over a flat list of conditions.
    ///
    /// Returns `None` when `conditions` is empty. `joins` must hold one entry
    /// fewer than `conditions`.
    pub fn from_conditions(conditions: Vec<Condition>, joins: Vec<JoinOperator>) -> Option<Self> {
        let first = conditions.first()?;
        let is_multi_column = conditions.iter().any(|c| c.field != first.field);
        let mut search = Self::single(first.clone());
        search.is_multi_condition = conditions.len() > 1;
        search.is_multi_column = is_multi_column;
        search.conditions = conditions;
        search.joins = joins;
        Some(search)
    }

    /// Builds a search from a parsed filter tree.
    ///
    /// Flat `conditions`/`joins` are only filled when every direct child of
    /// `group` is a condition; nested trees must be walked via `filter_group`.
    pub fn from_group(group: FilterGroup) -> Option<Self> {
        let first = group.first_condition()?.clone();

        let all = group.conditions();
        let fields: std::collections::HashSet<&str> =
            all.iter().map(|c| c.field.as_str()).collect();
        let is_multi_column = fields.len() > 1;
        let is_multi_condition = all.len() > 1;

        let (conditions, joins) = match group.flat_conditions() {
            Some(flat) => {
                let joins = vec![group.join; flat.len().saturating_sub(1)];
                (flat.into_iter().cloned().collect(), joins)
            }
            None => (Vec::new(), Vec::new()),
        };

        let mut search = Self::single(first);
        search.conditions = conditions;
        search.joins = joins;
        search.is_multi_condition = is_multi_condition;
        search.is_multi_column = is_multi_column;
        search.filter_group = Some(group);
        Some(search)
    }

    /// Returns the flattened first condition.
    pub fn primary_condition(&self) -> Condition {
        Condition {
            field: self.field.clone(),
            column: self.column.clone(),
            operator: self.operator,
            value: self.value.clone(),
            value_to: self.value_to.clone(),
        }
    }
}

/// An in-progress condition used while the user is still typing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialCondition {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<Column>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<Operator>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_to: Option<String>,
    /// A `#to` marker was typed but the second value has not been.
    #[serde(default)]
    pub waiting_for_value_to: bool,
}

impl PartialCondition {
    pub(crate) fn with_column(column: &Column) -> Self {
        Self {
            field: Some(column.field.clone()),
            column: Some(column.clone()),
            ..Self::default()
        }
    }

    /// Returns true when a non-empty value has been typed.
    pub fn has_value(&self) -> bool {
        self.value.as_deref().is_some_and(|v| !v.is_empty())
    }

    /// Returns true when column, operator and value are all present.
    pub fn is_complete(&self) -> bool {
        self.column.is_some() && self.operator.is_some() && self.has_value()
    }

    /// Converts a complete partial into a condition.
    pub fn to_condition(&self) -> Option<Condition> {
        if !self.is_complete() {
            return None;
        }
        let column = self.column.as_ref()?;
        Some(Condition {
            field: column.field.clone(),
            column: column.clone(),
            operator: self.operator?,
            value: self.value.clone()?,
            value_to: self.value_to.clone(),
        })
    }
}

/// UI state derived from in-progress multi-condition text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnhancedSearchState {
    pub partial_conditions: Vec<PartialCondition>,
    pub joins: Vec<JoinOperator>,
    pub show_column_selector: bool,
    pub show_operator_selector: bool,
    pub show_join_operator_selector: bool,
    /// Index into `partial_conditions`, or its length when a new condition is
    /// about to start.
    pub active_condition_index: usize,
    /// The last condition was committed with `##` or a join trigger.
    pub is_confirmed: bool,
    /// Preview built from the conditions that are safe to apply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_search: Option<FilterSearch>,
}

impl EnhancedSearchState {
    /// Returns true when any selector is open.
    pub fn has_open_selector(&self) -> bool {
        self.show_column_selector || self.show_operator_selector || self.show_join_operator_selector
    }

    /// Returns the condition currently being edited, if any.
    pub fn active_condition(&self) -> Option<&PartialCondition> {
        self.partial_conditions.get(self.active_condition_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::ValueType;

    fn name() -> Column {
        Column::new("name", "Name", ValueType::Text)
    }

    fn stock() -> Column {
        Column::new("stock", "Stock", ValueType::Number)
    }

    #[test]
    fn test_join_from_keyword() {
        assert_eq!(JoinOperator::from_keyword("AND"), Some(JoinOperator::And));
        assert_eq!(JoinOperator::from_keyword("or"), Some(JoinOperator::Or));
        assert_eq!(JoinOperator::from_keyword("to"), None);
    }

    #[test]
    fn test_from_group_flat() {
        let group = FilterGroup {
            join: JoinOperator::Or,
            nodes: vec![
                Expression::Condition(Condition::new(&name(), Operator::Contains, "asp")),
                Expression::Condition(Condition::new(&name(), Operator::Equals, "ibuprofen")),
            ],
            is_explicit: true,
        };
        let search = FilterSearch::from_group(group).unwrap();
        assert_eq!(search.conditions.len(), 2);
        assert_eq!(search.joins, vec![JoinOperator::Or]);
        assert!(search.is_multi_condition);
        assert!(!search.is_multi_column);
        assert_eq!(search.value, "asp");
    }

    #[test]
    fn test_from_group_nested_leaves_conditions_empty() {
        let inner = FilterGroup {
            join: JoinOperator::Or,
            nodes: vec![
                Expression::Condition(Condition::new(&stock(), Operator::GreaterThan, "5")),
                Expression::Condition(Condition::new(&stock(), Operator::LessThan, "10")),
            ],
            is_explicit: true,
        };
        let group = FilterGroup {
            join: JoinOperator::And,
            nodes: vec![
                Expression::Condition(Condition::new(&name(), Operator::Contains, "x")),
                Expression::Group(inner),
            ],
            is_explicit: false,
        };
        let search = FilterSearch::from_group(group).unwrap();
        assert!(search.conditions.is_empty());
        assert!(search.joins.is_empty());
        assert!(search.is_multi_column);
        assert_eq!(search.field, "name");
    }

    #[test]
    fn test_from_group_first_condition_is_depth_first() {
        let inner = FilterGroup {
            join: JoinOperator::And,
            nodes: vec![Expression::Condition(Condition::new(
                &stock(),
                Operator::GreaterThan,
                "5",
            ))],
            is_explicit: true,
        };
        let group = FilterGroup {
            join: JoinOperator::And,
            nodes: vec![
                Expression::Group(inner),
                Expression::Condition(Condition::new(&name(), Operator::Contains, "x")),
            ],
            is_explicit: false,
        };
        let search = FilterSearch::from_group(group).unwrap();
        assert_eq!(search.field, "stock");
    }

    #[test]
    fn test_from_group_empty() {
        let group = FilterGroup {
            join: JoinOperator::And,
            nodes: vec![],
            is_explicit: false,
        };
        assert!(FilterSearch::from_group(group).is_none());
    }

    #[test]
    fn test_partial_complete() {
        let mut partial = PartialCondition::with_column(&stock());
        assert!(!partial.is_complete());
        partial.operator = Some(Operator::GreaterThan);
        partial.value = Some(String::new());
        assert!(!partial.is_complete());
        partial.value = Some("10".to_string());
        assert!(partial.is_complete());
        assert_eq!(partial.to_condition().unwrap().value, "10");
    }

    #[test]
    fn test_filter_search_serializes_camel_case() {
        let search = FilterSearch::single(Condition::new(&stock(), Operator::GreaterThan, "10"));
        let json = serde_json::to_value(&search).unwrap();
        assert_eq!(json["operator"], "greaterThan");
        assert_eq!(json["isMultiColumn"], false);
        assert_eq!(json["column"]["valueType"], "number");
        assert!(json.get("valueTo").is_none());
    }
}
