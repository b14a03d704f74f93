//! Recursive descent parser for grouped patterns.

use tracing::debug;

use super::ast::{Condition, Expression, FilterGroup, FilterSearch, JoinOperator};
use super::helpers::{is_confirmed, GROUP_OPEN};
use super::lexer::{Lexer, Token};
use super::range::parse_range;
use crate::column::{resolve_column, Column};
use crate::operator::resolve_operator;

/// Deepest `#(` nesting accepted before the pattern is rejected.
pub const MAX_GROUP_DEPTH: usize = 64;

/// Parser for confirmed patterns that use `#( ... #)` groups.
///
/// # Grammar
///
/// ```text
/// pattern    ::= sequence "##" EOF
/// sequence   ::= expression (join expression)*
/// expression ::= group | condition
/// group      ::= "#(" sequence "#)"
/// condition  ::= "#"field "#"operator value ("#to" value)?
/// join       ::= "#and" | "#or"
/// ```
///
/// There is no precedence between `#and` and `#or`: every join inside one
/// sequence must be the same keyword, and mixing them at one level fails
/// the whole pattern. Nesting a group is the only way to combine both.
/// Groups nested deeper than [`MAX_GROUP_DEPTH`] fail the pattern too.
///
/// # Example
///
/// ```
/// use hashquery_rs::{Column, ValueType};
/// use hashquery_rs::filter::GroupedParser;
///
/// let catalog = vec![
///     Column::new("name", "Name", ValueType::Text),
///     Column::new("stock", "Stock", ValueType::Number),
/// ];
///
/// let search = GroupedParser::parse(
///     "#( #name #contains asp #or #name #contains ibu #) #and #stock #gt 0##",
///     &catalog,
/// )
/// .unwrap();
/// assert!(search.is_multi_column);
///
/// // AND and OR as siblings need explicit grouping
/// assert!(GroupedParser::parse("#( #stock #gt 1 #and #stock #lt 5 #or #stock #eq 9 #)##", &catalog).is_none());
/// ```
pub struct GroupedParser<'c> {
    tokens: Vec<Token>,
    position: usize,
    depth: usize,
    catalog: &'c [Column],
}

/// The expressions of one sequence and the join shared by all of them.
struct Sequence {
    nodes: Vec<Expression>,
    join: Option<JoinOperator>,
}

impl<'c> GroupedParser<'c> {
    /// Parses a grouped pattern into a [`FilterSearch`].
    ///
    /// Returns `None` unless the text contains `#(` and ends with `##`, and
    /// for any syntax error, unknown column or operator, mismatched joins,
    /// a range condition without a second value, or groups nested too deep.
    pub fn parse(input: &str, catalog: &'c [Column]) -> Option<FilterSearch> {
        if !input.contains(GROUP_OPEN) || !is_confirmed(input) {
            return None;
        }

        let tokens = Lexer::new(input.trim()).tokenize();
        let mut parser = Self {
            tokens,
            position: 0,
            depth: 0,
            catalog,
        };

        let sequence = parser.parse_sequence(false)?;

        // Exactly the confirmation marker must remain
        if parser.advance() != Some(&Token::Confirm) || parser.peek().is_some() {
            debug!(input, position = parser.position, "grouped pattern has trailing tokens");
            return None;
        }

        FilterSearch::from_group(Self::into_root(sequence))
    }

    /// Returns the current token without consuming it.
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    /// Consumes and returns the current token.
    fn advance(&mut self) -> Option<&Token> {
        let token = self.tokens.get(self.position);
        if token.is_some() {
            self.position += 1;
        }
        token
    }

    /// Checks if the current token matches the expected token.
    fn check(&self, expected: &Token) -> bool {
        self.peek() == Some(expected)
    }

    /// A lone explicit group is the root itself; anything else is wrapped in
    /// an implicit group.
    fn into_root(mut sequence: Sequence) -> FilterGroup {
        if sequence.nodes.len() == 1 && matches!(sequence.nodes[0], Expression::Group(_)) {
            if let Some(Expression::Group(group)) = sequence.nodes.pop() {
                return group;
            }
        }

        FilterGroup {
            join: sequence.join.unwrap_or(JoinOperator::And),
            nodes: sequence.nodes,
            is_explicit: false,
        }
    }

    /// Parses `expression (join expression)*`.
    ///
    /// A nested sequence must be closed by `#)`, which is consumed here.
    fn parse_sequence(&mut self, nested: bool) -> Option<Sequence> {
        let mut nodes = vec![self.parse_expression()?];
        let mut join: Option<JoinOperator> = None;

        while let Some(next) = self.peek().and_then(Token::as_join) {
            match join {
                Some(established) if established != next => {
                    debug!(
                        position = self.position,
                        %established,
                        found = %next,
                        "mixed joins at one nesting level"
                    );
                    return None;
                }
                _ => join = Some(next),
            }
            self.advance(); // consume join
            nodes.push(self.parse_expression()?);
        }

        if nested {
            if !self.check(&Token::GroupClose) {
                debug!(position = self.position, "unclosed group");
                return None;
            }
            self.advance(); // consume '#)'
        }

        Some(Sequence { nodes, join })
    }

    /// Parses `group | condition`.
    fn parse_expression(&mut self) -> Option<Expression> {
        if self.check(&Token::GroupOpen) {
            self.advance(); // consume '#('
            self.depth += 1;
            if self.depth > MAX_GROUP_DEPTH {
                debug!(position = self.position, depth = self.depth, "groups nested too deep");
                return None;
            }
            let sequence = self.parse_sequence(true)?;
            self.depth -= 1;
            return Some(Expression::Group(FilterGroup {
                join: sequence.join.unwrap_or(JoinOperator::And),
                nodes: sequence.nodes,
                is_explicit: true,
            }));
        }

        self.parse_condition().map(Expression::Condition)
    }

    /// Parses `#field #operator value (#to value)?`.
    fn parse_condition(&mut self) -> Option<Condition> {
        let catalog = self.catalog;
        let column = match self.advance()? {
            Token::Hashtag(name) if JoinOperator::from_keyword(name).is_none() => {
                resolve_column(catalog, name)?
            }
            _ => return None,
        };

        let operator = match self.advance()? {
            Token::Hashtag(name) => resolve_operator(column.value_type, name)?,
            _ => return None,
        };

        let value = match self.advance()? {
            Token::Value(text) => text.clone(),
            _ => return None,
        };

        let explicit_to = if self.peek().is_some_and(Token::is_range_marker) {
            self.advance(); // consume '#to'
            match self.advance()? {
                Token::Value(text) => Some(text.clone()),
                _ => return None,
            }
        } else {
            None
        };

        if !operator.is_range() {
            if explicit_to.is_some() {
                return None;
            }
            return Some(Condition::new(column, operator, value));
        }

        // Range conditions inside groups must carry both bounds
        match explicit_to {
            Some(value_to) => Some(Condition::new(column, operator, value).with_value_to(value_to)),
            None => {
                let range = parse_range(&value, true)?;
                Some(Condition::new(column, operator, range.value).with_value_to(range.value_to))
            }
        }
    }
}

/// Parses a grouped pattern. See [`GroupedParser`].
pub fn parse_grouped(input: &str, catalog: &[Column]) -> Option<FilterSearch> {
    GroupedParser::parse(input, catalog)
}
