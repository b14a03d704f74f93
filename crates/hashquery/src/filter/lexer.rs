//! Lexer (tokenizer) for hashtag patterns.

use super::helpers::{CONFIRM_MARKER, GROUP_CLOSE, GROUP_OPEN};

/// A token with its position in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionedToken {
    /// The token.
    pub token: Token,
    /// The byte position where the token starts (0-indexed).
    pub position: usize,
}

/// A token in a hashtag pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Group opening marker `#(`.
    GroupOpen,

    /// Group closing marker `#)`.
    GroupClose,

    /// Confirmation marker `##`.
    Confirm,

    /// A `#`-prefixed atom: column name, operator name, join keyword or `to`.
    /// Stored without the leading `#`.
    Hashtag(String),

    /// Free text between hashtag atoms, trimmed.
    Value(String),
}

impl Token {
    /// Returns the join keyword carried by this token, if any.
    pub fn as_join(&self) -> Option<super::JoinOperator> {
        match self {
            Token::Hashtag(text) => super::JoinOperator::from_keyword(text),
            _ => None,
        }
    }

    /// Returns true for the `#to` range marker.
    pub fn is_range_marker(&self) -> bool {
        matches!(self, Token::Hashtag(text) if text.eq_ignore_ascii_case("to"))
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::GroupOpen => f.write_str(GROUP_OPEN),
            Token::GroupClose => f.write_str(GROUP_CLOSE),
            Token::Confirm => f.write_str(CONFIRM_MARKER),
            Token::Hashtag(text) => write!(f, "#{text}"),
            Token::Value(text) => f.write_str(text),
        }
    }
}

/// Lexer for tokenizing hashtag patterns.
///
/// At every position the lexer tries, in order: the confirmation marker,
/// the group markers, then `#` followed by a run of characters that are
/// neither whitespace nor `#`. Everything else accumulates into a value.
pub struct Lexer<'a> {
    input: &'a str,
    /// Current byte position in the input string.
    position: usize,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input string.
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Matches a marker or hashtag atom at the start of `rest`.
    ///
    /// Returns the token and its byte length.
    fn match_atom(rest: &str) -> Option<(Token, usize)> {
        if rest.starts_with(CONFIRM_MARKER) {
            return Some((Token::Confirm, CONFIRM_MARKER.len()));
        }
        if rest.starts_with(GROUP_OPEN) {
            return Some((Token::GroupOpen, GROUP_OPEN.len()));
        }
        if rest.starts_with(GROUP_CLOSE) {
            return Some((Token::GroupClose, GROUP_CLOSE.len()));
        }

        let body = rest.strip_prefix('#')?;
        let len = body
            .find(|c: char| c.is_whitespace() || c == '#')
            .unwrap_or(body.len());
        if len == 0 {
            return None;
        }
        Some((Token::Hashtag(body[..len].to_string()), len + 1))
    }

    /// Pushes the pending value text, if any.
    fn flush_value(&self, start: usize, tokens: &mut Vec<PositionedToken>) {
        let raw = &self.input[start..self.position];
        let text = raw.trim();
        if !text.is_empty() {
            let offset = raw.len() - raw.trim_start().len();
            tokens.push(PositionedToken {
                token: Token::Value(text.to_string()),
                position: start + offset,
            });
        }
    }

    /// Collects all tokens with their positions.
    pub fn tokenize_with_positions(mut self) -> Vec<PositionedToken> {
        let mut tokens = Vec::new();
        let mut value_start = self.position;

        while self.position < self.input.len() {
            let rest = self.rest();
            if let Some((token, len)) = Self::match_atom(rest) {
                self.flush_value(value_start, &mut tokens);
                tokens.push(PositionedToken {
                    token,
                    position: self.position,
                });
                self.position += len;
                value_start = self.position;
            } else {
                self.position += rest.chars().next().map_or(1, char::len_utf8);
            }
        }
        self.flush_value(value_start, &mut tokens);

        tokens
    }

    /// Collects all tokens into a vector (without positions).
    pub fn tokenize(self) -> Vec<Token> {
        self.tokenize_with_positions()
            .into_iter()
            .map(|pt| pt.token)
            .collect()
    }
}
