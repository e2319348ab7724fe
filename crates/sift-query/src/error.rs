//! Error types for query parsing.
//!
//! Only syntax errors surface to callers. A primary that analyzes to nothing
//! is not an error, and clause-limit overflow truncates instead of aborting.

use std::{error::Error, fmt};

use thiserror::Error as ThisError;

/// Syntax error raised inside the grammar, before the query text is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// Error message.
    pub message: String,
    /// Byte position in the (possibly cleaned) input.
    pub position: usize,
}

impl SyntaxError {
    /// Creates a syntax error at `position`.
    pub fn new(message: impl Into<String>, position: usize) -> Self {
        Self {
            message: message.into(),
            position,
        }
    }
}

/// A boolean query refused another clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
#[error("too many boolean clauses (limit is {limit})")]
pub struct TooManyClauses {
    /// The limit that was hit.
    pub limit: usize,
}

/// Error returned by [`QueryParser::parse`](crate::QueryParser::parse).
///
/// The `Display` form is a single line:
/// ``couldn't parse query `<text>`: <message>``. Use
/// [`format_with_context`](Self::format_with_context) for a multi-line
/// rendering with a position marker and a hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryError {
    /// The kind of error that occurred.
    pub kind: QueryErrorKind,
    /// The query text that failed to parse.
    pub query: String,
}

/// The specific kind of query error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryErrorKind {
    /// The token stream did not match the grammar.
    Syntax {
        /// Error message.
        message: String,
        /// Byte position in the query text.
        position: usize,
    },
}

impl QueryError {
    /// Creates a syntax error.
    pub fn syntax(message: impl Into<String>, position: usize, query: impl Into<String>) -> Self {
        Self {
            kind: QueryErrorKind::Syntax {
                message: message.into(),
                position,
            },
            query: query.into(),
        }
    }

    /// Attaches query text to an internal syntax error.
    pub(crate) fn from_syntax(err: SyntaxError, query: &str) -> Self {
        Self::syntax(err.message, err.position, query)
    }

    /// Returns the error message without context.
    pub fn message(&self) -> &str {
        match &self.kind {
            QueryErrorKind::Syntax { message, .. } => message,
        }
    }

    /// Returns the byte position of the error in the query text.
    pub fn position(&self) -> usize {
        match &self.kind {
            QueryErrorKind::Syntax { position, .. } => *position,
        }
    }

    /// Returns a suggestion for common errors.
    pub fn suggestion(&self) -> Option<&'static str> {
        let message = self.message();
        if message.contains("closing quote") {
            Some("Add a closing quote (\") to complete the phrase, or enable clean mode")
        } else if message.contains("closing parenthesis") {
            Some("Add a closing parenthesis ) to match the opening one, or enable clean mode")
        } else if message.contains("range") {
            Some("Ranges look like [a b], {a b}, [a b}, >=a, <b or [a>")
        } else if message.contains("after field") {
            Some("A field prefix must be followed by a query, e.g. 'title:rust'")
        } else if message.contains("OR") || message.contains("AND") {
            Some("Operators need clauses on both sides, e.g. 'rust OR golang'")
        } else {
            None
        }
    }

    /// Formats the error over several lines with a position marker and hint.
    pub fn format_with_context(&self) -> String {
        let mut out = format!("query syntax error: {}\n", self.message());
        out.push_str(&format!("  {}\n", self.query));
        let column = self.query[..self.position().min(self.query.len())]
            .chars()
            .count();
        out.push_str(&format!("  {}^", " ".repeat(column)));
        if let Some(hint) = self.suggestion() {
            out.push_str(&format!("\nhint: {hint}"));
        }
        out
    }
}

impl fmt::Display for QueryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "couldn't parse query `{}`: {}", self.query, self.message())
    }
}

impl Error for QueryError {}
