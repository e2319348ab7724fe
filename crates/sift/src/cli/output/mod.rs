//! Rendering and JSON serialization for CLI output.

use std::process::ExitCode;

use comfy_table::{Cell, Table, presets::UTF8_FULL_CONDENSED};
use serde::Serialize;
use sift_analysis::Token;
use sift_query::{Query, QueryError};

/// JSON output for one parsed query.
#[derive(Serialize)]
pub struct JsonParseResult<'a> {
    /// The query text as given.
    pub input: &'a str,
    /// The query tree, if parsing succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<&'a Query>,
    /// The tree rendered back into query text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_string: Option<String>,
    /// The syntax error, if parsing failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonQueryError<'a>>,
}

/// JSON form of a [`QueryError`].
#[derive(Serialize)]
pub struct JsonQueryError<'a> {
    /// Error message without context.
    pub message: &'a str,
    /// Byte position of the error in the query text.
    pub position: usize,
    /// Suggested fix, when one is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl<'a> From<&'a QueryError> for JsonQueryError<'a> {
    fn from(err: &'a QueryError) -> Self {
        Self {
            message: err.message(),
            position: err.position(),
            hint: err.suggestion(),
        }
    }
}

/// JSON output for `sift parse`.
#[derive(Serialize)]
pub struct JsonParseOutput<'a> {
    /// Results in input order.
    pub queries: Vec<JsonParseResult<'a>>,
}

/// One analyzed token with its absolute position.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TokenRow {
    /// Position in the token stream, starting at 0.
    pub position: u32,
    /// Gap to the previous token; 0 marks an alternative.
    pub increment: u32,
    /// Normalized token text.
    pub text: String,
}

/// JSON output for `sift tokens`.
#[derive(Serialize)]
pub struct JsonTokensOutput<'a> {
    /// The field whose analyzer was used.
    pub field: &'a str,
    /// Tokens in stream order.
    pub tokens: &'a [TokenRow],
}

/// Assigns absolute positions to a token sequence.
///
/// The first token sits at position 0 whatever its increment.
pub fn token_rows(tokens: impl IntoIterator<Item = Token>) -> Vec<TokenRow> {
    let mut rows = Vec::new();
    let mut position: Option<u32> = None;
    for token in tokens {
        let next = match position {
            None => 0,
            Some(p) => p + token.pos_inc,
        };
        position = Some(next);
        rows.push(TokenRow {
            position: next,
            increment: token.pos_inc,
            text: token.text,
        });
    }
    rows
}

/// Renders token rows as a table.
pub fn tokens_table(rows: &[TokenRow]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec!["Position", "Increment", "Token"]);
    for row in rows {
        table.add_row(vec![
            Cell::new(row.position.to_string()),
            Cell::new(row.increment.to_string()),
            Cell::new(&row.text),
        ]);
    }
    table
}

/// Prints `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json_str) => {
            println!("{json_str}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to serialize JSON: {e}");
            ExitCode::FAILURE
        }
    }
}
