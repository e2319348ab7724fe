//! Query language parser for sift.
//!
//! Turns query text into a tree of boolean, phrase, range, wildcard, prefix,
//! fuzzy, term, multi-term and match-all queries:
//!
//! - **Terms**: `rust` - analyzed with the field's analyzer
//! - **Phrases**: `"error handling"~2`, with `<>` gaps and `a|b` alternatives
//! - **Operators**: `+required`, `-excluded`, `!excluded`, `AND`, `OR`, `&&`, `||`
//! - **Grouping**: `(a b) OR (c d)`
//! - **Fields**: `title:guide`, `title|body:(rust go)`, `*:anywhere`
//! - **Wildcards**: `ru*`, `r?st`, `*`
//! - **Fuzzy**: `roam~`, `roam~0.8`
//! - **Ranges**: `[a z]`, `{a z}`, `>=2020`, `<b`
//! - **Boosting**: `rust^2.5`
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use sift_analysis::StandardAnalyzer;
//! use sift_query::{ParserConfig, QueryParser};
//!
//! let config = ParserConfig::new(["title", "body"]).with_default_fields(["body"]);
//! let parser = QueryParser::new(config, Arc::new(StandardAnalyzer::new()));
//!
//! let query = parser.parse("title:(rust OR go) +\"error handling\"~2 -deprecated").unwrap();
//! assert_eq!(
//!     query.to_query_string("body"),
//!     "(title:rust title:go) +\"error handling\"~2 -deprecated"
//! );
//! ```

#![warn(missing_docs)]

mod ast;
mod clauses;
mod clean;
mod config;
mod error;
mod factory;
mod fields;
mod lexer;
mod parser;
mod phrase;
mod session;

pub use ast::{
    BooleanQuery, Clause, DEFAULT_MAX_CLAUSES, FuzzyQuery, MultiTermQuery, Occur, PhrasePosition,
    PhraseQuery, PrefixQuery, Query, QueryNode, RangeQuery, TermQuery, WildcardQuery,
};
pub use clauses::ClauseArray;
pub use clean::clean_query;
pub use config::{DEFAULT_FUZZY_MIN_SIMILARITY, DEFAULT_FUZZY_PREFIX_LENGTH, ParserConfig};
pub use error::{QueryError, QueryErrorKind, TooManyClauses};
pub use fields::FieldSet;
pub use lexer::{Lexeme, Lexer, Token, tokenize};
pub use parser::QueryParser;
pub use phrase::{Phrase, Slot};
