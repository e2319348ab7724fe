//! Text analysis capability consumed by the sift query parser.
//!
//! The query parser never looks inside an analyzer. It asks for a
//! [`TokenStream`] for a field, resets it with a piece of query text, and pulls
//! normalized [`Token`]s out of it. Each token carries the gap to the previous
//! token; a gap of zero marks an alternative at the same position (a synonym).
//!
//! Provided analyzers:
//!
//! - [`StandardAnalyzer`]: tantivy's simple tokenizer, lowercasing, long-token
//!   removal and optional stemming
//! - [`WhitespaceAnalyzer`]: splits on whitespace, optionally lowercasing
//! - [`KeywordAnalyzer`]: the whole input is a single token
//! - [`PerFieldAnalyzer`]: dispatches to a different analyzer per field
//!
//! # Example
//!
//! ```
//! use sift_analysis::{Analyzer, WhitespaceAnalyzer};
//!
//! let analyzer = WhitespaceAnalyzer::new(true);
//! let mut stream = analyzer.token_stream("body");
//! stream.reset("Quick Fox");
//! assert_eq!(stream.next().unwrap().text, "quick");
//! assert_eq!(stream.next().unwrap().text, "fox");
//! assert!(stream.next().is_none());
//! ```

#![warn(missing_docs)]

mod analyzer;
mod error;
mod simple;
mod token;

pub use analyzer::{StandardAnalyzer, build_analyzer_from_name, parse_language};
pub use error::AnalysisError;
pub use simple::{KeywordAnalyzer, NonTokenizer, PerFieldAnalyzer, WhitespaceAnalyzer};
pub use tantivy::tokenizer::Language;
pub use token::{Analyzer, Token, TokenStream};
