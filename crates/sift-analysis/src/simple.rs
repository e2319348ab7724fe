//! Small analyzers that need no tokenizer pipeline.

use std::{collections::HashMap, mem};

use crate::token::{Analyzer, Token, TokenStream};

/// Splits text on whitespace, optionally lowercasing each token.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceAnalyzer {
    /// Whether tokens are lowercased.
    lowercase: bool,
}

impl WhitespaceAnalyzer {
    /// Creates a whitespace analyzer.
    pub fn new(lowercase: bool) -> Self {
        Self { lowercase }
    }
}

impl Analyzer for WhitespaceAnalyzer {
    fn token_stream(&self, _field: &str) -> Box<dyn TokenStream> {
        Box::new(WhitespaceStream {
            lowercase: self.lowercase,
            words: Vec::new(),
        })
    }
}

/// Stream for [`WhitespaceAnalyzer`].
struct WhitespaceStream {
    /// Whether tokens are lowercased.
    lowercase: bool,
    /// Remaining words, stored in reverse order.
    words: Vec<String>,
}

impl TokenStream for WhitespaceStream {
    fn reset(&mut self, text: &str) {
        self.words = text
            .split_whitespace()
            .rev()
            .map(|w| {
                if self.lowercase {
                    w.to_lowercase()
                } else {
                    w.to_string()
                }
            })
            .collect();
    }

    fn next(&mut self) -> Option<Token> {
        self.words.pop().map(|w| Token::new(w, 1))
    }
}

/// Emits the whole input as a single token.
///
/// Used for fields whose values are indexed verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordAnalyzer;

impl Analyzer for KeywordAnalyzer {
    fn token_stream(&self, _field: &str) -> Box<dyn TokenStream> {
        Box::new(NonTokenizer::new())
    }
}

/// Token stream that yields its whole input as one token.
///
/// Empty input yields nothing.
#[derive(Debug, Clone, Default)]
pub struct NonTokenizer {
    /// Text waiting to be returned.
    pending: Option<String>,
}

impl NonTokenizer {
    /// Creates an exhausted stream.
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStream for NonTokenizer {
    fn reset(&mut self, text: &str) {
        self.pending = (!text.is_empty()).then(|| text.to_string());
    }

    fn next(&mut self) -> Option<Token> {
        mem::take(&mut self.pending).map(|text| Token::new(text, 1))
    }
}

/// Dispatches to a per-field analyzer, falling back to a default.
pub struct PerFieldAnalyzer {
    /// Analyzer for fields without an override.
    default: Box<dyn Analyzer>,
    /// Field-specific overrides.
    fields: HashMap<String, Box<dyn Analyzer>>,
}

impl PerFieldAnalyzer {
    /// Creates a per-field analyzer with the given fallback.
    pub fn new(default: Box<dyn Analyzer>) -> Self {
        Self {
            default,
            fields: HashMap::new(),
        }
    }

    /// Sets the analyzer used for `field`, replacing any previous one.
    pub fn add_field(&mut self, field: impl Into<String>, analyzer: Box<dyn Analyzer>) {
        self.fields.insert(field.into(), analyzer);
    }

    /// Builder-style form of [`add_field`](Self::add_field).
    #[must_use]
    pub fn with_field(mut self, field: impl Into<String>, analyzer: Box<dyn Analyzer>) -> Self {
        self.add_field(field, analyzer);
        self
    }
}

impl Analyzer for PerFieldAnalyzer {
    fn token_stream(&self, field: &str) -> Box<dyn TokenStream> {
        self.fields
            .get(field)
            .unwrap_or(&self.default)
            .token_stream(field)
    }
}
