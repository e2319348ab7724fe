//! Tantivy-backed standard analyzer.
//!
//! Implements a three or four stage text analysis pipeline:
//! 1. `SimpleTokenizer` - splits on whitespace and punctuation
//! 2. `LowerCaser` - converts tokens to lowercase
//! 3. `RemoveLongFilter` - removes tokens longer than 40 bytes
//! 4. `Stemmer` - applies language-specific stemming (optional)
//!
//! Removed tokens leave a gap, which surfaces as a position increment
//! greater than one on the next token.

use std::collections::VecDeque;

use tantivy::tokenizer::{
    Language, LowerCaser, RemoveLongFilter, SimpleTokenizer, Stemmer, TextAnalyzer,
    TokenStream as _,
};

use crate::{
    AnalysisError, KeywordAnalyzer, WhitespaceAnalyzer,
    token::{Analyzer, Token, TokenStream},
};

/// Maximum token length in bytes before filtering.
const MAX_TOKEN_LENGTH: usize = 40;

/// Parses a stemmer language string into a Tantivy `Language`.
///
/// Supports lowercase language names matching Tantivy's `Language` enum.
/// Returns an error if the language is not recognized.
pub fn parse_language(name: &str) -> Result<Language, AnalysisError> {
    match name.to_lowercase().as_str() {
        "arabic" => Ok(Language::Arabic),
        "danish" => Ok(Language::Danish),
        "dutch" => Ok(Language::Dutch),
        "english" => Ok(Language::English),
        "finnish" => Ok(Language::Finnish),
        "french" => Ok(Language::French),
        "german" => Ok(Language::German),
        "greek" => Ok(Language::Greek),
        "hungarian" => Ok(Language::Hungarian),
        "italian" => Ok(Language::Italian),
        "norwegian" => Ok(Language::Norwegian),
        "portuguese" => Ok(Language::Portuguese),
        "romanian" => Ok(Language::Romanian),
        "russian" => Ok(Language::Russian),
        "spanish" => Ok(Language::Spanish),
        "swedish" => Ok(Language::Swedish),
        "tamil" => Ok(Language::Tamil),
        "turkish" => Ok(Language::Turkish),
        other => Err(AnalysisError::InvalidLanguage(other.to_string())),
    }
}

/// Analyzer built on tantivy's tokenizer pipeline.
#[derive(Clone)]
pub struct StandardAnalyzer {
    /// Prototype pipeline, cloned for every new stream.
    analyzer: TextAnalyzer,
}

impl StandardAnalyzer {
    /// Creates an analyzer that tokenizes and lowercases without stemming.
    pub fn new() -> Self {
        Self {
            analyzer: TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(LowerCaser)
                .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
                .build(),
        }
    }

    /// Creates an analyzer that also stems tokens for `language`.
    pub fn with_stemmer(language: Language) -> Self {
        Self {
            analyzer: TextAnalyzer::builder(SimpleTokenizer::default())
                .filter(LowerCaser)
                .filter(RemoveLongFilter::limit(MAX_TOKEN_LENGTH))
                .filter(Stemmer::new(language))
                .build(),
        }
    }
}

impl Default for StandardAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl Analyzer for StandardAnalyzer {
    fn token_stream(&self, _field: &str) -> Box<dyn TokenStream> {
        Box::new(PipelineStream {
            analyzer: self.analyzer.clone(),
            pending: VecDeque::new(),
        })
    }
}

/// Token stream that runs a tantivy pipeline over each reset text.
struct PipelineStream {
    /// Pipeline owned by this stream.
    analyzer: TextAnalyzer,
    /// Tokens produced by the last reset, not yet handed out.
    pending: VecDeque<Token>,
}

impl TokenStream for PipelineStream {
    fn reset(&mut self, text: &str) {
        self.pending.clear();
        let mut stream = self.analyzer.token_stream(text);
        let mut previous: Option<usize> = None;
        while let Some(token) = stream.next() {
            let gap = match previous {
                Some(prev) => token.position.saturating_sub(prev),
                None => token.position + 1,
            };
            previous = Some(token.position);
            let pos_inc = u32::try_from(gap).unwrap_or(u32::MAX);
            self.pending.push_back(Token::new(token.text.clone(), pos_inc));
        }
    }

    fn next(&mut self) -> Option<Token> {
        self.pending.pop_front()
    }
}

/// Builds an analyzer from a configuration name.
///
/// Accepted names are `standard` (no stemming), `whitespace`, `keyword`, and
/// any language accepted by [`parse_language`] (standard plus stemming).
pub fn build_analyzer_from_name(name: &str) -> Result<Box<dyn Analyzer>, AnalysisError> {
    match name.to_lowercase().as_str() {
        "standard" => Ok(Box::new(StandardAnalyzer::new())),
        "whitespace" => Ok(Box::new(WhitespaceAnalyzer::new(true))),
        "keyword" => Ok(Box::new(KeywordAnalyzer)),
        other => match parse_language(other) {
            Ok(language) => Ok(Box::new(StandardAnalyzer::with_stemmer(language))),
            Err(_) => Err(AnalysisError::UnknownAnalyzer(name.to_string())),
        },
    }
}
