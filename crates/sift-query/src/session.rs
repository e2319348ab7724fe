//! Per-parser mutable state: the field scope and cached token streams.
//!
//! Everything here lives behind the parser's mutex and is only touched by the
//! thread running a parse.

use std::{collections::HashMap, iter, sync::Arc};

use sift_analysis::{Analyzer, NonTokenizer, Token, TokenStream};

use crate::fields::FieldScope;

/// Reuses one token stream per field across parses.
pub struct StreamCache {
    /// Analyzer that produces streams.
    analyzer: Arc<dyn Analyzer>,
    /// Fields run through the analyzer. `None` means every field.
    tokenized_fields: Option<Vec<String>>,
    /// Streams already created, keyed by field.
    streams: HashMap<Arc<str>, Box<dyn TokenStream>>,
    /// Stream used for fields that are not tokenized.
    non_tokenizer: NonTokenizer,
}

impl StreamCache {
    /// Creates an empty cache.
    pub fn new(analyzer: Arc<dyn Analyzer>, tokenized_fields: Option<Vec<String>>) -> Self {
        Self {
            analyzer,
            tokenized_fields,
            streams: HashMap::new(),
            non_tokenizer: NonTokenizer::new(),
        }
    }

    /// Returns true if text for `field` goes through the analyzer.
    pub fn is_tokenized(&self, field: &str) -> bool {
        self.tokenized_fields
            .as_ref()
            .is_none_or(|fields| fields.iter().any(|f| f == field))
    }

    /// Returns a stream for `field`, reset to `text`.
    pub fn stream(&mut self, field: &Arc<str>, text: &str) -> &mut dyn TokenStream {
        let stream: &mut dyn TokenStream = if self.is_tokenized(field) {
            let analyzer = &self.analyzer;
            let cached = self
                .streams
                .entry(Arc::clone(field))
                .or_insert_with(|| analyzer.token_stream(field));
            &mut **cached
        } else {
            &mut self.non_tokenizer
        };
        stream.reset(text);
        stream
    }

    /// Returns every token `text` produces for `field`.
    pub fn tokens(&mut self, field: &Arc<str>, text: &str) -> Vec<Token> {
        let stream = self.stream(field, text);
        iter::from_fn(|| stream.next()).collect()
    }

    /// Returns the first token `text` produces for `field`.
    pub fn first_token(&mut self, field: &Arc<str>, text: &str) -> Option<Token> {
        self.stream(field, text).next()
    }
}

/// State owned by one parser and reused across parses.
pub struct Session {
    /// Field scope for the parse in progress.
    pub fields: FieldScope,
    /// Token stream cache.
    pub streams: StreamCache,
}

#[cfg(test)]
mod tests {
    use sift_analysis::WhitespaceAnalyzer;

    use super::*;

    fn cache(tokenized: Option<Vec<String>>) -> StreamCache {
        StreamCache::new(Arc::new(WhitespaceAnalyzer::new(true)), tokenized)
    }

    #[test]
    fn all_fields_tokenized_by_default() {
        let mut cache = cache(None);
        let field: Arc<str> = Arc::from("body");
        assert!(cache.is_tokenized("body"));
        let texts: Vec<String> = cache
            .tokens(&field, "Quick Fox")
            .into_iter()
            .map(|t| t.text)
            .collect();
        assert_eq!(texts, ["quick", "fox"]);
    }

    #[test]
    fn untokenized_field_uses_whole_text() {
        let mut cache = cache(Some(vec!["body".into()]));
        let field: Arc<str> = Arc::from("id");
        assert!(!cache.is_tokenized("id"));
        assert_eq!(
            cache.tokens(&field, "AB-12 X"),
            vec![Token::new("AB-12 X", 1)]
        );
    }

    #[test]
    fn streams_are_reused() {
        let mut cache = cache(None);
        let field: Arc<str> = Arc::from("body");
        assert_eq!(cache.first_token(&field, "one two").unwrap().text, "one");
        assert_eq!(cache.first_token(&field, "three").unwrap().text, "three");
        assert_eq!(cache.streams.len(), 1);
        assert!(cache.first_token(&field, "  ").is_none());
    }
}
