//! The token stream contract between the query parser and an analyzer.

/// A normalized term produced by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Normalized term text.
    pub text: String,
    /// Number of positions between this token and the previous one.
    ///
    /// Zero means the token occupies the same position as the previous token.
    pub pos_inc: u32,
}

impl Token {
    /// Creates a token with the given text and position increment.
    pub fn new(text: impl Into<String>, pos_inc: u32) -> Self {
        Self {
            text: text.into(),
            pos_inc,
        }
    }
}

/// A resettable source of tokens.
///
/// Streams are reused: the parser resets a cached stream with new text
/// instead of building a fresh one for every word.
pub trait TokenStream: Send {
    /// Discards any pending tokens and starts tokenizing `text`.
    fn reset(&mut self, text: &str);

    /// Returns the next token, or `None` once the text is exhausted.
    fn next(&mut self) -> Option<Token>;
}

/// Produces token streams for fields.
pub trait Analyzer: Send + Sync {
    /// Returns a fresh token stream that analyzes text for `field`.
    fn token_stream(&self, field: &str) -> Box<dyn TokenStream>;
}

impl<A: Analyzer + ?Sized> Analyzer for Box<A> {
    fn token_stream(&self, field: &str) -> Box<dyn TokenStream> {
        (**self).token_stream(field)
    }
}
