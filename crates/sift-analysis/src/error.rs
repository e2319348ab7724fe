//! Error types for the sift-analysis crate.

use thiserror::Error;

/// Errors that can occur when building an analyzer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Invalid stemmer language.
    #[error("unsupported stemmer language: {0}")]
    InvalidLanguage(String),

    /// Unknown analyzer name.
    #[error("unknown analyzer: {0} (expected standard, whitespace, keyword or a language name)")]
    UnknownAnalyzer(String),
}
