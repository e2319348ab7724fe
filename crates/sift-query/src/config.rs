//! Parser configuration.

use crate::ast::DEFAULT_MAX_CLAUSES;

/// Default minimum similarity for fuzzy queries.
pub const DEFAULT_FUZZY_MIN_SIMILARITY: f32 = 0.5;

/// Default number of leading characters a fuzzy match must share.
pub const DEFAULT_FUZZY_PREFIX_LENGTH: usize = 0;

/// Settings that shape how query text is parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ParserConfig {
    /// Fields a query may name.
    pub all_fields: Vec<String>,
    /// Fields searched when no prefix is given. Empty means every field.
    pub default_fields: Vec<String>,
    /// Fields whose text goes through the analyzer. `None` means all fields;
    /// other fields are matched verbatim.
    pub tokenized_fields: Option<Vec<String>>,
    /// Whether juxtaposed clauses are ORed (otherwise ANDed).
    pub or_default: bool,
    /// Whether wildcard patterns and range bounds are lowercased.
    pub wild_lower: bool,
    /// Whether the input is cleaned before parsing.
    pub clean_str: bool,
    /// Whether a failed parse falls back to a plain term query.
    pub handle_parse_errors: bool,
    /// Whether field names outside `all_fields` are accepted.
    pub allow_any_fields: bool,
    /// Whether `AND`, `OR`, `NOT` and `REQ` are operators.
    pub use_keywords: bool,
    /// Clause limit for field expansion and term expansion.
    pub max_clauses: usize,
    /// Minimum similarity for `term~` without a number.
    pub fuzzy_min_similarity: f32,
    /// Prefix length for fuzzy queries.
    pub fuzzy_prefix_length: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            all_fields: Vec::new(),
            default_fields: Vec::new(),
            tokenized_fields: None,
            or_default: true,
            wild_lower: true,
            clean_str: false,
            handle_parse_errors: false,
            allow_any_fields: false,
            use_keywords: true,
            max_clauses: DEFAULT_MAX_CLAUSES,
            fuzzy_min_similarity: DEFAULT_FUZZY_MIN_SIMILARITY,
            fuzzy_prefix_length: DEFAULT_FUZZY_PREFIX_LENGTH,
        }
    }
}

impl ParserConfig {
    /// Creates a configuration with the given permitted fields.
    pub fn new<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            all_fields: fields.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Sets the default fields.
    #[must_use]
    pub fn with_default_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.default_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Restricts analysis to the given fields.
    #[must_use]
    pub fn with_tokenized_fields<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tokenized_fields = Some(fields.into_iter().map(Into::into).collect());
        self
    }

    /// Sets whether juxtaposed clauses are ORed.
    #[must_use]
    pub fn with_or_default(mut self, or_default: bool) -> Self {
        self.or_default = or_default;
        self
    }

    /// Sets whether wildcard patterns and range bounds are lowercased.
    #[must_use]
    pub fn with_wild_lower(mut self, wild_lower: bool) -> Self {
        self.wild_lower = wild_lower;
        self
    }

    /// Sets whether input is cleaned before parsing.
    #[must_use]
    pub fn with_clean_str(mut self, clean_str: bool) -> Self {
        self.clean_str = clean_str;
        self
    }

    /// Sets whether failed parses fall back to a term query.
    #[must_use]
    pub fn with_handle_parse_errors(mut self, handle: bool) -> Self {
        self.handle_parse_errors = handle;
        self
    }

    /// Sets whether unknown field names are accepted.
    #[must_use]
    pub fn with_allow_any_fields(mut self, allow: bool) -> Self {
        self.allow_any_fields = allow;
        self
    }

    /// Sets whether keywords are operators.
    #[must_use]
    pub fn with_use_keywords(mut self, use_keywords: bool) -> Self {
        self.use_keywords = use_keywords;
        self
    }

    /// Sets the clause limit.
    #[must_use]
    pub fn with_max_clauses(mut self, max_clauses: usize) -> Self {
        self.max_clauses = max_clauses;
        self
    }

    /// Sets the fuzzy defaults.
    #[must_use]
    pub fn with_fuzzy(mut self, min_similarity: f32, prefix_length: usize) -> Self {
        self.fuzzy_min_similarity = min_similarity;
        self.fuzzy_prefix_length = prefix_length;
        self
    }
}
