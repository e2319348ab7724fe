//! Configuration system for sift.
//!
//! sift reads TOML files named `.sift.toml`. They are collected by walking up
//! from the working directory, then `~/.sift.toml` is added as the global
//! layer with the lowest precedence. A file with `root = true` stops the walk.
//!
//! ```toml
//! [parser]
//! fields = ["title", "body", "id"]
//! default_fields = ["title", "body"]
//! tokenized_fields = ["title", "body"]
//! lenient = true
//!
//! [analysis]
//! analyzer = "english"
//!
//! [analysis.fields]
//! id = "keyword"
//! ```

#![warn(missing_docs)]

mod discovery;
mod error;
mod merge;
mod parse;
mod templates;
#[cfg(test)]
mod test_support;
mod validate;

use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
};

pub use discovery::{CONFIG_FILENAME, discover_config_files, global_config_path, is_global_config};
pub use error::ConfigError;
pub use merge::{ParsedConfig, merge_configs};
pub use parse::{
    RawAnalysisSettings, RawConfig, RawParserSettings, parse_config_file, parse_config_str,
};
use serde::{Deserialize, Serialize};
pub use templates::{global_template, local_template};
pub use validate::ConfigWarning;
use validate::validate_config;

/// Default clause limit for expansions.
pub const DEFAULT_MAX_CLAUSES: usize = 512;

/// Default fuzzy similarity for `term~`.
pub const DEFAULT_FUZZY_MIN_SIMILARITY: f32 = 0.5;

/// Default fuzzy prefix length.
pub const DEFAULT_FUZZY_PREFIX_LENGTH: usize = 0;

/// Default analyzer name.
pub const DEFAULT_ANALYZER: &str = "standard";

/// Fully merged configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Query parser settings.
    pub parser: ParserSettings,
    /// Analyzer settings.
    pub analysis: AnalysisSettings,
    /// Files the configuration was merged from, highest precedence first.
    pub files: Vec<PathBuf>,
    /// Directory holding the most specific config file.
    pub config_root: Option<PathBuf>,
}

impl Config {
    /// Discovers and merges every `.sift.toml` that applies to `cwd`.
    ///
    /// Returns the defaults when there are no config files.
    pub fn load(cwd: &Path) -> Result<Self, ConfigError> {
        Self::load_from_files(&discover_config_files(cwd))
    }

    /// Parses and merges `files`, given highest precedence first.
    pub fn load_from_files(files: &[PathBuf]) -> Result<Self, ConfigError> {
        let parsed = files
            .iter()
            .map(|path| {
                Ok(ParsedConfig {
                    path: path.clone(),
                    config: parse_config_file(path)?,
                })
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        Ok(merge_configs(&parsed))
    }

    /// Checks the configuration for likely mistakes.
    pub fn validate(&self) -> Vec<ConfigWarning> {
        validate_config(self)
    }

    /// Renders the effective settings in `.sift.toml` form.
    pub fn settings_to_toml(&self) -> Result<String, ConfigError> {
        let settings = SerializableSettings {
            parser: &self.parser,
            analysis: &self.analysis,
        };
        Ok(toml::to_string_pretty(&settings)?)
    }
}

/// Settings for the query parser.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParserSettings {
    /// Fields a query may name.
    pub fields: Vec<String>,
    /// Fields searched when a query names none. Empty means all fields.
    pub default_fields: Vec<String>,
    /// Fields whose text is analyzed. `None` means all fields.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tokenized_fields: Option<Vec<String>>,
    /// Whether juxtaposed clauses are ORed.
    pub or_default: bool,
    /// Whether wildcard patterns and range bounds are lowercased.
    pub lowercase_terms: bool,
    /// Whether query text is cleaned before parsing.
    pub clean: bool,
    /// Whether syntax errors fall back to a term query.
    pub lenient: bool,
    /// Whether unknown field names are accepted.
    pub allow_any_fields: bool,
    /// Whether `AND`, `OR`, `NOT` and `REQ` are operators.
    pub keywords: bool,
    /// Clause limit for multi-field and multi-term expansion.
    pub max_clauses: usize,
    /// Fuzzy similarity used when `term~` has no number.
    pub fuzzy_min_similarity: f32,
    /// Leading characters a fuzzy match must share.
    pub fuzzy_prefix_length: usize,
}

impl Default for ParserSettings {
    fn default() -> Self {
        Self {
            fields: Vec::new(),
            default_fields: Vec::new(),
            tokenized_fields: None,
            or_default: true,
            lowercase_terms: true,
            clean: false,
            lenient: false,
            allow_any_fields: false,
            keywords: true,
            max_clauses: DEFAULT_MAX_CLAUSES,
            fuzzy_min_similarity: DEFAULT_FUZZY_MIN_SIMILARITY,
            fuzzy_prefix_length: DEFAULT_FUZZY_PREFIX_LENGTH,
        }
    }
}

/// Settings for text analysis.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct AnalysisSettings {
    /// Analyzer for fields without their own entry.
    pub analyzer: String,
    /// Per-field analyzer names.
    pub fields: BTreeMap<String, String>,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            analyzer: DEFAULT_ANALYZER.to_string(),
            fields: BTreeMap::new(),
        }
    }
}

/// Borrowed view of the settings for TOML output.
#[derive(Serialize)]
struct SerializableSettings<'a> {
    /// Parser settings.
    parser: &'a ParserSettings,
    /// Analysis settings.
    analysis: &'a AnalysisSettings,
}
