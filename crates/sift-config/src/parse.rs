//! Configuration file parsing.
//!
//! Each `.sift.toml` is parsed on its own into a [`RawConfig`] whose fields are
//! all optional, so that partial files can be layered by the merge step.

use std::{collections::BTreeMap, fs, path::Path};

use serde::Deserialize;
use serde_with::{OneOrMany, serde_as};
#[cfg(test)]
use toml::de::Error as TomlError;

use crate::ConfigError;

/// One configuration file as written.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawConfig {
    /// When true, discovery stops at this file.
    pub root: Option<bool>,
    /// The `[parser]` section.
    pub parser: Option<RawParserSettings>,
    /// The `[analysis]` section.
    pub analysis: Option<RawAnalysisSettings>,
}

/// The `[parser]` section.
///
/// Field lists accept either a single string or an array of strings.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawParserSettings {
    /// Fields a query may name.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub fields: Option<Vec<String>>,
    /// Fields searched when a query names none.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub default_fields: Option<Vec<String>>,
    /// Fields whose text is analyzed.
    #[serde_as(as = "Option<OneOrMany<_>>")]
    pub tokenized_fields: Option<Vec<String>>,
    /// Whether juxtaposed clauses are ORed.
    pub or_default: Option<bool>,
    /// Whether wildcard patterns and range bounds are lowercased.
    #[serde(alias = "wild_lower")]
    pub lowercase_terms: Option<bool>,
    /// Whether query text is cleaned before parsing.
    pub clean: Option<bool>,
    /// Whether syntax errors fall back to a term query.
    pub lenient: Option<bool>,
    /// Whether unknown field names are accepted.
    pub allow_any_fields: Option<bool>,
    /// Whether `AND`, `OR`, `NOT` and `REQ` are operators.
    pub keywords: Option<bool>,
    /// Clause limit for multi-field and multi-term expansion.
    pub max_clauses: Option<usize>,
    /// Fuzzy similarity used when `term~` has no number.
    pub fuzzy_min_similarity: Option<f32>,
    /// Leading characters a fuzzy match must share.
    pub fuzzy_prefix_length: Option<usize>,
}

/// The `[analysis]` section.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawAnalysisSettings {
    /// Analyzer used for fields without their own entry.
    pub analyzer: Option<String>,
    /// Per-field analyzer names.
    pub fields: Option<BTreeMap<String, String>>,
}

/// Parses a configuration file from disk.
pub fn parse_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;

    parse_config_str(&contents, path)
}

/// Parses configuration text. `path` is only used in errors.
pub fn parse_config_str(contents: &str, path: &Path) -> Result<RawConfig, ConfigError> {
    toml::from_str(contents).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses configuration text without a path.
#[cfg(test)]
pub fn parse_config(contents: &str) -> Result<RawConfig, TomlError> {
    toml::from_str(contents)
}

/// Returns true if the file at `path` sets `root = true`.
///
/// Unreadable or malformed files are not roots; they fail later, when the
/// discovered files are parsed for real.
pub fn is_root_config(path: &Path) -> bool {
    fs::read_to_string(path)
        .ok()
        .and_then(|contents| toml::from_str::<RawConfig>(&contents).ok())
        .is_some_and(|config| config.root == Some(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> RawConfig {
        parse_config_str(toml, Path::new("test.toml")).unwrap()
    }

    #[test]
    fn empty_file() {
        let config = parse("");
        assert!(config.root.is_none());
        assert!(config.parser.is_none());
        assert!(config.analysis.is_none());
    }

    #[test]
    fn parser_section() {
        let config = parse(
            r#"
[parser]
fields = ["title", "body", "id"]
default_fields = ["title", "body"]
tokenized_fields = ["title", "body"]
or_default = false
lowercase_terms = false
clean = true
lenient = true
allow_any_fields = true
keywords = false
max_clauses = 64
fuzzy_min_similarity = 0.7
fuzzy_prefix_length = 2
"#,
        );
        let parser = config.parser.unwrap();
        assert_eq!(
            parser.fields,
            Some(vec!["title".into(), "body".into(), "id".into()])
        );
        assert_eq!(parser.default_fields, Some(vec!["title".into(), "body".into()]));
        assert_eq!(parser.or_default, Some(false));
        assert_eq!(parser.lowercase_terms, Some(false));
        assert_eq!(parser.clean, Some(true));
        assert_eq!(parser.lenient, Some(true));
        assert_eq!(parser.allow_any_fields, Some(true));
        assert_eq!(parser.keywords, Some(false));
        assert_eq!(parser.max_clauses, Some(64));
        assert_eq!(parser.fuzzy_min_similarity, Some(0.7));
        assert_eq!(parser.fuzzy_prefix_length, Some(2));
    }

    #[test]
    fn field_lists_accept_single_string() {
        let config = parse("[parser]\nfields = \"body\"\ndefault_fields = \"body\"\n");
        let parser = config.parser.unwrap();
        assert_eq!(parser.fields, Some(vec!["body".to_string()]));
        assert_eq!(parser.default_fields, Some(vec!["body".to_string()]));
        assert!(parser.tokenized_fields.is_none());
    }

    #[test]
    fn wild_lower_alias() {
        let config = parse("[parser]\nwild_lower = false\n");
        assert_eq!(config.parser.unwrap().lowercase_terms, Some(false));
    }

    #[test]
    fn analysis_section() {
        let config = parse(
            r#"
[analysis]
analyzer = "english"

[analysis.fields]
id = "keyword"
tags = "whitespace"
"#,
        );
        let analysis = config.analysis.unwrap();
        assert_eq!(analysis.analyzer.as_deref(), Some("english"));
        let fields = analysis.fields.unwrap();
        assert_eq!(fields.get("id").map(String::as_str), Some("keyword"));
        assert_eq!(fields.get("tags").map(String::as_str), Some("whitespace"));
    }

    #[test]
    fn unknown_keys_ignored() {
        let config = parse("[parser]\nor_default = true\nshiny = 1\n\n[elsewhere]\nx = 1\n");
        assert_eq!(config.parser.unwrap().or_default, Some(true));
    }

    #[test]
    fn invalid_toml_is_parse_error() {
        let err = parse_config_str("[parser\n", Path::new("bad.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ParseToml { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn wrong_type_is_parse_error() {
        let result = parse_config_str("[parser]\nmax_clauses = \"many\"\n", Path::new("t.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn missing_file_is_read_error() {
        let err = parse_config_file(Path::new("/nonexistent/dir/.sift.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn root_flag() {
        assert_eq!(parse("root = true\n").root, Some(true));
        assert_eq!(parse("root = false\n").root, Some(false));
        assert_eq!(parse("[parser]\nclean = true\n").root, None);
    }

    #[test]
    fn root_detection_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".sift.toml");

        fs::write(&path, "root = true\n").unwrap();
        assert!(is_root_config(&path));

        fs::write(&path, "root = false\n").unwrap();
        assert!(!is_root_config(&path));

        fs::write(&path, "root = [\n").unwrap();
        assert!(!is_root_config(&path));

        assert!(!is_root_config(&dir.path().join("missing.toml")));
    }
}
