//! Configuration merging.
//!
//! Layers parsed `.sift.toml` files into one [`Config`]. Every scalar and
//! every field list is taken from the closest file that sets it; per-field
//! analyzer entries are merged key by key.

use std::path::PathBuf;

use crate::{
    AnalysisSettings, Config, ParserSettings,
    parse::{RawAnalysisSettings, RawConfig, RawParserSettings},
};

/// A parsed config file with its source path.
pub struct ParsedConfig {
    /// Path to the config file.
    pub path: PathBuf,
    /// Parsed contents.
    pub config: RawConfig,
}

/// Merges `configs`, given highest precedence first.
pub fn merge_configs(configs: &[ParsedConfig]) -> Config {
    let mut parser = ParserSettings::default();
    let mut analysis = AnalysisSettings::default();

    // Lowest precedence first, so closer files overwrite.
    for parsed in configs.iter().rev() {
        if let Some(raw) = &parsed.config.parser {
            apply_parser(&mut parser, raw);
        }
        if let Some(raw) = &parsed.config.analysis {
            apply_analysis(&mut analysis, raw);
        }
    }

    Config {
        parser,
        analysis,
        files: configs.iter().map(|c| c.path.clone()).collect(),
        config_root: configs
            .first()
            .and_then(|c| c.path.parent())
            .map(PathBuf::from),
    }
}

/// Overwrites `result` with every value `raw` sets.
fn apply_parser(result: &mut ParserSettings, raw: &RawParserSettings) {
    if let Some(v) = &raw.fields {
        result.fields.clone_from(v);
    }
    if let Some(v) = &raw.default_fields {
        result.default_fields.clone_from(v);
    }
    if let Some(v) = &raw.tokenized_fields {
        result.tokenized_fields = Some(v.clone());
    }
    if let Some(v) = raw.or_default {
        result.or_default = v;
    }
    if let Some(v) = raw.lowercase_terms {
        result.lowercase_terms = v;
    }
    if let Some(v) = raw.clean {
        result.clean = v;
    }
    if let Some(v) = raw.lenient {
        result.lenient = v;
    }
    if let Some(v) = raw.allow_any_fields {
        result.allow_any_fields = v;
    }
    if let Some(v) = raw.keywords {
        result.keywords = v;
    }
    if let Some(v) = raw.max_clauses {
        result.max_clauses = v;
    }
    if let Some(v) = raw.fuzzy_min_similarity {
        result.fuzzy_min_similarity = v;
    }
    if let Some(v) = raw.fuzzy_prefix_length {
        result.fuzzy_prefix_length = v;
    }
}

/// Overwrites `result` with every value `raw` sets.
fn apply_analysis(result: &mut AnalysisSettings, raw: &RawAnalysisSettings) {
    if let Some(v) = &raw.analyzer {
        result.analyzer.clone_from(v);
    }
    if let Some(fields) = &raw.fields {
        for (field, analyzer) in fields {
            result.fields.insert(field.clone(), analyzer.clone());
        }
    }
}
