//! Shared helpers for command implementations.

use std::{process::ExitCode, sync::Arc};

use sift_analysis::{AnalysisError, Analyzer, PerFieldAnalyzer, build_analyzer_from_name};
use sift_config::{AnalysisSettings, Config, ParserSettings};
use sift_query::{ParserConfig, QueryParser};
use tracing::debug;

use crate::cli::args::ParserArgs;

/// Field searched when neither the config nor the flags name any.
pub const FALLBACK_FIELD: &str = "body";

/// Builds parser settings by applying CLI overrides to the config.
pub fn build_parser_config(settings: &ParserSettings, args: &ParserArgs) -> ParserConfig {
    let fields = args.fields.as_ref().unwrap_or(&settings.fields);
    let default_fields = args
        .default_fields
        .as_ref()
        .unwrap_or(&settings.default_fields);

    let mut config = if fields.is_empty() && default_fields.is_empty() {
        ParserConfig::new([FALLBACK_FIELD])
    } else {
        ParserConfig::new(fields.iter().cloned()).with_default_fields(default_fields.iter().cloned())
    };

    config.tokenized_fields = args
        .tokenized_fields
        .clone()
        .or_else(|| settings.tokenized_fields.clone());

    config
        .with_or_default(settings.or_default && !args.and)
        .with_wild_lower(settings.lowercase_terms)
        .with_clean_str(settings.clean || args.clean)
        .with_handle_parse_errors(settings.lenient || args.lenient)
        .with_allow_any_fields(settings.allow_any_fields || args.any_field)
        .with_use_keywords(settings.keywords && !args.no_keywords)
        .with_max_clauses(args.max_clauses.unwrap_or(settings.max_clauses))
        .with_fuzzy(settings.fuzzy_min_similarity, settings.fuzzy_prefix_length)
}

/// Builds the analyzer, with `default_name` replacing the configured default.
///
/// Per-field entries from the config apply either way.
pub fn build_analyzer(
    analysis: &AnalysisSettings,
    default_name: Option<&str>,
) -> Result<Arc<dyn Analyzer>, AnalysisError> {
    let default = build_analyzer_from_name(default_name.unwrap_or(&analysis.analyzer))?;
    if analysis.fields.is_empty() {
        return Ok(Arc::from(default));
    }

    let mut per_field = PerFieldAnalyzer::new(default);
    for (field, name) in &analysis.fields {
        per_field.add_field(field.clone(), build_analyzer_from_name(name)?);
    }
    Ok(Arc::new(per_field))
}

/// Builds a query parser from the config and CLI overrides.
pub fn build_parser(config: &Config, args: &ParserArgs) -> Result<QueryParser, ExitCode> {
    let parser_config = build_parser_config(&config.parser, args);
    let analyzer = build_analyzer(&config.analysis, args.analyzer.as_deref()).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::FAILURE
    })?;
    debug!(
        fields = ?parser_config.all_fields,
        default_fields = ?parser_config.default_fields,
        "built query parser"
    );
    Ok(QueryParser::new(parser_config, analyzer))
}
