//! Implementation of `sift check`.

use std::process::ExitCode;

use sift_config::ConfigWarning;

use super::shared::{FALLBACK_FIELD, build_analyzer};
use crate::cli::context::CommandContext;

/// Shows configuration files, fields and analyzers, then validation warnings.
///
/// Exits with failure when the configuration has warnings or an analyzer
/// name is not recognized.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;

    if config.files.is_empty() {
        println!("No configuration files found.");
        println!();
        println!("Run sift init to create a configuration file.");
        println!();
    } else {
        println!("Config files:");
        for path in &config.files {
            println!("   {}", path.display());
        }
        println!();
    }

    let parser = &config.parser;
    println!("Fields:");
    if parser.fields.is_empty() {
        println!("   (none defined, queries search '{FALLBACK_FIELD}')");
    } else {
        println!("   all:     {}", parser.fields.join(", "));
    }
    if !parser.default_fields.is_empty() {
        println!("   default: {}", parser.default_fields.join(", "));
    }
    if let Some(tokenized) = &parser.tokenized_fields {
        println!("   tokenized: {}", tokenized.join(", "));
    }
    println!();

    println!("Analyzers:");
    println!("   default: {}", config.analysis.analyzer);
    for (field, name) in &config.analysis.fields {
        println!("   {field}: {name}");
    }
    println!();

    if let Err(e) = build_analyzer(&config.analysis, None) {
        println!("Error:");
        println!("   {e}");
        return ExitCode::FAILURE;
    }

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("No issues found.");
        return ExitCode::SUCCESS;
    }

    println!("Warnings ({}):", warnings.len());
    for w in &warnings {
        println!("   {w}");
    }
    println!();

    print_hints(&warnings);

    ExitCode::FAILURE
}

/// Prints hints for resolving common warnings.
fn print_hints(warnings: &[ConfigWarning]) {
    for w in warnings {
        match w {
            ConfigWarning::NoFieldsDefined => {
                println!("Hint: add fields = [...] under [parser] in .sift.toml");
            }
            ConfigWarning::DefaultFieldNotListed { .. }
            | ConfigWarning::TokenizedFieldNotListed { .. } => {
                println!("Hint: every field named in [parser] should appear in fields");
            }
            ConfigWarning::FuzzySimilarityOutOfRange { .. } => {
                println!("Hint: fuzzy_min_similarity must be at least 0 and below 1");
            }
            _ => {}
        }
    }
}
