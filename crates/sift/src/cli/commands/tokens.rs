//! Implementation of `sift tokens`.

use std::{iter, process::ExitCode};

use sift_config::ParserSettings;

use super::shared::{FALLBACK_FIELD, build_analyzer};
use crate::cli::{
    args::TokensCommand,
    context::CommandContext,
    output::{JsonTokensOutput, print_json, token_rows, tokens_table},
};

/// Runs the analyzer for a field over the text and prints its tokens.
pub fn run(ctx: &CommandContext, cmd: &TokensCommand) -> ExitCode {
    let analyzer = match build_analyzer(&ctx.config.analysis, cmd.analyzer.as_deref()) {
        Ok(analyzer) => analyzer,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    let field = cmd
        .field
        .clone()
        .unwrap_or_else(|| default_field(&ctx.config.parser).to_string());

    let mut stream = analyzer.token_stream(&field);
    stream.reset(&cmd.text);
    let rows = token_rows(iter::from_fn(|| stream.next()));

    if cmd.json {
        return print_json(&JsonTokensOutput {
            field: &field,
            tokens: &rows,
        });
    }

    if rows.is_empty() {
        println!("no tokens for field '{field}'");
    } else {
        println!("{}", tokens_table(&rows));
    }
    ExitCode::SUCCESS
}

/// The first default field, else the first field, else the fallback.
fn default_field(settings: &ParserSettings) -> &str {
    settings
        .default_fields
        .first()
        .or_else(|| settings.fields.first())
        .map_or(FALLBACK_FIELD, String::as_str)
}
