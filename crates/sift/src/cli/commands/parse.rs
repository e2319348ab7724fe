//! Implementation of `sift parse`.

use std::process::ExitCode;

use sift_query::{Query, QueryError, QueryParser};

use super::shared::build_parser;
use crate::cli::{
    args::ParseCommand,
    context::CommandContext,
    output::{JsonParseOutput, JsonParseResult, JsonQueryError, print_json},
};

/// Parses each query and prints the result.
///
/// Every query is attempted; the exit code is a failure if any of them was
/// rejected.
pub fn run(ctx: &CommandContext, cmd: &ParseCommand) -> ExitCode {
    let parser = match build_parser(&ctx.config, &cmd.parser) {
        Ok(parser) => parser,
        Err(code) => return code,
    };
    let default_field = render_field(&parser);

    let results: Vec<(&str, Result<Query, QueryError>)> = cmd
        .queries
        .iter()
        .map(|q| (q.as_str(), parser.parse(q)))
        .collect();
    let failed = results.iter().any(|(_, r)| r.is_err());

    let code = if cmd.json {
        print_json(&JsonParseOutput {
            queries: results
                .iter()
                .map(|(input, result)| json_result(input, result, &default_field))
                .collect(),
        })
    } else {
        for (i, (input, result)) in results.iter().enumerate() {
            if cmd.queries.len() > 1 && !cmd.query_string {
                if i > 0 {
                    println!();
                }
                println!("# {input}");
            }
            match result {
                Ok(query) if cmd.query_string => {
                    println!("{}", query.to_query_string(&default_field));
                }
                Ok(query) => print!("{query}"),
                Err(e) => eprintln!("{}", e.format_with_context()),
            }
        }
        ExitCode::SUCCESS
    };

    if failed { ExitCode::FAILURE } else { code }
}

/// Returns the field written without a prefix when rendering query text.
fn render_field(parser: &QueryParser) -> String {
    parser.default_fields().into_iter().next().unwrap_or_default()
}

/// Builds the JSON record for one query.
fn json_result<'a>(
    input: &'a str,
    result: &'a Result<Query, QueryError>,
    default_field: &str,
) -> JsonParseResult<'a> {
    match result {
        Ok(query) => JsonParseResult {
            input,
            query: Some(query),
            query_string: Some(query.to_query_string(default_field)),
            error: None,
        },
        Err(e) => JsonParseResult {
            input,
            query: None,
            query_string: None,
            error: Some(JsonQueryError::from(e)),
        },
    }
}
