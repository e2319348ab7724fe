//! Implementation of `sift clean`.

use std::process::ExitCode;

use sift_query::clean_query;

use crate::cli::args::CleanCommand;

/// Prints the query with unbalanced quotes and parentheses repaired.
pub fn run(cmd: &CleanCommand) -> ExitCode {
    println!("{}", clean_query(&cmd.query));
    ExitCode::SUCCESS
}
