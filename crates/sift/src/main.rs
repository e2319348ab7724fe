//! Command-line interface for the `sift` query parser.

mod cli;

use std::process::ExitCode;

use cli::{
    CommandContext,
    args::{Commands, parse_cli},
    commands,
    logging::init_logging,
};

fn main() -> ExitCode {
    let cli = parse_cli();
    init_logging();

    // These must work even when an existing config file is broken.
    let ctx = match cli.command {
        Commands::Init(_) | Commands::Clean(_) => CommandContext::load_cwd_only(),
        _ => CommandContext::load(),
    };
    match ctx {
        Ok(ctx) => commands::run(cli.command, &ctx),
        Err(code) => code,
    }
}
