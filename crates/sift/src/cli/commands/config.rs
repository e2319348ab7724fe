//! Implementation of `sift config`.

use std::process::ExitCode;

use crate::cli::context::CommandContext;

/// Shows effective configuration settings.
pub fn run(ctx: &CommandContext) -> ExitCode {
    let config = &ctx.config;
    if config.files.is_empty() {
        println!("# no configuration files found, showing defaults");
    } else {
        for path in &config.files {
            println!("# {}", path.display());
        }
    }
    match config.settings_to_toml() {
        Ok(rendered) => {
            print!("{rendered}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
