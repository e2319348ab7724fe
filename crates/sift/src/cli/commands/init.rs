//! Implementation of `sift init`.

use std::{fs, path::PathBuf, process::ExitCode};

use sift_config::{CONFIG_FILENAME, global_config_path, global_template, local_template};

use crate::cli::{args::InitCommand, context::CommandContext};

/// Where `init` writes and which template it writes there.
struct Target {
    /// Config file path.
    path: PathBuf,
    /// Template text.
    template: String,
}

/// Writes a commented `.sift.toml` template.
///
/// Running in the home directory behaves like `--global`.
pub fn run(ctx: &CommandContext, cmd: &InitCommand) -> ExitCode {
    let Some(target) = resolve_target(ctx, cmd.global) else {
        eprintln!("error: could not determine home directory");
        return ExitCode::FAILURE;
    };

    if target.path.exists() && !cmd.force {
        eprintln!(
            "error: configuration file already exists: {}",
            target.path.display()
        );
        eprintln!("use --force to overwrite");
        return ExitCode::FAILURE;
    }

    if let Err(e) = fs::write(&target.path, &target.template) {
        eprintln!("error: failed to write {}: {e}", target.path.display());
        return ExitCode::FAILURE;
    }

    println!("Created {}", target.path.display());
    println!("Uncomment settings to change them; run sift check to validate.");
    ExitCode::SUCCESS
}

/// Picks the local or global config file.
fn resolve_target(ctx: &CommandContext, global: bool) -> Option<Target> {
    let global_path = global_config_path();
    let in_home = global_path
        .as_deref()
        .and_then(|p| p.parent())
        .is_some_and(|home| home == ctx.cwd.as_path());

    if global || in_home {
        return global_path.map(|path| Target {
            path,
            template: global_template(),
        });
    }
    Some(Target {
        path: ctx.cwd.join(CONFIG_FILENAME),
        template: local_template(),
    })
}
