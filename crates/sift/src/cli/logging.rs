//! Diagnostic logging for the CLI.

use std::io;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter, e.g. `SIFT_LOG=sift_query=debug`.
pub const LOG_ENV: &str = "SIFT_LOG";

/// Installs a stderr subscriber filtered by `SIFT_LOG`, defaulting to `warn`.
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
    if let Err(e) = installed {
        eprintln!("warning: logging disabled: {e}");
    }
}
