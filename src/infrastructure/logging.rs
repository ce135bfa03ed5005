/// Diagnostics logging.
///
/// Logs go to stderr so stdout carries only the report. The filter is read
/// from `LIVETRACE_LOG` (EnvFilter syntax); without it only errors are shown,
/// or `debug` with `--verbose`.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "LIVETRACE_LOG";

pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "livetrace=debug"
    } else {
        "error"
    }
}

pub fn init_logging(verbose: bool) -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive() {
        assert_eq!(default_directive(false), "error");
        assert_eq!(default_directive(true), "livetrace=debug");
    }
}
