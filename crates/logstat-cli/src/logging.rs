use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

const TIMESTAMP_FORMAT: &str = "%Y.%m.%d %H:%M:%S";

/// Install the global subscriber.
///
/// Logs go to stderr, or are appended to `log_file` with timestamps when one is configured.
pub fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let filter = if verbose {
        EnvFilter::new("logstat=debug,logstat_cli=debug,logstat_core=debug")
    } else {
        EnvFilter::new("logstat=info,logstat_cli=info,logstat_core=info")
    };

    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open logging file {}", path.display()))?;

            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .with_ansi(false)
                .with_timer(ChronoLocal::new(TIMESTAMP_FORMAT.to_string()))
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr)
                .init();
        }
    }

    Ok(())
}
