use crate::OutputFormat;
use clap::Parser;
use logstat_core::{Config, Result};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "logstat")]
#[command(author, version)]
#[command(
    about = "Build a per-URL request time report from the latest nginx access log",
    long_about = "logstat finds the most recent access log in the log directory, aggregates \
                  request times per URL, and renders the slowest URLs into an HTML report."
)]
pub struct Cli {
    /// JSON config file; ./config.json is used when present and no file is given
    #[arg(short, long, value_name = "FILE", env = "LOGSTAT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory containing the access logs (overrides LOG_DIR)
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,

    /// Directory reports are written to (overrides REPORT_DIR)
    #[arg(long, value_name = "DIR")]
    pub report_dir: Option<PathBuf>,

    /// Number of URLs kept in the report (overrides REPORT_SIZE)
    #[arg(long, value_name = "N")]
    pub report_size: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Format of the run summary printed on success
    #[arg(short, long, value_enum, default_value = "pretty")]
    pub format: OutputFormat,
}

impl Cli {
    /// Merge defaults, the config file and command line overrides, in that order
    pub fn load_config(&self) -> Result<Config> {
        let mut config = Config::load(self.config.as_deref())?;

        if let Some(log_dir) = &self.log_dir {
            config.log_dir = log_dir.clone();
        }
        if let Some(report_dir) = &self.report_dir {
            config.report_dir = report_dir.clone();
        }
        if let Some(report_size) = self.report_size {
            config.report_size = report_size;
        }

        config.validate()?;
        Ok(config)
    }
}
