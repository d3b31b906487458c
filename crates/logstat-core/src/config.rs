use crate::analysis::DEFAULT_REPORT_SIZE;
use crate::log::LogLocator;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file picked up when no path is given explicitly
pub const DEFAULT_CONFIG_PATH: &str = "./config.json";

/// File name prefix of nginx `ui_short` access logs
pub const DEFAULT_LOG_PREFIX: &str = "nginx-access-ui.log";

/// Run configuration, built once at startup and passed by reference to the pipeline.
///
/// Keys in the JSON file use upper snake case. Any key missing from the file keeps its
/// default value, so a config file only needs to carry what it overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Number of URLs kept in the report
    #[serde(rename = "REPORT_SIZE")]
    pub report_size: usize,

    #[serde(rename = "REPORT_DIR")]
    pub report_dir: PathBuf,

    #[serde(rename = "LOG_DIR")]
    pub log_dir: PathBuf,

    /// HTML template containing the `$table_json` placeholder
    #[serde(rename = "REPORT_TEMPLATE")]
    pub report_template: PathBuf,

    /// Minimum fraction of log lines that must parse for the report to be trusted
    #[serde(rename = "SUCSESSFUL_PERCENT", alias = "SUCCESSFUL_PERCENT")]
    pub min_success_ratio: f64,

    /// Append logs to this file instead of stderr
    #[serde(rename = "LOGGING_FILE")]
    pub logging_file: Option<PathBuf>,

    #[serde(rename = "LOG_PREFIX")]
    pub log_prefix: String,

    /// Full file name regex; must contain a `date` group. Takes precedence over `LOG_PREFIX`.
    #[serde(rename = "LOG_PATTERN")]
    pub log_pattern: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            report_size: DEFAULT_REPORT_SIZE,
            report_dir: PathBuf::from("./reports"),
            log_dir: PathBuf::from("./log"),
            report_template: PathBuf::from("./report.html"),
            min_success_ratio: 0.8,
            logging_file: None,
            log_prefix: DEFAULT_LOG_PREFIX.to_string(),
            log_pattern: None,
        }
    }
}

impl Config {
    /// Load configuration, merging the file over the defaults.
    ///
    /// With an explicit path the file must exist. Without one, [`DEFAULT_CONFIG_PATH`] is read
    /// when present and the defaults are used otherwise.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_PATH);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    tracing::debug!("No config file at {}, using defaults", DEFAULT_CONFIG_PATH);
                    Self::default()
                }
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Reading config file: {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("cannot read config file {}: {}", path.display(), e))
        })?;

        serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("invalid JSON in {}: {}", path.display(), e)))
    }

    /// Parse configuration from a JSON object string
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Config(format!("invalid JSON: {}", e)))
    }

    /// Check value ranges and the log file pattern
    pub fn validate(&self) -> Result<()> {
        if self.report_size == 0 {
            return Err(Error::Config("REPORT_SIZE must be greater than 0".to_string()));
        }

        if !(0.0..=1.0).contains(&self.min_success_ratio) {
            return Err(Error::Config(format!(
                "SUCSESSFUL_PERCENT must be a fraction between 0 and 1, got {}",
                self.min_success_ratio
            )));
        }

        self.locator()?;
        Ok(())
    }

    /// Build the log locator described by `LOG_PATTERN` or `LOG_PREFIX`
    pub fn locator(&self) -> Result<LogLocator> {
        match &self.log_pattern {
            Some(pattern) => LogLocator::from_pattern(pattern),
            None => LogLocator::with_prefix(&self.log_prefix),
        }
    }
}
