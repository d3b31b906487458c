use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to serialize report data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("No log file matching '{pattern}' found in {}", .dir.display())]
    NoLogFound { dir: PathBuf, pattern: String },

    #[error("Log file {} contains no lines", .path.display())]
    EmptyLog { path: PathBuf },

    #[error(
        "Parse quality below threshold for {}: {handled} of {total} lines parsed (ratio {ratio:.3}, required {threshold:.3})",
        .path.display()
    )]
    QualityBelowThreshold {
        path: PathBuf,
        handled: u64,
        total: u64,
        ratio: f64,
        threshold: f64,
    },

    #[error("No records to report")]
    NoRecords,

    #[error("Failed to read report template {}: {source}", .path.display())]
    Template {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
