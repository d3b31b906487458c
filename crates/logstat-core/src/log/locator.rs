use super::LogFile;
use crate::{Error, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::cmp::Ordering;
use std::fs;
use std::path::Path;

/// Finds the most recent log in a directory by the date embedded in its file name
#[derive(Debug, Clone)]
pub struct LogLocator {
    pattern: Regex,
}

impl LogLocator {
    /// Match files named `<prefix>-YYYYMMDD`, optionally with a `.gz` suffix
    pub fn with_prefix(prefix: &str) -> Result<Self> {
        if prefix.is_empty() {
            return Err(Error::Config("LOG_PREFIX must not be empty".to_string()));
        }

        Self::from_pattern(&format!(
            r"^{}-(?P<date>\d{{8}})(\.gz)?$",
            regex::escape(prefix)
        ))
    }

    /// Match files against a custom regex with a named `date` group holding `YYYYMMDD`
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            Error::Config(format!("Invalid log file pattern '{}': {}", pattern, e))
        })?;

        if !regex.capture_names().any(|name| name == Some("date")) {
            return Err(Error::Config(format!(
                "Log file pattern '{}' has no named 'date' group",
                pattern
            )));
        }

        Ok(Self { pattern: regex })
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    /// Return the log with the latest date in `dir`.
    ///
    /// When several files carry the same date, the uncompressed one wins, then the
    /// lexically smallest name.
    pub fn locate(&self, dir: &Path) -> Result<LogFile> {
        tracing::debug!("Searching for logs in {}", dir.display());

        let entries = fs::read_dir(dir).inspect_err(|e| {
            tracing::error!("Cannot read log directory {}: {}", dir.display(), e);
        })?;

        let mut candidates = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str().map(str::to_owned) else {
                tracing::debug!("Skipping non UTF-8 file name: {}", path.display());
                continue;
            };

            if let Some(log) = self.candidate(dir, &file_name) {
                candidates.push(log);
            }
        }

        let latest = candidates
            .into_iter()
            .max_by(preference)
            .ok_or_else(|| Error::NoLogFound {
                dir: dir.to_path_buf(),
                pattern: self.pattern().to_string(),
            })?;

        tracing::info!(
            "Latest log found: {} ({})",
            latest.path.display(),
            latest.date
        );

        Ok(latest)
    }

    fn candidate(&self, dir: &Path, file_name: &str) -> Option<LogFile> {
        let captures = self.pattern.captures(file_name)?;
        let raw_date = captures.name("date")?.as_str();

        match NaiveDate::parse_from_str(raw_date, "%Y%m%d") {
            Ok(date) => Some(LogFile {
                path: dir.join(file_name),
                date,
                compressed: file_name.ends_with(".gz"),
            }),
            Err(e) => {
                tracing::warn!("Skipping {}: cannot parse date '{}': {}", file_name, raw_date, e);
                None
            }
        }
    }
}

/// Ordering in which the greater log is preferred
fn preference(a: &LogFile, b: &LogFile) -> Ordering {
    a.date
        .cmp(&b.date)
        .then_with(|| b.compressed.cmp(&a.compressed))
        .then_with(|| b.path.file_name().cmp(&a.path.file_name()))
}
