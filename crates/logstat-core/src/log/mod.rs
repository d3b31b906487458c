mod locator;
mod parser;
mod stream;

pub use locator::LogLocator;
pub use parser::{LineError, LineParser, URL_FIELD_INDEX};
pub use stream::{LogStream, ParseSummary};

use chrono::NaiveDate;
use serde::Serialize;
use std::path::PathBuf;

/// An access log selected for processing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogFile {
    pub path: PathBuf,
    /// Date embedded in the file name
    pub date: NaiveDate,
    /// Whether the file is gzip-compressed
    pub compressed: bool,
}

impl LogFile {
    /// File name of the report generated from this log, e.g. `report-2017.06.30.html`
    pub fn report_file_name(&self) -> String {
        format!("report-{}.html", self.date.format("%Y.%m.%d"))
    }
}

/// A single (url, request time) observation taken from one log line
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    pub url: String,
    pub latency: f64,
}
