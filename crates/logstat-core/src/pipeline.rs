use crate::analysis::{Aggregator, Analyzer, StatsReporter};
use crate::log::{LogFile, LogStream, ParseSummary};
use crate::report::{ReportWriter, table_json};
use crate::{Config, Result};
use serde::Serialize;
use std::fs;
use std::path::PathBuf;

/// What a successful run produced
#[derive(Debug, Clone, Serialize)]
pub struct RunOutcome {
    pub log: LogFile,
    pub report_path: PathBuf,
    pub parse: ParseSummary,
    pub distinct_urls: usize,
    pub rows: usize,
}

/// Build the report for the latest log in `config.log_dir`.
///
/// Nothing is written unless the log passed the parse quality check.
pub fn run(config: &Config) -> Result<RunOutcome> {
    let locator = config.locator()?;
    let log = locator.locate(&config.log_dir)?;

    let report_path = config.report_dir.join(log.report_file_name());
    tracing::info!("Report path: {}", report_path.display());

    let stream = LogStream::open(&log, config.min_success_ratio)?;
    let (aggregate, parse) = Aggregator::collect(stream)?;

    let rows = StatsReporter::new(config.report_size).analyze(&aggregate)?;
    let payload = table_json(&rows)?;

    if !config.report_dir.exists() {
        tracing::info!("Creating report directory {}", config.report_dir.display());
        fs::create_dir_all(&config.report_dir)?;
    }

    ReportWriter::new(&config.report_template).write(&payload, &report_path)?;
    tracing::info!("Report written to {}", report_path.display());

    Ok(RunOutcome {
        log,
        report_path,
        parse,
        distinct_urls: aggregate.len(),
        rows: rows.len(),
    })
}
