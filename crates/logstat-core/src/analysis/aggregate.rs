use crate::Result;
use crate::log::{LogStream, ParseSummary, ParsedRecord};
use serde::Serialize;
use std::collections::HashMap;

/// Totals over every record of a run, used as percentage denominators
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct RunTotals {
    pub record_count: u64,
    pub total_latency: f64,
}

/// Request times grouped by URL, plus the run totals
#[derive(Debug, Clone, Default)]
pub struct UrlAggregate {
    urls: HashMap<String, Vec<f64>>,
    totals: RunTotals,
}

impl UrlAggregate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: ParsedRecord) {
        self.urls
            .entry(record.url)
            .or_default()
            .push(record.latency);
        self.totals.record_count += 1;
        self.totals.total_latency += record.latency;
    }

    pub fn totals(&self) -> RunTotals {
        self.totals
    }

    /// Number of distinct URLs
    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    /// Request times of `url` in the order they were seen
    pub fn latencies(&self, url: &str) -> Option<&[f64]> {
        self.urls.get(url).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.urls
            .iter()
            .map(|(url, latencies)| (url.as_str(), latencies.as_slice()))
    }
}

impl Extend<ParsedRecord> for UrlAggregate {
    fn extend<I: IntoIterator<Item = ParsedRecord>>(&mut self, records: I) {
        for record in records {
            self.add(record);
        }
    }
}

impl FromIterator<ParsedRecord> for UrlAggregate {
    fn from_iter<I: IntoIterator<Item = ParsedRecord>>(records: I) -> Self {
        let mut aggregate = Self::new();
        aggregate.extend(records);
        aggregate
    }
}

pub struct Aggregator;

impl Aggregator {
    /// Drain a log stream into an aggregate.
    ///
    /// The stream's final check runs after the last record. If it fails, the partial
    /// aggregate is dropped and the error is returned.
    pub fn collect(mut stream: LogStream) -> Result<(UrlAggregate, ParseSummary)> {
        tracing::debug!("Aggregating records from {}", stream.path().display());

        let aggregate: UrlAggregate = stream.by_ref().collect();
        let summary = stream.finish()?;

        tracing::info!(
            "Aggregated {} records over {} distinct URLs",
            aggregate.totals().record_count,
            aggregate.len()
        );

        Ok((aggregate, summary))
    }
}
