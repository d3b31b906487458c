mod aggregate;
mod stats;

pub use aggregate::{Aggregator, RunTotals, UrlAggregate};
pub use stats::{DEFAULT_REPORT_SIZE, StatsReporter, median, round3};

use serde::{Deserialize, Serialize};

/// One ranked line of the report table.
///
/// Serialized keys match the ones read by the report template's table script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatRow {
    pub url: String,
    pub count: u64,
    #[serde(rename = "count_perc")]
    pub count_percent: f64,
    pub time_sum: f64,
    #[serde(rename = "time_perc")]
    pub time_percent: f64,
    pub time_avg: f64,
    pub time_max: f64,
    #[serde(rename = "time_med")]
    pub time_median: f64,
}

pub trait Analyzer {
    type Output;

    fn analyze(&self, aggregate: &UrlAggregate) -> crate::Result<Self::Output>;
}
