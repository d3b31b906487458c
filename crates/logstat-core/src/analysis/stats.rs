use super::{Analyzer, StatRow, UrlAggregate};
use crate::{Error, Result};

pub const DEFAULT_REPORT_SIZE: usize = 1000;

/// Ranks URLs by total request time and computes their report rows
pub struct StatsReporter {
    report_size: usize,
}

impl StatsReporter {
    pub fn new(report_size: usize) -> Self {
        Self { report_size }
    }
}

impl Default for StatsReporter {
    fn default() -> Self {
        Self::new(DEFAULT_REPORT_SIZE)
    }
}

impl Analyzer for StatsReporter {
    type Output = Vec<StatRow>;

    fn analyze(&self, aggregate: &UrlAggregate) -> Result<Self::Output> {
        tracing::debug!("Computing URL statistics");

        let totals = aggregate.totals();
        if totals.record_count == 0 {
            return Err(Error::NoRecords);
        }

        let mut ranked: Vec<(&str, &[f64], f64)> = aggregate
            .iter()
            .map(|(url, latencies)| (url, latencies, latencies.iter().sum::<f64>()))
            .collect();

        // Slowest in total first; ties by URL so the report is reproducible
        ranked.sort_by(|a, b| b.2.total_cmp(&a.2).then_with(|| a.0.cmp(b.0)));
        ranked.truncate(self.report_size);

        let record_count = totals.record_count as f64;
        let rows: Vec<StatRow> = ranked
            .into_iter()
            .map(|(url, latencies, time_sum)| {
                let count = latencies.len() as u64;
                let time_percent = if totals.total_latency > 0.0 {
                    100.0 * time_sum / totals.total_latency
                } else {
                    0.0
                };

                StatRow {
                    url: url.to_string(),
                    count,
                    count_percent: round3(100.0 * count as f64 / record_count),
                    time_sum: round3(time_sum),
                    time_percent: round3(time_percent),
                    time_avg: round3(time_sum / count as f64),
                    time_max: round3(latencies.iter().copied().fold(0.0, f64::max)),
                    time_median: round3(median(latencies)),
                }
            })
            .collect();

        tracing::info!(
            "Statistics complete: {} of {} URLs kept",
            rows.len(),
            aggregate.len()
        );

        Ok(rows)
    }
}

/// Round to 3 decimal places, halves away from zero
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}

/// Median of the values; the mean of the two middle values for even lengths.
/// Returns 0 for an empty slice.
pub fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len().is_multiple_of(2) {
        (sorted[mid - 1] + sorted[mid]) / 2.0
    } else {
        sorted[mid]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::ParsedRecord;

    fn aggregate(records: &[(&str, f64)]) -> UrlAggregate {
        records
            .iter()
            .map(|(url, latency)| ParsedRecord {
                url: url.to_string(),
                latency: *latency,
            })
            .collect()
    }

    fn row<'a>(rows: &'a [StatRow], url: &str) -> &'a StatRow {
        rows.iter().find(|r| r.url == url).unwrap()
    }

    #[test]
    fn test_two_url_scenario() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[("/x", 0.1), ("/x", 0.3), ("/y", 0.2)]))
            .unwrap();

        assert_eq!(
            row(&rows, "/x"),
            &StatRow {
                url: "/x".to_string(),
                count: 2,
                count_percent: 66.667,
                time_sum: 0.4,
                time_percent: 66.667,
                time_avg: 0.2,
                time_max: 0.3,
                time_median: 0.2,
            }
        );

        let y = row(&rows, "/y");
        assert_eq!(y.count, 1);
        assert_eq!(y.count_percent, 33.333);
        assert_eq!(y.time_percent, 33.333);
    }

    #[test]
    fn test_rows_ranked_by_time_sum() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[
                ("/fast", 0.01),
                ("/slow", 2.0),
                ("/fast", 0.01),
                ("/medium", 0.5),
            ]))
            .unwrap();

        let urls: Vec<_> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["/slow", "/medium", "/fast"]);
    }

    #[test]
    fn test_ties_broken_by_url() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[("/b", 1.0), ("/c", 1.0), ("/a", 1.0)]))
            .unwrap();

        let urls: Vec<_> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["/a", "/b", "/c"]);
    }

    #[test]
    fn test_truncates_to_report_size_keeping_slowest() {
        let records: Vec<(String, f64)> = (1..=20)
            .map(|i| (format!("/url/{}", i), i as f64))
            .collect();
        let records: Vec<(&str, f64)> = records.iter().map(|(u, l)| (u.as_str(), *l)).collect();

        let rows = StatsReporter::new(5).analyze(&aggregate(&records)).unwrap();

        assert_eq!(rows.len(), 5);
        let urls: Vec<_> = rows.iter().map(|r| r.url.as_str()).collect();
        assert_eq!(urls, vec!["/url/20", "/url/19", "/url/18", "/url/17", "/url/16"]);
    }

    #[test]
    fn test_report_size_larger_than_url_count() {
        let rows = StatsReporter::new(10)
            .analyze(&aggregate(&[("/a", 1.0), ("/b", 2.0)]))
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_percentages_sum_to_hundred() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[
                ("/a", 0.123),
                ("/b", 0.456),
                ("/c", 0.789),
                ("/a", 1.5),
                ("/d", 0.001),
                ("/b", 0.2),
                ("/e", 3.3),
            ]))
            .unwrap();

        let count_total: f64 = rows.iter().map(|r| r.count_percent).sum();
        let time_total: f64 = rows.iter().map(|r| r.time_percent).sum();
        let tolerance = 0.0005 * rows.len() as f64;
        assert!((count_total - 100.0).abs() <= tolerance, "{}", count_total);
        assert!((time_total - 100.0).abs() <= tolerance, "{}", time_total);
    }

    #[test]
    fn test_max_bounds_average_and_median() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[
                ("/a", 0.1),
                ("/a", 5.0),
                ("/a", 0.2),
                ("/a", 0.3),
                ("/b", 0.0),
                ("/c", 7.25),
                ("/c", 0.75),
            ]))
            .unwrap();

        for row in &rows {
            assert!(row.time_max >= row.time_avg, "{:?}", row);
            assert!(row.time_avg >= 0.0, "{:?}", row);
            assert!(row.time_max >= row.time_median, "{:?}", row);
        }
    }

    #[test]
    fn test_zero_total_latency_yields_zero_time_percent() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[("/a", 0.0), ("/b", 0.0)]))
            .unwrap();

        assert!(rows.iter().all(|r| r.time_percent == 0.0));
        assert!(rows.iter().all(|r| r.count_percent == 50.0));
    }

    #[test]
    fn test_no_records_is_an_error() {
        let result = StatsReporter::default().analyze(&UrlAggregate::new());
        assert!(matches!(result, Err(Error::NoRecords)));
    }

    #[test]
    fn test_round3_rounds_halves_away_from_zero() {
        assert_eq!(round3(0.0025), 0.003);
        assert_eq!(round3(0.0125), 0.013);
        assert_eq!(round3(-0.0025), -0.003);
        assert_eq!(round3(66.66666666666667), 66.667);
        assert_eq!(round3(0.0004), 0.0);
    }

    #[test]
    fn test_median_odd_and_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]), 2.5);
        assert_eq!(median(&[0.7]), 0.7);
        assert_eq!(median(&[]), 0.0);
    }

    #[test]
    fn test_serialized_keys() {
        let rows = StatsReporter::default()
            .analyze(&aggregate(&[("/x", 0.5)]))
            .unwrap();
        let json = serde_json::to_value(&rows[0]).unwrap();

        for key in [
            "url",
            "count",
            "count_perc",
            "time_sum",
            "time_perc",
            "time_avg",
            "time_max",
            "time_med",
        ] {
            assert!(json.get(key).is_some(), "missing key {}", key);
        }
    }
}
