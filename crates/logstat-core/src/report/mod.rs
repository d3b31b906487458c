mod template;
mod writer;

pub use template::Template;
pub use writer::ReportWriter;

use crate::Result;
use crate::analysis::StatRow;

/// Template placeholder replaced by the JSON table
pub const TABLE_PLACEHOLDER: &str = "table_json";

/// Serialize report rows into the compact JSON array embedded in the report
pub fn table_json(rows: &[StatRow]) -> Result<String> {
    let json = serde_json::to_string(rows)?;
    tracing::debug!("Serialized {} rows ({} bytes)", rows.len(), json.len());
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_json_is_compact_array() {
        let rows = vec![StatRow {
            url: "/x".to_string(),
            count: 2,
            count_percent: 66.667,
            time_sum: 0.4,
            time_percent: 66.667,
            time_avg: 0.2,
            time_max: 0.3,
            time_median: 0.2,
        }];

        let json = table_json(&rows).unwrap();
        assert_eq!(
            json,
            r#"[{"url":"/x","count":2,"count_perc":66.667,"time_sum":0.4,"time_perc":66.667,"time_avg":0.2,"time_max":0.3,"time_med":0.2}]"#
        );
    }

    #[test]
    fn test_table_json_empty() {
        assert_eq!(table_json(&[]).unwrap(), "[]");
    }
}
