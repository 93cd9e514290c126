//! JSON output formatter for classification results.
//!
//! Provides machine-readable JSON output for scripting and automation.
//!
//! # Output Schema
//!
//! ```json
//! {
//!   "summary": {
//!     "total_records": 6,
//!     "unique_records": 4,
//!     "duplicate_records": 2,
//!     "distinct_keys": 4,
//!     "short_records": 0,
//!     "duplicate_rate": 33.3
//!   },
//!   "unique": [ { "index": 0, "text": "..." } ],
//!   "duplicate": [ { "index": 1, "text": "..." } ]
//! }
//! ```

use serde::Serialize;

use crate::classify::{ClassifyStats, Partition};
use crate::record::Record;

/// Run summary as embedded in the JSON report.
#[derive(Debug, Serialize)]
struct JsonSummary {
    total_records: usize,
    unique_records: usize,
    duplicate_records: usize,
    distinct_keys: usize,
    short_records: usize,
    duplicate_rate: f64,
}

/// The full JSON report document.
#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    summary: JsonSummary,
    unique: &'a [Record],
    duplicate: &'a [Record],
}

/// JSON output formatter.
pub struct JsonOutput<'a> {
    partition: &'a Partition,
    stats: &'a ClassifyStats,
}

impl<'a> JsonOutput<'a> {
    /// Create a new JSON output formatter.
    #[must_use]
    pub fn new(partition: &'a Partition, stats: &'a ClassifyStats) -> Self {
        Self { partition, stats }
    }

    fn report(&self) -> JsonReport<'a> {
        JsonReport {
            summary: JsonSummary {
                total_records: self.stats.total_records,
                unique_records: self.stats.unique_records,
                duplicate_records: self.stats.duplicate_records,
                distinct_keys: self.stats.distinct_keys,
                short_records: self.stats.short_records,
                duplicate_rate: self.stats.duplicate_rate(),
            },
            unique: &self.partition.unique,
            duplicate: &self.partition.duplicate,
        }
    }

    /// Render the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.report())
    }

    /// Render the report as compact JSON.
    ///
    /// # Errors
    ///
    /// Returns `serde_json::Error` if serialization fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.report())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifier;
    use crate::keys::KeyRules;

    #[test]
    fn test_json_report_shape() {
        let classifier = Classifier::new(KeyRules::new());
        let (partition, stats) = classifier.classify_lines(["a", "b", "a"]);

        let json = JsonOutput::new(&partition, &stats).to_json_pretty().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total_records"], 3);
        assert_eq!(value["summary"]["duplicate_records"], 1);
        assert_eq!(value["unique"].as_array().unwrap().len(), 2);
        assert_eq!(value["duplicate"][0]["index"], 2);
        assert_eq!(value["duplicate"][0]["text"], "a");
    }

    #[test]
    fn test_empty_run_serializes() {
        let classifier = Classifier::new(KeyRules::new());
        let (partition, stats) = classifier.classify_lines(Vec::<String>::new());

        let json = JsonOutput::new(&partition, &stats).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["summary"]["total_records"], 0);
        assert_eq!(value["summary"]["duplicate_rate"], 0.0);
        assert!(value["unique"].as_array().unwrap().is_empty());
    }
}
