//! CSV output formatter for classification results.
//!
//! Provides machine-readable CSV output for spreadsheets and data
//! analysis. One row is generated per input record, in original input
//! order.
//!
//! # Columns
//!
//! - `disposition`: `unique` or `duplicate`
//! - `line_number`: 1-based position in the input
//! - `record`: the raw record text
//!
//! # Example
//!
//! ```
//! use linedupe::classify::Classifier;
//! use linedupe::keys::KeyRules;
//! use linedupe::output::CsvOutput;
//!
//! let classifier = Classifier::new(KeyRules::new());
//! let (partition, _) = classifier.classify_lines(["a", "a"]);
//!
//! let output = CsvOutput::new(&partition);
//! output.write_to(std::io::stdout()).unwrap();
//! ```

use std::io;

use serde::Serialize;
use thiserror::Error;

use crate::classify::{Disposition, Partition};

/// Errors that can occur during CSV output generation.
#[derive(Debug, Error)]
pub enum CsvOutputError {
    /// I/O error during writing.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Error during CSV serialization.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// A single row in the CSV output.
#[derive(Debug, Serialize)]
struct CsvRow<'a> {
    /// `unique` or `duplicate`
    disposition: &'a str,
    /// 1-based input position
    line_number: usize,
    /// Raw record text
    record: &'a str,
}

/// CSV output formatter.
pub struct CsvOutput<'a> {
    partition: &'a Partition,
}

impl<'a> CsvOutput<'a> {
    /// Create a new CSV output formatter.
    #[must_use]
    pub fn new(partition: &'a Partition) -> Self {
        Self { partition }
    }

    /// Write the CSV output to the given writer.
    ///
    /// # Errors
    ///
    /// Returns `CsvOutputError` if writing or serialization fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> Result<(), CsvOutputError> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        // serialize() only emits the header with the first row; keep the
        // header present for empty runs too
        if self.partition.is_empty() {
            csv_writer.write_record(["disposition", "line_number", "record"])?;
            csv_writer.flush()?;
            return Ok(());
        }

        let duplicates: std::collections::HashSet<usize> = self
            .partition
            .duplicate
            .iter()
            .map(|record| record.index)
            .collect();

        for record in self.partition.merged() {
            let disposition = if duplicates.contains(&record.index) {
                Disposition::Duplicate
            } else {
                Disposition::Unique
            };
            csv_writer.serialize(CsvRow {
                disposition: disposition.as_str(),
                line_number: record.line_number(),
                record: &record.text,
            })?;
        }

        csv_writer.flush()?;
        Ok(())
    }
}
