//! File-oriented classification entry point.
//!
//! [`Classifier::classify_stream`] reads successive raw lines from any
//! [`BufRead`] source and appends each record, newline-terminated, to one
//! of two [`Write`] sinks. Nothing is assumed about the backing of either
//! side (file, network, or in-memory buffer).
//!
//! An I/O failure on the source or either sink aborts the run: the error
//! propagates and no partial-output contract exists beyond whatever a
//! sink already flushed.

use std::io::{BufRead, Write};

use thiserror::Error;

use super::engine::{Classifier, ClassifyStats, Disposition};
use crate::record::Record;

/// Errors that abort a streaming classification run.
#[derive(Debug, Error)]
pub enum ClassifyError {
    /// Unreadable source or unwritable sink.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Classifier {
    /// Classify a line stream into two record sinks.
    ///
    /// Each line from `source` (trailing newline stripped by the reader)
    /// becomes one record; its raw text plus a newline goes to
    /// `unique_sink` or `duplicate_sink` per the first-seen-wins policy.
    /// Both sinks are flushed before returning.
    ///
    /// # Errors
    ///
    /// Returns [`ClassifyError::Io`] on the first source or sink failure;
    /// the run terminates immediately.
    pub fn classify_stream<R, U, D>(
        &self,
        source: R,
        mut unique_sink: U,
        mut duplicate_sink: D,
    ) -> Result<ClassifyStats, ClassifyError>
    where
        R: BufRead,
        U: Write,
        D: Write,
    {
        let mut pass = self.begin();

        for (index, line) in source.lines().enumerate() {
            let record = Record::new(index, line?);
            let sink: &mut dyn Write = match pass.route(&record) {
                Disposition::Unique => &mut unique_sink,
                Disposition::Duplicate => &mut duplicate_sink,
            };
            sink.write_all(record.text.as_bytes())?;
            sink.write_all(b"\n")?;
        }

        unique_sink.flush()?;
        duplicate_sink.flush()?;

        let stats = pass.finish();
        log::info!(
            "Stream classified {} record(s): {} unique, {} duplicate, {} short",
            stats.total_records,
            stats.unique_records,
            stats.duplicate_records,
            stats.short_records
        );
        Ok(stats)
    }
}
