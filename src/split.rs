//! Delimited-field splitting.
//!
//! The splitter is a collaborator behind a trait seam: the classification
//! core only needs "record in, ordered fields out", and callers can
//! substitute their own implementation without touching the core's
//! contracts. The default [`QuotedSplitter`] is backed by the `csv` crate
//! reader so quoting and escaped delimiters are honored: an apostrophe
//! between two word characters ("O'Brien") is literal data, not a quote
//! delimiter, and a double-quoted field may contain the separator itself.

/// Splits one raw record into an ordered sequence of fields.
pub trait FieldSplitter: Send + Sync {
    /// Split a record into fields.
    ///
    /// An empty record yields no fields.
    fn split_record(&self, record: &str) -> Vec<String>;
}

/// Quote-aware splitter over a single-byte delimiter.
#[derive(Debug, Clone, Copy)]
pub struct QuotedSplitter {
    delimiter: u8,
}

impl QuotedSplitter {
    /// Create a splitter for the given delimiter byte.
    #[must_use]
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

impl FieldSplitter for QuotedSplitter {
    fn split_record(&self, record: &str) -> Vec<String> {
        if record.is_empty() {
            return Vec::new();
        }

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(false)
            .flexible(true)
            .from_reader(record.as_bytes());

        let mut row = csv::StringRecord::new();
        match reader.read_record(&mut row) {
            Ok(true) => row.iter().map(str::to_string).collect(),
            Ok(false) => Vec::new(),
            Err(err) => {
                // A malformed record must not abort the pass; fall back to
                // a plain split so the record still gets classified.
                log::warn!("Quote-aware split failed ({err}); splitting plainly");
                record
                    .split(self.delimiter as char)
                    .map(str::to_string)
                    .collect()
            }
        }
    }
}
