//! Input record representation.
//!
//! A [`Record`] is one line of input text together with its original
//! position in the input sequence. The position exists purely so the
//! unique/duplicate partition can preserve input order; it never
//! participates in key derivation.

use serde::{Deserialize, Serialize};

/// A single input record: one line of text plus its original position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Zero-based position in the input sequence.
    pub index: usize,
    /// The raw line text, trailing newline already stripped.
    pub text: String,
}

impl Record {
    /// Create a new record.
    ///
    /// # Arguments
    ///
    /// * `index` - Zero-based position in the input sequence
    /// * `text` - The raw line text
    #[must_use]
    pub fn new(index: usize, text: impl Into<String>) -> Self {
        Self {
            index,
            text: text.into(),
        }
    }

    /// One-based line number, as a human would count it.
    #[must_use]
    pub fn line_number(&self) -> usize {
        self.index + 1
    }
}
