//! The classification engine.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::diagnostics::{DiagnosticSink, LogSink};
use crate::keys::{derive_key, KeyRules};
use crate::record::Record;
use crate::split::{FieldSplitter, QuotedSplitter};

/// Where one record was routed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// First record seen for its composite key.
    Unique,
    /// A later record whose key was already seen.
    Duplicate,
}

impl Disposition {
    /// Lowercase label, as used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unique => "unique",
            Self::Duplicate => "duplicate",
        }
    }
}

/// The two ordered output sequences of a classification run.
///
/// Every input record appears in exactly one sequence, in its original
/// relative order; merging the two by original index reconstructs the
/// input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Partition {
    /// First occurrence of each composite key, in input order.
    pub unique: Vec<Record>,
    /// Later occurrences, in input order.
    pub duplicate: Vec<Record>,
}

impl Partition {
    /// Total number of records across both sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.unique.len() + self.duplicate.len()
    }

    /// True when no records were classified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.unique.is_empty() && self.duplicate.is_empty()
    }

    /// True when at least one duplicate was found.
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        !self.duplicate.is_empty()
    }

    /// Both sequences merged back into original input order.
    #[must_use]
    pub fn merged(&self) -> Vec<&Record> {
        let mut records: Vec<&Record> = self.unique.iter().chain(&self.duplicate).collect();
        records.sort_by_key(|record| record.index);
        records
    }
}

/// Statistics from one classification run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassifyStats {
    /// Total records processed.
    pub total_records: usize,
    /// Records routed to the unique output.
    pub unique_records: usize,
    /// Records routed to the duplicate output.
    pub duplicate_records: usize,
    /// Distinct composite keys seen (equals unique records).
    pub distinct_keys: usize,
    /// Records that could not satisfy every key spec.
    pub short_records: usize,
}

impl ClassifyStats {
    /// Percentage of records classified as duplicates.
    #[must_use]
    pub fn duplicate_rate(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            (self.duplicate_records as f64 / self.total_records as f64) * 100.0
        }
    }
}

/// Single-pass record classifier.
///
/// Owns the key rules plus the splitter and diagnostics collaborators.
/// State for a run (the seen-key set, output sequences) is created fresh
/// per call; a classifier can be reused across runs.
///
/// # Example
///
/// ```
/// use linedupe::classify::Classifier;
/// use linedupe::keys::KeyRules;
///
/// // With no key specs, the whole raw line is the key
/// let classifier = Classifier::new(KeyRules::new());
/// let (partition, stats) = classifier.classify_lines(["a", "b", "a"]);
///
/// assert_eq!(stats.unique_records, 2);
/// assert_eq!(partition.duplicate[0].line_number(), 3);
/// ```
pub struct Classifier {
    rules: KeyRules,
    splitter: Arc<dyn FieldSplitter>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl Classifier {
    /// Create a classifier for the given rules.
    ///
    /// Delimited rules get the quote-aware default splitter for their
    /// configured separator; fixed-width and whole-record rules never
    /// consult a splitter.
    #[must_use]
    pub fn new(rules: KeyRules) -> Self {
        let splitter = QuotedSplitter::new(rules.separator().unwrap_or(b','));
        Self {
            rules,
            splitter: Arc::new(splitter),
            diagnostics: Arc::new(LogSink),
        }
    }

    /// Substitute the field splitter collaborator.
    #[must_use]
    pub fn with_splitter(mut self, splitter: Arc<dyn FieldSplitter>) -> Self {
        self.splitter = splitter;
        self
    }

    /// Subscribe a diagnostics sink.
    #[must_use]
    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    /// The key rules this classifier applies.
    #[must_use]
    pub fn rules(&self) -> &KeyRules {
        &self.rules
    }

    /// Start a fresh pass. Shared by the array and stream entry points.
    pub(crate) fn begin(&self) -> Pass<'_> {
        Pass {
            classifier: self,
            seen: HashSet::new(),
            stats: ClassifyStats::default(),
        }
    }

    /// Classify an in-memory record sequence.
    ///
    /// Records are consumed in iteration order, which must be their
    /// original input order for the first-seen-wins guarantee to mean
    /// anything.
    #[must_use]
    pub fn classify(&self, records: impl IntoIterator<Item = Record>) -> (Partition, ClassifyStats) {
        let mut pass = self.begin();
        let mut partition = Partition::default();

        for record in records {
            match pass.route(&record) {
                Disposition::Unique => partition.unique.push(record),
                Disposition::Duplicate => partition.duplicate.push(record),
            }
        }

        let stats = pass.finish();
        log::info!(
            "Classified {} record(s): {} unique, {} duplicate ({:.1}%)",
            stats.total_records,
            stats.unique_records,
            stats.duplicate_records,
            stats.duplicate_rate()
        );
        (partition, stats)
    }

    /// Classify raw lines, assigning input positions by iteration order.
    #[must_use]
    pub fn classify_lines<I, S>(&self, lines: I) -> (Partition, ClassifyStats)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classify(
            lines
                .into_iter()
                .enumerate()
                .map(|(index, line)| Record::new(index, line)),
        )
    }
}

/// State of one in-flight classification pass.
pub(crate) struct Pass<'a> {
    classifier: &'a Classifier,
    seen: HashSet<String>,
    stats: ClassifyStats,
}

impl Pass<'_> {
    /// Route one record, updating the seen-key set and counters.
    pub(crate) fn route(&mut self, record: &Record) -> Disposition {
        let derived = derive_key(
            record,
            &self.classifier.rules,
            self.classifier.splitter.as_ref(),
            self.classifier.diagnostics.as_ref(),
        );

        self.stats.total_records += 1;
        if derived.short {
            self.stats.short_records += 1;
        }

        let disposition = if self.seen.contains(&derived.key) {
            self.stats.duplicate_records += 1;
            Disposition::Duplicate
        } else {
            self.seen.insert(derived.key);
            self.stats.unique_records += 1;
            self.stats.distinct_keys += 1;
            Disposition::Unique
        };

        self.classifier
            .diagnostics
            .on_record(record.index, disposition == Disposition::Duplicate);
        disposition
    }

    /// Finish the pass, yielding its statistics.
    pub(crate) fn finish(self) -> ClassifyStats {
        self.stats
    }
}
