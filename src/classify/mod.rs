//! Record classification.
//!
//! # Overview
//!
//! The classifier drives a single streaming pass over an ordered record
//! sequence, derives a composite key per record from the configured
//! [`crate::keys::KeyRules`], and routes each record to "unique" or
//! "duplicate" with a first-seen-wins policy:
//!
//! ```text
//! seen := empty set of composite keys
//! for each record, in original order:
//!     key := derive_key(record)
//!     if key in seen:  -> duplicate output
//!     else:            -> seen += key; unique output
//! ```
//!
//! The pass is strictly sequential (no lookahead, no rewind) and holds
//! one set of seen keys, so memory is bounded by the number of distinct
//! keys rather than the number of records.
//!
//! [`engine`] carries the array-oriented entry point and the shared pass
//! state; [`stream`] carries the file-oriented entry point over generic
//! line sources and sinks.

pub mod engine;
pub mod stream;

pub use engine::{Classifier, ClassifyStats, Disposition, Partition};
pub use stream::ClassifyError;
