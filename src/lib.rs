//! LineDupe - Configurable Duplicate-Record Finder
//!
//! A Rust library and CLI for partitioning an ordered sequence of text
//! records into "unique" and "duplicate" outputs, comparing records on
//! configurable key fields (delimited or fixed-width) with optional case
//! folding, whitespace trimming, and alias substitution. A single
//! streaming pass preserves input order; the first record seen for any
//! key is unique, every later one is a duplicate.

pub mod app;
pub mod classify;
pub mod cli;
pub mod diagnostics;
pub mod error;
pub mod keys;
pub mod logging;
pub mod output;
pub mod record;
pub mod split;

pub use app::run_app;
pub use classify::{Classifier, ClassifyError, ClassifyStats, Partition};
pub use keys::{ConfigError, KeyOptions, KeyRules};
pub use record::Record;
