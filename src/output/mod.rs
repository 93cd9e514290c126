//! Output naming and report formatters.
//!
//! This module owns the caller-side output conventions around a finished
//! classification run:
//! - [`paths`] derives the `_uniqs` / `_dupes` sibling file names from an
//!   input path (the `split` command's default routing).
//! - [`json`] and [`csv`] render a partition plus its statistics for
//!   scripting and spreadsheet import.

pub mod csv;
pub mod json;
pub mod paths;

pub use csv::CsvOutput;
pub use json::JsonOutput;
pub use paths::sibling_outputs;
