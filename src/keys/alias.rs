//! Alias substitution maps.
//!
//! An [`AliasMap`] rewrites an extracted field value to a canonical form
//! before any other normalization, so near-duplicates like "Bob" and "Rob"
//! can key as "Robert". Lookup is exact-match and case-sensitive, and it
//! happens before case folding; that ordering is a fixed contract of the
//! key transformer, not caller-discoverable behavior.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when loading an alias map from disk.
#[derive(Debug, Error)]
pub enum AliasError {
    /// The file could not be read.
    #[error("failed to read alias file {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The file is not a JSON object of string-to-string entries.
    #[error("invalid alias file {path}: {source}")]
    Parse {
        /// Path that failed to parse.
        path: PathBuf,
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
    },
}

/// Exact-match raw-to-canonical substitution map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasMap {
    entries: HashMap<String, String>,
}

impl AliasMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a map from raw/canonical pairs.
    ///
    /// # Example
    ///
    /// ```
    /// use linedupe::keys::AliasMap;
    ///
    /// let aliases = AliasMap::from_pairs([("Bob", "Robert"), ("Rob", "Robert")]);
    /// assert_eq!(aliases.resolve("Bob"), "Robert");
    /// assert_eq!(aliases.resolve("bob"), "bob"); // case-sensitive
    /// ```
    #[must_use]
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: pairs
                .into_iter()
                .map(|(raw, canonical)| (raw.into(), canonical.into()))
                .collect(),
        }
    }

    /// Add one raw-to-canonical entry.
    pub fn insert(&mut self, raw: impl Into<String>, canonical: impl Into<String>) {
        self.entries.insert(raw.into(), canonical.into());
    }

    /// Resolve a value: the canonical form if mapped, the value unchanged
    /// otherwise. Exact-match, case-sensitive.
    #[must_use]
    pub fn resolve<'a>(&'a self, value: &'a str) -> &'a str {
        self.entries.get(value).map_or(value, String::as_str)
    }

    /// Load a map from a JSON object file (`{"raw": "canonical", ...}`).
    ///
    /// # Errors
    ///
    /// Returns [`AliasError`] when the file cannot be read or is not a
    /// string-to-string JSON object.
    pub fn load(path: &Path) -> Result<Self, AliasError> {
        let content = std::fs::read_to_string(path).map_err(|source| AliasError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = serde_json::from_str(&content).map_err(|source| AliasError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded alias map from {}", path.display());
        Ok(map)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when the map has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
