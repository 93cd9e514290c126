//! Key configuration and derivation.
//!
//! This module owns the notion of record identity: which parts of a record
//! participate in its dedup key and how they are normalized before
//! comparison.
//!
//! - [`spec`] holds the key rules registry ([`KeyRules`]) and the
//!   strongly-typed key specifications it accepts.
//! - [`alias`] provides exact-match alias substitution maps.
//! - [`derive`] turns one record plus the configured rules into its
//!   composite key string.

pub mod alias;
pub mod derive;
pub mod spec;

pub use alias::{AliasError, AliasMap};
pub use derive::{derive_key, DerivedKey};
pub use spec::{ConfigError, ExtractionMode, KeyOptions, KeyRules, KeySpec, Mode};
