//! Key specifications and the rules registry.
//!
//! # Overview
//!
//! A [`KeySpec`] is one configured rule contributing to a record's dedup
//! key: which substring to extract (a delimited field or a fixed-width
//! span) and how to normalize it (alias substitution, case folding,
//! whitespace trimming). [`KeyRules`] is the append-only registry of those
//! specs plus the field-separator setting that decides which extraction
//! mode is legal.
//!
//! Specs are immutable once accepted. Their `ordinal` (1-based, assignment
//! order), not the field number, fixes the order in which extracted
//! values are concatenated into the composite key.
//!
//! # Example
//!
//! ```
//! use linedupe::keys::{KeyOptions, KeyRules};
//!
//! let mut rules = KeyRules::new();
//! rules.set_field_separator("|").unwrap();
//! rules
//!     .add_key(KeyOptions::default().with_field_number(2).with_ignore_case(true))
//!     .unwrap();
//!
//! assert_eq!(rules.specs().len(), 1);
//! assert_eq!(rules.specs()[0].ordinal, 1);
//! ```

use thiserror::Error;

use super::alias::AliasMap;

/// Errors raised when key configuration is rejected.
///
/// A rejected call has no effect: the registry keeps the specs accepted so
/// far and the run can proceed with them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The separator token is not a single ASCII character.
    #[error("field separator must be a single ASCII character, got {0:?}")]
    InvalidSeparator(String),

    /// `set_field_separator` was called after fixed-width keys were accepted.
    #[error("cannot switch to delimited mode: {existing} fixed-width key spec(s) already configured")]
    ModeConflict {
        /// Number of fixed-width specs already in the registry.
        existing: usize,
    },

    /// A delimited key was supplied but no field separator is configured.
    #[error("field_number requires delimited mode; call set_field_separator first")]
    FieldNumberWithoutSeparator,

    /// A fixed-width key was supplied while the registry is in delimited mode.
    #[error("start_pos is not valid in delimited mode")]
    StartPosInDelimited,

    /// Exactly one of `field_number` / `start_pos` must be supplied.
    #[error("exactly one of field_number or start_pos must be supplied")]
    SelectorRequired,

    /// A fixed-width key was supplied without a length.
    #[error("fixed-width key specs require key_length")]
    MissingLength,

    /// `field_number` and `start_pos` are 1-based.
    #[error("field_number and start_pos are 1-based and must be nonzero")]
    ZeroPosition,

    /// A zero length can never extract anything.
    #[error("key_length must be nonzero")]
    ZeroLength,
}

/// Which kind of extraction a registry performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Records are split into fields on a separator character.
    Delimited,
    /// Substrings are taken at fixed character positions.
    FixedWidth,
}

/// How one key spec selects its substring from a record.
///
/// `field_number` and `start_pos` are 1-based, matching how users count
/// fields and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionMode {
    /// Select the Nth separator-delimited field.
    Delimited {
        /// 1-based field position.
        field_number: usize,
    },
    /// Select `length` characters starting at a fixed column.
    FixedWidth {
        /// 1-based starting character position.
        start_pos: usize,
        /// Number of characters to take.
        length: usize,
    },
}

impl ExtractionMode {
    /// The registry mode this extraction belongs to.
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Delimited { .. } => Mode::Delimited,
            Self::FixedWidth { .. } => Mode::FixedWidth,
        }
    }
}

/// Enumerated options for one `add_key` call.
///
/// Exactly one of `field_number` / `start_pos` must be set, consistent
/// with the registry's current mode. Everything else defaults off.
#[derive(Debug, Clone, Default)]
pub struct KeyOptions {
    /// 1-based delimited field position (delimited mode only).
    pub field_number: Option<usize>,
    /// 1-based starting character position (fixed-width mode only).
    pub start_pos: Option<usize>,
    /// Span length for fixed-width keys (required there); optional
    /// leading-characters truncation for delimited keys.
    pub key_length: Option<usize>,
    /// Lowercase the extracted value before comparison.
    pub ignore_case: bool,
    /// Trim leading/trailing whitespace (internal whitespace is kept).
    pub ignore_whitespace: bool,
    /// Alias substitution map, applied before case folding.
    pub alias: Option<AliasMap>,
}

impl KeyOptions {
    /// Select a delimited field (1-based).
    #[must_use]
    pub fn with_field_number(mut self, field_number: usize) -> Self {
        self.field_number = Some(field_number);
        self
    }

    /// Select a fixed-width span start (1-based).
    #[must_use]
    pub fn with_start_pos(mut self, start_pos: usize) -> Self {
        self.start_pos = Some(start_pos);
        self
    }

    /// Set the span length (fixed-width) or truncation length (delimited).
    #[must_use]
    pub fn with_key_length(mut self, key_length: usize) -> Self {
        self.key_length = Some(key_length);
        self
    }

    /// Fold the extracted value to lowercase.
    #[must_use]
    pub fn with_ignore_case(mut self, ignore_case: bool) -> Self {
        self.ignore_case = ignore_case;
        self
    }

    /// Trim surrounding whitespace from the extracted value.
    #[must_use]
    pub fn with_ignore_whitespace(mut self, ignore_whitespace: bool) -> Self {
        self.ignore_whitespace = ignore_whitespace;
        self
    }

    /// Attach an alias substitution map.
    #[must_use]
    pub fn with_alias(mut self, alias: AliasMap) -> Self {
        self.alias = Some(alias);
        self
    }
}

/// One accepted key specification.
#[derive(Debug, Clone)]
pub struct KeySpec {
    /// 1-based position in assignment order; fixes concatenation order.
    pub ordinal: usize,
    /// How the substring is selected from the record.
    pub extraction: ExtractionMode,
    /// Leading-characters truncation (delimited mode only).
    pub key_length: Option<usize>,
    /// Lowercase before comparison.
    pub ignore_case: bool,
    /// Trim surrounding whitespace before comparison.
    pub ignore_whitespace: bool,
    /// Alias substitution map, consulted before case folding.
    pub alias: Option<AliasMap>,
}

/// Append-only registry of key specifications.
///
/// All specs in one registry share one extraction mode: configuring a
/// field separator commits the registry to delimited keys, and accepting a
/// fixed-width key forecloses a separator. With no specs at all, the dedup
/// key is the entire raw record.
#[derive(Debug, Clone, Default)]
pub struct KeyRules {
    separator: Option<u8>,
    specs: Vec<KeySpec>,
}

impl KeyRules {
    /// Separator character joining transformed values in the composite key.
    ///
    /// ASCII unit separator, chosen as unlikely to appear in line-oriented
    /// data. Field values are not escaped, so values that themselves
    /// contain this character can make two different field splits join to
    /// the same key string. Known limitation, kept for debuggability.
    pub const JOIN: char = '\u{1F}';

    /// Create an empty registry (whole-record keying until keys are added).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare delimited mode and set the separator used by the extractor.
    ///
    /// Calling this again while already delimited replaces the separator
    /// token. The token must be a single ASCII character because the
    /// quote-aware splitter takes a byte delimiter.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidSeparator`] if the token is not one ASCII
    ///   character.
    /// - [`ConfigError::ModeConflict`] if fixed-width specs were already
    ///   accepted.
    pub fn set_field_separator(&mut self, token: &str) -> Result<(), ConfigError> {
        let mut chars = token.chars();
        let separator = match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii() => c as u8,
            _ => return Err(ConfigError::InvalidSeparator(token.to_string())),
        };

        let fixed_width = self
            .specs
            .iter()
            .filter(|spec| spec.extraction.mode() == Mode::FixedWidth)
            .count();
        if fixed_width > 0 {
            return Err(ConfigError::ModeConflict {
                existing: fixed_width,
            });
        }

        log::debug!("Field separator set to {:?}", separator as char);
        self.separator = Some(separator);
        Ok(())
    }

    /// Append a key specification with the next ordinal.
    ///
    /// On failure the call has no effect; previously accepted specs stay
    /// in place and the run can proceed with them.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the options are inconsistent with
    /// the registry's mode: the wrong selector for the current mode, both
    /// or neither selector supplied, a missing fixed-width length, or a
    /// zero position/length.
    pub fn add_key(&mut self, options: KeyOptions) -> Result<(), ConfigError> {
        let extraction = match (options.field_number, options.start_pos) {
            (Some(field_number), None) => {
                if self.separator.is_none() {
                    return Err(ConfigError::FieldNumberWithoutSeparator);
                }
                if field_number == 0 {
                    return Err(ConfigError::ZeroPosition);
                }
                if options.key_length == Some(0) {
                    return Err(ConfigError::ZeroLength);
                }
                ExtractionMode::Delimited { field_number }
            }
            (None, Some(start_pos)) => {
                if self.separator.is_some() {
                    return Err(ConfigError::StartPosInDelimited);
                }
                if start_pos == 0 {
                    return Err(ConfigError::ZeroPosition);
                }
                match options.key_length {
                    None => return Err(ConfigError::MissingLength),
                    Some(0) => return Err(ConfigError::ZeroLength),
                    Some(length) => ExtractionMode::FixedWidth { start_pos, length },
                }
            }
            _ => return Err(ConfigError::SelectorRequired),
        };

        let ordinal = self.specs.len() + 1;
        log::debug!("Accepted key spec #{}: {:?}", ordinal, extraction);

        self.specs.push(KeySpec {
            ordinal,
            extraction,
            key_length: match extraction {
                ExtractionMode::Delimited { .. } => options.key_length,
                ExtractionMode::FixedWidth { .. } => None,
            },
            ignore_case: options.ignore_case,
            ignore_whitespace: options.ignore_whitespace,
            alias: options.alias,
        });
        Ok(())
    }

    /// The configured separator byte, if delimited mode is active.
    #[must_use]
    pub fn separator(&self) -> Option<u8> {
        self.separator
    }

    /// Accepted key specifications in ordinal order.
    #[must_use]
    pub fn specs(&self) -> &[KeySpec] {
        &self.specs
    }

    /// True when no key specs exist and the whole record is the key.
    #[must_use]
    pub fn is_whole_record(&self) -> bool {
        self.specs.is_empty()
    }

    /// The registry's committed mode, if any.
    ///
    /// A separator commits delimited mode even before the first key is
    /// added; otherwise the first accepted fixed-width spec commits.
    #[must_use]
    pub fn mode(&self) -> Option<Mode> {
        if self.separator.is_some() {
            Some(Mode::Delimited)
        } else {
            self.specs.first().map(|spec| spec.extraction.mode())
        }
    }
}
