//! Composite key derivation.
//!
//! # Overview
//!
//! For one record, each accepted [`KeySpec`] contributes one transformed
//! value, in ordinal order:
//!
//! 1. **Extract**: the Nth delimited field (via the splitter
//!    collaborator) or a fixed-width character span, truncated to
//!    `key_length` leading characters when configured.
//! 2. **Transform**: alias substitution (exact-match, case-sensitive),
//!    then case folding, then surrounding-whitespace trimming, in that
//!    fixed order.
//!
//! The values are concatenated, each followed by [`KeyRules::JOIN`], into
//! the composite key string. With no specs configured the key is the raw
//! record unmodified.
//!
//! # Short records
//!
//! When a record cannot satisfy a spec (fewer fields than requested, an
//! empty field, or a line shorter than a fixed-width span), derivation
//! stops at that spec: later ordinals are skipped and the key is whatever
//! was built so far. The condition is reported through the diagnostics
//! sink and never aborts the pass; the record still classifies normally
//! under its partial key.
//!
//! Positions and lengths count Unicode scalar values, not bytes, so
//! multi-byte text cannot split a code point.

use crate::diagnostics::DiagnosticSink;
use crate::record::Record;
use crate::split::FieldSplitter;

use super::spec::{ExtractionMode, KeyRules, KeySpec, Mode};

/// The derived key for one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedKey {
    /// The composite key string used for exact-match comparison.
    pub key: String,
    /// Whether derivation stopped early on a shortage.
    pub short: bool,
}

/// Derive the composite key for one record.
///
/// The splitter is only consulted in delimited mode; each record is split
/// once and all specs select from the same field list.
#[must_use]
pub fn derive_key(
    record: &Record,
    rules: &KeyRules,
    splitter: &dyn FieldSplitter,
    diagnostics: &dyn DiagnosticSink,
) -> DerivedKey {
    if rules.is_whole_record() {
        return DerivedKey {
            key: record.text.clone(),
            short: false,
        };
    }

    let fields = if rules.mode() == Some(Mode::Delimited) {
        Some(splitter.split_record(&record.text))
    } else {
        None
    };

    let mut key = String::new();
    let mut short = false;
    for spec in rules.specs() {
        match extract(spec, &record.text, fields.as_deref()) {
            Ok(value) => {
                key.push_str(&transform(spec, value));
                key.push(KeyRules::JOIN);
            }
            Err(detail) => {
                diagnostics.on_short_record(record.index, spec.ordinal, &detail);
                short = true;
                break;
            }
        }
    }

    DerivedKey { key, short }
}

/// Extract the raw substring one spec selects from the record.
fn extract(spec: &KeySpec, text: &str, fields: Option<&[String]>) -> Result<String, String> {
    match spec.extraction {
        ExtractionMode::Delimited { field_number } => {
            let fields = fields.unwrap_or_default();
            match fields.get(field_number - 1) {
                None => Err(format!(
                    "field {} requested but record has {} field(s)",
                    field_number,
                    fields.len()
                )),
                Some(value) if value.is_empty() => Err(format!("field {field_number} is empty")),
                Some(value) => Ok(match spec.key_length {
                    Some(length) if value.chars().count() > length => {
                        value.chars().take(length).collect()
                    }
                    _ => value.clone(),
                }),
            }
        }
        ExtractionMode::FixedWidth { start_pos, length } => {
            let start = start_pos - 1;
            let available = text.chars().count();
            if available < start + length {
                return Err(format!(
                    "span needs {} character(s) but record has {}",
                    start + length,
                    available
                ));
            }
            Ok(text.chars().skip(start).take(length).collect())
        }
    }
}

/// Normalize an extracted value: alias, then case fold, then trim.
fn transform(spec: &KeySpec, value: String) -> String {
    let value = match &spec.alias {
        Some(alias) => alias.resolve(&value).to_string(),
        None => value,
    };
    let value = if spec.ignore_case {
        value.to_lowercase()
    } else {
        value
    };
    if spec.ignore_whitespace {
        value.trim().to_string()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;
    use crate::keys::{AliasMap, KeyOptions};
    use crate::split::QuotedSplitter;

    const J: char = KeyRules::JOIN;

    fn delimited_rules(keys: &[KeyOptions]) -> KeyRules {
        let mut rules = KeyRules::new();
        rules.set_field_separator("|").unwrap();
        for key in keys {
            rules.add_key(key.clone()).unwrap();
        }
        rules
    }

    fn derive(rules: &KeyRules, text: &str) -> DerivedKey {
        derive_key(
            &Record::new(0, text),
            rules,
            &QuotedSplitter::new(rules.separator().unwrap_or(b'|')),
            &CollectingSink::new(),
        )
    }

    #[test]
    fn test_whole_record_key_is_raw_text() {
        let rules = KeyRules::new();
        let derived = derive(&rules, "anything  goes | here");
        assert_eq!(derived.key, "anything  goes | here");
        assert!(!derived.short);
    }

    #[test]
    fn test_single_field_key() {
        let rules = delimited_rules(&[KeyOptions::default().with_field_number(2)]);
        assert_eq!(derive(&rules, "1|Robert|Smith").key, format!("Robert{J}"));
    }

    #[test]
    fn test_ordinal_order_not_field_order() {
        let rules = delimited_rules(&[
            KeyOptions::default().with_field_number(3),
            KeyOptions::default().with_field_number(1),
        ]);
        assert_eq!(derive(&rules, "a|b|c").key, format!("c{J}a{J}"));
    }

    #[test]
    fn test_key_length_truncates_leading_characters() {
        let rules =
            delimited_rules(&[KeyOptions::default().with_field_number(1).with_key_length(3)]);
        assert_eq!(derive(&rules, "Robertson|x").key, format!("Rob{J}"));
        // Shorter values pass through untruncated
        assert_eq!(derive(&rules, "Bo|x").key, format!("Bo{J}"));
    }

    #[test]
    fn test_truncation_counts_characters_not_bytes() {
        let rules =
            delimited_rules(&[KeyOptions::default().with_field_number(1).with_key_length(2)]);
        assert_eq!(derive(&rules, "żółw|x").key, format!("żó{J}"));
    }

    #[test]
    fn test_alias_applies_before_case_folding() {
        let aliases = AliasMap::from_pairs([("Bob", "Robert")]);
        let rules = delimited_rules(&[KeyOptions::default()
            .with_field_number(1)
            .with_ignore_case(true)
            .with_alias(aliases)]);

        // Alias hit, then folded
        assert_eq!(derive(&rules, "Bob|x").key, format!("robert{J}"));
        // Folding never exposes new alias matches: "BOB" misses case-sensitively
        assert_eq!(derive(&rules, "BOB|x").key, format!("bob{J}"));
    }

    #[test]
    fn test_ignore_whitespace_trims_surrounding_only() {
        let rules = delimited_rules(&[KeyOptions::default()
            .with_field_number(1)
            .with_ignore_whitespace(true)]);
        assert_eq!(derive(&rules, "  New  York  |x").key, format!("New  York{J}"));
    }

    #[test]
    fn test_fixed_width_span() {
        let mut rules = KeyRules::new();
        rules
            .add_key(KeyOptions::default().with_start_pos(3).with_key_length(6))
            .unwrap();
        assert_eq!(derive(&rules, "1 Robert Smith").key, format!("Robert{J}"));
    }

    #[test]
    fn test_fixed_width_counts_characters_not_bytes() {
        let mut rules = KeyRules::new();
        rules
            .add_key(KeyOptions::default().with_start_pos(2).with_key_length(3))
            .unwrap();
        assert_eq!(derive(&rules, "żółwik").key, format!("ółw{J}"));
    }

    #[test]
    fn test_missing_field_stops_derivation() {
        let rules = delimited_rules(&[
            KeyOptions::default().with_field_number(1),
            KeyOptions::default().with_field_number(5),
            KeyOptions::default().with_field_number(2),
        ]);
        let sink = CollectingSink::new();
        let derived = derive_key(
            &Record::new(7, "a|b|c"),
            &rules,
            &QuotedSplitter::new(b'|'),
            &sink,
        );

        // Spec #2 fails; spec #3 is skipped even though field 2 exists
        assert!(derived.short);
        assert_eq!(derived.key, format!("a{J}"));

        let events = sink.short_records();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].record_index, 7);
        assert_eq!(events[0].ordinal, 2);
    }

    #[test]
    fn test_empty_field_counts_as_shortage() {
        let rules = delimited_rules(&[KeyOptions::default().with_field_number(2)]);
        let derived = derive(&rules, "a||c");
        assert!(derived.short);
        assert_eq!(derived.key, "");
    }

    #[test]
    fn test_short_line_for_fixed_width_span() {
        let mut rules = KeyRules::new();
        rules
            .add_key(KeyOptions::default().with_start_pos(1).with_key_length(4))
            .unwrap();
        rules
            .add_key(KeyOptions::default().with_start_pos(10).with_key_length(8))
            .unwrap();

        let sink = CollectingSink::new();
        let derived = derive_key(
            &Record::new(0, "abcdef"),
            &rules,
            &QuotedSplitter::new(b'|'),
            &sink,
        );

        assert!(derived.short);
        assert_eq!(derived.key, format!("abcd{J}"));
        assert_eq!(sink.short_records()[0].ordinal, 2);
    }

    #[test]
    fn test_empty_record_in_delimited_mode() {
        let rules = delimited_rules(&[KeyOptions::default().with_field_number(1)]);
        let derived = derive(&rules, "");
        assert!(derived.short);
        assert_eq!(derived.key, "");
    }
}
