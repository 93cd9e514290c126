use std::sync::Arc;

use linedupe::classify::Classifier;
use linedupe::diagnostics::CollectingSink;
use linedupe::keys::{AliasMap, ConfigError, KeyOptions, KeyRules};
use linedupe::Record;

/// Fixed-width rules: 6 characters from column 3
/// (case/whitespace-insensitive with name aliases) plus 8 characters from
/// column 10 (case-insensitive).
fn scenario_rules() -> KeyRules {
    let mut rules = KeyRules::new();
    rules
        .add_key(
            KeyOptions::default()
                .with_start_pos(3)
                .with_key_length(6)
                .with_ignore_case(true)
                .with_ignore_whitespace(true)
                .with_alias(AliasMap::from_pairs([
                    ("Bob", "Robert"),
                    ("Rob", "Robert"),
                ])),
        )
        .unwrap();
    rules
        .add_key(
            KeyOptions::default()
                .with_start_pos(10)
                .with_key_length(8)
                .with_ignore_case(true),
        )
        .unwrap();
    rules
}

/// Render one record with the name in columns 3-8 and the surname in
/// columns 10-17.
fn row(id: &str, name: &str, surname: &str, suburb: &str) -> String {
    format!("{id:<2}{name:<6} {surname:<8}{suburb}")
}

fn line_numbers(records: &[Record]) -> Vec<usize> {
    records.iter().map(Record::line_number).collect()
}

#[test]
fn test_fixed_width_scenario_matches_delimited_partition() {
    let input = vec![
        row("1", "Robert", "Smith", "Waverley"),
        row("2", "robert", "Smith", "Waverley"),
        row("3", "bob", "Smith", "Waverley"),
        row("4", "Rob", "Smith", "Waverley"),
        row("5", "Bob", "O'Brien", "Bronte"),
        row("6", "Bob", "O'Brien", "Bronte"),
    ];

    let classifier = Classifier::new(scenario_rules());
    let (partition, stats) = classifier.classify_lines(input);

    assert_eq!(line_numbers(&partition.unique), vec![1, 3, 4, 5]);
    assert_eq!(line_numbers(&partition.duplicate), vec![2, 6]);
    assert_eq!(stats.short_records, 0);
}

#[test]
fn test_padded_value_misses_exact_alias_lookup() {
    // Column padding reaches the alias lookup untrimmed, so "Rob   " does
    // not match the "Rob" entry; trimming happens after substitution
    let classifier = Classifier::new(scenario_rules());
    let (partition, _) = classifier.classify_lines([
        row("1", "Robert", "Smith", "Waverley"),
        row("4", "Rob", "Smith", "Waverley"),
    ]);

    assert_eq!(partition.unique.len(), 2);
    assert!(partition.duplicate.is_empty());
}

#[test]
fn test_short_line_gets_partial_key_and_diagnostic() {
    let sink = Arc::new(CollectingSink::new());
    let classifier = Classifier::new(scenario_rules()).with_diagnostics(sink.clone());

    let input = vec![
        row("1", "Robert", "Smith", "Waverley"),
        // Long enough for the name span, too short for the surname span
        "2 Robert".to_string(),
        "3 Robert".to_string(),
    ];
    let (partition, stats) = classifier.classify_lines(input);

    assert_eq!(stats.short_records, 2);
    // The short records share their partial key: first unique, second duplicate
    assert_eq!(line_numbers(&partition.unique), vec![1, 2]);
    assert_eq!(line_numbers(&partition.duplicate), vec![3]);

    let events = sink.short_records();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].record_index, 1);
    assert_eq!(events[0].ordinal, 2);
}

#[test]
fn test_line_too_short_for_every_spec() {
    let sink = Arc::new(CollectingSink::new());
    let classifier = Classifier::new(scenario_rules()).with_diagnostics(sink.clone());

    let (partition, stats) = classifier.classify_lines(["ab", "cd"]);

    // Both records fail at the first spec, share the empty partial key,
    // and still classify normally
    assert_eq!(stats.short_records, 2);
    assert_eq!(partition.unique.len(), 1);
    assert_eq!(partition.duplicate.len(), 1);
    assert_eq!(sink.short_records()[0].ordinal, 1);
}

#[test]
fn test_fixed_width_requires_length_up_front() {
    let mut rules = KeyRules::new();
    assert_eq!(
        rules.add_key(KeyOptions::default().with_start_pos(3)),
        Err(ConfigError::MissingLength)
    );
}

#[test]
fn test_separator_rejected_after_fixed_width_keys() {
    let mut rules = scenario_rules();
    assert_eq!(
        rules.set_field_separator("|"),
        Err(ConfigError::ModeConflict { existing: 2 })
    );
}
