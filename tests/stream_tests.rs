use std::fs::{self, File};
use std::io::{BufReader, BufWriter};

use linedupe::classify::Classifier;
use linedupe::keys::{KeyOptions, KeyRules};
use linedupe::output::sibling_outputs;
use tempfile::tempdir;

fn scenario_rules() -> KeyRules {
    let mut rules = KeyRules::new();
    rules.set_field_separator("|").unwrap();
    rules
        .add_key(
            KeyOptions::default()
                .with_field_number(2)
                .with_ignore_case(true),
        )
        .unwrap();
    rules
}

#[test]
fn test_split_file_into_sibling_outputs() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("people.txt");
    fs::write(&input_path, "1|Ann|x\n2|ann|y\n3|Ben|z\n").unwrap();

    let (unique_path, duplicate_path) = sibling_outputs(&input_path);
    assert_eq!(unique_path, dir.path().join("people_uniqs.txt"));
    assert_eq!(duplicate_path, dir.path().join("people_dupes.txt"));

    let classifier = Classifier::new(scenario_rules());
    let stats = classifier
        .classify_stream(
            BufReader::new(File::open(&input_path).unwrap()),
            BufWriter::new(File::create(&unique_path).unwrap()),
            BufWriter::new(File::create(&duplicate_path).unwrap()),
        )
        .unwrap();

    assert_eq!(stats.total_records, 3);
    assert_eq!(
        fs::read_to_string(&unique_path).unwrap(),
        "1|Ann|x\n3|Ben|z\n"
    );
    assert_eq!(fs::read_to_string(&duplicate_path).unwrap(), "2|ann|y\n");
}

#[test]
fn test_existing_outputs_are_overwritten() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("in.txt");
    fs::write(&input_path, "only\n").unwrap();

    let (unique_path, duplicate_path) = sibling_outputs(&input_path);
    fs::write(&unique_path, "stale unique contents\n").unwrap();
    fs::write(&duplicate_path, "stale duplicate contents\n").unwrap();

    let classifier = Classifier::new(KeyRules::new());
    classifier
        .classify_stream(
            BufReader::new(File::open(&input_path).unwrap()),
            BufWriter::new(File::create(&unique_path).unwrap()),
            BufWriter::new(File::create(&duplicate_path).unwrap()),
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&unique_path).unwrap(), "only\n");
    assert_eq!(fs::read_to_string(&duplicate_path).unwrap(), "");
}

#[test]
fn test_stream_normalizes_missing_final_newline() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("in.txt");
    fs::write(&input_path, "a\na").unwrap();

    let unique_path = dir.path().join("u.txt");
    let duplicate_path = dir.path().join("d.txt");

    let classifier = Classifier::new(KeyRules::new());
    classifier
        .classify_stream(
            BufReader::new(File::open(&input_path).unwrap()),
            BufWriter::new(File::create(&unique_path).unwrap()),
            BufWriter::new(File::create(&duplicate_path).unwrap()),
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&unique_path).unwrap(), "a\n");
    assert_eq!(fs::read_to_string(&duplicate_path).unwrap(), "a\n");
}

#[test]
fn test_large_stream_preserves_order() {
    let dir = tempdir().unwrap();
    let input_path = dir.path().join("big.txt");

    let mut content = String::new();
    for i in 0..5_000 {
        content.push_str(&format!("{}|key{}\n", i, i % 100));
    }
    fs::write(&input_path, &content).unwrap();

    let mut rules = KeyRules::new();
    rules.set_field_separator("|").unwrap();
    rules
        .add_key(KeyOptions::default().with_field_number(2))
        .unwrap();

    let unique_path = dir.path().join("u.txt");
    let duplicate_path = dir.path().join("d.txt");
    let classifier = Classifier::new(rules);
    let stats = classifier
        .classify_stream(
            BufReader::new(File::open(&input_path).unwrap()),
            BufWriter::new(File::create(&unique_path).unwrap()),
            BufWriter::new(File::create(&duplicate_path).unwrap()),
        )
        .unwrap();

    assert_eq!(stats.unique_records, 100);
    assert_eq!(stats.duplicate_records, 4_900);

    // The first 100 lines are exactly the unique output, in input order
    let unique = fs::read_to_string(&unique_path).unwrap();
    let expected: String = (0..100).map(|i| format!("{}|key{}\n", i, i)).collect();
    assert_eq!(unique, expected);

    // Duplicates preserve input order as well
    let duplicate = fs::read_to_string(&duplicate_path).unwrap();
    assert_eq!(duplicate.lines().next().unwrap(), "100|key0");
}
