//! Tests for the record loader.

use std::io::Write;

use super::error::Error;
use super::graph::EdgeRecord;
use super::loader::{load_records, parse_records, LoadPolicy};

#[test]
fn test_parse_well_formed_rows() {
    let input = "A,B,4,2,false\nB, C , 7, 1, TRUE\n";
    let report = parse_records(input.as_bytes(), LoadPolicy::Abort).unwrap();
    assert!(report.is_clean());
    assert_eq!(
        report.records,
        vec![
            EdgeRecord::new("A", "B", 4, 2, false),
            EdgeRecord::new("B", "C", 7, 1, true),
        ]
    );
}

#[test]
fn test_blank_lines_are_ignored() {
    let input = "\nA,B,1,1,false\n\n   \nC,D,2,2,false\n";
    let report = parse_records(input.as_bytes(), LoadPolicy::Abort).unwrap();
    assert_eq!(report.records.len(), 2);
    assert!(report.is_clean());
}

#[test]
fn test_skip_policy_reports_bad_rows() {
    let input = "A,B,1,1,false\nA,B,1\nA,B,x,1,false\nA,B,1,1,maybe\n,B,1,1,false\nC,D,2,2,false\n";
    let report = parse_records(input.as_bytes(), LoadPolicy::Skip).unwrap();

    assert_eq!(report.records.len(), 2);
    let lines: Vec<u64> = report.skipped.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5]);
    assert!(report.skipped[0].reason.contains("expected 5 fields, found 3"));
    assert!(report.skipped[1].reason.contains("cost"));
    assert!(report.skipped[2].reason.contains("isDecoy"));
    assert!(report.skipped[3].reason.contains("nodeA"));
}

#[test]
fn test_extra_fields_are_malformed() {
    let report = parse_records("A,B,1,1,false,extra\n".as_bytes(), LoadPolicy::Skip).unwrap();
    assert!(report.records.is_empty());
    assert_eq!(report.skipped.len(), 1);
}

#[test]
fn test_abort_policy_names_line() {
    let input = "A,B,1,1,false\nA,B,1,seven,false\n";
    let err = parse_records(input.as_bytes(), LoadPolicy::Abort).unwrap_err();
    match err {
        Error::MalformedRecord { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("visibility"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_invalid_utf8_row_is_skipped() {
    let input: &[u8] = b"A,B,1,1,false\n\xff\xfe,B,1,1,false\nC,D,2,2,false\n";
    let report = parse_records(input, LoadPolicy::Skip).unwrap();

    assert_eq!(
        report.records,
        vec![
            EdgeRecord::new("A", "B", 1, 1, false),
            EdgeRecord::new("C", "D", 2, 2, false),
        ]
    );
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].line, 2);
    assert!(report.skipped[0].reason.contains("field 1 is not valid UTF-8"));
}

#[test]
fn test_invalid_utf8_row_aborts_as_malformed() {
    let input: &[u8] = b"A,B,1,1,false\nA,\xff,1,1,false\n";
    let err = parse_records(input, LoadPolicy::Abort).unwrap_err();
    match err {
        Error::MalformedRecord { line, reason } => {
            assert_eq!(line, 2);
            assert!(reason.contains("field 2"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn test_negative_values_accepted() {
    let report = parse_records("A,B,-2,-1,false\n".as_bytes(), LoadPolicy::Abort).unwrap();
    assert_eq!(report.records[0].cost, -2);
    assert_eq!(report.records[0].visibility, -1);
}

#[test]
fn test_load_records_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "Gate,Keep,3,4,false").unwrap();
    writeln!(file, "Keep,Tower,1,9,true").unwrap();
    file.flush().unwrap();

    let report = load_records(file.path(), LoadPolicy::Skip).unwrap();
    assert_eq!(report.records.len(), 2);
    assert!(report.records[1].is_decoy);
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_records(dir.path().join("absent.txt"), LoadPolicy::Skip).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn test_policy_deserializes_lowercase() {
    use figment::providers::{Format, Toml};

    #[derive(serde::Deserialize)]
    struct Wrapper {
        policy: LoadPolicy,
    }
    let w: Wrapper = figment::Figment::from(Toml::string("policy = \"abort\""))
        .extract()
        .unwrap();
    assert_eq!(w.policy, LoadPolicy::Abort);
}
