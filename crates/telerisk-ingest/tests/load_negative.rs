// SPDX-License-Identifier: Apache-2.0

use std::fs;
use std::path::PathBuf;

use proptest::prelude::*;
use telerisk_ingest::{load_risk_register, load_risk_register_from_reader, LoadError, LoadOptions};
use telerisk_model::REGISTER_COLUMNS;
use tempfile::tempdir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn malformed_rows_are_reported_without_aborting_the_load() {
    let loaded = load_risk_register(&fixture("malformed_rows.csv")).expect("load");
    assert_eq!(loaded.total_rows, 7);
    let ids: Vec<&str> = loaded.records.iter().map(|r| r.risk_id.as_str()).collect();
    assert_eq!(ids, vec!["R001", "R003", "R007"]);

    let rows: Vec<usize> = loaded.errors.iter().map(|e| e.row).collect();
    assert_eq!(rows, vec![2, 4, 5, 6]);
    let lines: Vec<u64> = loaded.errors.iter().map(|e| e.line).collect();
    assert_eq!(lines, vec![3, 5, 6, 7]);

    assert_eq!(loaded.errors[0].column.as_deref(), Some("Risk_ID"));
    assert_eq!(loaded.errors[1].column.as_deref(), Some("RMS_Stage"));
    assert!(loaded.errors[1].reason.contains("Design"));
    assert!(loaded.errors[2].reason.contains("duplicate"));
    assert_eq!(loaded.errors[3].risk_id.as_deref(), Some("R099"));
    assert!(loaded.records.len() + loaded.errors.len() == loaded.total_rows);
}

#[test]
fn renamed_column_is_a_schema_error_listing_the_difference() {
    let err = load_risk_register(&fixture("bad_header.csv")).expect_err("bad header");
    let schema = match err {
        LoadError::Schema(schema) => schema,
        other => panic!("expected schema error, got {other}"),
    };
    assert_eq!(schema.missing, vec!["Methodology".to_string()]);
    assert_eq!(schema.unexpected, vec!["Delivery_Model".to_string()]);
    assert!(schema.to_string().starts_with("schema error:"));
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempdir().expect("tempdir");
    let err = load_risk_register(&dir.path().join("absent.csv")).expect_err("missing");
    assert!(matches!(err, LoadError::Io(_)), "{err}");
}

#[test]
fn truncated_header_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("short_header.csv");
    fs::write(&path, "Risk_ID,RMS_Stage,Recommender_Tag\nR1,Planning,Tag\n").expect("write");
    let err = load_risk_register(&path).expect_err("short header");
    let schema = match err {
        LoadError::Schema(schema) => schema,
        other => panic!("expected schema error, got {other}"),
    };
    assert_eq!(schema.missing.len(), REGISTER_COLUMNS.len() - 3);
}

proptest! {
    #[test]
    fn every_row_is_either_loaded_or_rejected(ids in proptest::collection::vec("[A-Z]{0,2}[0-9]{0,2}", 0..12)) {
        let mut body = REGISTER_COLUMNS.join(",");
        body.push('\n');
        for id in &ids {
            let mut cells = vec![id.clone(), "Planning".to_string(), "Tag".to_string(), "Agile".to_string(), String::new()];
            cells.extend((5..REGISTER_COLUMNS.len()).map(|_| "x".to_string()));
            body.push_str(&cells.join(","));
            body.push('\n');
        }
        let loaded = load_risk_register_from_reader(body.as_bytes(), &LoadOptions::default()).expect("load");
        prop_assert_eq!(loaded.total_rows, ids.len());
        prop_assert_eq!(loaded.records.len() + loaded.errors.len(), ids.len());
        for window in loaded.errors.windows(2) {
            prop_assert!(window[0].row < window[1].row);
        }
    }
}
