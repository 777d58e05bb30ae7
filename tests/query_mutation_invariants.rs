//! Query and mutation invariant tests
//!
//! - Uniqueness: a duplicate title is rejected and the dataset is
//!   unchanged on disk
//! - Idempotent find: find never mutates; identical calls yield identical
//!   results
//! - Delete-then-find: after a successful delete, the same condition
//!   finds nothing
//! - Transactional update: a matching record without the target field
//!   aborts the whole update with nothing applied

use serde_json::{json, Value};
use shelfdb::engine::Session;
use shelfdb::query::Condition;
use shelfdb::store::Record;
use std::fs;
use tempfile::TempDir;

// =============================================================================
// Test Utilities
// =============================================================================

fn record(pairs: Value) -> Record {
    match pairs {
        Value::Object(map) => map,
        _ => panic!("test record must be an object"),
    }
}

fn library(dir: &TempDir) -> Session {
    let mut session = Session::new(dir.path());
    session.create_dataset("library", &[]).unwrap();
    session.load_dataset("library").unwrap();
    for (title, pages) in [("Emma", 300), ("Dune", 412), ("Hyperion", 500)] {
        session
            .add_record(record(json!({ "title": title, "pages": pages })))
            .unwrap();
    }
    session
}

fn cond(field: &str, op: &str, value: &str) -> Condition {
    Condition::parse(field, op, value).unwrap()
}

// =============================================================================
// Uniqueness on title
// =============================================================================

#[test]
fn test_duplicate_title_rejected_and_disk_unchanged() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);
    let before = fs::read_to_string(dir.path().join("library.json")).unwrap();

    let err = session
        .add_record(record(json!({ "title": "Dune", "pages": 1 })))
        .unwrap_err();
    assert_eq!(err.code(), "DUPLICATE_RECORD_TITLE");

    assert_eq!(session.count(None).unwrap(), 3);
    let after = fs::read_to_string(dir.path().join("library.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_records_without_title_are_accepted() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);

    session.add_record(record(json!({ "pages": 7 }))).unwrap();
    session.add_record(record(json!({ "pages": 8 }))).unwrap();
    assert_eq!(session.count(None).unwrap(), 5);
}

// =============================================================================
// Find
// =============================================================================

#[test]
fn test_find_filters_in_original_order() {
    let dir = TempDir::new().unwrap();
    let session = library(&dir);

    let result = session.find(&cond("pages", ">=", "400")).unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.matched[0]["pages"], json!(412));
    assert_eq!(result.matched[1]["pages"], json!(500));
    assert_eq!(result.scanned, 3);
}

#[test]
fn test_find_zero_matches_is_success_not_error() {
    let dir = TempDir::new().unwrap();
    let session = library(&dir);

    let result = session.find(&cond("pages", ">", "9000")).unwrap();
    assert!(result.is_empty());
}

#[test]
fn test_find_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let session = library(&dir);

    let c = cond("pages", "<=", "412");
    let first = session.find(&c).unwrap();
    let second = session.find(&c).unwrap();
    assert_eq!(first.matched, second.matched);
    assert_eq!(session.count(None).unwrap(), 3);
}

#[test]
fn test_find_ordering_against_text_field_fails() {
    let dir = TempDir::new().unwrap();
    let session = library(&dir);

    let err = session.find(&cond("title", ">=", "400")).unwrap_err();
    assert_eq!(err.code(), "INCOMPARABLE_TYPES");
}

// =============================================================================
// Update
// =============================================================================

#[test]
fn test_update_applies_and_reports_count() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);

    let outcome = session
        .update("pages", json!(999), &cond("title", "=", "Dune"))
        .unwrap();
    assert_eq!(outcome.affected, 1);
    assert!(outcome.persisted);

    let mut fresh = Session::new(dir.path());
    fresh.load_dataset("library").unwrap();
    assert_eq!(fresh.find(&cond("pages", "=", "999")).unwrap().len(), 1);
}

#[test]
fn test_update_zero_matches_reports_without_persisting() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);
    let before = fs::read_to_string(dir.path().join("library.json")).unwrap();

    let outcome = session
        .update("pages", json!(1), &cond("title", "=", "Nonesuch"))
        .unwrap();
    assert_eq!(outcome.affected, 0);
    assert!(!outcome.persisted);

    let after = fs::read_to_string(dir.path().join("library.json")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn test_update_missing_target_field_applies_nothing() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);
    session
        .add_record(record(json!({ "title": "Untracked" })))
        .unwrap();
    let before = fs::read_to_string(dir.path().join("library.json")).unwrap();

    // The condition matches every record, including the one with no pages
    let err = session
        .update("pages", json!(0), &cond("title", "!=", "Nonesuch"))
        .unwrap_err();
    assert_eq!(err.code(), "FIELD_NOT_FOUND");

    // Nothing changed, not even records scanned before the failure
    assert_eq!(session.find(&cond("pages", "=", "0")).unwrap().len(), 0);
    let after = fs::read_to_string(dir.path().join("library.json")).unwrap();
    assert_eq!(before, after);
}

// =============================================================================
// Delete
// =============================================================================

#[test]
fn test_delete_then_find_is_empty() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);

    let c = cond("pages", "=", "412");
    let outcome = session.delete(&c).unwrap();
    assert_eq!(outcome.affected, 1);

    assert!(session.find(&c).unwrap().is_empty());

    let mut fresh = Session::new(dir.path());
    fresh.load_dataset("library").unwrap();
    assert!(fresh.find(&c).unwrap().is_empty());
}

#[test]
fn test_delete_multiple_matches_preserves_survivor_order() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);

    let outcome = session.delete(&cond("pages", ">=", "400")).unwrap();
    assert_eq!(outcome.affected, 2);

    let survivors = session.find(&cond("pages", ">=", "0")).unwrap();
    assert_eq!(survivors.len(), 1);
    assert_eq!(survivors.matched[0]["title"], json!("Emma"));
}

#[test]
fn test_delete_zero_matches_does_not_persist() {
    let dir = TempDir::new().unwrap();
    let mut session = library(&dir);
    let before = fs::read_to_string(dir.path().join("library.json")).unwrap();

    let outcome = session.delete(&cond("pages", "<", "0")).unwrap();
    assert_eq!(outcome.affected, 0);
    assert!(!outcome.persisted);

    let after = fs::read_to_string(dir.path().join("library.json")).unwrap();
    assert_eq!(before, after);
}
