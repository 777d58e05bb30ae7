//! Session context
//!
//! A session owns the store handle and the currently loaded dataset.
//! Every operation is a method here, so independent sessions (and tests)
//! never share state. Exactly one dataset is current at a time; loading
//! another replaces it without saving the previous one.

use std::path::PathBuf;

use serde_json::Value;
use uuid::Uuid;

use crate::observability::{Logger, Severity};
use crate::query::{Condition, SortSpec};
use crate::store::{Dataset, DatasetStore, Record, TITLE_FIELD};

use super::aggregate;
use super::errors::{EngineError, EngineResult};
use super::filters::PredicateFilter;
use super::join::join_records;
use super::result::{FindResult, JoinResult, MutationOutcome};
use super::sorter::RecordSorter;

/// One interactive session over one data directory
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    store: DatasetStore,
    current: Option<Dataset>,
}

impl Session {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            id: Uuid::new_v4(),
            store: DatasetStore::new(data_dir),
            current: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Name of the currently loaded dataset, if any
    pub fn current_dataset(&self) -> Option<&str> {
        self.current.as_ref().map(Dataset::name)
    }

    fn dataset(&self) -> EngineResult<&Dataset> {
        self.current.as_ref().ok_or(EngineError::NoDatasetLoaded)
    }

    fn dataset_mut(&mut self) -> EngineResult<&mut Dataset> {
        self.current.as_mut().ok_or(EngineError::NoDatasetLoaded)
    }

    /// Writes the current dataset back to its backing file
    fn persist(&self) -> EngineResult<()> {
        match &self.current {
            Some(dataset) => Ok(self.store.save(dataset)?),
            None => Ok(()),
        }
    }

    fn log(&self, event: &str, fields: &[(&str, &str)]) {
        let session = self.id.to_string();
        let mut all: Vec<(&str, &str)> = vec![("session", session.as_str())];
        all.extend_from_slice(fields);
        Logger::log(Severity::Info, event, &all);
    }

    /// Creates a new dataset file. The new dataset does not become
    /// current; load it explicitly.
    pub fn create_dataset(&self, name: &str, records: &[Record]) -> EngineResult<()> {
        self.store.create(name, records)?;
        let count = records.len().to_string();
        self.log("dataset_created", &[("dataset", name), ("records", &count)]);
        Ok(())
    }

    /// Loads a dataset into memory and makes it current, replacing any
    /// previously current dataset without saving it. Returns the record
    /// count.
    pub fn load_dataset(&mut self, name: &str) -> EngineResult<usize> {
        let dataset = self.store.load(name)?;
        let count = dataset.len();
        self.current = Some(dataset);
        let records = count.to_string();
        self.log("dataset_loaded", &[("dataset", name), ("records", &records)]);
        Ok(count)
    }

    /// Appends a record to the current dataset and persists.
    ///
    /// Rejected if another record already carries the same title; records
    /// without a title never collide.
    pub fn add_record(&mut self, record: Record) -> EngineResult<()> {
        let dataset = self.dataset()?;
        if let Some(title) = record.get(TITLE_FIELD) {
            if dataset.contains_title(title) {
                return Err(EngineError::DuplicateRecordTitle(display_title(title)));
            }
        }

        self.dataset_mut()?.push(record);
        self.persist()?;
        self.log("record_added", &[]);
        Ok(())
    }

    /// Full scan returning every record the condition matches, in
    /// original order. Read-only.
    pub fn find(&self, condition: &Condition) -> EngineResult<FindResult> {
        let dataset = self.dataset()?;
        let filter = PredicateFilter::new(condition);

        let mut matched = Vec::new();
        for record in dataset.records() {
            if filter.matches(record)? {
                matched.push(record.clone());
            }
        }

        Ok(FindResult {
            matched,
            scanned: dataset.len(),
        })
    }

    /// Sets `field` to `new_value` on every record matching the
    /// condition.
    ///
    /// Transactional: a validation pass first confirms every matching
    /// record carries the target field. If any lacks it the whole
    /// operation fails and no record is modified. Persists once iff at
    /// least one record changed.
    pub fn update(
        &mut self,
        field: &str,
        new_value: Value,
        condition: &Condition,
    ) -> EngineResult<MutationOutcome> {
        let filter = PredicateFilter::new(condition);

        let mut matched_at = Vec::new();
        {
            let dataset = self.dataset()?;
            for (at, record) in dataset.records().iter().enumerate() {
                if filter.matches(record)? {
                    if !record.contains_key(field) {
                        return Err(EngineError::FieldNotFoundInRecord(field.to_string()));
                    }
                    matched_at.push(at);
                }
            }
        }

        if matched_at.is_empty() {
            return Ok(MutationOutcome::unchanged());
        }

        {
            let records = self.dataset_mut()?.records_mut();
            for &at in &matched_at {
                records[at].insert(field.to_string(), new_value.clone());
            }
        }
        self.persist()?;

        let affected = matched_at.len();
        let count = affected.to_string();
        self.log("records_updated", &[("field", field), ("count", &count)]);
        Ok(MutationOutcome::applied(affected))
    }

    /// Removes every record matching the condition. Persists once iff at
    /// least one record was removed.
    pub fn delete(&mut self, condition: &Condition) -> EngineResult<MutationOutcome> {
        let filter = PredicateFilter::new(condition);

        let mut keep = Vec::new();
        let mut removed = 0usize;
        {
            let dataset = self.dataset()?;
            keep.reserve(dataset.len());
            for record in dataset.records() {
                if filter.matches(record)? {
                    removed += 1;
                } else {
                    keep.push(record.clone());
                }
            }
        }

        if removed == 0 {
            return Ok(MutationOutcome::unchanged());
        }

        *self.dataset_mut()?.records_mut() = keep;
        self.persist()?;

        let count = removed.to_string();
        self.log("records_deleted", &[("count", &count)]);
        Ok(MutationOutcome::applied(removed))
    }

    /// Stable-sorts the (optionally pre-filtered) record sequence by a
    /// field. Read-only: the stored order is untouched.
    pub fn sort(
        &self,
        spec: &SortSpec,
        condition: Option<&Condition>,
    ) -> EngineResult<Vec<Record>> {
        let dataset = self.dataset()?;

        let mut records = match condition {
            Some(c) => {
                let filter = PredicateFilter::new(c);
                let mut out = Vec::new();
                for record in dataset.records() {
                    if filter.matches(record)? {
                        out.push(record.clone());
                    }
                }
                out
            }
            None => dataset.records().to_vec(),
        };

        RecordSorter::sort(&mut records, spec);
        Ok(records)
    }

    /// Grouped full outer equi-join of the current dataset against
    /// another dataset's backing file. Read-only for both.
    pub fn join(&self, other_name: &str, field: &str) -> EngineResult<JoinResult> {
        let dataset = self.dataset()?;
        let other = self.store.load(other_name)?;
        Ok(join_records(dataset.records(), other.records(), field))
    }

    /// Record count, total or gated by a condition
    pub fn count(&self, condition: Option<&Condition>) -> EngineResult<usize> {
        aggregate::count(self.dataset()?.records(), condition)
    }

    /// Sum of a numeric target field over included records
    pub fn sum(&self, target: &str, condition: Option<&Condition>) -> EngineResult<f64> {
        aggregate::sum(self.dataset()?.records(), target, condition)
    }

    /// Mean of a numeric target field over included records
    pub fn average(&self, target: &str, condition: Option<&Condition>) -> EngineResult<f64> {
        aggregate::average(self.dataset()?.records(), target, condition)
    }

    /// Largest value of a numeric target field
    pub fn max(&self, target: &str) -> EngineResult<Value> {
        aggregate::max(self.dataset()?.records(), target)
    }

    /// Smallest value of a numeric target field
    pub fn min(&self, target: &str) -> EngineResult<Value> {
        aggregate::min(self.dataset()?.records(), target)
    }
}

fn display_title(title: &Value) -> String {
    match title {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn record(pairs: serde_json::Value) -> Record {
        match pairs {
            serde_json::Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    fn session_with_library(dir: &TempDir) -> Session {
        let mut session = Session::new(dir.path());
        session.create_dataset("library", &[]).unwrap();
        session.load_dataset("library").unwrap();
        for pages in [300, 412, 500] {
            session
                .add_record(record(json!({
                    "title": format!("book-{}", pages),
                    "pages": pages
                })))
                .unwrap();
        }
        session
    }

    #[test]
    fn test_operations_require_loaded_dataset() {
        let dir = TempDir::new().unwrap();
        let session = Session::new(dir.path());

        let cond = Condition::parse("pages", ">=", "0").unwrap();
        assert!(matches!(
            session.find(&cond),
            Err(EngineError::NoDatasetLoaded)
        ));
        assert!(matches!(
            session.count(None),
            Err(EngineError::NoDatasetLoaded)
        ));
        assert!(matches!(
            session.max("pages"),
            Err(EngineError::NoDatasetLoaded)
        ));
    }

    #[test]
    fn test_create_does_not_become_current() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(dir.path());

        session.create_dataset("library", &[]).unwrap();
        assert_eq!(session.current_dataset(), None);

        session.load_dataset("library").unwrap();
        assert_eq!(session.current_dataset(), Some("library"));
    }

    #[test]
    fn test_find_matches_in_original_order() {
        let dir = TempDir::new().unwrap();
        let session = session_with_library(&dir);

        let cond = Condition::parse("pages", ">=", "400").unwrap();
        let result = session.find(&cond).unwrap();

        assert_eq!(result.len(), 2);
        assert_eq!(result.scanned, 3);
        assert_eq!(result.matched[0]["pages"], json!(412));
        assert_eq!(result.matched[1]["pages"], json!(500));
    }

    #[test]
    fn test_update_matches_and_persists() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_library(&dir);

        let cond = Condition::parse("title", "=", "book-412").unwrap();
        let outcome = session.update("pages", json!(999), &cond).unwrap();
        assert_eq!(outcome.affected, 1);
        assert!(outcome.persisted);

        // Visible after a fresh load
        let mut fresh = Session::new(dir.path());
        fresh.load_dataset("library").unwrap();
        let found = fresh.find(&Condition::parse("pages", "=", "999").unwrap());
        assert_eq!(found.unwrap().len(), 1);
    }

    #[test]
    fn test_update_is_transactional_on_missing_target_field() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_library(&dir);
        session
            .add_record(record(json!({"title": "untracked"})))
            .unwrap();

        // Matches every record; the last one has no pages field
        let cond = Condition::parse("title", "!=", "nonesuch").unwrap();
        let err = session.update("pages", json!(1), &cond).unwrap_err();
        assert!(matches!(err, EngineError::FieldNotFoundInRecord(_)));

        // No record was modified, in memory or on disk
        assert_eq!(session.count(None).unwrap(), 4);
        let mut fresh = Session::new(dir.path());
        fresh.load_dataset("library").unwrap();
        let rewritten = Condition::parse("pages", "=", "1").unwrap();
        assert!(fresh.find(&rewritten).unwrap().is_empty());
        let untouched = Condition::parse("pages", "=", "412").unwrap();
        assert_eq!(fresh.find(&untouched).unwrap().len(), 1);
    }

    #[test]
    fn test_delete_then_find_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_library(&dir);

        let cond = Condition::parse("pages", "=", "412").unwrap();
        let outcome = session.delete(&cond).unwrap();
        assert_eq!(outcome.affected, 1);

        assert!(session.find(&cond).unwrap().is_empty());
        assert_eq!(session.count(None).unwrap(), 2);
    }

    #[test]
    fn test_zero_match_mutations_do_not_persist() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_library(&dir);

        let cond = Condition::parse("title", "=", "nonesuch").unwrap();
        let update = session.update("pages", json!(1), &cond).unwrap();
        assert_eq!(update.affected, 0);
        assert!(!update.persisted);

        let delete = session.delete(&cond).unwrap();
        assert_eq!(delete.affected, 0);
        assert!(!delete.persisted);
    }

    #[test]
    fn test_duplicate_title_rejected() {
        let dir = TempDir::new().unwrap();
        let mut session = session_with_library(&dir);

        let err = session
            .add_record(record(json!({"title": "book-412", "pages": 1})))
            .unwrap_err();
        assert!(matches!(err, EngineError::DuplicateRecordTitle(t) if t == "book-412"));
        assert_eq!(session.count(None).unwrap(), 3);
    }

    #[test]
    fn test_sort_does_not_mutate_stored_order() {
        let dir = TempDir::new().unwrap();
        let session = session_with_library(&dir);

        let sorted = session.sort(&SortSpec::desc("pages"), None).unwrap();
        assert_eq!(sorted[0]["pages"], json!(500));

        // Original order intact
        let all = session.find(&Condition::parse("pages", ">=", "0").unwrap());
        assert_eq!(all.unwrap().matched[0]["pages"], json!(300));
    }

    #[test]
    fn test_join_missing_other_dataset() {
        let dir = TempDir::new().unwrap();
        let session = session_with_library(&dir);

        assert!(matches!(
            session.join("ghost", "genre"),
            Err(EngineError::DatasetNotFound(name)) if name == "ghost"
        ));
    }
}
