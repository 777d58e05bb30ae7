//! In-memory dataset representation

use serde_json::Value;

use crate::query::values_equal;

/// One record: an ordered mapping from field name to JSON value.
///
/// Field order is preserved through load and save (`serde_json` is built
/// with `preserve_order`).
pub type Record = serde_json::Map<String, Value>;

/// The field on which record uniqueness is enforced
pub const TITLE_FIELD: &str = "title";

/// A named, ordered sequence of records loaded from a backing file
#[derive(Debug, Clone)]
pub struct Dataset {
    name: String,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(name: impl Into<String>, records: Vec<Record>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    /// Logical dataset name (without the `.json` suffix)
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn records_mut(&mut self) -> &mut Vec<Record> {
        &mut self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns true if any record carries the given title value.
    ///
    /// Records without a title field never collide.
    pub fn contains_title(&self, title: &Value) -> bool {
        self.records
            .iter()
            .any(|record| match record.get(TITLE_FIELD) {
                Some(existing) => values_equal(existing, title),
                None => false,
            })
    }

    pub fn push(&mut self, record: Record) {
        self.records.push(record);
    }
}
