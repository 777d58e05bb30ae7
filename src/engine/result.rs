//! Structured result payloads
//!
//! Operations return these instead of display text; rendering is the
//! shell's job.

use serde::Serialize;
use serde_json::Value;

use crate::store::Record;

/// Outcome of a `find`: matching records in original order.
///
/// Zero matches is a successful empty result, distinct from any error.
#[derive(Debug, Clone, Serialize)]
pub struct FindResult {
    pub matched: Vec<Record>,
    /// How many records the full scan visited
    pub scanned: usize,
}

impl FindResult {
    pub fn is_empty(&self) -> bool {
        self.matched.is_empty()
    }

    pub fn len(&self) -> usize {
        self.matched.len()
    }
}

/// Outcome of an `update` or `delete`
#[derive(Debug, Clone, Copy, Serialize)]
pub struct MutationOutcome {
    /// Records changed or removed
    pub affected: usize,
    /// Whether the backing file was rewritten (only when affected > 0)
    pub persisted: bool,
}

impl MutationOutcome {
    pub fn unchanged() -> Self {
        Self {
            affected: 0,
            persisted: false,
        }
    }

    pub fn applied(affected: usize) -> Self {
        Self {
            affected,
            persisted: true,
        }
    }
}

/// One group of a joined result: every record from either dataset sharing
/// one value of the join field.
///
/// Serializes with the current dataset's records under `"self"`, matching
/// the persisted grouping shape.
#[derive(Debug, Clone, Serialize)]
pub struct JoinGroup {
    /// The shared join-field value; records lacking the field group under
    /// null
    pub key: Value,
    #[serde(rename = "self")]
    pub current: Vec<Record>,
    pub other: Vec<Record>,
}

/// Grouped full outer equi-join of two datasets, in first-seen key order
#[derive(Debug, Clone, Serialize)]
pub struct JoinResult {
    pub groups: Vec<JoinGroup>,
}

impl JoinResult {
    /// Looks up the group for a join-field value
    pub fn group(&self, key: &Value) -> Option<&JoinGroup> {
        self.groups.iter().find(|g| &g.key == key)
    }
}
