//! Dataset file reading

use std::fs;
use std::path::Path;

use serde_json::Value;

use super::dataset::Record;
use super::errors::{StoreError, StoreResult};

/// Reads the full record sequence from a dataset file.
///
/// The file must hold a single JSON array whose elements are all objects;
/// anything else is malformed.
pub fn read_records(path: &Path) -> StoreResult<Vec<Record>> {
    let content = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;

    let value: Value = serde_json::from_str(&content).map_err(|e| StoreError::Malformed {
        path: path.to_path_buf(),
        source: e,
    })?;

    let rows = match value {
        Value::Array(rows) => rows,
        _ => return Err(StoreError::NotAnArray(path.to_path_buf())),
    };

    let mut records = Vec::with_capacity(rows.len());
    for row in rows {
        match row {
            Value::Object(map) => records.push(map),
            _ => return Err(StoreError::NotAnArray(path.to_path_buf())),
        }
    }

    Ok(records)
}
