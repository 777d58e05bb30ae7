//! Record sorting
//!
//! Stable sort over the scanned (optionally pre-filtered) sequence. Ties
//! keep their original relative order; there is no secondary key.

use std::cmp::Ordering;

use serde_json::Value;

use crate::query::{SortDirection, SortSpec};
use crate::store::Record;

/// Sorts records by a single field
pub struct RecordSorter;

impl RecordSorter {
    /// Sorts records in place according to the sort specification.
    ///
    /// ASC and DESC are honored literally for every field type; descending
    /// is the exact reverse of ascending.
    pub fn sort(records: &mut [Record], spec: &SortSpec) {
        records.sort_by(|a, b| {
            let ordering = Self::compare_values(a.get(&spec.field), b.get(&spec.field));

            match spec.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        });
    }

    /// Compares two field values for sorting.
    ///
    /// Ordering rules:
    /// - absent < null < bool < number < text < list < mapping
    /// - within a type, natural ordering (numeric for numbers,
    ///   lexicographic for text)
    fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a_val), Some(b_val)) => {
                let type_order = |v: &Value| -> u8 {
                    match v {
                        Value::Null => 0,
                        Value::Bool(_) => 1,
                        Value::Number(_) => 2,
                        Value::String(_) => 3,
                        Value::Array(_) => 4,
                        Value::Object(_) => 5,
                    }
                };

                let a_type = type_order(a_val);
                let b_type = type_order(b_val);

                if a_type != b_type {
                    return a_type.cmp(&b_type);
                }

                match (a_val, b_val) {
                    (Value::Null, Value::Null) => Ordering::Equal,
                    (Value::Bool(a_b), Value::Bool(b_b)) => a_b.cmp(b_b),
                    (Value::Number(a_n), Value::Number(b_n)) => {
                        let a_f = a_n.as_f64().unwrap_or(0.0);
                        let b_f = b_n.as_f64().unwrap_or(0.0);
                        a_f.partial_cmp(&b_f).unwrap_or(Ordering::Equal)
                    }
                    (Value::String(a_s), Value::String(b_s)) => a_s.cmp(b_s),
                    // Lists and mappings are not ordered among themselves
                    _ => Ordering::Equal,
                }
            }
        }
    }
}
