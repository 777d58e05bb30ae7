//! Predicate filtering over records
//!
//! Coerces a condition's value once, then evaluates it against records
//! during a scan. Policy for absent fields, applied uniformly across
//! find/update/delete/sort filtering: an absent field never matches any
//! operator.

use serde_json::Value;

use crate::query::{evaluate, Condition, Operator};
use crate::store::Record;

use super::errors::EngineResult;

/// A condition with its value coerced, ready to test records
#[derive(Debug, Clone)]
pub struct PredicateFilter {
    field: String,
    operator: Operator,
    value: Value,
}

impl PredicateFilter {
    /// Builds a filter from a condition, coercing the value exactly once
    pub fn new(condition: &Condition) -> Self {
        Self {
            field: condition.field.clone(),
            operator: condition.operator,
            value: condition.coerced_value(),
        }
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    /// Checks whether a record satisfies the condition.
    ///
    /// A record lacking the field does not match. A present field of an
    /// incomparable type under an ordering operator is an error.
    pub fn matches(&self, record: &Record) -> EngineResult<bool> {
        let field_value = match record.get(&self.field) {
            Some(v) => v,
            None => return Ok(false),
        };

        Ok(evaluate(self.operator, field_value, &self.value)?)
    }
}
