//! Aggregate operations over a record sequence
//!
//! count/sum/average scan every record; an optional condition gates which
//! records are included. The aggregated attribute is an explicit caller
//! choice, never a fixed field name. Aggregate scans are stricter than
//! find-style filtering: a record missing the condition field aborts the
//! whole operation.

use serde_json::Value;

use crate::query::{evaluate, type_name, Condition, Operator};
use crate::store::Record;

use super::errors::{EngineError, EngineResult};

/// Operators the conditional aggregates accept
const AGGREGATE_OPERATORS: [Operator; 4] =
    [Operator::Eq, Operator::Ne, Operator::Gte, Operator::Lte];

/// A coerced aggregate condition, validated against the restricted
/// operator set
struct AggregateGate {
    field: String,
    operator: Operator,
    value: Value,
}

impl AggregateGate {
    fn new(condition: &Condition) -> EngineResult<Self> {
        if !AGGREGATE_OPERATORS.contains(&condition.operator) {
            return Err(EngineError::InvalidOperator(
                condition.operator.as_str().to_string(),
            ));
        }
        Ok(Self {
            field: condition.field.clone(),
            operator: condition.operator,
            value: condition.coerced_value(),
        })
    }

    /// Whether a record is included in the aggregate.
    ///
    /// A record missing the condition field is a failure, not a skip.
    fn includes(&self, record: &Record) -> EngineResult<bool> {
        let field_value = record
            .get(&self.field)
            .ok_or_else(|| EngineError::FieldNotFoundInRecord(self.field.clone()))?;

        Ok(evaluate(self.operator, field_value, &self.value)?)
    }
}

/// Numeric value of a record's target field
fn numeric_target(record: &Record, target: &str) -> EngineResult<f64> {
    let value = record
        .get(target)
        .ok_or_else(|| EngineError::FieldNotFoundInRecord(target.to_string()))?;

    match value {
        Value::Number(n) => Ok(n.as_f64().unwrap_or(0.0)),
        other => Err(EngineError::IncomparableTypes {
            left: type_name(other),
            right: "number",
        }),
    }
}

/// Counts records, all of them or those matching the condition
pub fn count(records: &[Record], condition: Option<&Condition>) -> EngineResult<usize> {
    let gate = match condition {
        Some(c) => Some(AggregateGate::new(c)?),
        None => None,
    };

    let mut total = 0;
    for record in records {
        let included = match &gate {
            Some(gate) => gate.includes(record)?,
            None => true,
        };
        if included {
            total += 1;
        }
    }
    Ok(total)
}

/// Sums the target field over included records
pub fn sum(records: &[Record], target: &str, condition: Option<&Condition>) -> EngineResult<f64> {
    let gate = match condition {
        Some(c) => Some(AggregateGate::new(c)?),
        None => None,
    };

    let mut total = 0.0;
    for record in records {
        let included = match &gate {
            Some(gate) => gate.includes(record)?,
            None => true,
        };
        if included {
            total += numeric_target(record, target)?;
        }
    }
    Ok(total)
}

/// Averages the target field over included records.
///
/// Zero included records leave the mean undefined.
pub fn average(
    records: &[Record],
    target: &str,
    condition: Option<&Condition>,
) -> EngineResult<f64> {
    let gate = match condition {
        Some(c) => Some(AggregateGate::new(c)?),
        None => None,
    };

    let mut total = 0.0;
    let mut included_count = 0usize;
    for record in records {
        let included = match &gate {
            Some(gate) => gate.includes(record)?,
            None => true,
        };
        if included {
            total += numeric_target(record, target)?;
            included_count += 1;
        }
    }

    if included_count == 0 {
        return Err(EngineError::DivisionByZero);
    }
    Ok(total / included_count as f64)
}

/// Largest value of the target field across all records.
///
/// The running value starts from the first record, so all-negative data
/// reports the true extreme.
pub fn max(records: &[Record], target: &str) -> EngineResult<Value> {
    extreme(records, target, |candidate, best| candidate > best)
}

/// Smallest value of the target field across all records
pub fn min(records: &[Record], target: &str) -> EngineResult<Value> {
    extreme(records, target, |candidate, best| candidate < best)
}

fn extreme(
    records: &[Record],
    target: &str,
    replaces: fn(f64, f64) -> bool,
) -> EngineResult<Value> {
    let mut best: Option<(f64, Value)> = None;

    for record in records {
        let candidate = numeric_target(record, target)?;
        let replace = match &best {
            Some((best_value, _)) => replaces(candidate, *best_value),
            None => true,
        };
        if replace {
            // keep the record's own representation of the number
            let value = record
                .get(target)
                .cloned()
                .unwrap_or(Value::Null);
            best = Some((candidate, value));
        }
    }

    match best {
        Some((_, value)) => Ok(value),
        None => Err(EngineError::EmptyDataset),
    }
}
