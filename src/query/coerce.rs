//! Condition value coercion
//!
//! A condition value arrives as text. If it parses as a decimal number
//! (negative and fractional forms included) it becomes a number, otherwise
//! it passes through as text. Total: coercion never fails.

use serde_json::{Number, Value};

/// Coerces raw condition text into a typed value
pub fn coerce_value(raw: &str) -> Value {
    if let Ok(i) = raw.parse::<i64>() {
        return Value::Number(Number::from(i));
    }
    if let Ok(f) = raw.parse::<f64>() {
        // Number::from_f64 rejects NaN and infinities; those stay text
        if let Some(n) = Number::from_f64(f) {
            return Value::Number(n);
        }
    }
    Value::String(raw.to_string())
}
