//! Structured query representation
//!
//! Defines the condition triple and sort specification consumed by the
//! engine. Values inside a [`Condition`] stay textual until the engine
//! coerces them once per operation.

use serde_json::Value;

use super::coerce::coerce_value;
use super::errors::{QueryError, QueryResult};

/// Comparison operators recognized by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    /// Equality: field = value
    Eq,
    /// Inequality: field != value
    Ne,
    /// Greater than: field > value
    Gt,
    /// Greater than or equal: field >= value
    Gte,
    /// Less than: field < value
    Lt,
    /// Less than or equal: field <= value
    Lte,
}

impl Operator {
    /// Parses operator text as it appears in a command line
    pub fn parse(text: &str) -> QueryResult<Self> {
        match text {
            "=" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            other => Err(QueryError::InvalidOperator(other.to_string())),
        }
    }

    /// Returns the operator's textual form
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }

    /// Returns true for `=` and `!=`
    pub fn is_equality(&self) -> bool {
        matches!(self, Operator::Eq | Operator::Ne)
    }

    /// Returns true for the four ordering operators
    pub fn is_ordering(&self) -> bool {
        !self.is_equality()
    }
}

/// A filter predicate: field, operator, and raw value text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    /// Field name the predicate tests
    pub field: String,
    /// Comparison operator
    pub operator: Operator,
    /// Raw value text, coerced once per operation
    pub value: String,
}

impl Condition {
    pub fn new(field: impl Into<String>, operator: Operator, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            operator,
            value: value.into(),
        }
    }

    /// Convenience constructor taking the operator in textual form
    pub fn parse(
        field: impl Into<String>,
        operator: &str,
        value: impl Into<String>,
    ) -> QueryResult<Self> {
        Ok(Self::new(field, Operator::parse(operator)?, value))
    }

    /// Coerces the raw value text into its typed form
    pub fn coerced_value(&self) -> Value {
        coerce_value(&self.value)
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses direction text, case-insensitively
    pub fn parse(text: &str) -> Option<Self> {
        match text.to_ascii_uppercase().as_str() {
            "ASC" => Some(SortDirection::Asc),
            "DESC" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Sort specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortSpec {
    /// Field to sort by
    pub field: String,
    /// Sort direction
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Desc,
        }
    }
}
