//! Condition language for record queries
//!
//! A query arrives as a structured `(field, operator, value)` triple; all
//! free-text parsing happens in the shell adapter, never here. This module
//! defines the triple, the coercion of its textual value into a typed one,
//! and the single comparison semantic shared by every operation.

mod ast;
mod coerce;
mod compare;
mod errors;

pub use ast::{Condition, Operator, SortDirection, SortSpec};
pub use coerce::coerce_value;
pub use compare::{evaluate, order_values, type_name, values_equal};
pub use errors::{QueryError, QueryResult};
