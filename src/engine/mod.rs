//! Record query-and-mutation engine
//!
//! All operations are methods on a [`Session`], the explicit context object
//! that owns the currently loaded dataset. There is no process-wide state;
//! independent sessions never interfere.
//!
//! Execution shape for every operation:
//! 1. Validate that a dataset is loaded (and the operator is recognized)
//! 2. Full scan over the in-memory record sequence
//! 3. Mutating operations persist exactly once after the in-memory change
//! 4. Return a structured payload or a structured error, never display text

mod aggregate;
mod errors;
mod filters;
mod join;
mod result;
mod session;
mod sorter;

pub use errors::{EngineError, EngineResult};
pub use filters::PredicateFilter;
pub use join::join_records;
pub use result::{FindResult, JoinGroup, JoinResult, MutationOutcome};
pub use session::Session;
pub use sorter::RecordSorter;
