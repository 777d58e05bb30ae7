//! Dataset persistence for shelfdb
//!
//! Each dataset is one file, `<name>.json`, holding a single JSON array of
//! record objects. No header, no schema, no versioning. Persistence is a
//! full-file overwrite through a temp file and an atomic rename, so the
//! previous file stays valid until the new one is complete.
//!
//! There is no file locking: concurrent external modification of a backing
//! file between load and save is undefined behavior by design. This is a
//! single-user tool.

mod dataset;
mod errors;
mod reader;
mod store;
mod writer;

pub use dataset::{Dataset, Record, TITLE_FIELD};
pub use errors::{StoreError, StoreResult};
pub use reader::read_records;
pub use store::DatasetStore;
pub use writer::write_records;
