//! Dataset store rooted at a data directory

use std::fs;
use std::path::{Path, PathBuf};

use super::dataset::{Dataset, Record};
use super::errors::{StoreError, StoreResult};
use super::reader::read_records;
use super::writer::write_records;

/// Resolves dataset names to backing files under one data directory and
/// performs the create/load/save cycle.
#[derive(Debug, Clone)]
pub struct DatasetStore {
    data_dir: PathBuf,
}

impl DatasetStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Backing file path for a logical dataset name
    pub fn path_for(&self, name: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", name))
    }

    /// Returns true if the dataset's backing file exists
    pub fn exists(&self, name: &str) -> bool {
        self.path_for(name).exists()
    }

    /// Creates a new dataset file holding the given records.
    ///
    /// Fails if the backing file already exists. The new dataset does not
    /// become current; callers load it explicitly.
    pub fn create(&self, name: &str, records: &[Record]) -> StoreResult<()> {
        if self.exists(name) {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        if !self.data_dir.exists() {
            fs::create_dir_all(&self.data_dir).map_err(|e| StoreError::io(&self.data_dir, e))?;
        }
        write_records(&self.path_for(name), records)
    }

    /// Reads the full record sequence of a named dataset into memory
    pub fn load(&self, name: &str) -> StoreResult<Dataset> {
        if !self.exists(name) {
            return Err(StoreError::NotFound(name.to_string()));
        }
        let records = read_records(&self.path_for(name))?;
        Ok(Dataset::new(name, records))
    }

    /// Writes a dataset's full in-memory sequence back to its backing file
    pub fn save(&self, dataset: &Dataset) -> StoreResult<()> {
        write_records(&self.path_for(dataset.name()), dataset.records())
    }
}
