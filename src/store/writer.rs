//! Atomic dataset file writing

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::dataset::Record;
use super::errors::{StoreError, StoreResult};

/// Writes the full record sequence to a dataset file, overwriting it
/// entirely.
///
/// The records are written to a sibling temp file which is then renamed
/// over the target, so a crash mid-write never leaves a partial file
/// visible.
pub fn write_records(path: &Path, records: &[Record]) -> StoreResult<()> {
    let tmp = temp_path(path);

    {
        let file = File::create(&tmp).map_err(|e| StoreError::io(&tmp, e))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer(&mut writer, records).map_err(|e| StoreError::Malformed {
            path: tmp.clone(),
            source: e,
        })?;

        writer.flush().map_err(|e| StoreError::io(&tmp, e))?;
        let file = writer
            .into_inner()
            .map_err(|e| StoreError::io(&tmp, e.into_error()))?;
        file.sync_all().map_err(|e| StoreError::io(&tmp, e))?;
    }

    fs::rename(&tmp, path).map_err(|e| StoreError::io(path, e))
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}
