//! The commit table shared by the miner and the aggregator.
//!
//! A UTF-8 CSV file with one header row naming the [`CommitRecord`] fields and
//! one row per commit. Quoting is left to the `csv` crate, so messages with
//! embedded newlines, quotes or commas survive a write/read cycle unchanged.

use crate::error::{GitPulseError, Result};
use crate::model::CommitRecord;
use std::fs;
use std::path::Path;

/// Rows read back from a commit table.
#[derive(Debug, Default)]
pub struct LoadedTable {
    pub records: Vec<CommitRecord>,
    /// Rows that could not be decoded and were left out.
    pub skipped: usize,
}

/// Write `records` to `path`, replacing any previous table.
/// Missing parent directories are created.
pub fn write_table(path: &Path, records: &[CommitRecord]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Load a commit table. A missing file is the only hard failure; rows that
/// fail to decode are skipped and counted.
pub fn read_table(path: &Path) -> Result<LoadedTable> {
    if !path.is_file() {
        return Err(GitPulseError::ArtifactNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_path(path)?;
    let mut table = LoadedTable::default();

    for (row, result) in reader.deserialize::<CommitRecord>().enumerate() {
        match result {
            Ok(record) => table.records.push(record),
            Err(e) => {
                tracing::warn!("skipping row {} of {}: {e}", row + 1, path.display());
                table.skipped += 1;
            }
        }
    }

    Ok(table)
}
