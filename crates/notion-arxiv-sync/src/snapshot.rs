//! JSON output files.
//!
//! Both files are pretty-printed UTF-8 and overwritten on every run.

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

use crate::error::{SyncError, SyncResult};
use crate::models::{DiscoveredPaper, PaperRecord};

/// Resolved rows as a JSON object keyed by database title, in row order.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a>(pub &'a [(String, PaperRecord)]);

impl Serialize for Snapshot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(title, record)| (title, record)))
    }
}

/// Write the sync snapshot, returning the path written.
pub async fn write_snapshot(
    path: impl AsRef<Path>,
    records: &[(String, PaperRecord)],
) -> SyncResult<PathBuf> {
    write_json(path.as_ref(), &Snapshot(records)).await
}

/// Write discover-mode results, returning the path written.
pub async fn write_discovered(
    path: impl AsRef<Path>,
    papers: &[DiscoveredPaper],
) -> SyncResult<PathBuf> {
    write_json(path.as_ref(), papers).await
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> SyncResult<PathBuf> {
    let json = serde_json::to_string_pretty(value)?;

    tokio::fs::write(path, json)
        .await
        .map_err(|source| SyncError::Snapshot {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(path = %path.display(), "Saved output file");
    Ok(path.to_path_buf())
}
