use crate::error::Result;
use crate::hash::hash_content;
use crate::index::StagingIndex;
use crate::models::FileStatus;
use crate::snapshot::snapshot_relative;
use crate::storage::Storage;
use std::path::Path;
use tracing::trace;

/// Compares staged working tree files with the snapshot of the last commit.
pub struct ChangeDetector<'a> {
    storage: &'a Storage,
    last_commit: Option<&'a str>,
}

impl<'a> ChangeDetector<'a> {
    pub fn new(storage: &'a Storage, last_commit: Option<&'a str>) -> Self {
        Self {
            storage,
            last_commit,
        }
    }

    /// Whether committing `index` would record anything new.
    ///
    /// Always true when there is no previous commit.
    pub fn has_changes(&self, index: &StagingIndex) -> Result<bool> {
        if self.last_commit.is_none() {
            return Ok(true);
        }

        for path in index.paths() {
            if self.file_status(path)?.is_changed() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Status of every staged path, in index order.
    pub fn status(&self, index: &StagingIndex) -> Result<Vec<(String, FileStatus)>> {
        let mut statuses = Vec::with_capacity(index.len());
        for path in index.paths() {
            statuses.push((path.clone(), self.file_status(path)?));
        }
        Ok(statuses)
    }

    pub fn file_status(&self, path: &str) -> Result<FileStatus> {
        let backend = self.storage.backend();
        if !backend.exists(Path::new(path)) {
            return Ok(FileStatus::Missing);
        }

        let last_commit = match self.last_commit {
            Some(id) => id,
            None => return Ok(FileStatus::New),
        };

        let stored = self
            .storage
            .snapshot_dir(last_commit)
            .join(snapshot_relative(path)?);
        if !backend.exists(&stored) {
            return Ok(FileStatus::New);
        }

        let stored_hash = hash_content(&backend.read(&stored)?);
        let current_hash = hash_content(&backend.read(Path::new(path))?);
        trace!("{}: stored {} current {}", path, stored_hash, current_hash);

        if stored_hash == current_hash {
            Ok(FileStatus::Unchanged)
        } else {
            Ok(FileStatus::Modified)
        }
    }
}
