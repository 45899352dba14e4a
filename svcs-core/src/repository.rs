use crate::checkout;
use crate::config::Config;
use crate::detect::ChangeDetector;
use crate::error::Result;
use crate::index::StagingIndex;
use crate::log::CommitLog;
use crate::models::{Commit, FileStatus};
use crate::snapshot::CommitStore;
use crate::storage::Storage;
use std::path::PathBuf;

/// Entry point for every user-facing operation.
///
/// Each call loads the state it needs from storage, so one process run
/// performs one operation against whatever is on disk.
pub struct Repository {
    storage: Storage,
}

impl Repository {
    /// Open the repository, creating the storage layout if needed.
    pub fn open(storage: Storage) -> Result<Self> {
        storage.init()?;
        Ok(Self { storage })
    }

    pub fn storage(&self) -> &Storage {
        &self.storage
    }

    pub fn username(&self) -> Result<Option<String>> {
        Ok(Config::load(&self.storage)?.username)
    }

    pub fn set_username(&self, name: &str) -> Result<String> {
        Config::set_username(&self.storage, name)
    }

    pub fn stage(&self, path: &str) -> Result<()> {
        StagingIndex::load(&self.storage)?.stage(&self.storage, path)
    }

    /// Tracked paths in staging order.
    pub fn staged(&self) -> Result<Vec<String>> {
        Ok(StagingIndex::load(&self.storage)?.list()?.to_vec())
    }

    pub fn commit(&self, message: &str) -> Result<Commit> {
        let index = StagingIndex::load(&self.storage)?;
        let mut log = CommitLog::load(&self.storage)?;
        let config = Config::load(&self.storage)?;

        CommitStore::new(&self.storage).create_commit(&index, &mut log, &config, message)
    }

    pub fn last_commit(&self) -> Result<Option<String>> {
        Ok(CommitLog::load(&self.storage)?.last().map(str::to_string))
    }

    pub fn find_commit(&self, id: &str) -> Result<Option<Commit>> {
        Ok(CommitLog::load(&self.storage)?.find(id).cloned())
    }

    /// Whether any snapshot directory exists.
    pub fn has_commits(&self) -> Result<bool> {
        Ok(!self.storage.commit_ids()?.is_empty())
    }

    /// Commits, newest first.
    pub fn history(&self) -> Result<Vec<Commit>> {
        Ok(CommitLog::load(&self.storage)?.entries().to_vec())
    }

    /// The log as displayed by `svcs log`.
    pub fn render_log(&self, limit: Option<usize>) -> Result<String> {
        if !self.has_commits()? {
            return Ok("No commits yet.\n".to_string());
        }
        Ok(CommitLog::load(&self.storage)?.render(limit))
    }

    /// Per-file status of the index against the last commit.
    pub fn status(&self) -> Result<Vec<(String, FileStatus)>> {
        let index = StagingIndex::load(&self.storage)?;
        let log = CommitLog::load(&self.storage)?;
        let detector = ChangeDetector::new(&self.storage, log.last());
        detector.status(&index)
    }

    pub fn checkout(&self, id: &str) -> Result<Vec<PathBuf>> {
        let log = CommitLog::load(&self.storage)?;
        checkout::checkout(&self.storage, &log, id.trim())
    }
}
