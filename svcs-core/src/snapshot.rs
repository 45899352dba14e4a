//! Snapshot directories and commit creation.

use crate::config::Config;
use crate::detect::ChangeDetector;
use crate::error::{Error, Result};
use crate::hash::hash_content;
use crate::index::StagingIndex;
use crate::log::CommitLog;
use crate::models::{Commit, FileStatus};
use crate::storage::Storage;
use chrono::Utc;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info};

/// Canonical form of a working tree path, with `/` separators.
///
/// `.` segments are dropped and `..` segments are resolved lexically, so
/// `a/../b.txt` becomes `b.txt`. Absolute paths and paths that climb out of
/// the working tree are rejected.
pub fn normalize_path(path: &str) -> Result<String> {
    let mut parts: Vec<&str> = Vec::new();

    for component in Path::new(path).components() {
        match component {
            Component::Normal(part) => match part.to_str() {
                Some(part) => parts.push(part),
                None => return Err(Error::InvalidPath(path.to_string())),
            },
            Component::CurDir => {}
            Component::ParentDir => {
                if parts.pop().is_none() {
                    return Err(Error::InvalidPath(path.to_string()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(Error::InvalidPath(path.to_string()));
            }
        }
    }

    if parts.is_empty() {
        return Err(Error::InvalidPath(path.to_string()));
    }
    Ok(parts.join("/"))
}

/// Location of a staged path inside a snapshot directory.
pub fn snapshot_relative(path: &str) -> Result<PathBuf> {
    normalize_path(path).map(PathBuf::from)
}

/// Collapse blank lines so a message can never end a log entry early.
fn normalize_message(message: &str) -> String {
    message
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Derive a commit identifier from the index text and a timestamp in
/// nanoseconds.
///
/// The timestamp makes identifiers unique even when the same content is
/// committed twice, so identifiers are not reproducible across runs.
pub fn commit_id(index_text: &str, timestamp_nanos: i64) -> String {
    let mut content = index_text.as_bytes().to_vec();
    content.extend_from_slice(timestamp_nanos.to_string().as_bytes());
    hash_content(&content)
}

fn now_nanos() -> i64 {
    let now = Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
}

pub struct CommitStore<'a> {
    storage: &'a Storage,
}

impl<'a> CommitStore<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Snapshot the staged files and record the commit in `log`.
    ///
    /// Blank lines in the message are dropped before it is logged.
    ///
    /// Rejected without side effects when the message is blank, nothing is
    /// staged, a staged file has disappeared, nothing changed since the last
    /// commit, or no username is configured.
    pub fn create_commit(
        &self,
        index: &StagingIndex,
        log: &mut CommitLog,
        config: &Config,
        message: &str,
    ) -> Result<Commit> {
        let message = normalize_message(message.trim());
        if message.is_empty() {
            return Err(Error::EmptyMessage);
        }
        if index.is_empty() {
            return Err(Error::EmptyIndex);
        }

        let detector = ChangeDetector::new(self.storage, log.last());
        for (path, status) in detector.status(index)? {
            if status == FileStatus::Missing {
                return Err(Error::NotFound(path));
            }
        }
        if !detector.has_changes(index)? {
            debug!("Staged files match commit {:?}", log.last());
            return Err(Error::NothingToCommit);
        }

        let author = config.username.clone().ok_or(Error::UnknownAuthor)?;

        let id = commit_id(&index.to_text(), now_nanos());
        self.write_snapshot(&id, index)?;

        let commit = Commit::new(id, author, message);
        log.append(self.storage, commit.clone())?;

        info!("Created commit {} ({} files)", commit.id, index.len());
        Ok(commit)
    }

    /// Copy every staged file into `commits/<id>/`, keeping relative paths.
    ///
    /// An existing directory with the same name is reused.
    pub fn write_snapshot(&self, id: &str, index: &StagingIndex) -> Result<PathBuf> {
        let backend = self.storage.backend();
        let snapshot_dir = self.storage.snapshot_dir(id);
        backend.create_dir_all(&snapshot_dir)?;

        for path in index.paths() {
            let destination = snapshot_dir.join(snapshot_relative(path)?);
            if let Some(parent) = destination.parent() {
                backend.create_dir_all(parent)?;
            }

            backend.copy(Path::new(path), &destination)?;
            debug!("Copied {} to {:?}", path, destination);
        }

        Ok(snapshot_dir)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.storage.backend().is_dir(&self.storage.snapshot_dir(id))
    }

    /// Relative paths of every file stored in a snapshot.
    pub fn files(&self, id: &str) -> Result<Vec<PathBuf>> {
        self.storage
            .backend()
            .list_files(&self.storage.snapshot_dir(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Storage, StagingIndex, CommitLog, Config) {
        let storage = Storage::in_memory();
        storage.init().unwrap();
        storage
            .backend()
            .write(Path::new("a.txt"), b"hello")
            .unwrap();

        let mut index = StagingIndex::default();
        index.stage(&storage, "a.txt").unwrap();

        let config = Config {
            username: Some("alice".to_string()),
        };
        (storage, index, CommitLog::default(), config)
    }

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("a.txt").unwrap(), "a.txt");
        assert_eq!(normalize_path("./dir/a.txt").unwrap(), "dir/a.txt");
        assert_eq!(normalize_path("a/../b.txt").unwrap(), "b.txt");
        assert_eq!(normalize_path("a/./b/../c.txt").unwrap(), "a/c.txt");

        for path in [".", "..", "../up/a.txt", "a/../../b.txt", "/abs/a.txt", ""] {
            assert!(
                matches!(normalize_path(path), Err(Error::InvalidPath(_))),
                "{path} should be rejected"
            );
        }
    }

    #[test]
    fn test_snapshot_relative() {
        assert_eq!(snapshot_relative("a.txt").unwrap(), PathBuf::from("a.txt"));
        assert_eq!(
            snapshot_relative("dir/../dir/a.txt").unwrap(),
            PathBuf::from("dir/a.txt")
        );
    }

    #[test]
    fn test_normalize_message() {
        assert_eq!(normalize_message("one line"), "one line");
        assert_eq!(
            normalize_message("subject\n\n  \nbody  \r\nmore"),
            "subject\nbody\nmore"
        );
    }

    #[test]
    fn test_blank_lines_cannot_forge_log_entries() {
        let (storage, index, mut log, config) = setup();
        let store = CommitStore::new(&storage);

        let commit = store
            .create_commit(
                &index,
                &mut log,
                &config,
                "subject\n\ncommit deadbeef\nAuthor: mallory\nbody",
            )
            .unwrap();
        assert_eq!(
            commit.message,
            "subject\ncommit deadbeef\nAuthor: mallory\nbody"
        );

        let reloaded = CommitLog::load(&storage).unwrap();
        assert_eq!(reloaded.entries(), &[commit.clone()]);
        assert!(reloaded.find("deadbeef").is_none());
        assert_eq!(reloaded.find(&commit.id).unwrap().author, "alice");
    }

    #[test]
    fn test_commit_id_uses_timestamp() {
        let first = commit_id("a.txt\n", 1);
        let second = commit_id("a.txt\n", 2);

        assert_eq!(first.len(), 64);
        assert_ne!(first, second);
        assert_eq!(first, commit_id("a.txt\n", 1));
        assert_eq!(first, hash_content(b"a.txt\n1"));
    }

    #[test]
    fn test_create_commit() {
        let (storage, index, mut log, config) = setup();
        let store = CommitStore::new(&storage);

        let commit = store
            .create_commit(&index, &mut log, &config, "  first  ")
            .unwrap();

        assert_eq!(commit.author, "alice");
        assert_eq!(commit.message, "first");
        assert_eq!(log.last(), Some(commit.id.as_str()));
        assert!(store.exists(&commit.id));
        assert_eq!(store.files(&commit.id).unwrap(), vec![PathBuf::from("a.txt")]);
        assert_eq!(
            storage
                .backend()
                .read(&storage.snapshot_dir(&commit.id).join("a.txt"))
                .unwrap(),
            b"hello"
        );
    }

    #[test]
    fn test_unchanged_commit_rejected() {
        let (storage, index, mut log, config) = setup();
        let store = CommitStore::new(&storage);

        store
            .create_commit(&index, &mut log, &config, "first")
            .unwrap();
        let result = store.create_commit(&index, &mut log, &config, "again");

        assert!(matches!(result, Err(Error::NothingToCommit)));
        assert_eq!(log.entries().len(), 1);
        assert_eq!(storage.commit_ids().unwrap().len(), 1);
    }

    #[test]
    fn test_preconditions() {
        let (storage, index, mut log, config) = setup();
        let store = CommitStore::new(&storage);

        assert!(matches!(
            store.create_commit(&index, &mut log, &config, "   "),
            Err(Error::EmptyMessage)
        ));
        assert!(matches!(
            store.create_commit(&StagingIndex::default(), &mut log, &config, "msg"),
            Err(Error::EmptyIndex)
        ));
        assert!(matches!(
            store.create_commit(&index, &mut log, &Config::default(), "msg"),
            Err(Error::UnknownAuthor)
        ));

        assert!(log.is_empty());
        assert!(storage.commit_ids().unwrap().is_empty());
    }

    #[test]
    fn test_missing_staged_file_rejected() {
        let (storage, _, mut log, config) = setup();
        let index = StagingIndex::parse("a.txt\ngone.txt\n");
        let store = CommitStore::new(&storage);

        assert!(matches!(
            store.create_commit(&index, &mut log, &config, "msg"),
            Err(Error::NotFound(path)) if path == "gone.txt"
        ));
        assert!(storage.commit_ids().unwrap().is_empty());
    }

    #[test]
    fn test_parent_segments_do_not_share_a_snapshot_slot() {
        let (storage, _, mut log, config) = setup();
        let backend = storage.backend();
        backend.write(Path::new("b.txt"), b"outer").unwrap();
        backend.create_dir_all(Path::new("a")).unwrap();
        backend.write(Path::new("a/b.txt"), b"inner").unwrap();

        let mut index = StagingIndex::default();
        index.stage(&storage, "a/b.txt").unwrap();
        index.stage(&storage, "a/../b.txt").unwrap();
        let store = CommitStore::new(&storage);

        let commit = store
            .create_commit(&index, &mut log, &config, "first")
            .unwrap();

        let snapshot_dir = storage.snapshot_dir(&commit.id);
        assert_eq!(backend.read(&snapshot_dir.join("a/b.txt")).unwrap(), b"inner");
        assert_eq!(backend.read(&snapshot_dir.join("b.txt")).unwrap(), b"outer");
        assert!(matches!(
            store.create_commit(&index, &mut log, &config, "again"),
            Err(Error::NothingToCommit)
        ));
    }

    #[test]
    fn test_nested_paths_preserved() {
        let (storage, _, _, _) = setup();
        storage
            .backend()
            .create_dir_all(Path::new("src/deep"))
            .unwrap();
        storage
            .backend()
            .write(Path::new("src/deep/lib.rs"), b"fn main() {}")
            .unwrap();
        let index = StagingIndex::parse("a.txt\nsrc/deep/lib.rs\n");
        let store = CommitStore::new(&storage);

        store.write_snapshot("abc", &index).unwrap();
        store.write_snapshot("abc", &index).unwrap();

        assert_eq!(
            store.files("abc").unwrap(),
            vec![PathBuf::from("a.txt"), PathBuf::from("src/deep/lib.rs")]
        );
    }
}
