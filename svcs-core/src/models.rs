use serde::{Deserialize, Serialize};

/// A recorded snapshot of the staged files.
///
/// The identifier names both the snapshot directory and the log entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    pub id: String,
    pub author: String,
    pub message: String,
}

impl Commit {
    pub fn new(id: String, author: String, message: String) -> Self {
        Self {
            id,
            author,
            message,
        }
    }
}

/// How a staged file compares with its copy in the last commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FileStatus {
    /// Not present in the last commit.
    New,
    Modified,
    Unchanged,
    /// Staged but no longer present in the working tree.
    Missing,
}

impl FileStatus {
    pub fn as_str(&self) -> &str {
        match self {
            FileStatus::New => "new",
            FileStatus::Modified => "modified",
            FileStatus::Unchanged => "unchanged",
            FileStatus::Missing => "missing",
        }
    }

    pub fn is_changed(&self) -> bool {
        !matches!(self, FileStatus::Unchanged)
    }
}
