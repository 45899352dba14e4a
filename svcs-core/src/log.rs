//! Append-only commit history, newest first.
//!
//! In memory the log is a list of [`Commit`]s. On disk it is `log.txt`, a
//! sequence of blocks of the form:
//!
//! ```text
//! commit <id>
//! Author: <author>
//! <message>
//!
//! ```

use crate::error::Result;
use crate::models::Commit;
use crate::storage::Storage;
use tracing::{debug, warn};

const COMMIT_PREFIX: &str = "commit ";
const AUTHOR_PREFIX: &str = "Author: ";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitLog {
    entries: Vec<Commit>,
}

impl CommitLog {
    pub fn load(storage: &Storage) -> Result<Self> {
        let text = storage.read_text(&storage.log_path())?.unwrap_or_default();
        Ok(Self::parse(&text))
    }

    /// Parse the serialized log. Entries that do not start with a
    /// `commit <id>` line are skipped.
    pub fn parse(text: &str) -> Self {
        let entries = text
            .split("\n\n")
            .map(|block| block.trim_matches('\n'))
            .filter(|block| !block.is_empty())
            .filter_map(parse_entry)
            .collect();

        Self { entries }
    }

    /// Record `commit` as the newest entry.
    ///
    /// The new block is written in front of the existing log content and the
    /// whole file is rewritten.
    pub fn append(&mut self, storage: &Storage, commit: Commit) -> Result<()> {
        let log_path = storage.log_path();
        let existing = storage.read_text(&log_path)?.unwrap_or_default();

        let mut content = format_entry(&commit);
        content.push_str(&existing);
        storage.backend().write(&log_path, content.as_bytes())?;

        debug!("Logged commit {}", commit.id);
        self.entries.insert(0, commit);
        Ok(())
    }

    /// Identifier of the most recent commit.
    pub fn last(&self) -> Option<&str> {
        self.entries.first().map(|c| c.id.as_str())
    }

    pub fn find(&self, id: &str) -> Option<&Commit> {
        self.entries.iter().find(|c| c.id == id)
    }

    pub fn entries(&self) -> &[Commit] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Text form of the newest `limit` entries (all when `None`).
    pub fn render(&self, limit: Option<usize>) -> String {
        let limit = limit.unwrap_or(self.entries.len());
        self.entries.iter().take(limit).map(format_entry).collect()
    }
}

fn format_entry(commit: &Commit) -> String {
    format!(
        "{}{}\n{}{}\n{}\n\n",
        COMMIT_PREFIX, commit.id, AUTHOR_PREFIX, commit.author, commit.message
    )
}

fn parse_entry(block: &str) -> Option<Commit> {
    let mut lines = block.lines();

    let id = match lines.next().and_then(|l| l.strip_prefix(COMMIT_PREFIX)) {
        Some(id) if !id.trim().is_empty() => id.trim().to_string(),
        _ => {
            warn!("Skipping malformed log entry: {:?}", block);
            return None;
        }
    };

    let mut author = String::new();
    let mut message = Vec::new();
    for line in lines {
        match line.strip_prefix(AUTHOR_PREFIX) {
            Some(name) if author.is_empty() => author = name.to_string(),
            _ => message.push(line),
        }
    }

    Some(Commit::new(id, author, message.join("\n").trim().to_string()))
}
