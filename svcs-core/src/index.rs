use crate::error::{Error, Result};
use crate::snapshot::normalize_path;
use crate::storage::Storage;
use std::path::Path;
use tracing::debug;

/// The ordered set of tracked file paths, persisted one per line in
/// `index.txt`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StagingIndex {
    paths: Vec<String>,
}

impl StagingIndex {
    pub fn load(storage: &Storage) -> Result<Self> {
        let text = storage
            .read_text(&storage.index_path())?
            .unwrap_or_default();

        Ok(Self::parse(&text))
    }

    pub fn parse(text: &str) -> Self {
        let mut index = Self::default();
        for line in text.lines().filter(|l| !l.is_empty()) {
            let path = normalize_path(line).unwrap_or_else(|_| line.to_string());
            if !index.contains(&path) {
                index.paths.push(path);
            }
        }
        index
    }

    /// Start tracking `path`.
    ///
    /// The path is stored in its normalized form, so `./a.txt` and
    /// `dir/../a.txt` both track `a.txt`. It must name an existing file
    /// inside the working tree and must not already be tracked.
    pub fn stage(&mut self, storage: &Storage, path: &str) -> Result<()> {
        if path.is_empty() {
            return Err(Error::NotFound(path.to_string()));
        }
        let normalized = normalize_path(path)?;

        let backend = storage.backend();
        if !backend.exists(Path::new(&normalized)) {
            return Err(Error::NotFound(path.to_string()));
        }
        if backend.is_dir(Path::new(&normalized)) {
            return Err(Error::NotAFile(path.to_string()));
        }

        if self.contains(&normalized) {
            return Err(Error::AlreadyTracked(path.to_string()));
        }

        backend.append(&storage.index_path(), format!("{}\n", normalized).as_bytes())?;
        debug!("Staged {} as {}", path, normalized);
        self.paths.push(normalized);

        Ok(())
    }

    /// The staged paths, or [`Error::NothingStaged`] when there are none.
    pub fn list(&self) -> Result<&[String]> {
        if self.paths.is_empty() {
            return Err(Error::NothingStaged);
        }
        Ok(&self.paths)
    }

    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Index content in its persisted form, one newline-terminated path per line.
    pub fn to_text(&self) -> String {
        self.paths.iter().map(|p| format!("{}\n", p)).collect()
    }
}
