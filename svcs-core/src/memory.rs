//! In-memory backend for tests.

use crate::backend::Backend;
use crate::error::{Error, Result};
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::RwLock;

#[derive(Default)]
struct MemoryTree {
    files: BTreeMap<PathBuf, Vec<u8>>,
    dirs: BTreeSet<PathBuf>,
}

impl MemoryTree {
    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty() || self.dirs.contains(path)
    }

    fn parent_exists(&self, path: &Path) -> bool {
        match path.parent() {
            Some(parent) => self.is_dir(parent),
            None => true,
        }
    }

    fn check_writable(&self, path: &Path) -> Result<()> {
        if self.is_dir(path) {
            return Err(io_error(io::ErrorKind::Other, path, "is a directory"));
        }
        if !self.parent_exists(path) {
            return Err(io_error(io::ErrorKind::NotFound, path, "parent does not exist"));
        }
        Ok(())
    }
}

/// Stores files and directories in memory. Nothing is persisted.
#[derive(Default)]
pub struct MemoryBackend {
    tree: RwLock<MemoryTree>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn normalize(path: &Path) -> PathBuf {
        path.components()
            .filter(|c| !matches!(c, Component::CurDir))
            .collect()
    }

    fn read_tree(&self) -> Result<std::sync::RwLockReadGuard<'_, MemoryTree>> {
        self.tree
            .read()
            .map_err(|e| Error::LockPoisoned(e.to_string()))
    }

    fn write_tree(&self) -> Result<std::sync::RwLockWriteGuard<'_, MemoryTree>> {
        self.tree
            .write()
            .map_err(|e| Error::LockPoisoned(e.to_string()))
    }
}

fn io_error(kind: io::ErrorKind, path: &Path, reason: &str) -> Error {
    Error::Io(io::Error::new(kind, format!("{}: {}", path.display(), reason)))
}

impl Backend for MemoryBackend {
    fn exists(&self, path: &Path) -> bool {
        let path = Self::normalize(path);
        self.read_tree()
            .map(|tree| tree.files.contains_key(&path) || tree.is_dir(&path))
            .unwrap_or(false)
    }

    fn is_dir(&self, path: &Path) -> bool {
        let path = Self::normalize(path);
        self.read_tree()
            .map(|tree| tree.is_dir(&path))
            .unwrap_or(false)
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        let path = Self::normalize(path);
        let tree = self.read_tree()?;
        tree.files
            .get(&path)
            .cloned()
            .ok_or_else(|| io_error(io::ErrorKind::NotFound, &path, "no such file"))
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = Self::normalize(path);
        let mut tree = self.write_tree()?;
        tree.check_writable(&path)?;
        tree.files.insert(path, data.to_vec());
        Ok(())
    }

    fn append(&self, path: &Path, data: &[u8]) -> Result<()> {
        let path = Self::normalize(path);
        let mut tree = self.write_tree()?;
        tree.check_writable(&path)?;
        tree.files.entry(path).or_default().extend_from_slice(data);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        let path = Self::normalize(path);
        let mut tree = self.write_tree()?;

        let ancestors: Vec<PathBuf> = path
            .ancestors()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect();

        if let Some(file) = ancestors.iter().find(|p| tree.files.contains_key(*p)) {
            return Err(io_error(io::ErrorKind::AlreadyExists, file, "is a file"));
        }

        tree.dirs.extend(ancestors);
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let path = Self::normalize(path);
        let tree = self.read_tree()?;
        if !tree.is_dir(&path) {
            return Err(io_error(io::ErrorKind::NotFound, &path, "no such directory"));
        }

        let children: BTreeSet<PathBuf> = tree
            .files
            .keys()
            .chain(tree.dirs.iter())
            .filter(|p| p.parent() == Some(path.as_path()))
            .cloned()
            .collect();

        Ok(children.into_iter().collect())
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let path = Self::normalize(path);
        let tree = self.read_tree()?;
        if !tree.is_dir(&path) {
            return Err(io_error(io::ErrorKind::NotFound, &path, "no such directory"));
        }

        Ok(tree
            .files
            .keys()
            .filter_map(|p| p.strip_prefix(&path).ok())
            .map(Path::to_path_buf)
            .collect())
    }
}
