//! Byte-level access to the working tree and the storage root.
//!
//! Every read and write performed by the core goes through a [`Backend`], so
//! the same operations run against the real filesystem ([`FsBackend`]) or an
//! in-memory tree used by tests ([`crate::memory::MemoryBackend`]).

use crate::error::Result;
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File operations over a tree of relative paths.
pub trait Backend: Send + Sync {
    /// Whether a file or directory exists at `path`.
    fn exists(&self, path: &Path) -> bool;

    fn is_dir(&self, path: &Path) -> bool;

    /// Read the full content of a file.
    fn read(&self, path: &Path) -> Result<Vec<u8>>;

    /// Replace the content of a file, creating it if needed.
    ///
    /// The data is synced to storage before returning. The parent directory
    /// must already exist.
    fn write(&self, path: &Path, data: &[u8]) -> Result<()>;

    /// Append to a file, creating it if needed. Synced like [`Backend::write`].
    fn append(&self, path: &Path, data: &[u8]) -> Result<()>;

    fn create_dir_all(&self, path: &Path) -> Result<()>;

    /// Immediate children of a directory, as full paths, sorted.
    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Every file below a directory, as paths relative to it, sorted.
    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>>;

    /// Copy a file by reading it fully and writing it out again.
    fn copy(&self, from: &Path, to: &Path) -> Result<()> {
        let data = self.read(from)?;
        self.write(to, &data)
    }
}

/// Filesystem backend rooted at a base directory.
///
/// Relative paths are resolved against the base; absolute paths are used as is.
pub struct FsBackend {
    base: PathBuf,
}

impl FsBackend {
    pub fn new<P: Into<PathBuf>>(base: P) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base.join(path)
    }
}

impl Backend for FsBackend {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).exists()
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.resolve(path).is_dir()
    }

    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(fs::read(self.resolve(path))?)
    }

    fn write(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = File::create(self.resolve(path))?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    }

    fn append(&self, path: &Path, data: &[u8]) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.resolve(path))?;
        file.write_all(data)?;
        file.sync_all()?;
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        fs::create_dir_all(self.resolve(path))?;
        Ok(())
    }

    fn list_dir(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(self.resolve(path))? {
            children.push(path.join(entry?.file_name()));
        }
        children.sort();
        Ok(children)
    }

    fn list_files(&self, path: &Path) -> Result<Vec<PathBuf>> {
        let root = self.resolve(path);
        let mut files = Vec::new();

        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(std::io::Error::from)?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&root) {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_write_and_read() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path());

        backend.write(Path::new("a.txt"), b"hello").unwrap();

        assert!(backend.exists(Path::new("a.txt")));
        assert_eq!(backend.read(Path::new("a.txt")).unwrap(), b"hello");
        assert_eq!(fs::read(dir.path().join("a.txt")).unwrap(), b"hello");
    }

    #[test]
    fn test_append_creates_file() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path());

        backend.append(Path::new("index.txt"), b"a.txt\n").unwrap();
        backend.append(Path::new("index.txt"), b"b.txt\n").unwrap();

        assert_eq!(
            backend.read(Path::new("index.txt")).unwrap(),
            b"a.txt\nb.txt\n"
        );
    }

    #[test]
    fn test_write_requires_parent() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path());

        assert!(backend.write(Path::new("missing/a.txt"), b"x").is_err());

        backend.create_dir_all(Path::new("missing")).unwrap();
        backend.write(Path::new("missing/a.txt"), b"x").unwrap();
        assert!(backend.is_dir(Path::new("missing")));
    }

    #[test]
    fn test_list_files_is_recursive_and_relative() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path());

        backend.create_dir_all(Path::new("snap/sub")).unwrap();
        backend.write(Path::new("snap/b.txt"), b"b").unwrap();
        backend.write(Path::new("snap/sub/a.txt"), b"a").unwrap();

        let files = backend.list_files(Path::new("snap")).unwrap();
        assert_eq!(
            files,
            vec![PathBuf::from("b.txt"), PathBuf::from("sub/a.txt")]
        );

        let children = backend.list_dir(Path::new("snap")).unwrap();
        assert_eq!(
            children,
            vec![PathBuf::from("snap/b.txt"), PathBuf::from("snap/sub")]
        );
    }

    #[test]
    fn test_copy() {
        let dir = TempDir::new().unwrap();
        let backend = FsBackend::new(dir.path());

        backend.write(Path::new("src.txt"), b"content").unwrap();
        backend
            .copy(Path::new("src.txt"), Path::new("dst.txt"))
            .unwrap();

        assert_eq!(backend.read(Path::new("dst.txt")).unwrap(), b"content");
    }
}
