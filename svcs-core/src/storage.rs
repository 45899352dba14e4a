use crate::backend::{Backend, FsBackend};
use crate::error::Result;
use crate::memory::MemoryBackend;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default storage root, relative to the working tree.
pub const DEFAULT_ROOT: &str = "vcs";

const CONFIG_FILE: &str = "config.txt";
const INDEX_FILE: &str = "index.txt";
const LOG_FILE: &str = "log.txt";
const COMMITS_DIR: &str = "commits";

/// Handle on the working tree and the storage root inside it.
///
/// All persisted state lives under the root:
/// `config.txt`, `index.txt`, `log.txt` and one `commits/<id>/` directory
/// per commit. Working tree paths are passed to the backend unchanged.
pub struct Storage {
    backend: Box<dyn Backend>,
    root: PathBuf,
}

impl Storage {
    /// Storage on the filesystem, with the working tree at `work_dir`.
    pub fn new<P: AsRef<Path>>(work_dir: P) -> Self {
        Self::with_backend(FsBackend::new(work_dir.as_ref()))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    pub fn with_backend<B: Backend + 'static>(backend: B) -> Self {
        Self {
            backend: Box::new(backend),
            root: PathBuf::from(DEFAULT_ROOT),
        }
    }

    /// Relocate the storage root, relative to the working tree.
    pub fn with_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.root = root.into();
        self
    }

    /// Create the storage root and the commits directory if missing.
    pub fn init(&self) -> Result<()> {
        debug!("Initializing storage at {:?}", self.root);
        self.backend.create_dir_all(&self.commits_dir())?;
        Ok(())
    }

    pub fn backend(&self) -> &dyn Backend {
        self.backend.as_ref()
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    pub fn index_path(&self) -> PathBuf {
        self.root.join(INDEX_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    pub fn commits_dir(&self) -> PathBuf {
        self.root.join(COMMITS_DIR)
    }

    pub fn snapshot_dir(&self, id: &str) -> PathBuf {
        self.commits_dir().join(id)
    }

    /// Read a text file, treating a missing file as `None`.
    pub fn read_text(&self, path: &Path) -> Result<Option<String>> {
        if !self.backend.exists(path) {
            return Ok(None);
        }

        let bytes = self.backend.read(path)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e).into())
    }

    /// Identifiers of every snapshot directory in the store.
    pub fn commit_ids(&self) -> Result<Vec<String>> {
        let commits_dir = self.commits_dir();
        if !self.backend.is_dir(&commits_dir) {
            return Ok(Vec::new());
        }

        let ids = self
            .backend
            .list_dir(&commits_dir)?
            .into_iter()
            .filter(|p| self.backend.is_dir(p))
            .filter_map(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .collect();

        Ok(ids)
    }
}
