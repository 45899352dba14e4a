use crate::error::{Error, Result};
use crate::log::CommitLog;
use crate::snapshot::CommitStore;
use crate::storage::Storage;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, info, warn};

/// Restore the files of commit `id` into the working tree.
///
/// Files are restored by file name directly into the working tree root,
/// overwriting files of the same name. Files absent from the snapshot are
/// left alone. Returns the restored working tree paths.
pub fn checkout(storage: &Storage, log: &CommitLog, id: &str) -> Result<Vec<PathBuf>> {
    let store = CommitStore::new(storage);
    if !is_single_component(id) || !store.exists(id) || log.find(id).is_none() {
        return Err(Error::CommitNotFound(id.to_string()));
    }

    let backend = storage.backend();
    let snapshot_dir = storage.snapshot_dir(id);
    let mut restored = Vec::new();

    for relative in store.files(id)? {
        let file_name = match relative.file_name() {
            Some(name) => PathBuf::from(name),
            None => continue,
        };
        if relative.components().count() > 1 {
            // Nested snapshot files lose their directories on restore.
            warn!("Restoring {:?} as {:?}", relative, file_name);
        }

        backend.copy(&snapshot_dir.join(&relative), &file_name)?;
        debug!("Restored {:?}", file_name);
        restored.push(file_name);
    }

    info!("Checked out commit {} ({} files)", id, restored.len());
    Ok(restored)
}

fn is_single_component(id: &str) -> bool {
    let mut components = Path::new(id).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
