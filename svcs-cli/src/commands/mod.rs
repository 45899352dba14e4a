pub mod add;
pub mod checkout;
pub mod commit;
pub mod config;
pub mod log;
pub mod status;

use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;
use svcs_core::{Repository, Storage};

pub fn open_repository(root: &Path) -> Result<Repository> {
    let work_dir = std::env::current_dir().context("Failed to read current directory")?;
    let storage = Storage::new(work_dir).with_root(root);

    Repository::open(storage)
        .with_context(|| format!("Failed to open storage at {}", root.display()))
}

/// Print user errors and carry on; anything else aborts the command.
pub fn report<T>(result: svcs_core::Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) if e.is_user_error() => {
            println!("{}", e.to_string().yellow());
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}
