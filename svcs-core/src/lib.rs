//! # svcs-core
//!
//! Core library for svcs - a minimal local version control system.
//!
//! This crate tracks a staged set of files, snapshots their full contents
//! into content-addressed commit directories, keeps a newest-first commit
//! log, and restores the working tree from any recorded commit.

pub mod backend;
pub mod checkout;
pub mod config;
pub mod detect;
pub mod error;
pub mod hash;
pub mod index;
pub mod log;
pub mod memory;
pub mod models;
pub mod repository;
pub mod snapshot;
pub mod storage;

pub use backend::{Backend, FsBackend};
pub use config::Config;
pub use error::{Error, Result};
pub use index::StagingIndex;
pub use log::CommitLog;
pub use memory::MemoryBackend;
pub use models::{Commit, FileStatus};
pub use repository::Repository;
pub use storage::{Storage, DEFAULT_ROOT};
