use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Can't find '{0}'.")]
    NotFound(String),

    #[error("'{0}' is not a file.")]
    NotAFile(String),

    #[error("Invalid path: {0}")]
    InvalidPath(String),

    #[error("The file '{0}' is already tracked.")]
    AlreadyTracked(String),

    #[error("Add a file to the index.")]
    NothingStaged,

    #[error("Nothing to commit.")]
    EmptyIndex,

    #[error("Message was not passed.")]
    EmptyMessage,

    #[error("Username was not passed.")]
    EmptyUsername,

    #[error("Please, tell me who you are.")]
    UnknownAuthor,

    #[error("Nothing to commit.")]
    NothingToCommit,

    #[error("Commit does not exist.")]
    CommitNotFound(String),
}

impl Error {
    /// User errors are reported and the command exits normally. Everything
    /// else is a storage fault the caller cannot recover from.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, Error::Io(_) | Error::LockPoisoned(_))
    }
}
