//! Unified error type for all store operations.

use std::path::{Path, PathBuf};

/// Things that can go wrong when using the store.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Bad input: empty path, empty key, or a replacement value that is not
    /// a JSON object.
    InvalidArgument(String),
    /// Permission denied while statting, reading or writing the backing file.
    AccessDenied(PathBuf),
    /// Any other file system problem (stat, read, write, rename).
    Io {
        /// Backing file the operation was touching.
        path: PathBuf,
        /// Stringified cause.
        message: String,
    },
    /// The backing file exists, is non-empty, and does not hold a JSON object.
    Corrupt {
        /// Backing file that failed to parse.
        path: PathBuf,
        /// Stringified parse failure.
        message: String,
    },
}

impl Error {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn access_denied(path: &Path) -> Self {
        Error::AccessDenied(path.to_path_buf())
    }

    pub(crate) fn io(path: &Path, cause: &std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            message: cause.to_string(),
        }
    }

    pub(crate) fn corrupt(path: &Path, cause: &serde_json::Error) -> Self {
        Error::Corrupt {
            path: path.to_path_buf(),
            message: cause.to_string(),
        }
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Error::AccessDenied(path) => {
                write!(f, "cannot access path {:?}, check permissions", path)
            }
            Error::Io { path, message } => write!(f, "i/o error on {:?}: {message}", path),
            Error::Corrupt { path, message } => {
                write!(f, "{:?} is non-empty but is not valid JSON: {message}", path)
            }
        }
    }
}

impl std::error::Error for Error {}

/// Result alias using our [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;
