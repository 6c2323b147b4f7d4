//! Error taxonomy for storage operations

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error coming out of a codec implementation
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result of an operation that has nothing to return besides success or failure
pub type Outcome = Result<(), StorageError>;

/// Failure reported by a [`JsonCodec`](super::json::JsonCodec)
#[derive(Debug, Error)]
pub enum CodecError {
    /// Text is not well-formed JSON (includes truncated input)
    #[error("{0}")]
    Syntax(#[source] BoxError),
    /// Well-formed JSON that does not fit the target type
    #[error("{0}")]
    Data(#[source] BoxError),
    /// The underlying reader or writer failed
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Storage failure. Every variant carries the absolute path it concerns.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Target file does not exist
    #[error("File not found: {}", .path.display())]
    NotFound { path: PathBuf },

    /// File exists but decoded to nothing (empty text or `null`)
    #[error("File {} contains no readable data", .path.display())]
    Empty { path: PathBuf },

    /// File content is not well-formed JSON
    #[error("File {} could not be parsed: {source}", .path.display())]
    Parse { path: PathBuf, source: CodecError },

    /// File content is JSON but does not match the expected structure
    #[error("File {} has an unexpected structure: {source}", .path.display())]
    Structure { path: PathBuf, source: CodecError },

    /// Value could not be written as JSON
    #[error("File {} could not be written: {source}", .path.display())]
    Serialize { path: PathBuf, source: CodecError },

    /// Filesystem failure (permissions, locks, missing ancestors, ...)
    #[error("I/O error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl StorageError {
    pub(crate) fn not_found(path: &Path) -> Self {
        Self::NotFound {
            path: absolute(path),
        }
    }

    pub(crate) fn empty(path: &Path) -> Self {
        Self::Empty {
            path: absolute(path),
        }
    }

    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: absolute(path),
            source,
        }
    }

    /// Map a decode failure onto the parse/structure split
    pub(crate) fn decode(path: &Path, source: CodecError) -> Self {
        let path = absolute(path);
        match source {
            CodecError::Syntax(_) => Self::Parse { path, source },
            CodecError::Data(_) => Self::Structure { path, source },
            CodecError::Io(source) => Self::Io { path, source },
        }
    }

    pub(crate) fn encode(path: &Path, source: CodecError) -> Self {
        let path = absolute(path);
        match source {
            CodecError::Io(source) => Self::Io { path, source },
            source => Self::Serialize { path, source },
        }
    }

    /// Absolute path the error refers to
    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path }
            | Self::Empty { path }
            | Self::Parse { path, .. }
            | Self::Structure { path, .. }
            | Self::Serialize { path, .. }
            | Self::Io { path, .. } => path,
        }
    }

    /// True when the target simply does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Message to show the user, `None` when the file is just missing.
    ///
    /// A missing file is usually not worth reporting (callers fall back to
    /// defaults), while every other failure means the file is unreadable or
    /// corrupt and the message says where and why.
    pub fn user_message(&self) -> Option<String> {
        if self.is_not_found() {
            None
        } else {
            Some(self.to_string())
        }
    }
}

/// Make `path` absolute without touching the filesystem
pub(crate) fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
