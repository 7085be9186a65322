//! Error types for settings-file storage.

use thiserror::Error;
use xmlsettings_core::{ReadError, WriteError};

/// Error type for store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Filesystem error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failed.
    #[error("write error: {0}")]
    Write(#[from] WriteError),

    /// Deserialization failed.
    #[error("read error: {0}")]
    Read(#[from] ReadError),

    /// The store was built with no search directories.
    #[error("store has no search directories")]
    NoSearchDirectories,

    /// The store was built with no file types.
    #[error("store has no file types")]
    NoFileTypes,
}

/// Result type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
