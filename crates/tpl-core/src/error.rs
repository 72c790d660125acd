//! Error types for tpl-core

use std::path::PathBuf;

/// Result type for tpl-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in tpl-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Every probed numeric backup suffix was already taken
    #[error("No free backup path for {path} after {attempts} candidates")]
    BackupExhausted { path: PathBuf, attempts: u32 },

    /// I/O failure tied to a concrete file or directory
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failure reading or writing the interactive prompt streams
    #[error("Prompt I/O error: {0}")]
    Prompt(#[from] std::io::Error),

    /// Configuration file exists but cannot be parsed
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    /// Git error from libgit2
    #[error(transparent)]
    Git(#[from] git2::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
