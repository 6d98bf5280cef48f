use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A model or asset the pipeline needs is absent; `remedy` tells the
    /// operator what to install.
    #[error("Missing dependency: {what}\n{remedy}")]
    DependencyMissing { what: String, remedy: String },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (first bad byte at offset {offset})", path.display())]
    Decode { path: PathBuf, offset: usize },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
