//! Error Types
//!
//! Every failure the helper can report. All of them are terminal: the
//! CLI prints the message on one line and exits non-zero.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while resolving configuration or rendering a joblist.
#[derive(Debug, Error)]
pub enum HelperError {
    /// No mode selected, or joblist mode invoked without a main config.
    #[error("{0}")]
    Usage(String),

    /// The structured YAML reader is required but was not compiled in.
    #[error("{0}")]
    MissingDependency(String),

    /// A file the helper needs does not exist.
    #[error("{what} not found: {}", path.display())]
    NotFound { what: &'static str, path: PathBuf },

    /// A required key is absent from a structured document.
    #[error("{} has no '{key}' key", path.display())]
    MissingKey { key: &'static str, path: PathBuf },

    /// A document could not be parsed, or a value has the wrong shape.
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    /// An existing file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The rendered joblist could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl HelperError {
    pub(crate) fn not_found(what: &'static str, path: impl Into<PathBuf>) -> Self {
        Self::NotFound {
            what,
            path: path.into(),
        }
    }

    #[cfg(feature = "yaml")]
    pub(crate) fn parse(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.to_string(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, HelperError>;
