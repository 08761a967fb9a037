// Typed failures for the whole fetch -> extract -> symlink pipeline.
// Every stage returns `Result<_, GetGoError>` and nothing below `main` decides
// whether the process lives or dies.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Coarse grouping of failures, used for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network failures and non-200 responses.
    Transport,
    /// Malformed HTML, URLs, filenames or archive streams.
    Parse,
    /// Anything touching the local disk, home directory lookup included.
    Filesystem,
}

#[derive(Debug, Error)]
pub enum GetGoError {
    #[error("request to {url} failed: {message}")]
    Connection { url: String, message: String },

    #[error("status code error: {code} {status} ({url})")]
    HttpStatus {
        url: String,
        code: u16,
        status: String,
    },

    #[error("invalid URL '{input}': {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid download selector: {0}")]
    Selector(String),

    #[error("no Go version found in filename '{filename}'")]
    MissingVersion { filename: String },

    #[error("unsupported archive format for '{filename}'")]
    UnknownFormat { filename: String },

    #[error("cannot map archive entry '{entry}' into the install directory: {reason}")]
    ArchivePath { entry: String, reason: &'static str },

    #[error("corrupt archive: {message}")]
    Archive { message: String },

    #[error("unable to determine the user's home directory")]
    HomeDirectory,

    #[error("error {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("unknown type for {} ({kind})", .path.display())]
    UnsupportedEntry { path: PathBuf, kind: String },
}

impl GetGoError {
    /// Wraps an `io::Error` with the action being attempted and the path involved.
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        GetGoError::Io {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            GetGoError::Connection { .. } | GetGoError::HttpStatus { .. } => ErrorKind::Transport,
            GetGoError::InvalidUrl { .. }
            | GetGoError::Selector(_)
            | GetGoError::MissingVersion { .. }
            | GetGoError::UnknownFormat { .. }
            | GetGoError::ArchivePath { .. }
            | GetGoError::Archive { .. } => ErrorKind::Parse,
            GetGoError::HomeDirectory
            | GetGoError::Io { .. }
            | GetGoError::UnsupportedEntry { .. } => ErrorKind::Filesystem,
        }
    }
}

pub type Result<T> = std::result::Result<T, GetGoError>;
