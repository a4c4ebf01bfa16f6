use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Kind of filesystem entry a guard expected to find.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::File => f.write_str("file"),
            EntryKind::Directory => f.write_str("directory"),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{path} not found")]
    NotFound { path: PathBuf },

    #[error("{path} should be a {expected}")]
    WrongKind { path: PathBuf, expected: EntryKind },

    #[error("failed to parse JSON at {path} line {line}: {source}")]
    Decode {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to serialize record {index} for {path}: {source}")]
    Encode {
        path: PathBuf,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("I/O error while {operation} at {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error at {path} line {line}: {source}")]
    IoLine {
        path: PathBuf,
        line: usize,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    #[must_use]
    pub fn io(operation: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            operation,
            path: path.into(),
            source,
        }
    }

    #[must_use]
    pub fn io_line(path: impl Into<PathBuf>, line: usize, source: std::io::Error) -> Self {
        Self::IoLine {
            path: path.into(),
            line,
            source,
        }
    }

    #[must_use]
    pub fn decode(path: impl Into<PathBuf>, line: usize, source: serde_json::Error) -> Self {
        Self::Decode {
            path: path.into(),
            line,
            source,
        }
    }

    #[must_use]
    pub fn encode(path: impl Into<PathBuf>, index: usize, source: serde_json::Error) -> Self {
        Self::Encode {
            path: path.into(),
            index,
            source,
        }
    }

    #[must_use]
    pub fn wrong_kind(path: impl Into<PathBuf>, expected: EntryKind) -> Self {
        Self::WrongKind {
            path: path.into(),
            expected,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
