//! Error types for sentence-sift.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, SessionError>;

/// Failure of the sentence segmentation capability.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SegmentationError {
    #[error("unsupported segmentation language: {0:?}")]
    UnsupportedLanguage(String),
    #[error("sentence segmentation failed: {0}")]
    Failed(String),
}

/// A bounded replace addressed characters outside the document.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    #[error("range {start}..{end} out of bounds for document of {len} chars")]
    RangeOutOfBounds { start: usize, end: usize, len: usize },
}

/// Error surfaced by an [`EditSession`](crate::session::EditSession) operation.
///
/// Every variant leaves the session in the state it was in before the
/// operation was attempted.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Segmentation(#[from] SegmentationError),
    #[error(transparent)]
    Edit(#[from] EditError),
}

impl SessionError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
