//! Error types for the editing engine and the workspace around it.
//!
//! [`EditError`] covers everything a single buffer can report. None of these
//! are fatal: a failed call leaves the buffer exactly as it was.
//! [`WorkspaceError`] adds the file-system and bookkeeping failures that only
//! exist once several buffers and durable storage are involved.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures reported by a buffer's edit, show and history operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Line or column outside the current text.
    #[error("invalid position {line}:{col}")]
    InvalidPosition { line: usize, col: usize },

    /// Line range outside `1..=len`, or reversed.
    #[error("line range {start}:{end} is out of range (buffer has {len} lines)")]
    OutOfRange { start: usize, end: usize, len: usize },

    #[error("nothing to undo")]
    NothingToUndo,

    #[error("nothing to redo")]
    NothingToRedo,
}

/// Failures reported by the workspace manager and storage.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error(transparent)]
    Edit(#[from] EditError),

    #[error("{}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("workspace state {}: {}", .path.display(), .source)]
    State {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("no active buffer")]
    NoActiveBuffer,

    #[error("{} is not open", .0.display())]
    NotOpen(PathBuf),

    #[error("{} is already open", .0.display())]
    AlreadyOpen(PathBuf),

    #[error("{} has unsaved changes", .0.display())]
    UnsavedChanges(PathBuf),

    #[error("buffer has no file path")]
    NoPath,
}

impl WorkspaceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
