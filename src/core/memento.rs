//! Workspace memento: the data that survives from one session to the next.
//!
//! Pure data. The workspace produces it and rebuilds buffers from it, storage
//! turns it into JSON. Undo history is deliberately absent.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One open file as it stood when the session ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMemento {
    pub path: PathBuf,
    pub content: String,
    pub modified: bool,
    #[serde(default)]
    pub log_enabled: bool,
}

/// Every open file, in opening order, plus which one was active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMemento {
    #[serde(default)]
    pub active: Option<PathBuf>,
    #[serde(default)]
    pub files: Vec<FileMemento>,
}

impl WorkspaceMemento {
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
