//! LocalStorage: file contents and the workspace memento on local disk.
//!
//! Writes go through a temp file in the target directory followed by an
//! atomic rename, so a crash mid-save never leaves a truncated file behind.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::warn;

use crate::core::error::WorkspaceError;
use crate::core::log_sink::log_path_for;
use crate::core::memento::WorkspaceMemento;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    state_file: PathBuf,
}

impl LocalStorage {
    /// Storage that keeps the workspace memento in `state_file`.
    pub fn new(state_file: impl Into<PathBuf>) -> Self {
        Self {
            state_file: state_file.into(),
        }
    }

    pub fn state_file(&self) -> &Path {
        &self.state_file
    }

    /// Contents of `path`, or `None` if it does not exist.
    /// Invalid UTF-8 is replaced rather than rejected, with a warning, since a
    /// later save writes the replacement characters back.
    pub fn read_file(&self, path: &Path) -> Result<Option<String>, WorkspaceError> {
        match fs::read(path) {
            Ok(bytes) => Ok(Some(match String::from_utf8(bytes) {
                Ok(text) => text,
                Err(err) => {
                    warn!(
                        path = %path.display(),
                        valid_up_to = err.utf8_error().valid_up_to(),
                        "file is not valid UTF-8, invalid bytes replaced"
                    );
                    String::from_utf8_lossy(err.as_bytes()).into_owned()
                }
            })),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(WorkspaceError::io(path, err)),
        }
    }

    /// Replace the contents of `path` atomically.
    pub fn write_file(&self, path: &Path, content: &str) -> Result<(), WorkspaceError> {
        atomic_write(path, content.as_bytes()).map_err(|err| WorkspaceError::io(path, err))
    }

    /// The saved memento, or `None` when no state file exists yet.
    pub fn load_memento(&self) -> Result<Option<WorkspaceMemento>, WorkspaceError> {
        let Some(json) = self.read_file(&self.state_file)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| WorkspaceError::State {
                path: self.state_file.clone(),
                source,
            })
    }

    pub fn save_memento(&self, memento: &WorkspaceMemento) -> Result<(), WorkspaceError> {
        let json =
            serde_json::to_string_pretty(memento).map_err(|source| WorkspaceError::State {
                path: self.state_file.clone(),
                source,
            })?;
        self.write_file(&self.state_file, &json)
    }

    /// Contents of the log sidecar of `path`, `None` if nothing was logged yet.
    pub fn read_log(&self, path: &Path) -> Result<Option<String>, WorkspaceError> {
        self.read_file(&log_path_for(path))
    }
}

fn atomic_write(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut temp_file = NamedTempFile::new_in(parent)?;
    temp_file.write_all(bytes)?;
    temp_file.flush()?;

    // Data must hit the disk before the rename makes it visible.
    temp_file.as_file().sync_all()?;

    temp_file.persist(path).map_err(|err| err.error)?;
    Ok(())
}
