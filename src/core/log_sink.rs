//! Log sidecar: an append-only record of the edits applied to a buffer.
//!
//! A buffer holds its sink as an injected capability and calls it after each
//! successful edit while logging is on. [`FileLogSink`] writes next to the
//! edited file, as `.<file name>.log`.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Receives one line of text per recorded edit.
pub trait LogSink {
    /// Record one entry. Failures are the caller's to report.
    fn record(&mut self, entry: &str) -> io::Result<()>;
}

/// Sidecar log path for `file`: `dir/notes.txt` logs to `dir/.notes.txt.log`.
pub fn log_path_for(file: &Path) -> PathBuf {
    let name = file
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    file.with_file_name(format!(".{name}.log"))
}

/// Appends timestamped entries to a file.
#[derive(Debug, Clone)]
pub struct FileLogSink {
    path: PathBuf,
}

impl FileLogSink {
    /// Sink that writes to `path` verbatim.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Sink that writes to the sidecar of `file`.
    pub fn for_file(file: &Path) -> Self {
        Self::new(log_path_for(file))
    }
}

impl LogSink for FileLogSink {
    fn record(&mut self, entry: &str) -> io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let stamp = chrono::Local::now().format("%Y%m%d %H:%M:%S");
        writeln!(file, "{stamp} {entry}")
    }
}
