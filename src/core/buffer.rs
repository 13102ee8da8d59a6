//! Buffer: one open file's text, its undo history and its bookkeeping flags.
//!
//! The buffer is what the workspace and the command front end talk to. It
//! routes edit requests to [`crate::core::edit`], records what they did in a
//! [`History`], and tells the log sidecar about it when logging is on.
//! It never touches the file system itself.

use std::fmt;
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::edit::{self, EditOp, EditOutcome, Position};
use crate::core::error::EditError;
use crate::core::history::{EditCommand, History};
use crate::core::line_store::LineStore;
use crate::core::log_sink::LogSink;

/// Entry written to the log sidecar when logging is switched on.
pub const SESSION_START: &str = "session start";

pub struct Buffer {
    store: LineStore,
    history: History,
    /// File identity. Empty for a buffer that was never given a path.
    path: PathBuf,
    modified: bool,
    log_enabled: bool,
    log_sink: Option<Box<dyn LogSink>>,
    cursor: Position,
}

impl Buffer {
    /// Create a new empty, unnamed buffer
    pub fn new() -> Self {
        Self {
            store: LineStore::new(),
            history: History::new(),
            path: PathBuf::new(),
            modified: false,
            log_enabled: false,
            log_sink: None,
            cursor: Position::start(),
        }
    }

    /// Buffer for `path` holding `content`, split on `\n`. Unmodified, no history.
    pub fn load_from(path: impl Into<PathBuf>, content: &str) -> Self {
        Self {
            store: LineStore::from_text(content),
            path: path.into(),
            ..Self::new()
        }
    }

    /// Bound the undo history to `limit` entries.
    pub fn with_undo_limit(mut self, limit: usize) -> Self {
        self.history = History::with_limit(limit);
        self
    }

    // ==================== Identity & Flags ====================

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn has_path(&self) -> bool {
        !self.path.as_os_str().is_empty()
    }

    /// Name for listings and messages
    pub fn display_name(&self) -> String {
        if self.has_path() {
            self.path.display().to_string()
        } else {
            "untitled".to_string()
        }
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn set_modified(&mut self, modified: bool) {
        self.modified = modified;
    }

    pub fn is_log_enabled(&self) -> bool {
        self.log_enabled
    }

    /// Switch the log sidecar on or off. Switching it on records a session marker.
    pub fn set_log_enabled(&mut self, enabled: bool) {
        if enabled == self.log_enabled {
            return;
        }
        self.log_enabled = enabled;
        if enabled {
            self.write_log(SESSION_START);
        }
    }

    /// Install the sink that receives log entries.
    pub fn set_log_sink(&mut self, sink: Box<dyn LogSink>) {
        self.log_sink = Some(sink);
    }

    // ==================== Content Access ====================

    pub fn line_count(&self) -> usize {
        self.store.len()
    }

    /// Text of a 1-based line
    pub fn line(&self, line: usize) -> Result<String, EditError> {
        self.store.get(line)
    }

    /// Where the last edit, undo or redo left off.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// Lines `start..=end` as `(line number, text)` pairs.
    ///
    /// Fails unless `1 <= start <= end <= line_count()`. The returned
    /// iterator reads lazily and can be cloned to walk the range again.
    pub fn show(&self, start: usize, end: usize) -> Result<Show<'_>, EditError> {
        let len = self.store.len();
        if start == 0 || start > end || end > len {
            return Err(EditError::OutOfRange { start, end, len });
        }
        Ok(Show {
            store: &self.store,
            next: start,
            end,
        })
    }

    /// All lines joined with `\n`, as written to disk.
    pub fn serialize_content(&self) -> String {
        self.store.to_text()
    }

    // ==================== Editing ====================

    /// Apply one edit and record it for undo.
    ///
    /// Every successful edit is recorded, marks the buffer modified and goes
    /// to the log, even one that leaves the text as it was.
    pub fn apply_edit(&mut self, op: EditOp) -> Result<EditOutcome, EditError> {
        let kind = op.kind();
        let (at, inserted, splice) = match op {
            EditOp::Insert { at, text } => {
                let splice = edit::insert(&mut self.store, at, &text)?;
                (at, text, splice)
            }
            EditOp::Delete { at, len } => {
                let splice = edit::delete(&mut self.store, at, len)?;
                (at, String::new(), splice)
            }
            EditOp::Replace { at, len, text } => {
                let splice = edit::replace(&mut self.store, at, len, &text)?;
                (at, text, splice)
            }
            EditOp::Append { text } => {
                let at = edit::end_of_text(&self.store);
                let splice = edit::append(&mut self.store, &text)?;
                (at, format!("\n{text}"), splice)
            }
        };

        let outcome = EditOutcome {
            lines: splice.lines,
            cursor: splice.end,
        };
        let command = EditCommand::new(kind, at, inserted, splice.removed, splice.end);

        self.modified = true;
        self.cursor = outcome.cursor;
        debug!(buffer = %self.display_name(), edit = %command, "applied edit");
        self.write_log(&command.to_string());
        self.history.record(command);
        Ok(outcome)
    }

    pub fn undo(&mut self) -> Result<EditOutcome, EditError> {
        let outcome = self.history.undo(&mut self.store)?;
        self.modified = true;
        self.cursor = outcome.cursor;
        debug!(buffer = %self.display_name(), cursor = %outcome.cursor, "undo");
        Ok(outcome)
    }

    pub fn redo(&mut self) -> Result<EditOutcome, EditError> {
        let outcome = self.history.redo(&mut self.store)?;
        self.modified = true;
        self.cursor = outcome.cursor;
        debug!(buffer = %self.display_name(), cursor = %outcome.cursor, "redo");
        Ok(outcome)
    }

    fn write_log(&mut self, entry: &str) {
        if !self.log_enabled {
            return;
        }
        let Some(sink) = self.log_sink.as_mut() else {
            return;
        };
        if let Err(err) = sink.record(entry) {
            warn!(path = %self.path.display(), error = %err, "failed to write edit log");
        }
    }
}

impl Default for Buffer {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Buffer")
            .field("path", &self.path)
            .field("lines", &self.store.len())
            .field("modified", &self.modified)
            .field("log_enabled", &self.log_enabled)
            .field("has_log_sink", &self.log_sink.is_some())
            .field("cursor", &self.cursor)
            .field("undo_depth", &self.history.undo_depth())
            .field("redo_depth", &self.history.redo_depth())
            .finish()
    }
}

/// Lazy `(line number, text)` walk over a line range, see [`Buffer::show`].
#[derive(Debug, Clone)]
pub struct Show<'a> {
    store: &'a LineStore,
    next: usize,
    end: usize,
}

impl Iterator for Show<'_> {
    type Item = (usize, String);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let line = self.next;
        let text = self.store.get(line).ok()?;
        self.next += 1;
        Some((line, text))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = (self.end + 1).saturating_sub(self.next);
        (n, Some(n))
    }
}

impl ExactSizeIterator for Show<'_> {}

impl FusedIterator for Show<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    /// Sink that keeps entries in memory for inspection.
    #[derive(Clone, Default)]
    struct MemorySink(Rc<RefCell<Vec<String>>>);

    impl LogSink for MemorySink {
        fn record(&mut self, entry: &str) -> io::Result<()> {
            self.0.borrow_mut().push(entry.to_string());
            Ok(())
        }
    }

    struct BrokenSink;

    impl LogSink for BrokenSink {
        fn record(&mut self, _entry: &str) -> io::Result<()> {
            Err(io::Error::other("disk full"))
        }
    }

    fn content(buf: &Buffer) -> Vec<String> {
        buf.show(1, buf.line_count())
            .unwrap()
            .map(|(_, text)| text)
            .collect()
    }

    #[test]
    fn test_new_buffer() {
        let buf = Buffer::new();
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line(1), Ok(String::new()));
        assert!(!buf.is_modified());
        assert!(!buf.has_path());
        assert_eq!(buf.display_name(), "untitled");
    }

    #[test]
    fn test_load_from_round_trips_content() {
        for text in ["", "one", "one\ntwo", "trailing\n", "\n\n"] {
            let buf = Buffer::load_from("f.txt", text);
            assert_eq!(buf.serialize_content(), text);
            assert!(!buf.is_modified());
            assert_eq!(buf.history().undo_depth(), 0);
        }
    }

    #[test]
    fn test_apply_edit_sets_modified_and_cursor() {
        let mut buf = Buffer::load_from("f.txt", "hello world");
        let outcome = buf.apply_edit(EditOp::replace(1, 1, 5, "slow")).unwrap();
        assert_eq!(content(&buf), vec!["slow world"]);
        assert_eq!(outcome.lines, 1..=1);
        assert_eq!(buf.cursor(), Position::new(1, 5));
        assert!(buf.is_modified());
        assert_eq!(buf.history().undo_depth(), 1);

        buf.undo().unwrap();
        assert_eq!(content(&buf), vec!["hello world"]);
        assert_eq!(buf.cursor(), Position::new(1, 1));
    }

    #[test]
    fn test_failed_edit_changes_nothing() {
        let mut buf = Buffer::load_from("f.txt", "abc");
        assert_eq!(
            buf.apply_edit(EditOp::insert(2, 1, "x")),
            Err(EditError::InvalidPosition { line: 2, col: 1 })
        );
        assert_eq!(buf.serialize_content(), "abc");
        assert!(!buf.is_modified());
        assert_eq!(buf.history().undo_depth(), 0);
    }

    #[test]
    fn test_empty_insert_is_recorded() {
        let mut buf = Buffer::load_from("f.txt", "abc");
        buf.apply_edit(EditOp::insert(1, 1, "")).unwrap();
        assert!(buf.is_modified());
        assert_eq!(buf.history().undo_depth(), 1);

        buf.undo().unwrap();
        assert_eq!(buf.serialize_content(), "abc");
        assert_eq!(buf.undo(), Err(EditError::NothingToUndo));
    }

    #[test]
    fn test_delete_past_end_takes_its_own_undo_step() {
        let mut buf = Buffer::load_from("f.txt", "abc");
        buf.apply_edit(EditOp::insert(1, 4, "d")).unwrap();
        buf.apply_edit(EditOp::delete(1, 5, 3)).unwrap();
        assert_eq!(buf.history().undo_depth(), 2);

        buf.undo().unwrap();
        assert_eq!(buf.serialize_content(), "abcd");
        buf.undo().unwrap();
        assert_eq!(buf.serialize_content(), "abc");
    }

    #[test]
    fn test_append_then_undo() {
        let mut buf = Buffer::load_from("f.txt", "first");
        buf.apply_edit(EditOp::append("second")).unwrap();
        assert_eq!(content(&buf), vec!["first", "second"]);

        buf.undo().unwrap();
        assert_eq!(content(&buf), vec!["first"]);
        buf.redo().unwrap();
        assert_eq!(content(&buf), vec!["first", "second"]);
        assert_eq!(buf.cursor(), Position::new(2, 7));
    }

    #[test]
    fn test_undo_marks_modified_even_after_save() {
        let mut buf = Buffer::load_from("f.txt", "x");
        buf.apply_edit(EditOp::insert(1, 2, "y")).unwrap();
        buf.set_modified(false);
        buf.undo().unwrap();
        assert!(buf.is_modified());
    }

    #[test]
    fn test_show_validates_range() {
        let buf = Buffer::load_from("f.txt", "a\nb\nc");
        assert!(buf.show(0, 1).is_err());
        assert!(buf.show(2, 1).is_err());
        assert_eq!(
            buf.show(1, 4).unwrap_err(),
            EditError::OutOfRange {
                start: 1,
                end: 4,
                len: 3
            }
        );

        let show = buf.show(2, 3).unwrap();
        assert_eq!(show.len(), 2);
        let again = show.clone();
        let got: Vec<_> = show.collect();
        assert_eq!(got, vec![(2, "b".to_string()), (3, "c".to_string())]);
        assert_eq!(again.count(), 2);
    }

    #[test]
    fn test_log_entries_only_when_enabled() {
        let sink = MemorySink::default();
        let mut buf = Buffer::load_from("f.txt", "abc");
        buf.set_log_sink(Box::new(sink.clone()));

        buf.apply_edit(EditOp::insert(1, 1, "x")).unwrap();
        assert!(sink.0.borrow().is_empty());

        buf.set_log_enabled(true);
        buf.apply_edit(EditOp::delete(1, 1, 1)).unwrap();
        buf.apply_edit(EditOp::insert(1, 1, "")).unwrap();
        buf.set_log_enabled(false);
        buf.apply_edit(EditOp::append("z")).unwrap();

        assert_eq!(
            *sink.0.borrow(),
            vec![
                SESSION_START.to_string(),
                "delete 1:1 1".to_string(),
                r#"insert 1:1 """#.to_string(),
            ]
        );
    }

    #[test]
    fn test_log_failure_does_not_fail_edit() {
        let mut buf = Buffer::load_from("f.txt", "abc");
        buf.set_log_sink(Box::new(BrokenSink));
        buf.set_log_enabled(true);
        assert!(buf.apply_edit(EditOp::append("d")).is_ok());
        assert_eq!(buf.serialize_content(), "abc\nd");
    }

    #[test]
    fn test_undo_limit() {
        let mut buf = Buffer::new().with_undo_limit(1);
        buf.apply_edit(EditOp::insert(1, 1, "a")).unwrap();
        buf.apply_edit(EditOp::insert(1, 2, "b")).unwrap();
        buf.undo().unwrap();
        assert_eq!(buf.undo(), Err(EditError::NothingToUndo));
        assert_eq!(buf.serialize_content(), "a");
    }
}
