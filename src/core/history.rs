//! Command history: the undo/redo state machine of one buffer.
//!
//! Two stacks. Recording a new command clears the redo stack, undo moves the
//! top of `applied` onto `undone`, redo moves it back. Each [`EditCommand`]
//! carries both the inserted and the removed text, so inverting it is a
//! splice at the same address with the two swapped.

use std::collections::VecDeque;
use std::fmt;

use crate::core::edit::{self, EditKind, EditOutcome, Position};
use crate::core::error::EditError;
use crate::core::line_store::LineStore;

/// Maximum undo stack depth to prevent unbounded history growth
pub const MAX_UNDO_DEPTH: usize = 10_000;

/// One applied edit, recorded so it can be inverted and re-applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    kind: EditKind,
    at: Position,
    inserted: String,
    removed: String,
    end: Position,
}

impl EditCommand {
    pub fn new(
        kind: EditKind,
        at: Position,
        inserted: String,
        removed: String,
        end: Position,
    ) -> Self {
        Self {
            kind,
            at,
            inserted,
            removed,
            end,
        }
    }

    pub fn kind(&self) -> EditKind {
        self.kind
    }

    /// Address the edit was applied at.
    pub fn at(&self) -> Position {
        self.at
    }

    pub fn inserted(&self) -> &str {
        &self.inserted
    }

    pub fn removed(&self) -> &str {
        &self.removed
    }

    /// Cursor position after the edit.
    pub fn end(&self) -> Position {
        self.end
    }

    /// Put the text back the way it was before this command.
    fn revert(&self, store: &mut LineStore) -> Result<EditOutcome, EditError> {
        let splice = edit::splice(
            store,
            self.at,
            self.inserted.chars().count(),
            &self.removed,
        )?;
        Ok(EditOutcome {
            lines: splice.lines,
            cursor: self.at,
        })
    }

    /// Apply this command again after it was reverted.
    fn reapply(&self, store: &mut LineStore) -> Result<EditOutcome, EditError> {
        let splice = edit::splice(
            store,
            self.at,
            self.removed.chars().count(),
            &self.inserted,
        )?;
        Ok(EditOutcome {
            lines: splice.lines,
            cursor: splice.end,
        })
    }
}

/// Textual form used by the log sidecar, e.g. `replace 1:1 5 "slow"`.
impl fmt::Display for EditCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let removed = self.removed.chars().count();
        match self.kind {
            EditKind::Insert => write!(f, "insert {} {:?}", self.at, self.inserted),
            EditKind::Delete => write!(f, "delete {} {}", self.at, removed),
            EditKind::Replace => {
                write!(f, "replace {} {} {:?}", self.at, removed, self.inserted)
            }
            EditKind::Append => {
                let text = self.inserted.strip_prefix('\n').unwrap_or(&self.inserted);
                write!(f, "append {:?}", text)
            }
        }
    }
}

/// Applied and undone commands for one buffer.
#[derive(Debug, Clone)]
pub struct History {
    applied: VecDeque<EditCommand>,
    undone: Vec<EditCommand>,
    limit: usize,
}

impl History {
    pub fn new() -> Self {
        Self::with_limit(MAX_UNDO_DEPTH)
    }

    /// History that keeps at most `limit` undoable commands (at least one).
    pub fn with_limit(limit: usize) -> Self {
        Self {
            applied: VecDeque::new(),
            undone: Vec::new(),
            limit: limit.max(1),
        }
    }

    /// Push a freshly applied command. Whatever was undone is gone for good.
    pub fn record(&mut self, command: EditCommand) {
        self.undone.clear();
        if self.applied.len() >= self.limit {
            self.applied.pop_front();
        }
        self.applied.push_back(command);
    }

    /// Revert the most recent command against `store`.
    pub fn undo(&mut self, store: &mut LineStore) -> Result<EditOutcome, EditError> {
        let command = self.applied.pop_back().ok_or(EditError::NothingToUndo)?;
        match command.revert(store) {
            Ok(outcome) => {
                self.undone.push(command);
                Ok(outcome)
            }
            Err(err) => {
                self.applied.push_back(command);
                Err(err)
            }
        }
    }

    /// Re-apply the most recently undone command against `store`.
    pub fn redo(&mut self, store: &mut LineStore) -> Result<EditOutcome, EditError> {
        let command = self.undone.pop().ok_or(EditError::NothingToRedo)?;
        match command.reapply(store) {
            Ok(outcome) => {
                self.applied.push_back(command);
                Ok(outcome)
            }
            Err(err) => {
                self.undone.push(command);
                Err(err)
            }
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.applied.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.undone.len()
    }

}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applied(
        store: &mut LineStore,
        kind: EditKind,
        at: Position,
        remove: usize,
        insert: &str,
    ) -> EditCommand {
        let splice = edit::splice(store, at, remove, insert).unwrap();
        EditCommand::new(kind, at, insert.to_string(), splice.removed, splice.end)
    }

    #[test]
    fn test_undo_on_empty_history() {
        let mut history = History::new();
        let mut store = LineStore::new();
        assert_eq!(history.undo(&mut store), Err(EditError::NothingToUndo));
        assert_eq!(history.redo(&mut store), Err(EditError::NothingToRedo));
    }

    #[test]
    fn test_undo_redo_replace_in_one_step() {
        let mut store = LineStore::from_text("hello world");
        let mut history = History::new();
        let cmd = applied(&mut store, EditKind::Replace, Position::new(1, 1), 5, "slow");
        history.record(cmd);
        assert_eq!(store.to_text(), "slow world");

        let outcome = history.undo(&mut store).unwrap();
        assert_eq!(store.to_text(), "hello world");
        assert_eq!(outcome.cursor, Position::new(1, 1));
        assert_eq!(history.undo_depth(), 0);
        assert_eq!(history.redo_depth(), 1);

        let outcome = history.redo(&mut store).unwrap();
        assert_eq!(store.to_text(), "slow world");
        assert_eq!(outcome.cursor, Position::new(1, 5));
    }

    #[test]
    fn test_undo_multi_line_delete_restores_lines() {
        let mut store = LineStore::from_text("one\ntwo\nthree");
        let mut history = History::new();
        let cmd = applied(&mut store, EditKind::Delete, Position::new(1, 2), 9, "");
        history.record(cmd);
        assert_eq!(store.to_text(), "oree");

        history.undo(&mut store).unwrap();
        assert_eq!(store.to_text(), "one\ntwo\nthree");
    }

    #[test]
    fn test_record_clears_redo() {
        let mut store = LineStore::from_text("abc");
        let mut history = History::new();
        let cmd = applied(&mut store, EditKind::Insert, Position::new(1, 4), 0, "d");
        history.record(cmd);
        history.undo(&mut store).unwrap();
        assert_eq!(history.redo_depth(), 1);

        let cmd = applied(&mut store, EditKind::Insert, Position::new(1, 1), 0, "z");
        history.record(cmd);
        assert_eq!(history.redo_depth(), 0);
        assert_eq!(history.redo(&mut store), Err(EditError::NothingToRedo));
        assert_eq!(store.to_text(), "zabc");
    }

    #[test]
    fn test_limit_discards_oldest() {
        let mut store = LineStore::new();
        let mut history = History::with_limit(2);
        for ch in ["a", "b", "c"] {
            let at = edit::end_of_text(&store);
            let cmd = applied(&mut store, EditKind::Insert, at, 0, ch);
            history.record(cmd);
        }
        assert_eq!(history.undo_depth(), 2);
        history.undo(&mut store).unwrap();
        history.undo(&mut store).unwrap();
        assert_eq!(store.to_text(), "a");
        assert_eq!(history.undo(&mut store), Err(EditError::NothingToUndo));
    }

    #[test]
    fn test_display_for_log() {
        let at = Position::new(1, 4);
        let cmd = EditCommand::new(
            EditKind::Insert,
            at,
            "\ndef".into(),
            String::new(),
            Position::new(2, 4),
        );
        assert_eq!(cmd.to_string(), r#"insert 1:4 "\ndef""#);

        let cmd = EditCommand::new(EditKind::Delete, at, String::new(), "b\n".into(), at);
        assert_eq!(cmd.to_string(), "delete 1:4 2");

        let cmd = EditCommand::new(
            EditKind::Append,
            Position::new(3, 1),
            "\ntail".into(),
            String::new(),
            Position::new(4, 5),
        );
        assert_eq!(cmd.to_string(), r#"append "tail""#);
    }
}
