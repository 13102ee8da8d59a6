//! Position-addressed edit operations.
//!
//! Every operation is expressed through one primitive, [`splice`]: at a
//! 1-based `(line, col)` address, remove `n` characters (a line break counts
//! as one) and insert a string that may contain line breaks. The splice works
//! out the whole result first and then calls [`LineStore::replace_range`]
//! once, so a failed validation never leaves a half-applied edit behind.

use std::fmt;
use std::ops::RangeInclusive;

use crate::core::error::EditError;
use crate::core::line_store::LineStore;

/// 1-based line/column address. `col == line_len + 1` is the end of the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub line: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// Line 1, column 1.
    pub const fn start() -> Self {
        Self { line: 1, col: 1 }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// The kind of a logical edit, as recorded in history and the log sidecar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    Insert,
    Delete,
    Replace,
    Append,
}

impl EditKind {
    pub fn name(self) -> &'static str {
        match self {
            EditKind::Insert => "insert",
            EditKind::Delete => "delete",
            EditKind::Replace => "replace",
            EditKind::Append => "append",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An edit request as the front end hands it to a buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOp {
    Insert { at: Position, text: String },
    Delete { at: Position, len: usize },
    Replace { at: Position, len: usize, text: String },
    /// Add `text` as new line(s) after the current last line.
    Append { text: String },
}

impl EditOp {
    pub fn insert(line: usize, col: usize, text: impl Into<String>) -> Self {
        EditOp::Insert {
            at: Position::new(line, col),
            text: text.into(),
        }
    }

    pub fn delete(line: usize, col: usize, len: usize) -> Self {
        EditOp::Delete {
            at: Position::new(line, col),
            len,
        }
    }

    pub fn replace(line: usize, col: usize, len: usize, text: impl Into<String>) -> Self {
        EditOp::Replace {
            at: Position::new(line, col),
            len,
            text: text.into(),
        }
    }

    pub fn append(text: impl Into<String>) -> Self {
        EditOp::Append { text: text.into() }
    }

    pub fn kind(&self) -> EditKind {
        match self {
            EditOp::Insert { .. } => EditKind::Insert,
            EditOp::Delete { .. } => EditKind::Delete,
            EditOp::Replace { .. } => EditKind::Replace,
            EditOp::Append { .. } => EditKind::Append,
        }
    }
}

/// What an edit, undo or redo did to the buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Lines holding the result, numbered after the edit.
    pub lines: RangeInclusive<usize>,
    /// Where the cursor ends up.
    pub cursor: Position,
}

/// Result of a [`splice`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Splice {
    /// Exactly the text that was taken out, line breaks included.
    pub removed: String,
    /// Position just past the inserted text.
    pub end: Position,
    /// Lines holding the result, numbered after the splice.
    pub lines: RangeInclusive<usize>,
}

/// Check that `at` addresses an existing character or an end of line.
pub fn validate(store: &LineStore, at: Position) -> Result<(), EditError> {
    let invalid = EditError::InvalidPosition {
        line: at.line,
        col: at.col,
    };
    if at.line == 0 || at.line > store.len() || at.col == 0 {
        return Err(invalid);
    }
    let len = store.line_len(at.line).map_err(|_| invalid.clone())?;
    if at.col > len + 1 {
        return Err(invalid);
    }
    Ok(())
}

/// The end of the last line, the only place [`append`] ever writes.
pub fn end_of_text(store: &LineStore) -> Position {
    let line = store.len();
    let len = store.line_len(line).unwrap_or(0);
    Position::new(line, len + 1)
}

/// Remove `remove` characters at `at` and insert `insert` in their place.
///
/// The removal walks forward across line breaks, each break counting as one
/// character, and stops quietly at the end of the text.
pub fn splice(
    store: &mut LineStore,
    at: Position,
    remove: usize,
    insert: &str,
) -> Result<Splice, EditError> {
    validate(store, at)?;

    let first = store.get(at.line)?;
    let split = byte_offset(&first, at.col - 1);
    let prefix = &first[..split];

    let mut removed = String::new();
    let mut remaining = remove;
    let mut end_line = at.line;
    let mut tail = first[split..].to_string();
    loop {
        let available = tail.chars().count();
        if remaining <= available {
            let cut = byte_offset(&tail, remaining);
            removed.push_str(&tail[..cut]);
            tail.replace_range(..cut, "");
            break;
        }
        removed.push_str(&tail);
        remaining -= available;
        if end_line == store.len() {
            tail.clear();
            break;
        }
        removed.push('\n');
        remaining -= 1;
        end_line += 1;
        tail = store.get(end_line)?;
    }

    let mut text = String::with_capacity(prefix.len() + insert.len() + tail.len());
    text.push_str(prefix);
    text.push_str(insert);
    let end = position_after(at.line, &text);
    text.push_str(&tail);

    let new_lines: Vec<&str> = text.split('\n').collect();
    store.replace_range(at.line, end_line, &new_lines)?;

    Ok(Splice {
        removed,
        end,
        lines: at.line..=at.line + new_lines.len() - 1,
    })
}

/// Insert `text` at `at`. A payload with `n` line breaks adds `n` lines.
pub fn insert(store: &mut LineStore, at: Position, text: &str) -> Result<Splice, EditError> {
    splice(store, at, 0, text)
}

/// Delete `len` characters at `at`, clamped to the end of the text.
pub fn delete(store: &mut LineStore, at: Position, len: usize) -> Result<Splice, EditError> {
    splice(store, at, len, "")
}

/// Delete then insert at the same address, as one splice.
pub fn replace(
    store: &mut LineStore,
    at: Position,
    len: usize,
    text: &str,
) -> Result<Splice, EditError> {
    splice(store, at, len, text)
}

/// Add `text` as new line(s) at the end, leaving the old last line alone.
pub fn append(store: &mut LineStore, text: &str) -> Result<Splice, EditError> {
    let at = end_of_text(store);
    splice(store, at, 0, &format!("\n{text}"))
}

/// Byte offset of the `n`th char of `s`, or `s.len()` past the end.
fn byte_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Position just past `head`, which starts at column 1 of `line`.
fn position_after(line: usize, head: &str) -> Position {
    match head.rfind('\n') {
        Some(i) => Position::new(
            line + head.matches('\n').count(),
            head[i + 1..].chars().count() + 1,
        ),
        None => Position::new(line, head.chars().count() + 1),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(text: &str) -> LineStore {
        LineStore::from_text(text)
    }

    #[test]
    fn test_validate_bounds() {
        let s = store("abc\nde");
        assert!(validate(&s, Position::new(1, 1)).is_ok());
        assert!(validate(&s, Position::new(1, 4)).is_ok());
        assert!(validate(&s, Position::new(2, 3)).is_ok());
        assert_eq!(
            validate(&s, Position::new(1, 5)),
            Err(EditError::InvalidPosition { line: 1, col: 5 })
        );
        assert!(validate(&s, Position::new(0, 1)).is_err());
        assert!(validate(&s, Position::new(1, 0)).is_err());
        assert!(validate(&s, Position::new(3, 1)).is_err());
    }

    #[test]
    fn test_insert_single_line() {
        let mut s = store("hello world");
        let splice = insert(&mut s, Position::new(1, 7), "big ").unwrap();
        assert_eq!(s.to_text(), "hello big world");
        assert_eq!(splice.lines, 1..=1);
        assert_eq!(splice.end, Position::new(1, 11));
        assert!(splice.removed.is_empty());
    }

    #[test]
    fn test_insert_multi_line_splits_target() {
        let mut s = store("abc");
        let splice = insert(&mut s, Position::new(1, 4), "\ndef").unwrap();
        assert_eq!(s.to_text(), "abc\ndef");
        assert_eq!(s.len(), 2);
        assert_eq!(splice.lines, 1..=2);
        assert_eq!(splice.end, Position::new(2, 4));

        let mut s = store("headtail");
        insert(&mut s, Position::new(1, 5), "-one\ntwo\nthree-").unwrap();
        assert_eq!(s.to_text(), "head-one\ntwo\nthree-tail");
    }

    #[test]
    fn test_insert_rejects_bad_column_without_mutation() {
        let mut s = store("abc");
        assert_eq!(
            insert(&mut s, Position::new(1, 6), "x"),
            Err(EditError::InvalidPosition { line: 1, col: 6 })
        );
        assert_eq!(s.to_text(), "abc");
    }

    #[test]
    fn test_delete_within_line() {
        let mut s = store("hello world");
        let splice = delete(&mut s, Position::new(1, 6), 6).unwrap();
        assert_eq!(s.to_text(), "hello");
        assert_eq!(splice.removed, " world");
    }

    #[test]
    fn test_delete_across_boundary_merges_lines() {
        let mut s = store("ab\ncd");
        let splice = delete(&mut s, Position::new(1, 2), 2).unwrap();
        assert_eq!(s.to_text(), "acd");
        assert_eq!(s.len(), 1);
        assert_eq!(splice.removed, "b\n");
    }

    #[test]
    fn test_delete_spanning_several_lines() {
        let mut s = store("one\ntwo\nthree\nfour");
        let splice = delete(&mut s, Position::new(1, 3), 10).unwrap();
        assert_eq!(splice.removed, "e\ntwo\nthre");
        assert_eq!(s.to_text(), "one\nfour");
    }

    #[test]
    fn test_delete_clamps_at_end_of_text() {
        let mut s = store("ab");
        let splice = delete(&mut s, Position::new(1, 1), 100).unwrap();
        assert_eq!(s.to_text(), "");
        assert_eq!(s.len(), 1);
        assert_eq!(splice.removed, "ab");

        let mut s = store("ab\ncd");
        let splice = delete(&mut s, Position::new(1, 3), 100).unwrap();
        assert_eq!(s.to_text(), "ab");
        assert_eq!(splice.removed, "\ncd");
    }

    #[test]
    fn test_delete_at_end_of_line_eats_the_break() {
        let mut s = store("ab\ncd");
        delete(&mut s, Position::new(1, 3), 1).unwrap();
        assert_eq!(s.to_text(), "abcd");
    }

    #[test]
    fn test_replace_is_delete_then_insert() {
        let mut s = store("hello world");
        let splice = replace(&mut s, Position::new(1, 1), 5, "slow").unwrap();
        assert_eq!(s.to_text(), "slow world");
        assert_eq!(splice.removed, "hello");
        assert_eq!(splice.end, Position::new(1, 5));
    }

    #[test]
    fn test_append_adds_new_last_line() {
        let mut s = store("first");
        let splice = append(&mut s, "second").unwrap();
        assert_eq!(s.to_text(), "first\nsecond");
        assert_eq!(splice.lines, 1..=2);

        append(&mut s, "x\ny").unwrap();
        assert_eq!(s.to_text(), "first\nsecond\nx\ny");
    }

    #[test]
    fn test_append_to_empty_store_keeps_blank_first_line() {
        let mut s = LineStore::new();
        append(&mut s, "text").unwrap();
        assert_eq!(s.to_text(), "\ntext");
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn test_columns_count_chars_not_bytes() {
        let mut s = store("naïve café");
        insert(&mut s, Position::new(1, 6), "!").unwrap();
        assert_eq!(s.to_text(), "naïve! café");
        delete(&mut s, Position::new(1, 3), 1).unwrap();
        assert_eq!(s.to_text(), "nave! café");
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::new(3, 14).to_string(), "3:14");
        assert_eq!(Position::start(), Position::new(1, 1));
    }
}
