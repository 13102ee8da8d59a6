//! LineStore: ordered, 1-based sequence of text lines backing one buffer.
//!
//! Lines live in a ropey `Rope` joined by `\n` with no trailing terminator,
//! so the rope's line count is the store's line count and an empty rope is a
//! single empty line. ropey is built without `cr_lines`/`unicode_lines`, which
//! leaves LF as the only line break.

use ropey::{Rope, RopeSlice};

use crate::core::error::EditError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStore {
    rope: Rope,
}

impl LineStore {
    /// A store holding one empty line.
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    /// Build a store by splitting `text` on `\n`.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Number of lines. Never zero.
    pub fn len(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of `line`, without its line break.
    pub fn get(&self, line: usize) -> Result<String, EditError> {
        self.slice(line)
            .map(|s| s.to_string())
            .ok_or(self.out_of_range(line, line))
    }

    /// Length of `line` in characters.
    pub fn line_len(&self, line: usize) -> Result<usize, EditError> {
        self.slice(line)
            .map(|s| s.len_chars())
            .ok_or(self.out_of_range(line, line))
    }

    /// Remove lines `start..=end` and put `new_lines` in their place.
    ///
    /// This is the only mutation the store offers. An empty `new_lines`
    /// drops the range together with one adjoining line break; dropping every
    /// line leaves a single empty line.
    pub fn replace_range<S: AsRef<str>>(
        &mut self,
        start: usize,
        end: usize,
        new_lines: &[S],
    ) -> Result<(), EditError> {
        let len = self.len();
        if start == 0 || start > end || end > len {
            return Err(EditError::OutOfRange { start, end, len });
        }
        debug_assert!(new_lines.iter().all(|l| !l.as_ref().contains('\n')));

        let from = self.rope.line_to_char(start - 1);
        let to = self.line_end(end);

        if new_lines.is_empty() {
            let (from, to) = if end < len {
                (from, self.rope.line_to_char(end))
            } else if start > 1 {
                (from - 1, to)
            } else {
                (from, to)
            };
            self.rope.remove(from..to);
            return Ok(());
        }

        let joined = new_lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<&str>>()
            .join("\n");
        self.rope.remove(from..to);
        self.rope.insert(from, &joined);
        Ok(())
    }

    /// Whole content, lines joined with `\n`.
    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    fn slice(&self, line: usize) -> Option<RopeSlice<'_>> {
        if line == 0 || line > self.len() {
            return None;
        }
        let slice = self.rope.line(line - 1);
        let n = slice.len_chars();
        if n > 0 && slice.char(n - 1) == '\n' {
            Some(slice.slice(..n - 1))
        } else {
            Some(slice)
        }
    }

    /// Char index just past the last character of `line` (before its break).
    fn line_end(&self, line: usize) -> usize {
        if line < self.len() {
            self.rope.line_to_char(line) - 1
        } else {
            self.rope.len_chars()
        }
    }

    fn out_of_range(&self, start: usize, end: usize) -> EditError {
        EditError::OutOfRange {
            start,
            end,
            len: self.len(),
        }
    }
}
