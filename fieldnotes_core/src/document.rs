//! The text buffer edited during a note session.

use std::ops::Range;

use crate::error::EditError;

/// A mutable text buffer with a single cursor.
///
/// Offsets are byte offsets and always sit on a `char` boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    text: String,
    cursor: usize,
}

impl Document {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
        }
    }

    /// Create a document with the cursor at the end of `text`.
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let cursor = text.len();
        Self { text, cursor }
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Move the cursor, clamping to the buffer and snapping back to the
    /// previous character boundary. Returns the effective offset.
    pub fn set_cursor(&mut self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        self.cursor = offset;
        offset
    }

    /// Insert a character at the cursor and advance past it.
    pub fn insert_char(&mut self, ch: char) {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
    }

    /// Insert a string at the cursor and advance past it.
    pub fn insert_str(&mut self, s: &str) {
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
    }

    /// Delete the character before the cursor.
    pub fn delete_backward(&mut self) -> Option<char> {
        let ch = self.text[..self.cursor].chars().next_back()?;
        self.cursor -= ch.len_utf8();
        self.text.remove(self.cursor);
        Some(ch)
    }

    /// Replace `range` with `replacement` and put the cursor right after it.
    pub fn splice(&mut self, range: Range<usize>, replacement: &str) -> Result<(), EditError> {
        let len = self.text.len();
        if range.start > range.end || range.end > len {
            return Err(EditError::OutOfBounds {
                start: range.start,
                end: range.end,
                len,
            });
        }
        for offset in [range.start, range.end] {
            if !self.text.is_char_boundary(offset) {
                return Err(EditError::NotCharBoundary(offset));
            }
        }

        let start = range.start;
        self.text.replace_range(range, replacement);
        self.cursor = start + replacement.len();
        Ok(())
    }

    /// Swap in a whole new buffer in one step.
    pub fn replace_text(&mut self, text: String, cursor: usize) {
        self.text = text;
        self.set_cursor(cursor);
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }
}
