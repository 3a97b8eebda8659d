use ropey::Rope;
use thiserror::Error;

/// Errors raised by line-structure edits that have a precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    /// Joining upward was requested on the first line of the document.
    #[error("cannot join line upward: there is no line above")]
    NoLineAbove,
    /// The requested line does not exist.
    #[error("line {row} is out of range (buffer has {line_count} lines)")]
    LineOutOfRange { row: usize, line_count: usize },
}

/// The document being edited, as an ordered sequence of lines.
///
/// Backed by a rope that only treats `'\n'` as a line separator, so a buffer
/// always has at least one (possibly empty) line. Columns are code-point
/// indices within a line; no line-ending characters are ever exposed.
pub struct LineBuffer {
    rope: Rope,
    dirty: bool,
}

impl LineBuffer {
    /// Create a buffer holding a single empty line.
    pub fn new() -> Self {
        Self {
            rope: Rope::new(),
            dirty: false,
        }
    }

    /// Create a buffer from newline-delimited text.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            dirty: false,
        }
    }

    /// Create a buffer from an ordered sequence of lines.
    ///
    /// An empty sequence yields a buffer with one empty line.
    pub fn from_lines<S: AsRef<str>>(lines: &[S]) -> Self {
        let text = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join("\n");
        Self::from_text(&text)
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Mark the buffer as clean (e.g., after saving).
    pub const fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Total number of lines. Never zero.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Total number of code points across all lines, separators excluded.
    pub fn char_count(&self) -> usize {
        self.rope.len_chars() - (self.line_count() - 1)
    }

    /// Content of a line, or an empty string past the end of the buffer.
    pub fn line(&self, row: usize) -> String {
        if row >= self.line_count() {
            return String::new();
        }
        self.rope.line(row).chars().take(self.line_len(row)).collect()
    }

    /// Content of the final line.
    pub fn last_line(&self) -> String {
        self.line(self.line_count() - 1)
    }

    /// Number of code points in a line (0 past the end of the buffer).
    pub fn line_len(&self, row: usize) -> usize {
        if row >= self.line_count() {
            return 0;
        }
        let line = self.rope.line(row);
        let len = line.len_chars();
        if len > 0 && line.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }

    /// The code point at `(row, col)`, if any.
    pub fn char_at(&self, row: usize, col: usize) -> Option<char> {
        if col >= self.line_len(row) {
            return None;
        }
        Some(self.rope.line(row).char(col))
    }

    /// All lines, in order.
    pub fn lines(&self) -> Vec<String> {
        (0..self.line_count()).map(|row| self.line(row)).collect()
    }

    /// The whole document with lines joined by `'\n'`.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Insert `ch` at `col` on `row`.
    ///
    /// The column is clamped to the line length, so inserting past the end
    /// appends. A row past the end of the buffer appends one new line
    /// containing `ch`. `ch` must not be a line break; use
    /// [`split_line_at`](Self::split_line_at) for that.
    pub fn insert_char(&mut self, row: usize, col: usize, ch: char) {
        if row >= self.line_count() {
            let end = self.rope.len_chars();
            let mut appended = String::with_capacity(1 + ch.len_utf8());
            appended.push('\n');
            appended.push(ch);
            self.rope.insert(end, &appended);
        } else {
            let col = col.min(self.line_len(row));
            let char_idx = self.rope.line_to_char(row) + col;
            self.rope.insert_char(char_idx, ch);
        }
        self.dirty = true;
    }

    /// Remove the code point at `(row, col)`.
    ///
    /// Returns `false` and leaves the buffer untouched when the position is
    /// out of range.
    pub fn delete_char(&mut self, row: usize, col: usize) -> bool {
        if col >= self.line_len(row) {
            return false;
        }
        let char_idx = self.rope.line_to_char(row) + col;
        self.rope.remove(char_idx..=char_idx);
        self.dirty = true;
        true
    }

    /// Insert an empty line directly after `after_row`.
    ///
    /// Rows past the end append at the end of the buffer.
    pub fn insert_line(&mut self, after_row: usize) {
        let row = after_row.min(self.line_count() - 1);
        let char_idx = self.rope.line_to_char(row) + self.line_len(row);
        self.rope.insert_char(char_idx, '\n');
        self.dirty = true;
    }

    /// Remove a line entirely.
    ///
    /// Removing the only line clears it instead, keeping one line in the
    /// buffer. Returns `false` when `row` does not exist.
    pub fn delete_line(&mut self, row: usize) -> bool {
        let count = self.line_count();
        if row >= count {
            return false;
        }
        let end = self.rope.len_chars();
        if count == 1 {
            self.rope.remove(0..end);
        } else if row + 1 == count {
            // Last line: drop the separator that precedes it.
            let start = self.rope.line_to_char(row) - 1;
            self.rope.remove(start..end);
        } else {
            let start = self.rope.line_to_char(row);
            let next = self.rope.line_to_char(row + 1);
            self.rope.remove(start..next);
        }
        self.dirty = true;
        true
    }

    /// Truncate `row` at `col` and move the suffix to a new line below.
    ///
    /// Returns the content of the new line. A row past the end of the buffer
    /// appends an empty line.
    pub fn split_line_at(&mut self, row: usize, col: usize) -> String {
        if row >= self.line_count() {
            self.insert_line(row);
            return String::new();
        }
        let col = col.min(self.line_len(row));
        let suffix: String = self.line(row).chars().skip(col).collect();
        let char_idx = self.rope.line_to_char(row) + col;
        self.rope.insert_char(char_idx, '\n');
        self.dirty = true;
        suffix
    }

    /// Append `row` to the line above it and remove `row`.
    ///
    /// Returns the merged line, which now lives at `row - 1`.
    ///
    /// # Errors
    ///
    /// [`EditError::NoLineAbove`] when `row` is 0, and
    /// [`EditError::LineOutOfRange`] when `row` does not exist.
    pub fn join_line_up(&mut self, row: usize) -> Result<String, EditError> {
        if row == 0 {
            return Err(EditError::NoLineAbove);
        }
        let line_count = self.line_count();
        if row >= line_count {
            return Err(EditError::LineOutOfRange { row, line_count });
        }
        let char_idx = self.rope.line_to_char(row);
        self.rope.remove(char_idx - 1..char_idx);
        self.dirty = true;
        Ok(self.line(row - 1))
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for LineBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LineBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("dirty", &self.dirty)
            .finish()
    }
}
