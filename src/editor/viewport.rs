//! Scrolling window over a [`LineBuffer`].
//!
//! The [`Viewport`] owns the two scroll offsets. The size of the editing
//! window is not cached: callers read it from the terminal once per input
//! cycle and pass it in as an [`Extent`].
//!
//! Screen coordinates are relative to the top-left cell of the window,
//! global coordinates are relative to the start of the buffer:
//!
//! ```
//! use jotter::editor::{Extent, GlobalPos, ScreenPos, Viewport};
//!
//! let mut vp = Viewport::new();
//! vp.scroll_right();
//! let global = vp.to_global(ScreenPos::new(2, 3));
//! assert_eq!(global, GlobalPos::new(2, 4));
//! assert!(vp.is_visible(global, Extent::new(10, 20)));
//! ```

use super::buffer::{EditError, LineBuffer};

/// Size of the editing window in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Extent {
    /// Number of rows in the window.
    pub rows: usize,
    /// Number of columns in the window.
    pub cols: usize,
}

impl Extent {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Index of the bottom row.
    pub const fn last_row(self) -> usize {
        self.rows.saturating_sub(1)
    }

    /// Index of the rightmost column.
    pub const fn last_col(self) -> usize {
        self.cols.saturating_sub(1)
    }
}

/// A cell position relative to the visible window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenPos {
    pub row: usize,
    pub col: usize,
}

impl ScreenPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// A position relative to the start of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GlobalPos {
    pub row: usize,
    pub col: usize,
}

impl GlobalPos {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

/// Direction of a vertical cursor move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Vertical {
    Up,
    Down,
}

/// Where the cursor lands after a vertical move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerticalMove {
    /// Screen row of the destination line.
    pub row: usize,
    /// Screen column on the destination line.
    pub col: usize,
    /// The offsets changed and the whole window must be redrawn.
    pub redraw: bool,
}

/// Result of joining a line onto the one above it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinedLine {
    /// Content of the merged line.
    pub text: String,
    /// Screen row the merged line now occupies.
    pub row: usize,
}

/// Vertical and horizontal scroll state.
///
/// A single horizontal offset applies to every row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    row_offset: usize,
    col_offset: usize,
}

impl Viewport {
    /// A viewport scrolled to the top-left corner.
    pub const fn new() -> Self {
        Self {
            row_offset: 0,
            col_offset: 0,
        }
    }

    /// Number of rows scrolled past.
    pub const fn row_offset(&self) -> usize {
        self.row_offset
    }

    /// Number of columns scrolled past.
    pub const fn col_offset(&self) -> usize {
        self.col_offset
    }

    // --- Coordinate conversion ---

    pub const fn to_global(&self, screen: ScreenPos) -> GlobalPos {
        GlobalPos::new(screen.row + self.row_offset, screen.col + self.col_offset)
    }

    /// Convert a global position to the window, or `None` when it lies above
    /// or left of the scrolled-in region.
    pub const fn to_screen(&self, global: GlobalPos) -> Option<ScreenPos> {
        match (
            global.row.checked_sub(self.row_offset),
            global.col.checked_sub(self.col_offset),
        ) {
            (Some(row), Some(col)) => Some(ScreenPos::new(row, col)),
            _ => None,
        }
    }

    /// Whether a global position falls inside the window on both axes.
    pub const fn is_visible(&self, global: GlobalPos, extent: Extent) -> bool {
        global.row >= self.row_offset
            && global.row < self.row_offset + extent.rows
            && global.col >= self.col_offset
            && global.col < self.col_offset + extent.cols
    }

    // --- Scroll queries ---

    pub const fn can_scroll_up(&self) -> bool {
        self.row_offset > 0
    }

    /// Whether buffer lines exist below the window.
    ///
    /// With `account_for_new_line`, the answer predicts the state after one
    /// more line is added (an Enter keypress), so it is true one row earlier.
    pub fn can_scroll_down(
        &self,
        buffer: &LineBuffer,
        extent: Extent,
        account_for_new_line: bool,
    ) -> bool {
        let lines = buffer.line_count() + usize::from(account_for_new_line);
        lines > self.row_offset + extent.rows
    }

    pub const fn can_scroll_left(&self) -> bool {
        self.col_offset > 0
    }

    /// Whether the line on `screen_row` continues past the right edge.
    ///
    /// A line ending exactly at the edge still counts, since the cursor may
    /// sit one cell past its last character.
    pub fn can_scroll_line_right(
        &self,
        buffer: &LineBuffer,
        extent: Extent,
        screen_row: usize,
    ) -> bool {
        self.col_offset + extent.cols <= buffer.line_len(self.row_offset + screen_row)
    }

    /// Whether a character exists under the cursor, so it may step right.
    pub fn can_move_right(&self, buffer: &LineBuffer, cursor: ScreenPos) -> bool {
        let global = self.to_global(cursor);
        global.col < buffer.line_len(global.row)
    }

    // --- Scrolling ---

    /// Scroll one row up and return the line revealed at the top.
    pub fn scroll_up(&mut self, buffer: &LineBuffer) -> String {
        self.row_offset = self.row_offset.saturating_sub(1);
        buffer.line(self.row_offset)
    }

    /// Scroll one row down and return the line revealed at the bottom.
    ///
    /// When the bottom row is past the end of the buffer, the last line is
    /// returned.
    pub fn scroll_down(&mut self, buffer: &LineBuffer, extent: Extent) -> String {
        self.row_offset += 1;
        let bottom = self.row_offset + extent.last_row();
        if bottom < buffer.line_count() {
            buffer.line(bottom)
        } else {
            buffer.last_line()
        }
    }

    pub const fn scroll_left(&mut self) {
        self.col_offset = self.col_offset.saturating_sub(1);
    }

    pub const fn scroll_right(&mut self) {
        self.col_offset += 1;
    }

    /// Scroll back to the left edge.
    pub const fn reset_horizontal(&mut self) {
        self.col_offset = 0;
    }

    /// Place `global_col` near the horizontal middle of the window.
    ///
    /// Returns the screen column `global_col` ends up on.
    pub const fn recenter_horizontally_around(&mut self, global_col: usize, extent: Extent) -> usize {
        self.col_offset = global_col.saturating_sub(extent.cols / 2);
        global_col - self.col_offset
    }

    // --- Cursor movement ---

    /// Work out where the cursor lands when moving one line up or down.
    ///
    /// Returns `None` when the move is impossible: above the first line of
    /// the buffer, or below its last line. When the cursor sits on the top or
    /// bottom row and the buffer continues, the view scrolls by one row.
    ///
    /// The column is kept where possible. A destination line that ends before
    /// the cursor's global column pulls the cursor to its end; a destination
    /// line that ends left of the horizontal offset scrolls the view back so
    /// its end is just visible.
    pub fn move_cursor_vertically(
        &mut self,
        buffer: &LineBuffer,
        extent: Extent,
        direction: Vertical,
        cursor: ScreenPos,
    ) -> Option<VerticalMove> {
        let mut redraw = false;
        let row = match direction {
            Vertical::Up => {
                if cursor.row == 0 && !self.can_scroll_up() {
                    return None;
                }
                if cursor.row == 0 {
                    self.row_offset -= 1;
                    redraw = true;
                    0
                } else {
                    cursor.row - 1
                }
            }
            Vertical::Down => {
                let at_bottom = cursor.row == extent.last_row();
                if (at_bottom && !self.can_scroll_down(buffer, extent, false))
                    || self.row_offset + cursor.row + 1 >= buffer.line_count()
                {
                    return None;
                }
                if at_bottom {
                    self.row_offset += 1;
                    redraw = true;
                    cursor.row
                } else {
                    cursor.row + 1
                }
            }
        };

        let len = buffer.line_len(self.row_offset + row);
        let col = self.snap_column(len, cursor.col, extent, &mut redraw);
        Some(VerticalMove { row, col, redraw })
    }

    fn snap_column(&mut self, len: usize, col: usize, extent: Extent, redraw: &mut bool) -> usize {
        if len < self.col_offset {
            *redraw = true;
            self.col_offset = (len + 1).saturating_sub(extent.cols);
            return len - self.col_offset;
        }
        if len < col + self.col_offset {
            return len - self.col_offset;
        }
        col
    }

    // --- Line editing in screen coordinates ---

    /// Split the line under the cursor (Enter).
    ///
    /// The view always returns to the left edge afterwards. Returns the
    /// content of the new line.
    pub fn split_line(&mut self, buffer: &mut LineBuffer, cursor: ScreenPos) -> String {
        let global = self.to_global(cursor);
        let moved = buffer.split_line_at(global.row, global.col);
        self.reset_horizontal();
        moved
    }

    /// Join the line on `screen_row` onto the line above it.
    ///
    /// On the top row the view scrolls up so the merged line stays visible.
    ///
    /// # Errors
    ///
    /// [`EditError::NoLineAbove`] on the top row of an unscrolled view; the
    /// caller is expected to check [`can_scroll_up`](Self::can_scroll_up)
    /// first. [`EditError::LineOutOfRange`] when the row has no line.
    pub fn join_line_up(
        &mut self,
        buffer: &mut LineBuffer,
        screen_row: usize,
    ) -> Result<JoinedLine, EditError> {
        if screen_row == 0 && !self.can_scroll_up() {
            return Err(EditError::NoLineAbove);
        }
        let text = buffer.join_line_up(self.row_offset + screen_row)?;
        let row = if screen_row == 0 {
            self.row_offset -= 1;
            0
        } else {
            screen_row - 1
        };
        Ok(JoinedLine { text, row })
    }

    // --- Rendering ---

    /// The lines currently in the window, each cut to the visible columns.
    ///
    /// Lines that end left of the horizontal offset come back empty. Rows
    /// past the end of the buffer are not included.
    pub fn visible_window(&self, buffer: &LineBuffer, extent: Extent) -> Vec<String> {
        let end = (self.row_offset + extent.rows).min(buffer.line_count());
        (self.row_offset..end)
            .map(|row| {
                buffer
                    .line(row)
                    .chars()
                    .skip(self.col_offset)
                    .take(extent.cols)
                    .collect()
            })
            .collect()
    }
}
