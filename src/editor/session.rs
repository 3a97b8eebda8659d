use std::collections::BTreeSet;

use tracing::{debug, trace, warn};

use crate::format::Format;
use crate::note::{Note, parse_tags};
use crate::ui::Surface;

use super::buffer::LineBuffer;
use super::viewport::{Extent, ScreenPos, Vertical, Viewport};

const DEFAULT_TAB_WIDTH: usize = 4;

/// Editor input, already decoded from terminal events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Left,
    Right,
    Up,
    Down,
    Delete,
    Backspace,
    Enter,
    Tab,
    /// Save and leave the editor.
    Save,
    /// Leave without saving.
    Discard,
}

/// What the caller should do after a key was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Save,
    Discard,
}

/// One editing session over a single note.
///
/// The cursor is kept in screen coordinates; the viewport maps it onto the
/// buffer. Every key runs to completion before the next one is read, and
/// the window size is passed in fresh with each key since the terminal can
/// be resized between keystrokes.
#[derive(Debug)]
pub struct Session {
    buffer: LineBuffer,
    viewport: Viewport,
    cursor: ScreenPos,
    format: Format,
    color: bool,
    tab_width: usize,
    note: Option<Note>,
}

impl Session {
    /// Start an empty, unsaved note.
    pub fn new(format: Format) -> Self {
        Self {
            buffer: LineBuffer::new(),
            viewport: Viewport::new(),
            cursor: ScreenPos::default(),
            format,
            color: true,
            tab_width: DEFAULT_TAB_WIDTH,
            note: None,
        }
    }

    /// Edit an existing note with its loaded lines.
    pub fn open<S: AsRef<str>>(note: Note, lines: &[S]) -> Self {
        debug!(note = note.name(), lines = lines.len(), "opening note");
        Self {
            buffer: LineBuffer::from_lines(lines),
            format: note.format(),
            note: Some(note),
            ..Self::new(Format::Plain)
        }
    }

    /// Spaces inserted by the Tab key.
    #[must_use]
    pub fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Whether the terminal may show colors. Formats that depend on color
    /// render without attributes when it may not.
    #[must_use]
    pub const fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }

    pub const fn buffer(&self) -> &LineBuffer {
        &self.buffer
    }

    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub const fn cursor(&self) -> ScreenPos {
        self.cursor
    }

    pub const fn format(&self) -> Format {
        self.format
    }

    /// The note being edited, or `None` for a new note.
    pub const fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    /// All lines of the document, for saving.
    pub fn lines(&self) -> Vec<String> {
        self.buffer.lines()
    }

    /// Tags from the document's last line.
    pub fn tags(&self) -> BTreeSet<String> {
        parse_tags(&self.buffer.last_line())
    }

    /// Apply one key.
    pub fn handle_key(&mut self, key: Key, extent: Extent) -> Outcome {
        self.fit_cursor(extent);
        trace!(?key, cursor = ?self.cursor, "key");
        match key {
            Key::Char(ch) => {
                if !ch.is_control() {
                    self.insert(ch, extent);
                }
            }
            Key::Tab => {
                for _ in 0..self.tab_width {
                    self.insert(' ', extent);
                }
            }
            Key::Left => self.left(),
            Key::Right => self.right(extent),
            Key::Up => self.vertical(Vertical::Up, extent),
            Key::Down => self.vertical(Vertical::Down, extent),
            Key::Delete => {
                let global = self.viewport.to_global(self.cursor);
                self.buffer.delete_char(global.row, global.col);
            }
            Key::Backspace => self.backspace(extent),
            Key::Enter => self.enter(extent),
            Key::Save => return Outcome::Save,
            Key::Discard => return Outcome::Discard,
        }
        Outcome::Continue
    }

    /// Draw the visible window and its formatting onto `surface`.
    pub fn paint<S: Surface>(&self, surface: &mut S, extent: Extent) {
        let window = self.viewport.visible_window(&self.buffer, extent);
        surface.draw_visible_lines(&window);
        let format = self.active_format();
        for row in 0..window.len() {
            for cell in format.line_attributes(&self.buffer, &self.viewport, extent, row) {
                surface.set_cell_attribute(row, cell.col, cell.attribute);
            }
        }
    }

    const fn active_format(&self) -> Format {
        if !self.color && self.format.needs_color() {
            Format::Plain
        } else {
            self.format
        }
    }

    /// Pull the cursor back inside a window that shrank.
    fn fit_cursor(&mut self, extent: Extent) {
        self.cursor.row = self.cursor.row.min(extent.last_row());
        self.cursor.col = self.cursor.col.min(extent.last_col());
    }

    fn insert(&mut self, ch: char, extent: Extent) {
        let global = self.viewport.to_global(self.cursor);
        self.buffer.insert_char(global.row, global.col, ch);
        if self.cursor.col == extent.last_col() {
            self.right(extent);
        } else {
            self.cursor.col += 1;
        }
    }

    fn right(&mut self, extent: Extent) {
        let at_edge = self.cursor.col == extent.last_col();
        if !at_edge && self.viewport.can_move_right(&self.buffer, self.cursor) {
            self.cursor.col += 1;
        } else if at_edge
            && self
                .viewport
                .can_scroll_line_right(&self.buffer, extent, self.cursor.row)
        {
            self.viewport.scroll_right();
        }
    }

    fn left(&mut self) {
        if self.cursor.col > 0 {
            self.cursor.col -= 1;
        } else if self.viewport.can_scroll_left() {
            self.viewport.scroll_left();
        }
    }

    fn vertical(&mut self, direction: Vertical, extent: Extent) {
        if let Some(moved) =
            self.viewport
                .move_cursor_vertically(&self.buffer, extent, direction, self.cursor)
        {
            self.cursor = ScreenPos::new(moved.row, moved.col);
        }
    }

    fn backspace(&mut self, extent: Extent) {
        if self.cursor.col == 0 && !self.viewport.can_scroll_left() {
            if self.cursor.row == 0 && !self.viewport.can_scroll_up() {
                return;
            }
            let above = self.viewport.to_global(self.cursor).row - 1;
            let end = self.buffer.line_len(above);
            match self.viewport.join_line_up(&mut self.buffer, self.cursor.row) {
                Ok(joined) => {
                    let col = if end >= extent.cols {
                        self.viewport.recenter_horizontally_around(end, extent)
                    } else {
                        end
                    };
                    self.cursor = ScreenPos::new(joined.row, col);
                }
                Err(err) => warn!(%err, cursor = ?self.cursor, "join rejected"),
            }
            return;
        }

        if self.cursor.col == 0 {
            self.viewport.scroll_left();
        } else {
            self.cursor.col -= 1;
        }
        let global = self.viewport.to_global(self.cursor);
        self.buffer.delete_char(global.row, global.col);
    }

    fn enter(&mut self, extent: Extent) {
        let scrolls = self.cursor.row == extent.last_row()
            && self.viewport.can_scroll_down(&self.buffer, extent, true);
        self.viewport.split_line(&mut self.buffer, self.cursor);
        let row = if scrolls {
            self.viewport.scroll_down(&self.buffer, extent);
            self.cursor.row
        } else {
            (self.cursor.row + 1).min(extent.last_row())
        };
        self.cursor = ScreenPos::new(row, 0);
    }
}
