use crate::format::Format;
use crate::storage::SaveError;

pub const EXISTS_MESSAGE: &str = "Note already exists, enter a different name:";
pub const CANNOT_CREATE_MESSAGE: &str = "File could not be created, try different name:";

/// Single-line input asking for the name of a note being saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    message: String,
    input: String,
    /// Char index into `input`.
    cursor: usize,
}

impl Prompt {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            input: String::new(),
            cursor: 0,
        }
    }

    /// First prompt for an unnamed note saved as `format`.
    pub fn for_name(format: Format) -> Self {
        Self::new(name_message(format))
    }

    /// Prompt shown after a failed save.
    pub fn after_error(err: &SaveError) -> Self {
        Self::new(message_for(err))
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Ask again after a failed save, starting from an empty input.
    pub fn retry(&mut self, err: &SaveError) {
        self.message = message_for(err).to_string();
        self.input.clear();
        self.cursor = 0;
    }

    pub fn insert(&mut self, ch: char) {
        let idx = self.byte_index(self.cursor);
        self.input.insert(idx, ch);
        self.cursor += 1;
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.input.remove(idx);
    }

    pub fn delete(&mut self) {
        if self.cursor < self.input.chars().count() {
            let idx = self.byte_index(self.cursor);
            self.input.remove(idx);
        }
    }

    pub const fn left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.input.chars().count());
    }

    fn byte_index(&self, char_idx: usize) -> usize {
        self.input
            .char_indices()
            .nth(char_idx)
            .map_or(self.input.len(), |(idx, _)| idx)
    }
}

/// Message asking for a note name; the extension is appended on save.
pub fn name_message(format: Format) -> String {
    format!(
        "Enter a name for the note ({} will be added automatically):",
        format.file_extension()
    )
}

const fn message_for(err: &SaveError) -> &'static str {
    match err {
        SaveError::FileExists { .. } => EXISTS_MESSAGE,
        SaveError::CannotCreate { .. } => CANNOT_CREATE_MESSAGE,
    }
}
