//! Application state and main event loop.
//!
//! Follows The Elm Architecture (TEA):
//! - [`Model`]: the editing session plus the save prompt
//! - [`Message`]: decoded terminal events
//! - [`update`]: state transitions, including saving
//! - [`App::run`]: terminal setup and the event loop

mod event_loop;
mod input;
mod model;
mod prompt;
mod update;

pub use input::handle_event;
pub use model::{Exit, Model};
pub use prompt::{CANNOT_CREATE_MESSAGE, EXISTS_MESSAGE, Prompt, name_message};
pub use update::{Message, update};

use std::path::PathBuf;

use crate::format::Format;

const DEFAULT_TAB_WIDTH: usize = 4;

/// Main application struct that owns the terminal and runs the event loop.
#[derive(Debug)]
pub struct App {
    file: Option<PathBuf>,
    notes_dir: PathBuf,
    format: Format,
    tab_width: usize,
    color: bool,
}

impl App {
    /// Edit `file`, or start an unnamed note when `None`.
    pub fn new(file: Option<PathBuf>) -> Self {
        Self {
            file,
            notes_dir: PathBuf::from("."),
            format: Format::Markdown,
            tab_width: DEFAULT_TAB_WIDTH,
            color: true,
        }
    }

    /// Directory unnamed notes are saved into.
    pub fn with_notes_dir(mut self, dir: PathBuf) -> Self {
        self.notes_dir = dir;
        self
    }

    /// Format of new notes whose name carries no extension.
    pub const fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    pub const fn with_tab_width(mut self, width: usize) -> Self {
        self.tab_width = width;
        self
    }

    /// Enable or disable colored formatting.
    pub const fn with_color(mut self, enabled: bool) -> Self {
        self.color = enabled;
        self
    }
}

#[cfg(test)]
mod tests;
