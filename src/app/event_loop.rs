use std::path::Path;

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Exit, Model, input, update};
use crate::editor::Session;
use crate::format::Format;
use crate::note::Note;
use crate::storage;

impl App {
    /// Run the editor until the note is saved or discarded.
    ///
    /// # Errors
    ///
    /// Returns an error if the note cannot be loaded, the terminal cannot
    /// be initialized, or reading terminal events fails.
    pub fn run(&mut self) -> Result<Exit> {
        let session = self.open_session()?;

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal; jotter requires an interactive terminal")?;
        let size = terminal.size()?;
        let mut model = Model::new(
            session,
            self.notes_dir.clone(),
            self.file.clone(),
            (size.width, size.height),
        );

        let result = Self::event_loop(&mut terminal, &mut model);
        ratatui::restore();
        result
    }

    /// Load the note named on the command line, or start a new one.
    pub(super) fn open_session(&self) -> Result<Session> {
        let session = match self.file.as_deref() {
            Some(path) if path.exists() => {
                let lines = storage::load_lines(path)?;
                let name = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                let note = Note::new(name).with_tags_from_line(lines.last().map_or("", String::as_str));
                info!(path = %path.display(), tags = note.tags().len(), "editing existing note");
                Session::open(note, &lines)
            }
            Some(path) => {
                debug!(path = %path.display(), "starting new note at path");
                Session::new(self.format_for_new(path))
            }
            None => Session::new(self.format),
        };
        Ok(session
            .with_tab_width(self.tab_width)
            .with_color(self.color))
    }

    fn format_for_new(&self, path: &Path) -> Format {
        if path.extension().is_some() {
            Format::from_path(path)
        } else {
            self.format
        }
    }

    fn event_loop(terminal: &mut DefaultTerminal, model: &mut Model) -> Result<Exit> {
        loop {
            terminal.draw(|frame| crate::ui::render(model, frame))?;

            let event = event::read().context("Failed to read terminal event")?;
            let size = terminal.size()?;
            model.resize(size.width, size.height);

            if let Some(msg) = input::handle_event(&event) {
                if let Some(exit) = update(model, msg) {
                    return Ok(exit);
                }
            }
        }
    }
}
