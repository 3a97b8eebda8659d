use std::collections::BTreeSet;
use std::path::PathBuf;

use ratatui::layout::Rect;
use tracing::{debug, info};

use crate::editor::{Extent, Session};
use crate::storage::{self, SaveError};

use super::prompt::Prompt;

/// How the editor was left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exit {
    /// Where the note was written, `None` when changes were discarded.
    pub saved: Option<PathBuf>,
    /// Tags of the saved note.
    pub tags: BTreeSet<String>,
}

impl Exit {
    pub const fn discarded() -> Self {
        Self {
            saved: None,
            tags: BTreeSet::new(),
        }
    }

    /// One-line description for the terminal after the editor closes.
    pub fn summary(&self) -> String {
        match &self.saved {
            None => "discarded changes".to_string(),
            Some(path) if self.tags.is_empty() => format!("saved {}", path.display()),
            Some(path) => format!(
                "saved {} (tags: {})",
                path.display(),
                self.tags.iter().cloned().collect::<Vec<_>>().join(", ")
            ),
        }
    }
}

/// The complete application state.
#[derive(Debug)]
pub struct Model {
    pub session: Session,
    /// Active name prompt; keys go to it instead of the editor.
    pub prompt: Option<Prompt>,
    /// Directory new notes are saved into.
    pub notes_dir: PathBuf,
    /// File the note is saved to without asking for a name.
    pub target: Option<PathBuf>,
    /// Size of the editing window.
    pub extent: Extent,
}

impl Model {
    pub fn new(
        session: Session,
        notes_dir: PathBuf,
        target: Option<PathBuf>,
        size: (u16, u16),
    ) -> Self {
        Self {
            session,
            prompt: None,
            notes_dir,
            target,
            extent: crate::ui::editor_extent(Rect::new(0, 0, size.0, size.1)),
        }
    }

    /// Track a new terminal size.
    pub fn resize(&mut self, width: u16, height: u16) {
        let extent = crate::ui::editor_extent(Rect::new(0, 0, width, height));
        if extent != self.extent {
            debug!(rows = extent.rows, cols = extent.cols, "editor resized");
            self.extent = extent;
        }
    }

    /// Save to the known target, or ask for a name if there is none.
    ///
    /// Existing notes are overwritten in place; a new note never replaces
    /// a file that is already there.
    pub(super) fn save(&mut self) -> Option<Exit> {
        let Some(path) = self.target.clone() else {
            self.prompt = Some(Prompt::for_name(self.session.format()));
            return None;
        };
        let lines = self.session.lines();
        let result = if self.session.note().is_some() {
            storage::force_save_lines(&path, &lines)
        } else {
            storage::save_lines(&path, &lines)
        };
        match result {
            Ok(()) => Some(self.saved(path)),
            Err(err) => {
                log_save_retry(&err);
                self.prompt = Some(Prompt::after_error(&err));
                None
            }
        }
    }

    /// Save under the name typed into the prompt.
    pub(super) fn save_as_prompted(&mut self) -> Option<Exit> {
        let name = self.prompt.as_ref()?.input().trim().to_string();
        if name.is_empty() {
            return None;
        }
        let format = self.session.format();
        let stem = name.strip_suffix(format.file_extension()).unwrap_or(&name);
        let path = storage::note_path(&self.notes_dir, stem, format);
        match storage::save_lines(&path, &self.session.lines()) {
            Ok(()) => Some(self.saved(path)),
            Err(err) => {
                self.report_prompt_error(&err);
                None
            }
        }
    }

    fn report_prompt_error(&mut self, err: &SaveError) {
        log_save_retry(err);
        if let Some(prompt) = self.prompt.as_mut() {
            prompt.retry(err);
        }
    }

    fn saved(&self, path: PathBuf) -> Exit {
        let tags = self.session.tags();
        info!(path = %path.display(), tags = tags.len(), "note saved");
        Exit {
            saved: Some(path),
            tags,
        }
    }
}

/// A failed save re-prompts, so it logs below the default warn level.
fn log_save_retry(err: &SaveError) {
    if err.is_file_exists() {
        debug!(%err, "name taken, asking again");
    } else {
        info!(%err, "note could not be created, asking again");
    }
}
