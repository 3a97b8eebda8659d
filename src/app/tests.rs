use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tempfile::tempdir;
use tracing::Level;

use crate::editor::{Key, Session};
use crate::format::Format;
use crate::note::Note;

use super::{
    App, CANNOT_CREATE_MESSAGE, EXISTS_MESSAGE, Exit, Message, Model, name_message, update,
};

fn create_test_model(dir: PathBuf, target: Option<PathBuf>) -> Model {
    Model::new(Session::new(Format::Markdown), dir, target, (40, 12))
}

/// Log output collected by a test subscriber.
#[derive(Clone, Default)]
struct CapturedLog(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLog {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLog {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

/// Run `f` with a subscriber that records events at WARN and above.
fn with_warn_log<T>(f: impl FnOnce() -> T) -> (T, String) {
    let log = CapturedLog::default();
    let writer = log.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, log.text())
}

fn type_keys(model: &mut Model, text: &str) -> Option<Exit> {
    for ch in text.chars() {
        if let Some(exit) = update(model, Message::Key(Key::Char(ch))) {
            return Some(exit);
        }
    }
    None
}

// --- Saving a new note ---

#[test]
fn test_save_without_target_opens_prompt() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    type_keys(&mut model, "hello");

    assert_eq!(update(&mut model, Message::Key(Key::Save)), None);
    let prompt = model.prompt.as_ref().unwrap();
    assert_eq!(prompt.message(), name_message(Format::Markdown));
    assert!(prompt.message().contains(".md will be added automatically"));
}

#[test]
fn test_prompted_name_saves_with_extension() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    type_keys(&mut model, "hello");
    update(&mut model, Message::Key(Key::Enter));
    type_keys(&mut model, "!tags: a b");
    update(&mut model, Message::Key(Key::Save));

    assert_eq!(type_keys(&mut model, "todo"), None);
    let exit = update(&mut model, Message::Key(Key::Enter)).unwrap();

    let path = dir.path().join("todo.md");
    assert_eq!(exit.saved.as_deref(), Some(path.as_path()));
    assert_eq!(exit.tags.len(), 2);
    assert_eq!(fs::read_to_string(&path).unwrap(), "hello\n!tags: a b");
}

#[test]
fn test_typed_extension_is_not_doubled() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    update(&mut model, Message::Key(Key::Save));
    type_keys(&mut model, "todo.md");
    let exit = update(&mut model, Message::Key(Key::Enter)).unwrap();
    assert_eq!(exit.saved, Some(dir.path().join("todo.md")));
}

#[test]
fn test_existing_name_reprompts() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("todo.md"), "old").unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    type_keys(&mut model, "new");
    update(&mut model, Message::Key(Key::Save));
    type_keys(&mut model, "todo");

    assert_eq!(update(&mut model, Message::Key(Key::Enter)), None);
    let prompt = model.prompt.as_ref().unwrap();
    assert_eq!(prompt.message(), EXISTS_MESSAGE);
    assert_eq!(prompt.input(), "");
    assert_eq!(fs::read_to_string(dir.path().join("todo.md")).unwrap(), "old");

    type_keys(&mut model, "other");
    let exit = update(&mut model, Message::Key(Key::Enter)).unwrap();
    assert_eq!(exit.saved, Some(dir.path().join("other.md")));
}

#[test]
fn test_name_collision_reprompts_without_warning() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("todo.md"), "old").unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    update(&mut model, Message::Key(Key::Save));
    type_keys(&mut model, "todo");

    let (exit, log) = with_warn_log(|| update(&mut model, Message::Key(Key::Enter)));
    assert_eq!(exit, None);
    assert_eq!(model.prompt.as_ref().unwrap().message(), EXISTS_MESSAGE);
    assert!(log.is_empty(), "unexpected log output: {log}");
}

#[test]
fn test_failed_direct_save_reprompts_without_warning() {
    let dir = tempdir().unwrap();
    let target = dir.path().join("missing").join("note.md");
    let mut model = create_test_model(dir.path().to_path_buf(), Some(target));

    let (exit, log) = with_warn_log(|| update(&mut model, Message::Key(Key::Save)));
    assert_eq!(exit, None);
    assert_eq!(model.prompt.as_ref().unwrap().message(), CANNOT_CREATE_MESSAGE);
    assert!(log.is_empty(), "unexpected log output: {log}");
}

#[test]
fn test_plain_note_prompt_names_txt_extension() {
    let dir = tempdir().unwrap();
    let session = Session::new(Format::Plain);
    let mut model = Model::new(session, dir.path().to_path_buf(), None, (40, 12));
    update(&mut model, Message::Key(Key::Save));
    assert!(
        model
            .prompt
            .as_ref()
            .unwrap()
            .message()
            .contains(".txt will be added automatically")
    );

    type_keys(&mut model, "list");
    let exit = update(&mut model, Message::Key(Key::Enter)).unwrap();
    assert_eq!(exit.saved, Some(dir.path().join("list.txt")));
}

#[test]
fn test_uncreatable_file_reprompts() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing");
    let mut model = create_test_model(missing, None);
    update(&mut model, Message::Key(Key::Save));
    type_keys(&mut model, "todo");

    assert_eq!(update(&mut model, Message::Key(Key::Enter)), None);
    assert_eq!(model.prompt.as_ref().unwrap().message(), CANNOT_CREATE_MESSAGE);
}

#[test]
fn test_empty_name_keeps_prompt_open() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    update(&mut model, Message::Key(Key::Save));
    type_keys(&mut model, "   ");
    assert_eq!(update(&mut model, Message::Key(Key::Enter)), None);
    assert_eq!(
        model.prompt.as_ref().unwrap().message(),
        name_message(Format::Markdown)
    );
}

#[test]
fn test_cancel_returns_to_editing() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    type_keys(&mut model, "ab");
    update(&mut model, Message::Key(Key::Save));
    type_keys(&mut model, "x");
    update(&mut model, Message::Cancel);

    assert!(model.prompt.is_none());
    type_keys(&mut model, "c");
    assert_eq!(model.session.lines(), vec!["abc"]);
}

// --- Saving to a known path ---

#[test]
fn test_new_note_with_target_saves_directly() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fresh.md");
    let mut model = create_test_model(dir.path().to_path_buf(), Some(path.clone()));
    type_keys(&mut model, "text");
    let exit = update(&mut model, Message::Key(Key::Save)).unwrap();
    assert_eq!(exit.saved, Some(path.clone()));
    assert_eq!(fs::read_to_string(path).unwrap(), "text");
}

#[test]
fn test_new_note_target_taken_meanwhile_reprompts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("taken.md");
    let mut model = create_test_model(dir.path().to_path_buf(), Some(path.clone()));
    fs::write(&path, "someone else").unwrap();
    assert_eq!(update(&mut model, Message::Key(Key::Save)), None);
    assert_eq!(model.prompt.as_ref().unwrap().message(), EXISTS_MESSAGE);
}

#[test]
fn test_existing_note_is_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("list.txt");
    fs::write(&path, "one").unwrap();
    let session = Session::open(Note::new("list.txt"), &["one"]);
    let mut model = Model::new(session, dir.path().to_path_buf(), Some(path.clone()), (40, 12));

    update(&mut model, Message::Key(Key::Down));
    type_keys(&mut model, "!");
    let exit = update(&mut model, Message::Key(Key::Save)).unwrap();
    assert_eq!(exit.saved, Some(path.clone()));
    assert_eq!(fs::read_to_string(path).unwrap(), "!one");
}

// --- Leaving ---

#[test]
fn test_discard_exits_without_writing() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    type_keys(&mut model, "scratch");
    let exit = update(&mut model, Message::Key(Key::Discard)).unwrap();
    assert_eq!(exit, Exit::discarded());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_exit_summary() {
    assert_eq!(Exit::discarded().summary(), "discarded changes");
    let exit = Exit {
        saved: Some(PathBuf::from("notes/a.md")),
        tags: ["x".to_string(), "y".to_string()].into_iter().collect(),
    };
    assert_eq!(exit.summary(), "saved notes/a.md (tags: x, y)");
}

// --- Layout ---

#[test]
fn test_resize_updates_editor_extent() {
    let dir = tempdir().unwrap();
    let mut model = create_test_model(dir.path().to_path_buf(), None);
    assert_eq!((model.extent.rows, model.extent.cols), (9, 40));
    update(&mut model, Message::Resize(100, 30));
    assert_eq!((model.extent.rows, model.extent.cols), (27, 100));
}

// --- Startup ---

#[test]
fn test_open_session_loads_existing_note() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("plan.md");
    fs::write(&path, "# Plan\n!tags: work").unwrap();

    let session = App::new(Some(path)).open_session().unwrap();
    assert_eq!(session.lines(), vec!["# Plan", "!tags: work"]);
    assert_eq!(session.format(), Format::Markdown);
    let note = session.note().unwrap();
    assert_eq!(note.name(), "plan.md");
    assert!(note.has_tag("work"));
}

#[test]
fn test_open_session_for_missing_file_uses_its_extension() {
    let dir = tempdir().unwrap();
    let session = App::new(Some(dir.path().join("later.txt")))
        .open_session()
        .unwrap();
    assert!(session.note().is_none());
    assert_eq!(session.format(), Format::Plain);
}

#[test]
fn test_open_session_defaults_to_configured_format() {
    let session = App::new(None).with_format(Format::Plain).open_session().unwrap();
    assert_eq!(session.format(), Format::Plain);
    assert_eq!(session.lines(), vec![""]);
}
