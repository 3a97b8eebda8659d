use jotter::editor::{Extent, Key, Session};
use jotter::format::Format;
use jotter::note::Note;
use jotter::storage::{SaveError, force_save_lines, load_lines, note_path, save_lines};

#[test]
fn test_edited_note_survives_save_and_reload() {
    let dir = tempfile::tempdir().unwrap();
    let extent = Extent::new(10, 40);
    let mut session = Session::new(Format::Markdown);
    for key in "# Groceries".chars().map(Key::Char) {
        session.handle_key(key, extent);
    }
    session.handle_key(Key::Enter, extent);
    session.handle_key(Key::Enter, extent);
    for key in "!tags: home".chars().map(Key::Char) {
        session.handle_key(key, extent);
    }

    let path = note_path(dir.path(), "groceries", session.format());
    save_lines(&path, &session.lines()).unwrap();

    let lines = load_lines(&path).unwrap();
    assert_eq!(lines, vec!["# Groceries", "", "!tags: home"]);

    let note = Note::new("groceries.md").with_tags_from_line(lines.last().unwrap());
    let reopened = Session::open(note, &lines);
    assert_eq!(reopened.lines(), session.lines());
    assert_eq!(reopened.format(), Format::Markdown);
    assert!(reopened.note().unwrap().has_tag("home"));
}

#[test]
fn test_trailing_newline_is_an_empty_last_line() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("n.txt");
    std::fs::write(&path, "a\nb\n").unwrap();
    let lines = load_lines(&path).unwrap();
    assert_eq!(lines, vec!["a", "b", ""]);

    force_save_lines(&path, &lines).unwrap();
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "a\nb\n");
}

#[test]
fn test_second_new_save_reports_collision() {
    let dir = tempfile::tempdir().unwrap();
    let path = note_path(dir.path(), "dup", Format::Plain);
    save_lines(&path, &["first"]).unwrap();

    let err = save_lines(&path, &["second"]).unwrap_err();
    assert!(matches!(err, SaveError::FileExists { .. }));
    assert_eq!(load_lines(&path).unwrap(), vec!["first"]);
}
