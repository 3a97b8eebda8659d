use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::Message;
use crate::editor::Key;

/// Translate a terminal event into a message.
pub fn handle_event(event: &Event) -> Option<Message> {
    match event {
        Event::Key(key) => handle_key(key),
        Event::Resize(width, height) => Some(Message::Resize(*width, *height)),
        _ => None,
    }
}

fn handle_key(key: &KeyEvent) -> Option<Message> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let editing = match key.code {
        KeyCode::F(1) => Key::Save,
        KeyCode::F(2) => Key::Discard,
        KeyCode::Esc => return Some(Message::Cancel),
        KeyCode::Char(_) if key.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) => {
            return None;
        }
        KeyCode::Char(ch) => Key::Char(ch),
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Delete => Key::Delete,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Enter => Key::Enter,
        KeyCode::Tab => Key::Tab,
        _ => return None,
    };
    Some(Message::Key(editing))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_function_keys_save_and_discard() {
        assert_eq!(handle_event(&press(KeyCode::F(1))), Some(Message::Key(Key::Save)));
        assert_eq!(handle_event(&press(KeyCode::F(2))), Some(Message::Key(Key::Discard)));
    }

    #[test]
    fn test_printable_and_editing_keys() {
        assert_eq!(handle_event(&press(KeyCode::Char('x'))), Some(Message::Key(Key::Char('x'))));
        assert_eq!(handle_event(&press(KeyCode::Enter)), Some(Message::Key(Key::Enter)));
        assert_eq!(handle_event(&press(KeyCode::Tab)), Some(Message::Key(Key::Tab)));
        assert_eq!(handle_event(&press(KeyCode::Esc)), Some(Message::Cancel));
    }

    #[test]
    fn test_shifted_characters_pass_through() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT));
        assert_eq!(handle_event(&event), Some(Message::Key(Key::Char('A'))));
    }

    #[test]
    fn test_control_chords_are_ignored() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
        assert_eq!(handle_event(&event), None);
        assert_eq!(handle_event(&press(KeyCode::PageDown)), None);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let mut key = KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE);
        key.kind = KeyEventKind::Release;
        assert_eq!(handle_event(&Event::Key(key)), None);
    }

    #[test]
    fn test_resize_event() {
        assert_eq!(handle_event(&Event::Resize(80, 24)), Some(Message::Resize(80, 24)));
    }
}
