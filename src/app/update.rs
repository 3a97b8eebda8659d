use crate::app::{Exit, Model};
use crate::editor::{Key, Outcome};

/// All events the application reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// An editing key, routed to the prompt while one is open.
    Key(Key),
    /// Close the prompt and return to editing.
    Cancel,
    /// Terminal resized to (width, height).
    Resize(u16, u16),
}

/// Apply a message to the model.
///
/// Returns `Some` once the editor should close.
pub fn update(model: &mut Model, msg: Message) -> Option<Exit> {
    match msg {
        Message::Resize(width, height) => {
            model.resize(width, height);
            None
        }
        Message::Cancel => {
            model.prompt = None;
            None
        }
        Message::Key(key) if model.prompt.is_some() => prompt_key(model, key),
        Message::Key(key) => match model.session.handle_key(key, model.extent) {
            Outcome::Continue => None,
            Outcome::Save => model.save(),
            Outcome::Discard => Some(Exit::discarded()),
        },
    }
}

fn prompt_key(model: &mut Model, key: Key) -> Option<Exit> {
    if key == Key::Enter {
        return model.save_as_prompted();
    }
    let prompt = model.prompt.as_mut()?;
    match key {
        Key::Char(ch) if !ch.is_control() => prompt.insert(ch),
        Key::Backspace => prompt.backspace(),
        Key::Delete => prompt.delete(),
        Key::Left => prompt.left(),
        Key::Right => prompt.right(),
        Key::Discard => return Some(Exit::discarded()),
        _ => {}
    }
    None
}
