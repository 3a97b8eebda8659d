//! Editing core: the line buffer, its scrolling viewport, and the session
//! that turns keystrokes into edits.

mod buffer;
mod session;
mod viewport;

pub use buffer::{EditError, LineBuffer};
pub use session::{Key, Outcome, Session};
pub use viewport::{Extent, GlobalPos, JoinedLine, ScreenPos, Vertical, VerticalMove, Viewport};
