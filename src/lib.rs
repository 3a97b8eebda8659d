// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditError)
    clippy::module_name_repetitions
)]

//! # Jotter
//!
//! A terminal note editor with markdown highlighting.
//!
//! The editing core is independent of the terminal:
//! - a line buffer addressed by (row, code-point column)
//! - a viewport scrolling over it on two axes, converting between screen
//!   and buffer coordinates
//! - a format engine turning visible rows into per-cell attributes
//!
//! ## Architecture
//!
//! The terminal shell uses The Elm Architecture (TEA) pattern:
//! - **Model**: editing session plus save prompt
//! - **Message**: decoded key and resize events
//! - **Update**: state transitions, including saving
//! - **View**: paint the session onto a [`ui::Screen`] and render it
//!
//! ## Modules
//!
//! - [`editor`]: Line buffer, viewport, and the key-driven session
//! - [`format`]: Plain and markdown display attributes
//! - [`note`]: Note identity and the `!tags:` line
//! - [`storage`]: Loading and saving notes
//! - [`ui`]: Rendering surface and terminal UI
//! - [`app`]: Main application loop and state
//! - [`config`]: Saved command-line defaults

pub mod app;
pub mod config;
pub mod editor;
pub mod format;
pub mod note;
pub mod storage;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Model};
    pub use crate::editor::{Extent, Key, LineBuffer, Session, Viewport};
    pub use crate::format::Format;
}
