//! Terminal UI components.
//!
//! - [`Surface`]: where the editor paints its visible window
//! - [`Screen`]: in-memory surface that ratatui renders from
//! - [`style`]: colors and modifiers for display attributes

pub mod style;

mod render;
mod screen;

pub use render::{CONTROLS_HEIGHT, editor_extent, render, split_areas};
pub use screen::Screen;

use crate::format::Attribute;

/// Drawing target of an editing session.
///
/// A frame is painted by one call to
/// [`draw_visible_lines`](Surface::draw_visible_lines) followed by any
/// number of [`set_cell_attribute`](Surface::set_cell_attribute) calls.
pub trait Surface {
    /// Replace the window contents, row 0 first. Clears all attributes.
    fn draw_visible_lines(&mut self, lines: &[String]);

    /// Apply `attribute` to the cell at screen `(row, col)`.
    fn set_cell_attribute(&mut self, row: usize, col: usize, attribute: Attribute);
}
