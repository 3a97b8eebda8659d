use crate::format::{Attribute, CellAttribute};

use super::Surface;

/// Visible window contents plus the attributes painted onto them.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Screen {
    lines: Vec<String>,
    attributes: Vec<Vec<CellAttribute>>,
}

impl Screen {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Attributes of one row in the order they were set. Rows without text
    /// have none.
    pub fn attributes(&self, row: usize) -> &[CellAttribute] {
        self.attributes.get(row).map(Vec::as_slice).unwrap_or_default()
    }
}

impl Surface for Screen {
    fn draw_visible_lines(&mut self, lines: &[String]) {
        self.lines = lines.to_vec();
        self.attributes = vec![Vec::new(); lines.len()];
    }

    fn set_cell_attribute(&mut self, row: usize, col: usize, attribute: Attribute) {
        if let Some(cells) = self.attributes.get_mut(row) {
            cells.push(CellAttribute::new(col, attribute));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::Palette;

    #[test]
    fn test_draw_replaces_lines_and_clears_attributes() {
        let mut screen = Screen::default();
        screen.draw_visible_lines(&["one".to_string(), "two".to_string()]);
        screen.set_cell_attribute(1, 0, Attribute::Bold);
        assert_eq!(screen.attributes(1), &[CellAttribute::new(0, Attribute::Bold)]);

        screen.draw_visible_lines(&["three".to_string()]);
        assert_eq!(screen.lines(), &["three".to_string()]);
        assert!(screen.attributes(0).is_empty());
        assert!(screen.attributes(1).is_empty());
    }

    #[test]
    fn test_attributes_outside_window_are_dropped() {
        let mut screen = Screen::default();
        screen.draw_visible_lines(&["x".to_string()]);
        screen.set_cell_attribute(4, 0, Attribute::Color(Palette::Rule));
        assert!(screen.attributes(4).is_empty());
    }
}
