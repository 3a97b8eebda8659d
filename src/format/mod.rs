//! Display formatting of the visible window.
//!
//! A [`Format`] is chosen once per note from its file extension and turns
//! each visible row into a list of [`CellAttribute`]s. Formatting never
//! changes the text itself.

mod markdown;

use std::path::Path;

use crate::editor::{Extent, LineBuffer, Viewport};

/// Semantic colors used by markdown formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Palette {
    /// Leading `*`/`-` of a bullet list item.
    Bullet,
    /// Whole heading line, by level (1..=5).
    Heading(u8),
    /// Leading `>` of a quote.
    Quote,
    /// The `N. ` prefix of a numbered list item.
    NumberedList,
    /// Whole horizontal-rule line.
    Rule,
}

/// Display attribute for a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Color(Palette),
    Bold,
    Italic,
}

/// An attribute applied to one screen column of a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellAttribute {
    pub col: usize,
    pub attribute: Attribute,
}

impl CellAttribute {
    pub const fn new(col: usize, attribute: Attribute) -> Self {
        Self { col, attribute }
    }
}

/// How a note is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
    /// Plain text, no attributes.
    #[default]
    Plain,
    /// Markdown line classes and inline emphasis.
    Markdown,
}

impl Format {
    /// Pick a format from a file extension (with or without the dot).
    pub fn from_extension(ext: &str) -> Self {
        match ext.trim_start_matches('.') {
            "md" => Self::Markdown,
            _ => Self::Plain,
        }
    }

    /// Pick a format from a file path's extension.
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|ext| ext.to_str())
            .map_or(Self::Plain, Self::from_extension)
    }

    /// File extension associated with the format, including the dot.
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::Plain => ".txt",
            Self::Markdown => ".md",
        }
    }

    /// Whether the format is only readable with color support.
    pub const fn needs_color(self) -> bool {
        matches!(self, Self::Markdown)
    }

    /// Attributes for one visible row, ordered by screen column.
    ///
    /// Only cells inside the window are returned, so the result stays
    /// correct under any horizontal scroll.
    pub fn line_attributes(
        self,
        buffer: &LineBuffer,
        viewport: &Viewport,
        extent: Extent,
        screen_row: usize,
    ) -> Vec<CellAttribute> {
        match self {
            Self::Plain => Vec::new(),
            Self::Markdown => markdown::line_attributes(buffer, viewport, extent, screen_row),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_extension(".md"), Format::Markdown);
        assert_eq!(Format::from_extension("md"), Format::Markdown);
        assert_eq!(Format::from_extension(".txt"), Format::Plain);
        assert_eq!(Format::from_extension("rs"), Format::Plain);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(Format::from_path(Path::new("notes/todo.md")), Format::Markdown);
        assert_eq!(Format::from_path(Path::new("notes/todo.txt")), Format::Plain);
        assert_eq!(Format::from_path(Path::new("README")), Format::Plain);
    }

    #[test]
    fn test_file_extension_round_trips() {
        for format in [Format::Plain, Format::Markdown] {
            assert_eq!(Format::from_extension(format.file_extension()), format);
        }
    }

    #[test]
    fn test_only_markdown_needs_color() {
        assert!(Format::Markdown.needs_color());
        assert!(!Format::Plain.needs_color());
    }

    #[test]
    fn test_plain_has_no_attributes() {
        let buf = LineBuffer::from_text("# heading\n**bold**");
        let vp = Viewport::new();
        let extent = Extent::new(10, 40);
        assert!(Format::Plain.line_attributes(&buf, &vp, extent, 0).is_empty());
        assert!(Format::Plain.line_attributes(&buf, &vp, extent, 1).is_empty());
    }
}
