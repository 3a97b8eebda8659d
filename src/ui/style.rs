//! Theming and color definitions.
//!
//! Markdown colors are fixed RGB values so headings keep their warm
//! gradient regardless of the terminal palette.

use ratatui::style::{Color, Modifier, Style};

use crate::format::{Attribute, Palette};

/// Foreground color for a palette entry.
pub const fn palette_color(palette: Palette) -> Color {
    match palette {
        // Headings fade from red to orange as the level grows
        Palette::Heading(1) => Color::Rgb(255, 38, 0),
        Palette::Heading(2) => Color::Rgb(255, 99, 71),
        Palette::Heading(3) => Color::Rgb(255, 127, 80),
        Palette::Heading(4) => Color::Rgb(255, 140, 0),
        Palette::Heading(_) => Color::Rgb(255, 165, 0),
        Palette::Bullet => Color::Rgb(5, 250, 70),
        Palette::Quote => Color::Rgb(204, 0, 255),
        Palette::NumberedList => Color::Rgb(2, 245, 212),
        Palette::Rule => Color::Rgb(128, 128, 128),
    }
}

/// Layer one attribute on top of an existing style.
pub fn apply_attribute(style: Style, attribute: Attribute) -> Style {
    match attribute {
        Attribute::Color(palette) => style.fg(palette_color(palette)),
        Attribute::Bold => style.add_modifier(Modifier::BOLD),
        Attribute::Italic => style.add_modifier(Modifier::ITALIC),
    }
}

/// Style of the controls bar.
pub fn controls_style() -> Style {
    Style::default().fg(Color::Gray)
}

/// Style of the key names inside the controls bar.
pub fn controls_key_style() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Gray)
        .add_modifier(Modifier::BOLD)
}

/// Style of the save prompt message.
pub fn prompt_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}
