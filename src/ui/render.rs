use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Model, Prompt};
use crate::editor::Extent;
use crate::note::TAGS_PREFIX;

use super::{Screen, style};

/// Rows taken by the controls bar under the editing window.
pub const CONTROLS_HEIGHT: u16 = 3;

/// Split the terminal into the editing window and the controls bar.
///
/// The editing window keeps at least one row; the controls bar shrinks
/// first on very small terminals.
pub fn split_areas(area: Rect) -> (Rect, Rect) {
    let controls_height = CONTROLS_HEIGHT.min(area.height.saturating_sub(1));
    let editor_height = area.height - controls_height;
    let editor = Rect::new(area.x, area.y, area.width, editor_height);
    let controls = Rect::new(area.x, area.y + editor_height, area.width, controls_height);
    (editor, controls)
}

/// Size of the editing window for a terminal of `area`.
pub fn editor_extent(area: Rect) -> Extent {
    let (editor, _) = split_areas(area);
    Extent::new(
        usize::from(editor.height.max(1)),
        usize::from(editor.width.max(1)),
    )
}

/// Render the complete UI.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let (editor_area, controls_area) = split_areas(area);
    render_editor(model, frame, editor_area, editor_extent(area));
    match model.prompt.as_ref() {
        Some(prompt) => render_prompt(prompt, frame, controls_area),
        None => render_controls(model, frame, controls_area),
    }
}

fn render_editor(model: &Model, frame: &mut Frame, area: Rect, extent: Extent) {
    let mut screen = Screen::default();
    model.session.paint(&mut screen, extent);
    frame.render_widget(Paragraph::new(styled_lines(&screen)), area);

    if model.prompt.is_none() {
        let cursor = model.session.cursor();
        let row = cursor.row.min(extent.last_row());
        let col = cursor.col.min(extent.last_col());
        frame.set_cursor_position(Position::new(
            area.x.saturating_add(to_u16(col)),
            area.y.saturating_add(to_u16(row)),
        ));
    }
}

/// Convert painted rows into ratatui lines, merging neighbouring cells
/// that share a style into one span.
fn styled_lines(screen: &Screen) -> Vec<Line<'static>> {
    screen
        .lines()
        .iter()
        .enumerate()
        .map(|(row, text)| {
            let chars: Vec<char> = text.chars().collect();
            let mut styles = vec![Style::default(); chars.len()];
            for cell in screen.attributes(row) {
                if let Some(slot) = styles.get_mut(cell.col) {
                    *slot = style::apply_attribute(*slot, cell.attribute);
                }
            }

            let mut spans = Vec::new();
            let mut start = 0;
            for end in 1..=chars.len() {
                if end == chars.len() || styles[end] != styles[start] {
                    let text: String = chars[start..end].iter().collect();
                    spans.push(Span::styled(text, styles[start]));
                    start = end;
                }
            }
            Line::from(spans)
        })
        .collect()
}

fn render_controls(model: &Model, frame: &mut Frame, area: Rect) {
    let keys = Line::from(vec![
        Span::styled(" F1 ", style::controls_key_style()),
        Span::styled(" save & exit   ", style::controls_style()),
        Span::styled(" F2 ", style::controls_key_style()),
        Span::styled(" discard & exit", style::controls_style()),
    ]);

    let tags = model.session.tags();
    let hint = if tags.is_empty() {
        format!("{TAGS_PREFIX} a b c on the last line tags the note")
    } else {
        format!("tags: {}", tags.into_iter().collect::<Vec<_>>().join(" "))
    };

    let lines = vec![
        rule(area.width),
        keys,
        Line::styled(hint, style::controls_style()),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn render_prompt(prompt: &Prompt, frame: &mut Frame, area: Rect) {
    let lines = vec![
        rule(area.width),
        Line::styled(prompt.message().to_string(), style::prompt_style()),
        Line::from(format!("> {}", prompt.input())),
    ];
    frame.render_widget(Paragraph::new(lines), area);

    if area.height == CONTROLS_HEIGHT {
        frame.set_cursor_position(Position::new(
            area.x.saturating_add(to_u16(prompt.cursor() + 2)),
            area.y + 2,
        ));
    }
}

fn rule(width: u16) -> Line<'static> {
    Line::styled("─".repeat(usize::from(width)), style::controls_style())
}

fn to_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
