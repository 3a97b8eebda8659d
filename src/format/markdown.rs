//! Markdown line classification and inline emphasis.
//!
//! Each line is first matched against a few line-level classes (bullet,
//! heading, quote, numbered list, horizontal rule). A matching class decides
//! the whole line. Otherwise the line is scanned for `*`/`_` dividers, which
//! are paired into italic (single) and bold (double) spans.
//!
//! Pairing is flat: the first divider that can open is matched with the
//! nearest later divider of the same marker and run that can close, and both
//! are consumed. There is no nesting stack, so overlapping markers pair in
//! scan order.

use std::ops::Range;

use crate::editor::{Extent, GlobalPos, LineBuffer, Viewport};

use super::{Attribute, CellAttribute, Palette};

const MAX_HEADING_LEVEL: usize = 5;
const MIN_RULE_LEN: usize = 3;

/// Formatting that a line's first characters decide on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineClass {
    Bullet,
    Heading(u8),
    Quote,
    NumberedList { prefix_len: usize },
    Rule,
}

/// Whether a divider may open a span, close one, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DividerRole {
    Begin,
    Mid,
    End,
}

impl DividerRole {
    /// Move one step toward `End` or toward `Begin`, saturating at both ends.
    const fn shift(self, toward_end: bool) -> Self {
        match (self, toward_end) {
            (Self::Begin, true) => Self::Mid,
            (Self::Mid | Self::End, true) => Self::End,
            (Self::End, false) => Self::Mid,
            (Self::Mid | Self::Begin, false) => Self::Begin,
        }
    }

    const fn can_open(self) -> bool {
        !matches!(self, Self::End)
    }

    const fn can_close(self) -> bool {
        !matches!(self, Self::Begin)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Run {
    Single,
    Double,
}

impl Run {
    const fn len(self) -> usize {
        match self {
            Self::Single => 1,
            Self::Double => 2,
        }
    }

    const fn attribute(self) -> Attribute {
        match self {
            Self::Single => Attribute::Italic,
            Self::Double => Attribute::Bold,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Divider {
    marker: char,
    run: Run,
    position: usize,
    role: DividerRole,
}

impl Divider {
    const fn new(marker: char, run: Run, position: usize, role: DividerRole) -> Self {
        Self {
            marker,
            run,
            position,
            role,
        }
    }
}

/// A matched emphasis span, dividers included, in line columns.
#[derive(Debug, Clone, PartialEq, Eq)]
struct EmphasisSpan {
    range: Range<usize>,
    run: Run,
}

pub(super) fn line_attributes(
    buffer: &LineBuffer,
    viewport: &Viewport,
    extent: Extent,
    screen_row: usize,
) -> Vec<CellAttribute> {
    let row = viewport.row_offset() + screen_row;
    let chars: Vec<char> = buffer.line(row).chars().collect();
    let mut cells = Vec::new();
    let mut emit = |cols: Range<usize>, attribute: Attribute| {
        for col in cols {
            let global = GlobalPos::new(row, col);
            if !viewport.is_visible(global, extent) {
                continue;
            }
            if let Some(screen) = viewport.to_screen(global) {
                cells.push(CellAttribute::new(screen.col, attribute));
            }
        }
    };

    match classify(&chars) {
        Some(LineClass::Bullet) => {
            if !viewport.can_scroll_left() {
                emit(0..1, Attribute::Color(Palette::Bullet));
            }
        }
        Some(LineClass::Quote) => {
            if !viewport.can_scroll_left() {
                emit(0..1, Attribute::Color(Palette::Quote));
            }
        }
        Some(LineClass::Heading(level)) => {
            emit(0..chars.len(), Attribute::Color(Palette::Heading(level)));
        }
        Some(LineClass::NumberedList { prefix_len }) => {
            emit(0..prefix_len, Attribute::Color(Palette::NumberedList));
        }
        Some(LineClass::Rule) => emit(0..chars.len(), Attribute::Color(Palette::Rule)),
        None => {
            for span in emphasis_spans(&chars) {
                emit(span.range, span.run.attribute());
            }
        }
    }

    cells.sort_by_key(|cell| cell.col);
    cells
}

fn classify(chars: &[char]) -> Option<LineClass> {
    if matches!(chars, ['*' | '-', ' ', ..]) {
        return Some(LineClass::Bullet);
    }
    if let Some(level) = heading_level(chars) {
        return Some(LineClass::Heading(level));
    }
    if matches!(chars, ['>', ' ', ..]) {
        return Some(LineClass::Quote);
    }
    if let Some(prefix_len) = numbered_prefix_len(chars) {
        return Some(LineClass::NumberedList { prefix_len });
    }
    is_rule(chars).then_some(LineClass::Rule)
}

/// Level of a `#`-run heading followed by a space; 6 or more `#` do not count.
fn heading_level(chars: &[char]) -> Option<u8> {
    let hashes = chars.iter().take_while(|&&ch| ch == '#').count();
    if (1..=MAX_HEADING_LEVEL).contains(&hashes) && chars.get(hashes) == Some(&' ') {
        u8::try_from(hashes).ok()
    } else {
        None
    }
}

/// Length of a leading `N. ` prefix (digits, dot, one space).
fn numbered_prefix_len(chars: &[char]) -> Option<usize> {
    let digits = chars.iter().take_while(|ch| ch.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    match chars.get(digits..digits + 2) {
        Some(['.', ' ']) => Some(digits + 2),
        _ => None,
    }
}

/// Whole line is at least three of the same `*` or `_`.
fn is_rule(chars: &[char]) -> bool {
    match chars.first().copied() {
        Some(first @ ('*' | '_')) => {
            chars.len() >= MIN_RULE_LEN && chars.iter().all(|&ch| ch == first)
        }
        _ => false,
    }
}

const fn is_divider(ch: char) -> bool {
    matches!(ch, '*' | '_')
}

fn emphasis_spans(chars: &[char]) -> Vec<EmphasisSpan> {
    if chars.len() < 3 {
        return Vec::new();
    }
    pair_dividers(&scan_dividers(chars))
}

/// Collect divider candidates in one left-to-right pass.
///
/// Interior dividers start as `Mid`, move toward `End` when preceded by
/// non-space and toward `Begin` when followed by non-space. The first and
/// last two characters lack a neighbor and are handled separately. Requires
/// at least three characters.
fn scan_dividers(t: &[char]) -> Vec<Divider> {
    let max = t.len();
    let mut dividers = Vec::new();
    let mut last_was_double = true;
    let mut start = 1;

    if is_divider(t[0]) {
        if t[0] == t[1] {
            start = 2;
            if t[2] != ' ' || max <= 3 {
                dividers.push(Divider::new(t[0], Run::Double, 0, DividerRole::Begin));
            }
        } else if t[1] != ' ' {
            dividers.push(Divider::new(t[0], Run::Single, 0, DividerRole::Begin));
        }
    }

    let mut i = start;
    while i < max - 2 {
        last_was_double = false;
        let mut role = DividerRole::Mid;
        if t[i - 1] != ' ' {
            role = role.shift(true);
        }
        if is_divider(t[i]) {
            if t[i] == t[i + 1] {
                last_was_double = true;
                if t[i + 2] != ' ' {
                    role = role.shift(false);
                }
                dividers.push(Divider::new(t[i], Run::Double, i, role));
                i += 1;
            } else {
                role = role.shift(t[i + 1] == ' ');
                dividers.push(Divider::new(t[i], Run::Single, i, role));
            }
        }
        i += 1;
    }

    let closes_at = |idx: usize| is_divider(t[idx]) && t[idx - 1] != ' ';
    if last_was_double {
        if closes_at(max - 1) {
            dividers.push(Divider::new(t[max - 1], Run::Single, max - 1, DividerRole::End));
        } else if closes_at(max - 2) {
            dividers.push(Divider::new(t[max - 2], Run::Single, max - 2, DividerRole::End));
        }
    } else if closes_at(max - 2) {
        let run = if t[max - 2] == t[max - 1] {
            Run::Double
        } else {
            Run::Single
        };
        dividers.push(Divider::new(t[max - 2], run, max - 2, DividerRole::End));
    } else if closes_at(max - 1) {
        dividers.push(Divider::new(t[max - 1], Run::Single, max - 1, DividerRole::End));
    }

    dividers
}

/// Greedy first-match pairing of openers with the nearest compatible closer.
fn pair_dividers(dividers: &[Divider]) -> Vec<EmphasisSpan> {
    let mut consumed = vec![false; dividers.len()];
    let mut spans = Vec::new();

    for (i, open) in dividers.iter().enumerate() {
        if consumed[i] || !open.role.can_open() {
            continue;
        }
        let close = dividers
            .iter()
            .enumerate()
            .skip(i + 1)
            .find(|(j, close)| {
                !consumed[*j]
                    && close.role.can_close()
                    && close.marker == open.marker
                    && close.run == open.run
            });
        if let Some((j, close)) = close {
            consumed[i] = true;
            consumed[j] = true;
            spans.push(EmphasisSpan {
                range: open.position..close.position + close.run.len(),
                run: open.run,
            });
        }
    }

    spans
}
