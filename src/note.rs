//! Note identity and the tag metadata line.
//!
//! Tags live in the text itself: a line of the form `!tags: a b c`,
//! conventionally the last line of the note. The editor keeps that line
//! verbatim; it is only parsed here.

use std::collections::BTreeSet;
use std::path::Path;

use crate::format::Format;

/// Marker that starts a tag line.
pub const TAGS_PREFIX: &str = "!tags:";

/// Text following the `!tags:` marker, if the line is a tag line.
///
/// The marker must be preceded by whitespace only.
pub fn extract_tags(line: &str) -> Option<&str> {
    let idx = line.find(TAGS_PREFIX)?;
    if !line[..idx].chars().all(char::is_whitespace) {
        return None;
    }
    Some(&line[idx + TAGS_PREFIX.len()..])
}

/// Parse the tags of a tag line. Non-tag lines have no tags.
pub fn parse_tags(line: &str) -> BTreeSet<String> {
    extract_tags(line)
        .map(|tags| tags.split(' ').filter(|t| !t.is_empty()).map(ToOwned::to_owned).collect())
        .unwrap_or_default()
}

/// A saved note: file name plus the tags read from its tag line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    name: String,
    tags: BTreeSet<String>,
}

impl Note {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tags: BTreeSet::new(),
        }
    }

    /// File name of the note, extension included.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display format implied by the note's extension.
    pub fn format(&self) -> Format {
        Format::from_path(Path::new(&self.name))
    }

    pub const fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Replace the tags with those parsed from `line`.
    pub fn set_tags_from_line(&mut self, line: &str) {
        self.tags = parse_tags(line);
    }

    #[must_use]
    pub fn with_tags_from_line(mut self, line: &str) -> Self {
        self.set_tags_from_line(line);
        self
    }
}
