//! Loading and saving notes as plain newline-delimited text.
//!
//! A note on disk is its lines joined by `'\n'` with no trailing newline,
//! so saving and loading the same lines is exact.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, info};

use crate::format::Format;

/// Why a note could not be saved.
///
/// A name collision is reported separately so the caller can ask for a
/// different name instead of giving up.
#[derive(Debug, Error)]
pub enum SaveError {
    #[error("{} already exists", .path.display())]
    FileExists { path: PathBuf },
    #[error("cannot create {}: {source}", .path.display())]
    CannotCreate {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SaveError {
    pub const fn is_file_exists(&self) -> bool {
        matches!(self, Self::FileExists { .. })
    }
}

/// A note file could not be read.
#[derive(Debug, Error)]
#[error("cannot read {}: {source}", .path.display())]
pub struct LoadError {
    pub path: PathBuf,
    #[source]
    pub source: io::Error,
}

/// Read a note as a sequence of lines.
///
/// An empty file yields a single empty line.
///
/// # Errors
///
/// Returns [`LoadError`] if the file cannot be opened or is not UTF-8.
pub fn load_lines(path: &Path) -> Result<Vec<String>, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError {
        path: path.to_path_buf(),
        source,
    })?;
    let lines: Vec<String> = content.split('\n').map(ToOwned::to_owned).collect();
    debug!(path = %path.display(), lines = lines.len(), "loaded note");
    Ok(lines)
}

/// Save lines to a new file, refusing to overwrite an existing one.
///
/// # Errors
///
/// [`SaveError::FileExists`] if `path` already exists, otherwise
/// [`SaveError::CannotCreate`] on any I/O failure.
pub fn save_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), SaveError> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| {
            if source.kind() == io::ErrorKind::AlreadyExists {
                SaveError::FileExists {
                    path: path.to_path_buf(),
                }
            } else {
                SaveError::CannotCreate {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
    write_lines(file, path, lines)
}

/// Save lines, replacing the file if it exists.
///
/// # Errors
///
/// [`SaveError::CannotCreate`] on any I/O failure.
pub fn force_save_lines<S: AsRef<str>>(path: &Path, lines: &[S]) -> Result<(), SaveError> {
    let file = fs::File::create(path).map_err(|source| SaveError::CannotCreate {
        path: path.to_path_buf(),
        source,
    })?;
    write_lines(file, path, lines)
}

/// Path of a note called `name` inside `dir`, with the format's extension.
pub fn note_path(dir: &Path, name: &str, format: Format) -> PathBuf {
    dir.join(format!("{name}{}", format.file_extension()))
}

fn write_lines<S: AsRef<str>>(mut file: fs::File, path: &Path, lines: &[S]) -> Result<(), SaveError> {
    let text = lines
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join("\n");
    file.write_all(text.as_bytes())
        .and_then(|()| file.flush())
        .map_err(|source| SaveError::CannotCreate {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), lines = lines.len(), "saved note");
    Ok(())
}
