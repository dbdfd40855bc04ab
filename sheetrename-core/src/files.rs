//! Folder scanning and natural ordering of file names

use crate::error::{Error, Result};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// An existing file selected for renaming
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    pub path: PathBuf,
}

impl FileEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// File name including extension
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Extension as found on disk, without the dot
    pub fn extension(&self) -> Option<String> {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
    }
}

/// Files of one folder, naturally sorted, all sharing one extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    pub directory: PathBuf,
    pub entries: Vec<FileEntry>,
    /// Common extension, lowercase, without the dot
    pub extension: String,
}

impl FileSet {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collect the regular files of `directory` for a batch rename
///
/// Dot-files are ignored. The remaining files must share one extension
/// (compared case-insensitively) that appears in `allowed_extensions`.
pub fn scan_folder<P, S>(directory: P, allowed_extensions: &[S]) -> Result<FileSet>
where
    P: AsRef<Path>,
    S: AsRef<str>,
{
    let directory = directory.as_ref();
    if !directory.exists() {
        return Err(Error::NotFound(directory.to_path_buf()));
    }
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let mut entries = Vec::new();
    for entry in fs::read_dir(directory).map_err(|e| Error::io(directory, e))? {
        let entry = entry.map_err(|e| Error::io(directory, e))?;
        let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
        if !file_type.is_file() || entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        entries.push(FileEntry::new(entry.path()));
    }

    if entries.is_empty() {
        return Err(Error::EmptyFolder(directory.to_path_buf()));
    }

    let extensions: BTreeSet<String> = entries
        .iter()
        .map(|e| e.extension().unwrap_or_default().to_lowercase())
        .collect();
    if extensions.len() != 1 {
        return Err(Error::MixedExtensions {
            path: directory.to_path_buf(),
            extensions: extensions.into_iter().map(display_extension).collect(),
        });
    }
    let extension = extensions.into_iter().next().unwrap_or_default();

    let allowed: Vec<String> = allowed_extensions
        .iter()
        .map(|e| e.as_ref().trim_start_matches('.').to_lowercase())
        .collect();
    if !allowed.contains(&extension) {
        return Err(Error::ExtensionNotAllowed { extension, allowed });
    }

    sort_naturally(&mut entries);
    debug!(
        directory = %directory.display(),
        files = entries.len(),
        extension = %extension,
        "folder scanned"
    );

    Ok(FileSet {
        directory: directory.to_path_buf(),
        entries,
        extension,
    })
}

fn display_extension(extension: String) -> String {
    if extension.is_empty() {
        "(none)".to_string()
    } else {
        format!(".{}", extension)
    }
}

/// Sort entries by file name in natural order
pub fn sort_naturally(entries: &mut [FileEntry]) {
    entries.sort_by(|a, b| natural_cmp(&a.file_name(), &b.file_name()));
}

/// Compare strings treating digit runs as numbers
///
/// Text compares ordinally, so uppercase sorts before lowercase.
/// Equal numbers with different zero padding order the shorter run first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let left = chunks(a);
    let right = chunks(b);

    for (x, y) in left.iter().zip(right.iter()) {
        let ordering = match (x, y) {
            (Chunk::Digits(x), Chunk::Digits(y)) => cmp_digits(x, y),
            (Chunk::Digits(_), Chunk::Text(_)) => Ordering::Less,
            (Chunk::Text(_), Chunk::Digits(_)) => Ordering::Greater,
            (Chunk::Text(x), Chunk::Text(y)) => x.cmp(y),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }

    left.len().cmp(&right.len()).then_with(|| a.cmp(b))
}

enum Chunk<'a> {
    Digits(&'a str),
    Text(&'a str),
}

fn chunks(s: &str) -> Vec<Chunk<'_>> {
    let mut result = Vec::new();
    let mut start = 0;
    let mut in_digits: Option<bool> = None;

    for (i, c) in s.char_indices() {
        let is_digit = c.is_ascii_digit();
        match in_digits {
            Some(current) if current != is_digit => {
                result.push(make_chunk(&s[start..i], current));
                start = i;
            }
            _ => {}
        }
        in_digits = Some(is_digit);
    }
    if let Some(current) = in_digits {
        result.push(make_chunk(&s[start..], current));
    }

    result
}

fn make_chunk(text: &str, digits: bool) -> Chunk<'_> {
    if digits {
        Chunk::Digits(text)
    } else {
        Chunk::Text(text)
    }
}

fn cmp_digits(x: &str, y: &str) -> Ordering {
    let x_trimmed = x.trim_start_matches('0');
    let y_trimmed = y.trim_start_matches('0');
    // Longer significant run means a bigger number; same length compares lexically
    x_trimmed
        .len()
        .cmp(&y_trimmed.len())
        .then_with(|| x_trimmed.cmp(y_trimmed))
        .then_with(|| x.len().cmp(&y.len()))
}
