//! Error type shared by every sheetrename operation

use crate::issue::Issue;
use crate::renamer::PlannedRename;
use std::path::PathBuf;

/// Errors surfaced to the user at the point of failure
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    /// The spreadsheet could not be parsed as tabular data
    #[error("cannot read {} as a spreadsheet: {message}", .path.display())]
    Format { path: PathBuf, message: String },

    #[error("columns not found in spreadsheet: {}", .0.join(", "))]
    UnknownColumns(Vec<String>),

    #[error("invalid naming template: {0}")]
    InvalidTemplate(String),

    #[error("no files found in {}", .0.display())]
    EmptyFolder(PathBuf),

    #[error("mixed file extensions in {}: {}", .path.display(), .extensions.join(", "))]
    MixedExtensions {
        path: PathBuf,
        extensions: Vec<String>,
    },

    #[error("extension not allowed: .{extension} (allowed: {})", .allowed.join(", "))]
    ExtensionNotAllowed {
        extension: String,
        allowed: Vec<String>,
    },

    /// Blocking plan issues; nothing has been renamed
    #[error("{} blocking issue(s) found, no file was renamed", .0.len())]
    Validation(Vec<Issue>),

    #[error("refusing to overwrite existing file: {}", .0.display())]
    Collision(PathBuf),

    /// A rename failed after earlier files of the batch were already renamed
    #[error("stopped after renaming {} file(s): {source}", .renamed.len())]
    Interrupted {
        renamed: Vec<PlannedRename>,
        #[source]
        source: Box<Error>,
    },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("cannot process PDF {}: {source}", .path.display())]
    Pdf {
        path: PathBuf,
        #[source]
        source: lopdf::Error,
    },

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::Format {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
