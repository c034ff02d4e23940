//! Error types for tag IO and batch editing.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TagError {
    #[error("Not a readable audio file: {}: {reason}", path.display())]
    UnreadableContainer { path: PathBuf, reason: String },

    #[error("Cannot rename to \"{name}\": name is empty or already taken")]
    RenameConflict { name: String },

    #[error("Cover image not found: {}", .0.display())]
    CoverSourceMissing(PathBuf),

    #[error("Unsupported cover image format: {0:?}")]
    UnsupportedCoverFormat(String),

    /// Bad inner regular expression in an extraction marker.
    /// Preview never surfaces this; it only shows up in logs.
    #[error("Invalid pattern: {0}")]
    PatternCompile(String),

    #[error("No files selected")]
    EmptySelection,

    #[error("Tag write failed: {0}")]
    Tag(#[from] id3::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TagError>;
