//! Validation of candidate media files before upload.

use super::formats;
use crate::messages;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::error;

/// Largest file mocoVoice accepts: 3 GiB.
pub const MAX_FILE_SIZE: u64 = 3 * 1024 * 1024 * 1024;

/// Why a file was refused. `Display` yields the user-facing message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FileRejection {
    #[error("{}", messages::FILE_NOT_FOUND)]
    NotFound,
    #[error("{}", messages::NOT_A_FILE)]
    NotAFile,
    #[error("{}", messages::FILE_TOO_LARGE)]
    TooLarge,
    #[error("{}", messages::FILE_EMPTY)]
    Empty,
    #[error("{}", messages::FILE_METADATA_FAILED)]
    MetadataUnavailable,
    #[error("{}", messages::UNSUPPORTED_FORMAT)]
    UnsupportedFormat,
}

/// A file that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub path: PathBuf,
    pub size: u64,
    /// Lowercase extension without the dot.
    pub extension: String,
}

impl MediaFile {
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    pub fn content_type(&self) -> Option<&'static str> {
        formats::content_type_for(&self.path)
    }
}

/// Validate `path`, stopping at the first failed check.
pub fn validate(path: &Path) -> Result<MediaFile, FileRejection> {
    if !path.exists() {
        return Err(FileRejection::NotFound);
    }

    if !path.is_file() {
        return Err(FileRejection::NotAFile);
    }

    let size = match path.metadata() {
        Ok(meta) => meta.len(),
        Err(e) => {
            error!(file = %path.display(), error = %e, "Failed to read file metadata");
            return Err(FileRejection::MetadataUnavailable);
        }
    };
    check_size(size)?;

    match formats::lookup(path) {
        Some(format) => Ok(MediaFile {
            path: path.to_path_buf(),
            size,
            extension: format.extension.to_string(),
        }),
        None => Err(FileRejection::UnsupportedFormat),
    }
}

/// Size bounds: larger than zero, at most [`MAX_FILE_SIZE`].
pub fn check_size(size: u64) -> Result<(), FileRejection> {
    if size > MAX_FILE_SIZE {
        return Err(FileRejection::TooLarge);
    }
    if size == 0 {
        return Err(FileRejection::Empty);
    }
    Ok(())
}
