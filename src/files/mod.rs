//! Local file access: containment, validation and the media table.
//!
//! Every file the server touches must live under the allowed root and be one
//! of the formats in [`formats::SUPPORTED_FORMATS`].

pub mod formats;
pub mod guard;
mod listing;
mod validator;

pub use formats::{MediaFormat, MediaKind, SUPPORTED_FORMATS};
pub use guard::is_allowed;
pub use listing::list_media_files;
pub use validator::{check_size, validate, FileRejection, MediaFile, MAX_FILE_SIZE};
