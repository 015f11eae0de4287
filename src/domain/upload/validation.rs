// SPDX-License-Identifier: MPL-2.0
//! Upload validation rules.

use super::SelectedFile;
use std::fmt;

/// Media types accepted for upload.
pub const ALLOWED_MEDIA_TYPES: [&str; 5] = [
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
];

/// Largest accepted upload (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Reason a selected file was refused before any transfer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileRejection {
    /// Declared media type is not in [`ALLOWED_MEDIA_TYPES`].
    UnsupportedType(String),
    /// File exceeds [`MAX_UPLOAD_BYTES`].
    TooLarge {
        /// Declared size of the file.
        size: u64,
        /// Maximum accepted size.
        max: u64,
    },
}

impl FileRejection {
    /// Returns the i18n message key for this rejection.
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            FileRejection::UnsupportedType(_) => "error-invalid-file-type",
            FileRejection::TooLarge { .. } => "error-file-too-large",
        }
    }
}

impl fmt::Display for FileRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileRejection::UnsupportedType(media_type) => {
                write!(f, "Unsupported file type: {media_type}")
            }
            FileRejection::TooLarge { size, max } => {
                write!(f, "File too large: {size} bytes (max: {max})")
            }
        }
    }
}

impl std::error::Error for FileRejection {}

/// Checks a selection against the allowed media types and the size ceiling.
///
/// The type check runs first, so a file that is both too large and of the
/// wrong type is reported as [`FileRejection::UnsupportedType`].
///
/// # Errors
///
/// Returns the first rule the file breaks.
pub fn validate(file: &SelectedFile) -> Result<(), FileRejection> {
    if !ALLOWED_MEDIA_TYPES.contains(&file.media_type()) {
        return Err(FileRejection::UnsupportedType(file.media_type().to_string()));
    }

    if file.size() > MAX_UPLOAD_BYTES {
        return Err(FileRejection::TooLarge {
            size: file.size(),
            max: MAX_UPLOAD_BYTES,
        });
    }

    Ok(())
}
