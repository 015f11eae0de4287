// SPDX-License-Identifier: MPL-2.0
//! Core image record types for the domain layer.
//!
//! These types represent pure data without any transport dependencies.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// File name used when a download carries no usable name.
pub const FALLBACK_FILE_NAME: &str = "image.jpg";

/// Content type used when the file name has no recognised image extension.
pub const OCTET_STREAM: &str = "application/octet-stream";

// =============================================================================
// ImageId
// =============================================================================

/// Identifier of a stored image.
///
/// Assigned by the store at creation time and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ImageId(i64);

impl ImageId {
    /// Creates an identifier from its raw value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier value.
    #[must_use]
    pub const fn value(self) -> i64 {
        self.0
    }

    /// Returns the identifier that follows this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ImageId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for ImageId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

// =============================================================================
// ImageRecord
// =============================================================================

/// A stored image: identifier, display name and base64-encoded payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// Store-assigned identifier, unique within the active store.
    pub id: ImageId,
    /// Display name (the original file name).
    pub file_name: String,
    /// Base64-encoded file content.
    pub data: String,
}

impl ImageRecord {
    /// Creates a new record.
    #[must_use]
    pub fn new(id: ImageId, file_name: impl Into<String>, data: impl Into<String>) -> Self {
        Self {
            id,
            file_name: file_name.into(),
            data: data.into(),
        }
    }

    /// Approximate decoded payload size in bytes, computed from the base64 length.
    #[must_use]
    pub fn approx_size(&self) -> usize {
        let trimmed = self.data.trim_end_matches('=');
        trimmed.len() * 3 / 4
    }

    /// Content type inferred from the file name.
    #[must_use]
    pub fn content_type(&self) -> &'static str {
        content_type_for_file_name(Some(&self.file_name))
    }
}

// =============================================================================
// DownloadedImage
// =============================================================================

/// Raw bytes of one image, ready to be written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedImage {
    /// File name to save under.
    pub file_name: String,
    /// MIME type of the content.
    pub content_type: String,
    /// Decoded file content.
    pub bytes: Vec<u8>,
}

impl DownloadedImage {
    /// Creates a download result, substituting [`FALLBACK_FILE_NAME`] for an empty name.
    #[must_use]
    pub fn new(file_name: &str, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = if file_name.trim().is_empty() {
            FALLBACK_FILE_NAME.to_string()
        } else {
            file_name.to_string()
        };
        Self {
            file_name,
            content_type: content_type.into(),
            bytes,
        }
    }
}

/// Maps a file name to the content type it is served with.
///
/// Matching is done on the lowercase extension. Unknown or missing names map
/// to [`OCTET_STREAM`].
#[must_use]
pub fn content_type_for_file_name(file_name: Option<&str>) -> &'static str {
    let Some(name) = file_name else {
        return OCTET_STREAM;
    };
    let lower = name.to_lowercase();
    if lower.ends_with(".png") {
        "image/png"
    } else if lower.ends_with(".gif") {
        "image/gif"
    } else if lower.ends_with(".webp") {
        "image/webp"
    } else if lower.ends_with(".bmp") {
        "image/bmp"
    } else if lower.ends_with(".jpg") || lower.ends_with(".jpeg") {
        "image/jpeg"
    } else {
        OCTET_STREAM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_id_parses_and_displays() {
        let id: ImageId = " 42 ".parse().expect("valid id");
        assert_eq!(id, ImageId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<ImageId>().is_err());
    }

    #[test]
    fn image_id_next_is_strictly_greater() {
        let id = ImageId::new(7);
        assert!(id.next() > id);
        assert_eq!(id.next().value(), 8);
    }

    #[test]
    fn content_type_matches_extension_case_insensitively() {
        assert_eq!(content_type_for_file_name(Some("a.PNG")), "image/png");
        assert_eq!(content_type_for_file_name(Some("b.gif")), "image/gif");
        assert_eq!(content_type_for_file_name(Some("c.webp")), "image/webp");
        assert_eq!(content_type_for_file_name(Some("d.bmp")), "image/bmp");
        assert_eq!(content_type_for_file_name(Some("e.jpg")), "image/jpeg");
        assert_eq!(content_type_for_file_name(Some("f.JPEG")), "image/jpeg");
    }

    #[test]
    fn content_type_falls_back_to_octet_stream() {
        assert_eq!(content_type_for_file_name(None), OCTET_STREAM);
        assert_eq!(content_type_for_file_name(Some("notes.txt")), OCTET_STREAM);
        assert_eq!(content_type_for_file_name(Some("png")), OCTET_STREAM);
    }

    #[test]
    fn downloaded_image_substitutes_fallback_name() {
        let download = DownloadedImage::new("  ", "image/jpeg", vec![1, 2, 3]);
        assert_eq!(download.file_name, FALLBACK_FILE_NAME);

        let download = DownloadedImage::new("cat.png", "image/png", vec![]);
        assert_eq!(download.file_name, "cat.png");
    }

    #[test]
    fn approx_size_accounts_for_padding() {
        // "aGVsbG8=" is base64 for "hello"
        let record = ImageRecord::new(ImageId::new(1), "h.png", "aGVsbG8=");
        assert_eq!(record.approx_size(), 5);
        assert_eq!(record.content_type(), "image/png");
    }
}
