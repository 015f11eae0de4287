// SPDX-License-Identifier: MPL-2.0
//! Filesystem access for selected files.

use crate::application::port::{TransferError, TransferResult};
use crate::domain::image::OCTET_STREAM;
use crate::domain::upload::{FileSource, SelectedFile};
use image_rs::ImageFormat;
use std::io;
use std::path::Path;

/// Declared media type for a path, derived from its extension.
///
/// Mirrors what a browser reports for a picked file: the content is not
/// inspected, so a `.png` full of text still claims to be `image/png`.
#[must_use]
pub fn media_type_for_path(path: &Path) -> &'static str {
    ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(OCTET_STREAM)
}

/// Builds a [`SelectedFile`] for a path without reading its content.
///
/// # Errors
///
/// Returns an I/O error if the path does not exist or is not a regular file.
pub fn probe(path: &Path) -> io::Result<SelectedFile> {
    let metadata = std::fs::metadata(path)?;
    if !metadata.is_file() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} is not a file", path.display()),
        ));
    }

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(SelectedFile::on_disk(
        name,
        media_type_for_path(path),
        metadata.len(),
        path,
    ))
}

/// Reads the full content of a selected file.
///
/// # Errors
///
/// Returns [`TransferError::ReadFailure`] if a disk-backed file cannot be read.
pub async fn read_contents(file: &SelectedFile) -> TransferResult<Vec<u8>> {
    match file.source() {
        FileSource::Memory(bytes) => Ok(bytes.to_vec()),
        FileSource::Disk(path) => tokio::fs::read(path).await.map_err(|e| {
            tracing::warn!(path = %path.display(), "failed to read selected file: {e}");
            TransferError::ReadFailure(e.to_string())
        }),
    }
}
