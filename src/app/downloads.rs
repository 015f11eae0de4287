// SPDX-License-Identifier: MPL-2.0
//! Writing downloaded images to disk.

use crate::domain::image::{DownloadedImage, FALLBACK_FILE_NAME};
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// Give up looking for a free name after this many numbered variants.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Reduces a server-provided name to a single safe path component.
///
/// Directory parts, control characters and leading dots are dropped; an
/// empty result falls back to `image.jpg`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let last = name.rsplit(['/', '\\']).next().unwrap_or_default();
    let cleaned: String = last
        .chars()
        .filter(|c| !c.is_control())
        .map(|c| match c {
            ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_start_matches('.');

    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        cleaned.to_string()
    }
}

/// Candidate names for `file_name`: the name itself, then ` (1)`, ` (2)`...
/// inserted before the extension.
fn candidate_names(file_name: &str) -> impl Iterator<Item = String> + '_ {
    let path = Path::new(file_name);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    std::iter::once(file_name.to_string())
        .chain((1..=MAX_NAME_ATTEMPTS).map(move |n| format!("{stem} ({n}){extension}")))
}

/// Atomically creates the first free file for `file_name` in `directory`.
async fn create_free(directory: &Path, file_name: &str) -> io::Result<(File, PathBuf)> {
    for name in candidate_names(file_name) {
        let path = directory.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path).await {
            Ok(file) => return Ok((file, path)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(err) => return Err(err),
        }
    }

    Err(io::Error::new(
        io::ErrorKind::AlreadyExists,
        format!("no free name for {file_name}"),
    ))
}

/// Writes `image` into `directory`, creating it if needed.
///
/// Existing files are never overwritten, even by concurrent saves of the
/// same name. Returns the path written.
///
/// # Errors
///
/// Returns any I/O error from creating the directory or writing the file.
pub async fn save(directory: &Path, image: &DownloadedImage) -> io::Result<PathBuf> {
    tokio::fs::create_dir_all(directory).await?;
    let (mut file, path) = create_free(directory, &sanitize_file_name(&image.file_name)).await?;

    let written: io::Result<()> = async {
        file.write_all(&image.bytes).await?;
        file.flush().await
    }
    .await;
    if let Err(err) = written {
        drop(file);
        if let Err(cleanup) = tokio::fs::remove_file(&path).await {
            tracing::warn!(path = %path.display(), %cleanup, "could not remove partial download");
        }
        return Err(err);
    }

    tracing::info!(path = %path.display(), size = image.bytes.len(), "saved download");
    Ok(path)
}
