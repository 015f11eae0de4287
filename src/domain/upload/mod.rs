// SPDX-License-Identifier: MPL-2.0
//! Client-side upload policy.
//!
//! A [`SelectedFile`] describes a file the user picked: its name, declared
//! media type and size are known up front, while the content is read only
//! when a transfer actually happens. [`validate`] decides whether a selection
//! may be handed to a gateway at all.

mod validation;

pub use validation::{validate, FileRejection, ALLOWED_MEDIA_TYPES, MAX_UPLOAD_BYTES};

use std::path::PathBuf;
use std::sync::Arc;

/// Where the content of a selected file comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// Content already held in memory.
    Memory(Arc<[u8]>),
    /// Content read from disk on demand.
    Disk(PathBuf),
}

/// A file chosen by the user for upload or replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    media_type: String,
    size: u64,
    source: FileSource,
}

impl SelectedFile {
    /// Creates a selection whose content is already in memory.
    ///
    /// The size is taken from the byte length.
    #[must_use]
    pub fn in_memory(
        name: impl Into<String>,
        media_type: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes: Arc<[u8]> = bytes.into();
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size: bytes.len() as u64,
            source: FileSource::Memory(bytes),
        }
    }

    /// Creates a selection backed by a file on disk with a declared size.
    #[must_use]
    pub fn on_disk(
        name: impl Into<String>,
        media_type: impl Into<String>,
        size: u64,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
            source: FileSource::Disk(path.into()),
        }
    }

    /// File name shown to the user and sent to the store.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Declared size in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Content source.
    #[must_use]
    pub fn source(&self) -> &FileSource {
        &self.source
    }
}
