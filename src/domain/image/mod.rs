// SPDX-License-Identifier: MPL-2.0
//! Image domain types.
//!
//! This module contains the stored image record and related value objects,
//! independent of how they are transported or persisted.

pub mod types;

// Re-export commonly used types
pub use types::{
    content_type_for_file_name, DownloadedImage, ImageId, ImageRecord, FALLBACK_FILE_NAME,
    OCTET_STREAM,
};
