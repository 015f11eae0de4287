// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core business logic with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and business rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity. Wire formats (JSON, multipart) live
//! in the infrastructure adapters that translate to and from these types.
//!
//! # Modules
//!
//! - [`image`]: Stored image types ([`ImageId`](image::ImageId),
//!   [`ImageRecord`](image::ImageRecord), [`DownloadedImage`](image::DownloadedImage))
//! - [`upload`]: Client-side upload policy ([`SelectedFile`](upload::SelectedFile),
//!   [`FileRejection`](upload::FileRejection), [`validate`](upload::validate))

pub mod image;
pub mod upload;
