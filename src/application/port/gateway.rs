// SPDX-License-Identifier: MPL-2.0
//! Image transfer port definition.
//!
//! This module defines the [`ImageGateway`] trait through which the controller
//! reaches an image store. Two adapters implement it: an in-memory mock store
//! for offline demos and an HTTP client for the real backend. Which one is
//! used is decided once, when the gateway is constructed.
//!
//! # Design Notes
//!
//! - Every operation is independent: no retries, no ordering between calls
//! - Gateways are `Send + Sync` so they can be shared behind an `Arc`
//! - Errors are reported as [`TransferError`], never as transport-specific types

use crate::domain::image::{DownloadedImage, ImageId, ImageRecord};
use crate::domain::upload::SelectedFile;
use async_trait::async_trait;
use std::fmt;

// =============================================================================
// TransferError
// =============================================================================

/// Errors that can occur while talking to an image store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferError {
    /// No image with the requested identifier exists.
    NotFound,

    /// The selected file (or a stored payload) could not be read.
    ReadFailure(String),

    /// The request never produced a response (connection refused, DNS, ...).
    Transport(String),

    /// The server answered with a non-success status.
    Status(u16),

    /// The response body could not be decoded.
    Decode(String),
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransferError::NotFound => write!(f, "Image not found"),
            TransferError::ReadFailure(msg) => write!(f, "Failed to read file: {msg}"),
            TransferError::Transport(msg) => write!(f, "Request failed: {msg}"),
            TransferError::Status(code) => write!(f, "Server responded with status {code}"),
            TransferError::Decode(msg) => write!(f, "Invalid response: {msg}"),
        }
    }
}

impl std::error::Error for TransferError {}

/// Result type for gateway operations.
pub type TransferResult<T> = Result<T, TransferError>;

// =============================================================================
// GatewayKind
// =============================================================================

/// Which store a gateway talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GatewayKind {
    /// In-memory store living for the duration of the process.
    Mock,
    /// HTTP backend.
    #[default]
    Remote,
}

impl fmt::Display for GatewayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GatewayKind::Mock => write!(f, "mock"),
            GatewayKind::Remote => write!(f, "remote"),
        }
    }
}

// =============================================================================
// ImageGateway Trait
// =============================================================================

/// Port for listing, uploading, replacing, deleting and downloading images.
///
/// # Example
///
/// ```ignore
/// use image_depot::application::port::{ImageGateway, TransferError};
/// use image_depot::domain::image::ImageId;
///
/// async fn remove_if_present(gateway: &dyn ImageGateway, id: ImageId) -> Result<bool, TransferError> {
///     match gateway.delete(id).await {
///         Ok(()) => Ok(true),
///         Err(TransferError::NotFound) => Ok(false),
///         Err(other) => Err(other),
///     }
/// }
/// ```
#[async_trait]
pub trait ImageGateway: Send + Sync {
    /// Returns every stored image.
    async fn list(&self) -> TransferResult<Vec<ImageRecord>>;

    /// Stores a new image and returns it with its freshly assigned identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::ReadFailure`] if the file content cannot be read.
    async fn upload(&self, file: &SelectedFile) -> TransferResult<ImageRecord>;

    /// Overwrites the name and content of an existing image, keeping its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::NotFound`] if `id` is unknown.
    async fn replace(&self, id: ImageId, file: &SelectedFile) -> TransferResult<ImageRecord>;

    /// Removes an image.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::NotFound`] if `id` is unknown.
    async fn delete(&self, id: ImageId) -> TransferResult<()>;

    /// Returns a single image.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::NotFound`] if `id` is unknown.
    async fn fetch(&self, id: ImageId) -> TransferResult<ImageRecord>;

    /// Returns the raw bytes of an image along with its name and content type.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::NotFound`] if `id` is unknown.
    async fn download(&self, id: ImageId) -> TransferResult<DownloadedImage>;

    /// Which store this gateway talks to.
    fn kind(&self) -> GatewayKind;
}
