// SPDX-License-Identifier: MPL-2.0
//! In-memory image store implementing the [`ImageGateway`] port.
//!
//! Used for demos without a backend. The store lives as long as the gateway
//! and identifiers are assigned from a counter that only ever moves forward,
//! so an identifier is never reused even after the image it named is deleted.
//!
//! An optional simulated latency can be configured to make the mock feel like
//! a network round-trip. It is cosmetic: the store is mutated before the
//! delay, and the lock is never held across it.
//!
//! [`ImageGateway`]: crate::application::port::ImageGateway

use crate::application::port::{GatewayKind, ImageGateway, TransferError, TransferResult};
use crate::domain::image::{
    content_type_for_file_name, DownloadedImage, ImageId, ImageRecord,
};
use crate::domain::upload::SelectedFile;
use crate::infrastructure::files;
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::time::Duration;
use tokio::sync::Mutex;

/// First identifier handed out by an empty store.
pub const FIRST_ID: ImageId = ImageId::new(1);

/// 1x1 red pixel PNG.
const SAMPLE_RED_PIXEL: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8/5+hHgAHggJ/PchI7wAAAABJRU5ErkJggg==";

/// 1x1 green pixel PNG.
const SAMPLE_GREEN_PIXEL: &str =
    "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg==";

#[derive(Debug)]
struct Store {
    images: Vec<ImageRecord>,
    next_id: ImageId,
}

impl Store {
    fn position(&self, id: ImageId) -> Option<usize> {
        self.images.iter().position(|image| image.id == id)
    }

    fn allocate_id(&mut self) -> ImageId {
        let id = self.next_id;
        self.next_id = id.next();
        id
    }
}

/// Gateway backed by a process-lifetime vector of records.
#[derive(Debug)]
pub struct MockGateway {
    store: Mutex<Store>,
    latency: Duration,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new()
    }
}

impl MockGateway {
    /// Creates an empty store with no simulated latency.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Mutex::new(Store {
                images: Vec::new(),
                next_id: FIRST_ID,
            }),
            latency: Duration::ZERO,
        }
    }

    /// Creates a store pre-filled with two single-pixel sample images.
    #[must_use]
    pub fn with_samples() -> Self {
        let mut store = Store {
            images: Vec::new(),
            next_id: FIRST_ID,
        };
        for (name, data) in [
            ("sample1.jpg", SAMPLE_RED_PIXEL),
            ("sample2.jpg", SAMPLE_GREEN_PIXEL),
        ] {
            let id = store.allocate_id();
            store.images.push(ImageRecord::new(id, name, data));
        }

        Self {
            store: Mutex::new(store),
            latency: Duration::ZERO,
        }
    }

    /// Sets the simulated latency applied after every operation.
    #[must_use]
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Identifier the next upload will receive.
    pub async fn next_id(&self) -> ImageId {
        self.store.lock().await.next_id
    }

    /// Number of stored images.
    pub async fn len(&self) -> usize {
        self.store.lock().await.images.len()
    }

    /// Returns `true` if the store holds no images.
    pub async fn is_empty(&self) -> bool {
        self.store.lock().await.images.is_empty()
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl ImageGateway for MockGateway {
    async fn list(&self) -> TransferResult<Vec<ImageRecord>> {
        let snapshot = self.store.lock().await.images.clone();
        tracing::debug!(count = snapshot.len(), "mock: listed images");
        self.simulate_latency().await;
        Ok(snapshot)
    }

    async fn upload(&self, file: &SelectedFile) -> TransferResult<ImageRecord> {
        let bytes = files::read_contents(file).await?;
        let data = STANDARD.encode(&bytes);

        let record = {
            let mut store = self.store.lock().await;
            let id = store.allocate_id();
            let record = ImageRecord::new(id, file.name(), data);
            store.images.push(record.clone());
            record
        };

        tracing::info!(id = %record.id, name = %record.file_name, "mock: uploaded image");
        self.simulate_latency().await;
        Ok(record)
    }

    async fn replace(&self, id: ImageId, file: &SelectedFile) -> TransferResult<ImageRecord> {
        if self.store.lock().await.position(id).is_none() {
            tracing::debug!(%id, "mock: replace target not found");
            return Err(TransferError::NotFound);
        }

        let bytes = files::read_contents(file).await?;
        let data = STANDARD.encode(&bytes);

        // The record may have been deleted while the file was being read.
        let record = {
            let mut store = self.store.lock().await;
            let index = store.position(id).ok_or(TransferError::NotFound)?;
            let image = &mut store.images[index];
            image.file_name = file.name().to_string();
            image.data = data;
            image.clone()
        };

        tracing::info!(%id, name = %record.file_name, "mock: replaced image");
        self.simulate_latency().await;
        Ok(record)
    }

    async fn delete(&self, id: ImageId) -> TransferResult<()> {
        {
            let mut store = self.store.lock().await;
            let Some(index) = store.position(id) else {
                tracing::debug!(%id, "mock: delete target not found");
                return Err(TransferError::NotFound);
            };
            store.images.remove(index);
        }

        tracing::info!(%id, "mock: deleted image");
        self.simulate_latency().await;
        Ok(())
    }

    async fn fetch(&self, id: ImageId) -> TransferResult<ImageRecord> {
        let record = {
            let store = self.store.lock().await;
            store
                .position(id)
                .map(|index| store.images[index].clone())
                .ok_or(TransferError::NotFound)?
        };

        tracing::debug!(%id, "mock: fetched image");
        self.simulate_latency().await;
        Ok(record)
    }

    async fn download(&self, id: ImageId) -> TransferResult<DownloadedImage> {
        let record = self.fetch(id).await?;
        let bytes = STANDARD
            .decode(record.data.as_bytes())
            .map_err(|e| TransferError::ReadFailure(e.to_string()))?;

        let content_type = content_type_for_file_name(Some(&record.file_name));
        Ok(DownloadedImage::new(&record.file_name, content_type, bytes))
    }

    fn kind(&self) -> GatewayKind {
        GatewayKind::Mock
    }
}
