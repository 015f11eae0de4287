// SPDX-License-Identifier: MPL-2.0
//! Port definitions (traits) for dependency inversion.
//!
//! This module defines abstract interfaces that infrastructure adapters implement.
//! These traits use only domain types, ensuring the application layer remains
//! independent of concrete implementations.
//!
//! # Available Ports
//!
//! - [`gateway`]: Image store access (list, upload, replace, delete, fetch, download)
//!
//! # Design Notes
//!
//! - All traits use domain types only (no `reqwest` types)
//! - Traits are `Send + Sync` so adapters can be shared across tasks
//! - Methods return `Result` with port error types

pub mod gateway;

// Re-export main types for convenience
pub use gateway::{GatewayKind, ImageGateway, TransferError, TransferResult};
