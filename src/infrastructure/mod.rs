// SPDX-License-Identifier: MPL-2.0
//! Infrastructure layer adapters.
//!
//! This module contains concrete implementations of the port traits defined in
//! `application::port`. These adapters wrap external dependencies like the
//! HTTP client and filesystem I/O.
//!
//! # Available Adapters
//!
//! - [`mock`]: In-memory image store (implements [`ImageGateway`])
//! - [`http`]: REST backend client via `reqwest` (implements [`ImageGateway`])
//! - [`files`]: Turning paths on disk into [`SelectedFile`]s and reading them
//!
//! # Design Notes
//!
//! - Adapters implement traits from `application::port`
//! - Both gateways read file content through [`files::read_contents`], so a
//!   read failure looks the same whichever store is active
//!
//! [`ImageGateway`]: crate::application::port::ImageGateway
//! [`SelectedFile`]: crate::domain::upload::SelectedFile

pub mod files;
pub mod http;
pub mod mock;

// Re-export main types for convenience
pub use http::RemoteGateway;
pub use mock::MockGateway;
