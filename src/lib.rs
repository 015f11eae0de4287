// SPDX-License-Identifier: MPL-2.0
//! `image_depot` is a client for storing images behind a REST backend, with an
//! in-memory store for offline demos.
//!
//! Layers, from the inside out:
//!
//! - [`domain`]: image records, selected files and upload validation
//! - [`application`]: the [`ImageGateway`](application::port::ImageGateway) port
//! - [`infrastructure`]: the REST and in-memory gateway implementations
//! - [`app`]: configuration, localization, the controller and the CLI

pub mod app;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
