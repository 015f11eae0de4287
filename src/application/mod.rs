// SPDX-License-Identifier: MPL-2.0
//! Application layer - Use cases and orchestration.
//!
//! This module contains the application layer of the Clean Architecture:
//!
//! - [`port`]: Trait definitions (interfaces) for dependency inversion
//!
//! # Dependency Rule
//!
//! - Application layer depends on domain layer (uses domain types)
//! - Infrastructure layer implements application layer ports
//! - Presentation layer (`app`) drives the ports through the controller
//!
//! # Example
//!
//! ```ignore
//! use image_depot::application::port::ImageGateway;
//! use image_depot::infrastructure::mock::MockGateway;
//!
//! // Infrastructure implements the port trait
//! let gateway: Box<dyn ImageGateway> = Box::new(MockGateway::new());
//! let images = gateway.list().await?;
//! ```

pub mod port;
