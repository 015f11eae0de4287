// SPDX-License-Identifier: MPL-2.0
//! Centralized default values for all configuration constants.
//!
//! This module serves as the single source of truth for default values
//! used across the application. Constants are organized by category.
//!
//! # Categories
//!
//! - **Backend**: REST endpoint location
//! - **Mock**: Offline store seeding and simulated latency
//! - **Downloads**: Where downloaded images are written

// ==========================================================================
// Backend Defaults
// ==========================================================================

/// Base URL of the image REST API.
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api/images";

// ==========================================================================
// Mock Store Defaults
// ==========================================================================

/// Whether the mock store starts with the two sample images.
pub const DEFAULT_SEED_SAMPLES: bool = true;

/// Default simulated latency for mock operations (in milliseconds).
pub const DEFAULT_MOCK_LATENCY_MS: u64 = 0;

/// Maximum simulated latency (in milliseconds).
pub const MAX_MOCK_LATENCY_MS: u64 = 10_000;

// ==========================================================================
// Download Defaults
// ==========================================================================

/// Subdirectory of the data directory used when no download directory is set.
pub const DOWNLOADS_SUBDIR: &str = "downloads";
