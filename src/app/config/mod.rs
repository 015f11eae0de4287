// SPDX-License-Identifier: MPL-2.0
//! This module handles the application's configuration, including loading and saving
//! user preferences to a `settings.toml` file.
//!
//! # Configuration Sections
//!
//! The configuration is organized into logical sections:
//! - `[general]` - Language
//! - `[backend]` - Which image store to use and where the REST API lives
//! - `[mock]` - Offline store seeding and simulated latency
//! - `[downloads]` - Target directory for downloaded images
//!
//! # Path Resolution
//!
//! The config file location can be customized for testing or portable deployments:
//! 1. Use `load_from_path()`/`save_to_path()` with explicit path
//! 2. Pass `--config-dir` or set `IMAGE_DEPOT_CONFIG_DIR`
//! 3. Falls back to platform-specific config directory
//!
//! # Examples
//!
//! ```no_run
//! use image_depot::app::config::{self, BackendMode};
//!
//! // Load existing configuration (returns tuple with optional warning)
//! let (mut config, _warning) = config::load();
//!
//! // Switch to the offline store
//! config.backend.mode = Some(BackendMode::Mock);
//!
//! // Save the modified configuration to the default location
//! config::save_with_override(&config, None).expect("Failed to save config");
//! ```

pub mod defaults;

pub use defaults::*;

use crate::app::paths;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_FILE: &str = "settings.toml";

// =============================================================================
// Enums
// =============================================================================

/// Which image store the client talks to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum BackendMode {
    /// In-memory store for offline demos.
    Mock,
    /// REST backend.
    #[default]
    Remote,
}

// =============================================================================
// Section Structs
// =============================================================================

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GeneralConfig {
    /// UI language code (e.g., "en-US", "fr").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Image store selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    /// Mock or remote store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<BackendMode>,

    /// Base URL of the REST API.
    #[serde(default = "default_api_url", skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            mode: Some(BackendMode::default()),
            api_url: default_api_url(),
        }
    }
}

/// Offline store settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MockConfig {
    /// Start with the bundled sample images.
    #[serde(
        default = "default_seed_samples",
        skip_serializing_if = "Option::is_none"
    )]
    pub seed_samples: Option<bool>,

    /// Simulated latency per operation in milliseconds.
    #[serde(default = "default_latency_ms", skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            seed_samples: default_seed_samples(),
            latency_ms: default_latency_ms(),
        }
    }
}

/// Download settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DownloadsConfig {
    /// Directory downloaded images are written to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

// =============================================================================
// Main Config Struct (Sectioned)
// =============================================================================

/// Application configuration with logical sections.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Config {
    /// General application settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Image store selection.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Offline store settings.
    #[serde(default)]
    pub mock: MockConfig,

    /// Download settings.
    #[serde(default)]
    pub downloads: DownloadsConfig,
}

impl Config {
    /// Effective backend mode.
    #[must_use]
    pub fn backend_mode(&self) -> BackendMode {
        self.backend.mode.unwrap_or_default()
    }

    /// Effective REST base URL.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.backend
            .api_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    /// Whether the mock store should be seeded with samples.
    #[must_use]
    pub fn seed_samples(&self) -> bool {
        self.mock.seed_samples.unwrap_or(DEFAULT_SEED_SAMPLES)
    }

    /// Simulated mock latency, capped at [`MAX_MOCK_LATENCY_MS`].
    #[must_use]
    pub fn mock_latency(&self) -> Duration {
        let ms = self
            .mock
            .latency_ms
            .unwrap_or(DEFAULT_MOCK_LATENCY_MS)
            .min(MAX_MOCK_LATENCY_MS);
        Duration::from_millis(ms)
    }

    /// Directory downloads are written to.
    ///
    /// Uses `[downloads] directory` when set, otherwise the `downloads`
    /// subdirectory of the application data directory.
    #[must_use]
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.downloads.directory.clone().or_else(|| {
            paths::get_app_data_dir().map(|mut path| {
                path.push(DOWNLOADS_SUBDIR);
                path
            })
        })
    }
}

// =============================================================================
// Default Value Functions
// =============================================================================

fn default_api_url() -> Option<String> {
    Some(DEFAULT_API_URL.to_string())
}

fn default_seed_samples() -> Option<bool> {
    Some(DEFAULT_SEED_SAMPLES)
}

fn default_latency_ms() -> Option<u64> {
    Some(DEFAULT_MOCK_LATENCY_MS)
}

// =============================================================================
// Config Path Resolution
// =============================================================================

/// Returns the config file path with an optional override.
fn get_config_path_with_override(base_dir: Option<PathBuf>) -> Option<PathBuf> {
    paths::get_app_config_dir_with_override(base_dir).map(|mut path| {
        path.push(CONFIG_FILE);
        path
    })
}

// =============================================================================
// Load Functions
// =============================================================================

/// Loads the configuration from the default path.
///
/// Returns a tuple of (config, optional_warning). If loading fails, returns
/// default config with a warning message key explaining what went wrong.
pub fn load() -> (Config, Option<String>) {
    load_with_override(None)
}

/// Loads the configuration from a custom directory.
pub fn load_with_override(base_dir: Option<PathBuf>) -> (Config, Option<String>) {
    if let Some(path) = get_config_path_with_override(base_dir) {
        if path.exists() {
            match load_from_path(&path) {
                Ok(config) => return (config, None),
                Err(err) => {
                    tracing::warn!(path = %path.display(), "failed to load config: {err}");
                    return (
                        Config::default(),
                        Some("notice-config-load-error".to_string()),
                    );
                }
            }
        }
    }
    (Config::default(), None)
}

/// Loads configuration from a specific path.
pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}

// =============================================================================
// Save Functions
// =============================================================================

/// Saves the configuration to a custom directory, or the default one when
/// `base_dir` is `None`.
pub fn save_with_override(config: &Config, base_dir: Option<PathBuf>) -> Result<()> {
    if let Some(path) = get_config_path_with_override(base_dir) {
        return save_to_path(config, &path);
    }
    Ok(())
}

/// Saves configuration to a specific path.
pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config).map_err(Error::from)?;
    fs::write(path, content)?;
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip_preserves_settings() {
        let config = Config {
            general: GeneralConfig {
                language: Some("fr".to_string()),
            },
            backend: BackendConfig {
                mode: Some(BackendMode::Mock),
                api_url: Some("http://images.local/api/images".to_string()),
            },
            mock: MockConfig {
                seed_samples: Some(false),
                latency_ms: Some(250),
            },
            downloads: DownloadsConfig {
                directory: Some(PathBuf::from("/tmp/depot")),
            },
        };
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("nested").join("settings.toml");

        save_to_path(&config, &config_path).expect("failed to save config");
        let loaded = load_from_path(&config_path).expect("failed to load config");

        assert_eq!(loaded, config);
    }

    #[test]
    fn load_from_path_invalid_toml_errors() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "not = valid = toml").expect("failed to write invalid toml");

        match load_from_path(&config_path) {
            Err(Error::Config(_)) => {}
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn load_with_override_falls_back_with_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        fs::write(temp_dir.path().join(CONFIG_FILE), "[backend]\nmode = \"carrier-pigeon\"")
            .expect("failed to write config");

        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert_eq!(warning.as_deref(), Some("notice-config-load-error"));
    }

    #[test]
    fn load_with_override_missing_file_is_default_without_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let (config, warning) = load_with_override(Some(temp_dir.path().to_path_buf()));
        assert_eq!(config, Config::default());
        assert!(warning.is_none());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let config_path = temp_dir.path().join("settings.toml");
        fs::write(&config_path, "[backend]\nmode = \"mock\"\n").expect("failed to write config");

        let config = load_from_path(&config_path).expect("load should succeed");
        assert_eq!(config.backend_mode(), BackendMode::Mock);
        assert_eq!(config.api_url(), DEFAULT_API_URL);
        assert!(config.seed_samples());
        assert_eq!(config.mock_latency(), Duration::ZERO);
    }

    #[test]
    fn save_with_override_writes_settings_file() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        save_with_override(&Config::default(), Some(temp_dir.path().to_path_buf()))
            .expect("save should succeed");
        assert!(temp_dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn default_config_targets_local_backend() {
        let config = Config::default();
        assert_eq!(config.backend_mode(), BackendMode::Remote);
        assert_eq!(config.api_url(), "http://localhost:8080/api/images");
    }

    #[test]
    fn blank_api_url_uses_default() {
        let mut config = Config::default();
        config.backend.api_url = Some("   ".to_string());
        assert_eq!(config.api_url(), DEFAULT_API_URL);
    }

    #[test]
    fn mock_latency_is_capped() {
        let mut config = Config::default();
        config.mock.latency_ms = Some(MAX_MOCK_LATENCY_MS * 10);
        assert_eq!(
            config.mock_latency(),
            Duration::from_millis(MAX_MOCK_LATENCY_MS)
        );
    }

    #[test]
    fn explicit_download_dir_wins() {
        let mut config = Config::default();
        config.downloads.directory = Some(PathBuf::from("/srv/images"));
        assert_eq!(config.download_dir(), Some(PathBuf::from("/srv/images")));
    }
}
