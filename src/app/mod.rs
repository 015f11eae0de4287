// SPDX-License-Identifier: MPL-2.0
//! Command-line application: configuration, localization and the
//! controller that sequences gateway calls.
//!
//! [`run`] wires everything together: it resolves directories, loads
//! `settings.toml`, applies command-line overrides, picks the gateway
//! strategy once with [`connect`], and then either performs a single action
//! or hands a [`session::Session`] to the interactive shell.

pub mod cli;
pub mod command;
pub mod config;
pub mod controller;
pub mod downloads;
pub mod i18n;
pub mod message;
pub mod notice;
pub mod paths;
pub mod session;
pub mod shell;
pub mod view;

pub use cli::Action;
pub use controller::{Controller, Mode};
pub use message::{Flags, Message};

use crate::application::port::{ImageGateway, TransferError};
use crate::error::Result;
use crate::infrastructure::{MockGateway, RemoteGateway};
use config::{BackendMode, Config};
use i18n::I18n;
use notice::Notice;
use session::Session;
use std::path::PathBuf;

/// Builds the gateway selected by `config`.
///
/// # Errors
///
/// Returns [`TransferError::Transport`] if the HTTP client cannot be created.
pub fn connect(config: &Config) -> std::result::Result<Box<dyn ImageGateway>, TransferError> {
    match config.backend_mode() {
        BackendMode::Mock => {
            let gateway = if config.seed_samples() {
                MockGateway::with_samples()
            } else {
                MockGateway::new()
            };
            tracing::info!(seeded = config.seed_samples(), "using in-memory image store");
            Ok(Box::new(gateway.with_latency(config.mock_latency())))
        }
        BackendMode::Remote => {
            tracing::info!(url = config.api_url(), "using REST image backend");
            Ok(Box::new(RemoteGateway::new(config.api_url())?))
        }
    }
}

/// Applies `--lang`, `--mock`/`--remote` and `--api-url` on top of the
/// loaded settings.
pub fn apply_flags(config: &mut Config, flags: &Flags) {
    if let Some(lang) = &flags.lang {
        config.general.language = Some(lang.clone());
    }
    if let Some(mode) = flags.backend {
        config.backend.mode = Some(mode);
    }
    if let Some(url) = &flags.api_url {
        config.backend.api_url = Some(url.clone());
    }
}

/// Writes `config` to `settings.toml` under `base_dir` (or the resolved
/// config directory) and reports the outcome.
pub fn remember_settings(config: &Config, base_dir: Option<PathBuf>) -> Notice {
    match config::save_with_override(config, base_dir) {
        Ok(()) => {
            tracing::info!("saved settings");
            Notice::success("success-settings-saved")
        }
        Err(err) => {
            tracing::warn!("failed to save settings: {err}");
            Notice::warning("notice-settings-save-error").with_detail(err)
        }
    }
}

/// Runs the application and returns `true` if it ended without an error
/// notice.
///
/// # Errors
///
/// Returns an I/O error if the shell cannot read stdin or write stdout.
pub async fn run(flags: Flags) -> Result<bool> {
    paths::init_cli_overrides(flags.data_dir.clone(), flags.config_dir.clone());

    let (mut config, warning) = config::load();
    apply_flags(&mut config, &flags);
    let i18n = I18n::new(flags.lang.clone(), &config);

    if let Some(key) = warning {
        eprintln!("{}", view::notice_line(&Notice::warning(key), &i18n));
    }
    if flags.save {
        let notice = remember_settings(&config, None);
        eprintln!("{}", view::notice_line(&notice, &i18n));
    }
    if flags.action == Action::Help {
        println!("{}", i18n.tr("cli-usage"));
        return Ok(true);
    }

    let gateway = match connect(&config) {
        Ok(gateway) => gateway,
        Err(err) => {
            tracing::error!("failed to set up gateway: {err}");
            let notice = Notice::error("error-backend-unavailable").with_detail(err);
            eprintln!("{}", view::notice_line(&notice, &i18n));
            return Ok(false);
        }
    };

    let download_dir = config
        .download_dir()
        .unwrap_or_else(|| PathBuf::from("."));
    let mut session = Session::new(gateway, i18n, download_dir);

    match flags.action {
        Action::Shell => {
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&mut session, input, tokio::io::stdout()).await?;
        }
        action => {
            for line in session.perform(action).await {
                println!("{line}");
            }
        }
    }
    Ok(!session.failed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::port::GatewayKind;
    use tempfile::tempdir;

    #[test]
    fn connect_honours_backend_mode() {
        let mut config = Config::default();
        config.backend.mode = Some(BackendMode::Mock);
        assert_eq!(connect(&config).map(|g| g.kind()), Ok(GatewayKind::Mock));

        config.backend.mode = Some(BackendMode::Remote);
        assert_eq!(connect(&config).map(|g| g.kind()), Ok(GatewayKind::Remote));
    }

    #[tokio::test]
    async fn unseeded_mock_starts_empty() {
        let mut config = Config::default();
        config.backend.mode = Some(BackendMode::Mock);
        config.mock.seed_samples = Some(false);

        let gateway = connect(&config).expect("mock gateway");
        assert_eq!(gateway.list().await.map(|images| images.len()), Ok(0));
    }

    #[test]
    fn flags_override_settings() {
        let mut config = Config::default();
        let flags = Flags {
            backend: Some(BackendMode::Mock),
            api_url: Some("http://example.test/api/images".to_string()),
            ..Flags::default()
        };

        apply_flags(&mut config, &flags);

        assert_eq!(config.backend_mode(), BackendMode::Mock);
        assert_eq!(config.api_url(), "http://example.test/api/images");
    }

    #[test]
    fn saved_flags_are_loaded_next_time() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let flags = Flags {
            lang: Some("fr".to_string()),
            backend: Some(BackendMode::Mock),
            save: true,
            ..Flags::default()
        };
        let mut config = Config::default();
        apply_flags(&mut config, &flags);

        let notice = remember_settings(&config, Some(temp_dir.path().to_path_buf()));
        assert_eq!(notice.key(), "success-settings-saved");

        let (loaded, warning) = config::load_with_override(Some(temp_dir.path().to_path_buf()));
        assert!(warning.is_none());
        assert_eq!(loaded.general.language.as_deref(), Some("fr"));
        assert_eq!(loaded.backend_mode(), BackendMode::Mock);
        assert_eq!(I18n::new(None, &loaded).current_locale().to_string(), "fr");
    }

    #[test]
    fn unwritable_config_dir_is_a_warning() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let blocker = temp_dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"x").expect("write blocker file");

        let notice = remember_settings(&Config::default(), Some(blocker));
        assert_eq!(notice.key(), "notice-settings-save-error");
        assert!(notice.detail().is_some());
    }
}
