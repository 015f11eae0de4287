// SPDX-License-Identifier: MPL-2.0
//! Controller messages and runtime flags.

use crate::app::cli::Action;
use crate::app::config::BackendMode;
use crate::application::port::TransferError;
use crate::domain::image::{ImageId, ImageRecord};
use crate::domain::upload::SelectedFile;
use crate::error::Error;
use std::path::PathBuf;

/// Inputs consumed by `Controller::update`.
///
/// User intents and gateway completions share one enum so that every state
/// transition goes through a single entry point.
#[derive(Debug, Clone)]
pub enum Message {
    /// Refresh the image list.
    LoadImages,
    ImagesLoaded(Result<Vec<ImageRecord>, TransferError>),
    /// The user picked a file; it is validated before being kept.
    FileChosen(SelectedFile),
    /// A picked file could not be opened.
    FileUnreadable { path: PathBuf, reason: String },
    /// Upload the selected file, or replace the edit target with it.
    Submit,
    Submitted {
        /// Image being replaced, `None` for a new upload.
        target: Option<ImageId>,
        result: Result<ImageRecord, TransferError>,
    },
    StartEdit(ImageId),
    CancelEdit,
    Delete(ImageId),
    Deleted {
        id: ImageId,
        result: Result<(), TransferError>,
    },
    Show(ImageId),
    Fetched(Result<ImageRecord, TransferError>),
    /// Save an image into `directory`.
    Download { id: ImageId, directory: PathBuf },
    Downloaded {
        directory: PathBuf,
        /// Path the image was written to.
        result: Result<PathBuf, Error>,
    },
    ClearError,
    ClearSuccess,
}

/// Runtime flags passed in from the command line.
#[derive(Debug, Default)]
pub struct Flags {
    /// Optional locale override in BCP-47 form (e.g. `fr`, `en-US`).
    pub lang: Option<String>,
    /// Backend override (`--mock` / `--remote`).
    pub backend: Option<BackendMode>,
    /// REST base URL override.
    pub api_url: Option<String>,
    /// Optional data directory override.
    /// Takes precedence over `IMAGE_DEPOT_DATA_DIR` environment variable.
    pub data_dir: Option<String>,
    /// Optional config directory override (for settings.toml).
    /// Takes precedence over `IMAGE_DEPOT_CONFIG_DIR` environment variable.
    pub config_dir: Option<String>,
    /// Enable debug logging.
    pub verbose: bool,
    /// Write the effective settings back to `settings.toml` (`--save`).
    pub save: bool,
    /// What to do once started.
    pub action: Action,
}
