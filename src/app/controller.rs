// SPDX-License-Identifier: MPL-2.0
//! Presentation state and its transitions.
//!
//! [`Controller::update`] is a pure state machine: it applies one
//! [`Message`] and may return the [`Command`] to run next. Commands are
//! executed against an [`ImageGateway`] by [`Controller::dispatch`], which
//! feeds each result back into `update` until nothing is left to do.
//!
//! Busy state is the [`Mode`] enum; the image being edited is tracked
//! separately so that editing never blocks listing or deleting.

use crate::app::command::Command;
use crate::app::message::Message;
use crate::app::notice::Notice;
use crate::application::port::{ImageGateway, TransferError};
use crate::domain::image::{ImageId, ImageRecord};
use crate::domain::upload::{self, SelectedFile};
use crate::error::Error;

/// What the controller is waiting for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Idle,
    LoadingList,
    Uploading,
}

impl Mode {
    #[must_use]
    pub fn i18n_key(self) -> &'static str {
        match self {
            Mode::Idle => "mode-idle",
            Mode::LoadingList => "mode-loading-list",
            Mode::Uploading => "mode-uploading",
        }
    }
}

#[derive(Debug, Default)]
pub struct Controller {
    images: Vec<ImageRecord>,
    selected: Option<SelectedFile>,
    edit_target: Option<ImageId>,
    mode: Mode,
    error: Option<Notice>,
    success: Option<Notice>,
    focused: Option<ImageRecord>,
}

impl Controller {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    #[must_use]
    pub fn selected(&self) -> Option<&SelectedFile> {
        self.selected.as_ref()
    }

    #[must_use]
    pub fn edit_target(&self) -> Option<ImageId> {
        self.edit_target
    }

    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[must_use]
    pub fn error(&self) -> Option<&Notice> {
        self.error.as_ref()
    }

    /// Success or informational notice.
    #[must_use]
    pub fn success(&self) -> Option<&Notice> {
        self.success.as_ref()
    }

    /// Record loaded by the last successful `Show`.
    #[must_use]
    pub fn focused(&self) -> Option<&ImageRecord> {
        self.focused.as_ref()
    }

    /// Applies `message` and returns the command to run next, if any.
    pub fn update(&mut self, message: Message) -> Option<Command> {
        match message {
            Message::LoadImages => {
                if self.mode == Mode::Idle {
                    self.mode = Mode::LoadingList;
                }
                self.error = None;
                Some(Command::List)
            }
            Message::ImagesLoaded(result) => {
                if self.mode == Mode::LoadingList {
                    self.mode = Mode::Idle;
                }
                match result {
                    Ok(images) => self.images = images,
                    Err(err) => self.fail("error-load-images", "load images", &err),
                }
                None
            }
            Message::FileChosen(file) => {
                match upload::validate(&file) {
                    Ok(()) => {
                        tracing::debug!(name = file.name(), size = file.size(), "file selected");
                        self.selected = Some(file);
                        self.error = None;
                    }
                    Err(rejection) => {
                        tracing::warn!(name = file.name(), "file rejected: {rejection}");
                        self.error = Some(Notice::error(rejection.i18n_key()));
                    }
                }
                None
            }
            Message::FileUnreadable { path, reason } => {
                tracing::error!(path = %path.display(), "cannot open file: {reason}");
                self.error = Some(
                    Notice::error("error-read-file")
                        .with_arg("path", path.display())
                        .with_detail(reason),
                );
                None
            }
            Message::Submit => {
                if self.mode == Mode::Uploading {
                    return None;
                }
                let file = self.selected.clone()?;
                self.mode = Mode::Uploading;
                self.error = None;
                Some(match self.edit_target {
                    Some(id) => Command::Replace(id, file),
                    None => Command::Upload(file),
                })
            }
            Message::Submitted { target, result } => {
                self.mode = Mode::Idle;
                match result {
                    Ok(record) => {
                        tracing::info!(id = %record.id, name = %record.file_name, "image saved");
                        let key = if target.is_some() {
                            "success-update"
                        } else {
                            "success-upload"
                        };
                        self.success = Some(Notice::success(key));
                        self.selected = None;
                        self.edit_target = None;
                        self.update(Message::LoadImages)
                    }
                    Err(err) => {
                        let (key, action) = if target.is_some() {
                            ("error-update", "update image")
                        } else {
                            ("error-upload", "upload image")
                        };
                        self.fail(key, action, &err);
                        None
                    }
                }
            }
            Message::StartEdit(id) => {
                let file_name = self
                    .images
                    .iter()
                    .find(|image| image.id == id)
                    .map_or_else(|| format!("#{id}"), |image| image.file_name.clone());
                self.edit_target = Some(id);
                self.success =
                    Some(Notice::info("notice-edit-started").with_arg("file_name", file_name));
                self.error = None;
                None
            }
            Message::CancelEdit => {
                self.edit_target = None;
                self.selected = None;
                self.success = None;
                None
            }
            Message::Delete(id) => {
                self.error = None;
                Some(Command::Delete(id))
            }
            Message::Deleted { id, result } => match result {
                Ok(()) => {
                    tracing::info!(%id, "image deleted");
                    if self.edit_target == Some(id) {
                        self.edit_target = None;
                    }
                    if self.focused.as_ref().is_some_and(|image| image.id == id) {
                        self.focused = None;
                    }
                    self.success = Some(Notice::success("success-delete"));
                    self.update(Message::LoadImages)
                }
                Err(err) => {
                    self.fail("error-delete", "delete image", &err);
                    None
                }
            },
            Message::Show(id) => {
                self.error = None;
                Some(Command::Fetch(id))
            }
            Message::Fetched(result) => {
                match result {
                    Ok(record) => self.focused = Some(record),
                    Err(err) => self.fail("error-fetch", "fetch image", &err),
                }
                None
            }
            Message::Download { id, directory } => {
                self.error = None;
                Some(Command::Download { id, directory })
            }
            Message::Downloaded { directory, result } => {
                match result {
                    Ok(path) => {
                        let file_name = path
                            .file_name()
                            .map(|name| name.to_string_lossy().into_owned())
                            .unwrap_or_default();
                        self.success = Some(
                            Notice::success("success-download")
                                .with_arg("file_name", file_name)
                                .with_arg("path", directory.display()),
                        );
                    }
                    Err(Error::Transfer(err)) => {
                        self.fail("error-download", "download image", &err);
                    }
                    Err(err) => {
                        tracing::error!(directory = %directory.display(), "failed to save download: {err}");
                        self.error = Some(
                            Notice::error("error-write-download")
                                .with_arg("path", directory.display())
                                .with_detail(err),
                        );
                    }
                }
                None
            }
            Message::ClearError => {
                self.error = None;
                None
            }
            Message::ClearSuccess => {
                self.success = None;
                None
            }
        }
    }

    /// Applies `message`, then runs every resulting command to completion.
    pub async fn dispatch(&mut self, gateway: &dyn ImageGateway, message: Message) {
        let mut next = self.update(message);
        while let Some(command) = next {
            tracing::trace!(?command, "executing command");
            let outcome = command.execute(gateway).await;
            next = self.update(outcome);
        }
    }

    fn fail(&mut self, key: &str, action: &str, err: &TransferError) {
        tracing::error!(backend_error = %err, "failed to {action}");
        self.error = Some(Notice::error(key).with_detail(err));
    }
}
