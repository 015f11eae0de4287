// SPDX-License-Identifier: MPL-2.0
//! A controller bound to a gateway, driven by [`Action`]s and shell lines.
//!
//! Every entry point returns the lines to print. Notices are printed once and
//! then dismissed, like toasts; whether the last step failed is remembered
//! for the process exit code.

use crate::app::cli::{self, Action, ShellCommand};
use crate::app::controller::Controller;
use crate::app::i18n::I18n;
use crate::app::message::Message;
use crate::app::notice::Notice;
use crate::app::view;
use crate::application::port::ImageGateway;
use crate::infrastructure::files;
use std::path::{Path, PathBuf};

/// Result of one shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Continue(Vec<String>),
    Quit,
}

pub struct Session {
    controller: Controller,
    gateway: Box<dyn ImageGateway>,
    i18n: I18n,
    download_dir: PathBuf,
    failed: bool,
}

impl Session {
    pub fn new(gateway: Box<dyn ImageGateway>, i18n: I18n, download_dir: PathBuf) -> Self {
        Self {
            controller: Controller::new(),
            gateway,
            i18n,
            download_dir,
            failed: false,
        }
    }

    #[must_use]
    pub fn controller(&self) -> &Controller {
        &self.controller
    }

    #[must_use]
    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    #[must_use]
    pub fn gateway(&self) -> &dyn ImageGateway {
        self.gateway.as_ref()
    }

    /// Whether the last reported step ended with an error notice.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failed
    }

    async fn send(&mut self, message: Message) {
        self.controller.dispatch(self.gateway.as_ref(), message).await;
    }

    /// Renders pending notices, then dismisses them.
    fn take_notices(&mut self) -> Vec<String> {
        self.failed = self.controller.error().is_some();
        let lines = view::notices(&self.controller, &self.i18n);
        self.controller.update(Message::ClearError);
        self.controller.update(Message::ClearSuccess);
        lines
    }

    /// Probes `path` and offers it to the controller.
    async fn select(&mut self, path: &Path) {
        match files::probe(path) {
            Ok(file) => self.send(Message::FileChosen(file)).await,
            Err(err) => {
                self.send(Message::FileUnreadable {
                    path: path.to_path_buf(),
                    reason: err.to_string(),
                })
                .await;
            }
        }
    }

    /// Selects `path` and submits it unless it was refused.
    async fn select_and_submit(&mut self, path: &Path) {
        self.select(path).await;
        if self.controller.error().is_none() {
            self.send(Message::Submit).await;
        }
    }

    fn with_list(&self, mut lines: Vec<String>) -> Vec<String> {
        if !self.failed {
            lines.extend(view::image_list(self.controller.images(), &self.i18n));
        }
        lines
    }

    /// Runs one action and returns what to print.
    pub async fn perform(&mut self, action: Action) -> Vec<String> {
        match action {
            Action::List => {
                self.send(Message::LoadImages).await;
                let lines = self.take_notices();
                self.with_list(lines)
            }
            Action::Show(id) => {
                self.send(Message::Show(id)).await;
                let mut lines = self.take_notices();
                if let Some(image) = self.controller.focused().filter(|_| !self.failed) {
                    lines.push(view::focused(image, &self.i18n));
                }
                lines
            }
            Action::Upload(path) => {
                if self.controller.edit_target().is_some() {
                    self.send(Message::CancelEdit).await;
                }
                self.select_and_submit(&path).await;
                let lines = self.take_notices();
                self.with_list(lines)
            }
            Action::Replace(id, path) => {
                self.send(Message::StartEdit(id)).await;
                self.send(Message::ClearSuccess).await;
                self.select_and_submit(&path).await;
                let lines = self.take_notices();
                self.with_list(lines)
            }
            Action::Delete(id) => {
                self.send(Message::Delete(id)).await;
                let lines = self.take_notices();
                self.with_list(lines)
            }
            Action::Download(id, directory) => {
                let directory = directory.unwrap_or_else(|| self.download_dir.clone());
                self.send(Message::Download { id, directory }).await;
                self.take_notices()
            }
            Action::Help => {
                self.failed = false;
                vec![self.i18n.tr("cli-usage")]
            }
            // Starting a shell is handled by the caller.
            Action::Shell => Vec::new(),
        }
    }

    /// Runs one line typed in the shell.
    pub async fn shell_line(&mut self, line: &str) -> Step {
        let command = match cli::parse_shell_line(line) {
            Ok(command) => command,
            Err(err) => {
                self.failed = true;
                let (name, value) = err.arg();
                let notice = Notice::error(err.i18n_key()).with_arg(name, value);
                return Step::Continue(vec![view::notice_line(&notice, &self.i18n)]);
            }
        };

        let lines = match command {
            ShellCommand::Nothing => Vec::new(),
            ShellCommand::Quit => return Step::Quit,
            ShellCommand::Run(Action::Help) => {
                self.failed = false;
                vec![self.i18n.tr("shell-help")]
            }
            ShellCommand::Run(action) => self.perform(action).await,
            ShellCommand::Select(path) => {
                self.select(&path).await;
                let mut lines = self.take_notices();
                if let Some(file) = self.controller.selected().filter(|_| !self.failed) {
                    lines.push(self.i18n.tr_with_args(
                        "notice-file-selected",
                        &[("file_name", file.name()), ("size", &file.size().to_string())],
                    ));
                }
                lines
            }
            ShellCommand::Edit(id) => {
                self.send(Message::StartEdit(id)).await;
                self.take_notices()
            }
            ShellCommand::Cancel => {
                self.send(Message::CancelEdit).await;
                self.take_notices()
            }
            ShellCommand::Submit => {
                if self.controller.selected().is_none() {
                    self.failed = false;
                    vec![view::notice_line(
                        &Notice::info("notice-no-file-selected"),
                        &self.i18n,
                    )]
                } else {
                    self.send(Message::Submit).await;
                    let lines = self.take_notices();
                    self.with_list(lines)
                }
            }
            ShellCommand::Status => {
                view::status(&self.controller, self.gateway.kind(), &self.i18n)
            }
        };
        Step::Continue(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::config::Config;
    use crate::domain::image::ImageId;
    use crate::infrastructure::MockGateway;
    use tempfile::tempdir;

    fn session(download_dir: &Path) -> Session {
        Session::new(
            Box::new(MockGateway::with_samples()),
            I18n::new(Some("en-US".to_string()), &Config::default()),
            download_dir.to_path_buf(),
        )
    }

    fn lines(step: Step) -> Vec<String> {
        match step {
            Step::Continue(lines) => lines,
            Step::Quit => panic!("unexpected quit"),
        }
    }

    #[tokio::test]
    async fn list_prints_samples() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = session.perform(Action::List).await;

        assert_eq!(output[0], "2 images");
        assert!(output[1].contains("sample1.jpg"));
        assert!(!session.failed());
    }

    #[tokio::test]
    async fn upload_from_disk_then_list() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("a.png");
        std::fs::write(&path, [0u8; 10]).expect("write fixture");
        let mut session = session(temp_dir.path());

        let output = session.perform(Action::Upload(path)).await;

        assert_eq!(output[0], "✓ Image uploaded successfully!");
        assert!(output.iter().any(|line| line.contains("#3  a.png")));
        assert!(!session.failed());
    }

    #[tokio::test]
    async fn upload_of_text_file_fails_without_touching_store() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("notes.txt");
        std::fs::write(&path, "hello").expect("write fixture");
        let mut session = session(temp_dir.path());

        let output = session.perform(Action::Upload(path)).await;

        assert_eq!(output.len(), 1);
        assert!(output[0].contains("valid image file"));
        assert!(session.failed());
        assert_eq!(session.gateway().list().await.map(|l| l.len()), Ok(2));
    }

    #[tokio::test]
    async fn missing_file_is_reported() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = session
            .perform(Action::Upload(temp_dir.path().join("ghost.png")))
            .await;

        assert!(output[0].contains("Could not open"));
        assert!(session.failed());
    }

    #[tokio::test]
    async fn shell_edit_select_submit_replaces() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let path = temp_dir.path().join("new.gif");
        std::fs::write(&path, [1u8; 6]).expect("write fixture");
        let mut session = session(temp_dir.path());

        lines(session.shell_line("list").await);
        let edit = lines(session.shell_line("edit 2").await);
        assert_eq!(edit, vec!["· Select a new file to replace \"sample2.jpg\"".to_string()]);

        let select = lines(session.shell_line(&format!("select {}", path.display())).await);
        assert!(select[0].starts_with("Selected \"new.gif\""));

        let submit = lines(session.shell_line("submit").await);
        assert_eq!(submit[0], "✓ Image updated successfully!");
        assert!(submit.iter().any(|line| line.contains("#2  new.gif")));
        assert!(session.controller().edit_target().is_none());
    }

    #[tokio::test]
    async fn shell_reports_parse_errors_and_quits() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = lines(session.shell_line("show abc").await);
        assert_eq!(output, vec!["✗ \"abc\" is not a valid image id".to_string()]);
        assert!(session.failed());

        assert_eq!(lines(session.shell_line("").await), Vec::<String>::new());
        assert_eq!(session.shell_line("quit").await, Step::Quit);
    }

    #[tokio::test]
    async fn shell_submit_without_file_hints() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = lines(session.shell_line("submit").await);
        assert_eq!(output, vec!["· Select a file first.".to_string()]);
    }

    #[tokio::test]
    async fn download_defaults_to_configured_directory() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = session.perform(Action::Download(ImageId::new(2), None)).await;

        assert!(output[0].starts_with("✓ Saved \"sample2.jpg\""));
        assert!(temp_dir.path().join("sample2.jpg").exists());
    }

    #[tokio::test]
    async fn delete_missing_image_fails() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = session.perform(Action::Delete(ImageId::new(99))).await;

        assert_eq!(
            output,
            vec!["✗ Failed to delete image. Please try again. (Image not found)".to_string()]
        );
        assert!(session.failed());
    }

    #[tokio::test]
    async fn status_shows_backend() {
        let temp_dir = tempdir().expect("failed to create temp dir");
        let mut session = session(temp_dir.path());

        let output = lines(session.shell_line("status").await);
        assert_eq!(output[0], "Backend: mock");
    }
}
