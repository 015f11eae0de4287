// SPDX-License-Identifier: MPL-2.0
//! Command-line parsing for the `image-depot` binary and its shell.

use crate::app::config::BackendMode;
use crate::app::message::Flags;
use crate::domain::image::ImageId;
use crate::error::{Error, Result};
use std::ffi::OsString;
use std::path::PathBuf;

/// One operation, requested either as a subcommand or a shell line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Action {
    List,
    Show(ImageId),
    Upload(PathBuf),
    Replace(ImageId, PathBuf),
    Delete(ImageId),
    /// `None` saves to the configured download directory.
    Download(ImageId, Option<PathBuf>),
    Shell,
    #[default]
    Help,
}

/// Parses the process arguments into [`Flags`].
///
/// # Errors
///
/// Returns [`Error::Config`] for unknown commands, missing operands,
/// malformed ids or leftover arguments.
pub fn parse_flags(mut args: pico_args::Arguments) -> Result<Flags> {
    let help = args.contains(["-h", "--help"]);
    let mock = args.contains("--mock");
    let remote = args.contains("--remote");
    let backend = match (mock, remote) {
        (true, true) => {
            return Err(Error::Config(
                "--mock and --remote are mutually exclusive".to_string(),
            ))
        }
        (true, false) => Some(BackendMode::Mock),
        (false, true) => Some(BackendMode::Remote),
        (false, false) => None,
    };

    let mut flags = Flags {
        lang: args.opt_value_from_str("--lang")?,
        backend,
        api_url: args.opt_value_from_str("--api-url")?,
        data_dir: args.opt_value_from_str("--data-dir")?,
        config_dir: args.opt_value_from_str("--config-dir")?,
        verbose: args.contains(["-v", "--verbose"]),
        save: args.contains("--save"),
        action: Action::Help,
    };
    let out: Option<PathBuf> = args.opt_value_from_os_str("--out", parse_path)?;

    let operands: Vec<String> = args
        .finish()
        .into_iter()
        .map(|arg| {
            arg.into_string()
                .map_err(|arg| Error::Config(format!("invalid argument: {}", arg.to_string_lossy())))
        })
        .collect::<Result<_>>()?;

    if !help {
        let words: Vec<&str> = operands.iter().map(String::as_str).collect();
        flags.action = match words.as_slice() {
            ["download", id] => Action::Download(parse_id(id)?, out),
            words => {
                if out.is_some() {
                    return Err(Error::Config("--out only applies to download".to_string()));
                }
                parse_action(words)?
            }
        };
    }
    Ok(flags)
}

fn parse_path(value: &std::ffi::OsStr) -> std::result::Result<PathBuf, std::convert::Infallible> {
    Ok(PathBuf::from(value))
}

/// Parses an id operand.
///
/// # Errors
///
/// Returns [`Error::Config`] if `value` is not an integer.
pub fn parse_id(value: &str) -> Result<ImageId> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("invalid image id: {value}")))
}

/// Parses the words shared by subcommands and shell lines.
fn parse_action(words: &[&str]) -> Result<Action> {
    let action = match words {
        [] | ["help"] => Action::Help,
        ["list"] => Action::List,
        ["show", id] => Action::Show(parse_id(id)?),
        ["upload", path] => Action::Upload(PathBuf::from(path)),
        ["replace", id, path] => Action::Replace(parse_id(id)?, PathBuf::from(path)),
        ["delete", id] => Action::Delete(parse_id(id)?),
        ["download", id] => Action::Download(parse_id(id)?, None),
        ["download", id, dir] => Action::Download(parse_id(id)?, Some(PathBuf::from(dir))),
        ["shell"] => Action::Shell,
        [command, ..] => {
            return Err(Error::Config(format!(
                "unknown command or wrong arguments: {command}"
            )))
        }
    };
    Ok(action)
}

/// A line typed in the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Run(Action),
    Select(PathBuf),
    Edit(ImageId),
    Cancel,
    Submit,
    Status,
    Quit,
    /// Blank line.
    Nothing,
}

/// Why a shell line could not be parsed; each maps to a notice key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    Unknown(String),
    MissingArgument(String),
    InvalidId(String),
}

impl ShellError {
    #[must_use]
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ShellError::Unknown(_) => "error-unknown-command",
            ShellError::MissingArgument(_) => "error-missing-argument",
            ShellError::InvalidId(_) => "error-invalid-id",
        }
    }

    /// Name and value of the argument the message interpolates.
    #[must_use]
    pub fn arg(&self) -> (&'static str, &str) {
        match self {
            ShellError::Unknown(command) | ShellError::MissingArgument(command) => {
                ("command", command)
            }
            ShellError::InvalidId(value) => ("value", value),
        }
    }
}

/// Parses one shell line. Paths may not contain whitespace.
pub fn parse_shell_line(line: &str) -> std::result::Result<ShellCommand, ShellError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    let Some((&command, rest)) = words.split_first() else {
        return Ok(ShellCommand::Nothing);
    };

    let id = |index: usize| -> std::result::Result<ImageId, ShellError> {
        let value = rest
            .get(index)
            .ok_or_else(|| ShellError::MissingArgument(command.to_string()))?;
        value
            .parse()
            .map_err(|_| ShellError::InvalidId((*value).to_string()))
    };
    let path = |index: usize| -> std::result::Result<PathBuf, ShellError> {
        rest.get(index)
            .map(PathBuf::from)
            .ok_or_else(|| ShellError::MissingArgument(command.to_string()))
    };

    let parsed = match command {
        "list" => ShellCommand::Run(Action::List),
        "show" => ShellCommand::Run(Action::Show(id(0)?)),
        "select" => ShellCommand::Select(path(0)?),
        "edit" => ShellCommand::Edit(id(0)?),
        "cancel" => ShellCommand::Cancel,
        "submit" => ShellCommand::Submit,
        "upload" => ShellCommand::Run(Action::Upload(path(0)?)),
        "replace" => ShellCommand::Run(Action::Replace(id(0)?, path(1)?)),
        "delete" => ShellCommand::Run(Action::Delete(id(0)?)),
        "download" => ShellCommand::Run(Action::Download(id(0)?, path(1).ok())),
        "status" => ShellCommand::Status,
        "help" => ShellCommand::Run(Action::Help),
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(ShellError::Unknown(other.to_string())),
    };
    Ok(parsed)
}

/// Convenience for tests and callers holding plain strings.
pub fn parse_flags_from<I, S>(args: I) -> Result<Flags>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    parse_flags(pico_args::Arguments::from_vec(
        args.into_iter().map(Into::into).collect(),
    ))
}
