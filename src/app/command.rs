// SPDX-License-Identifier: MPL-2.0
//! Side effects requested by the controller.
//!
//! A [`Command`] names one gateway call. Executing it never touches controller
//! state; the outcome comes back as a [`Message`] for `Controller::update`.

use crate::app::downloads;
use crate::app::message::Message;
use crate::application::port::ImageGateway;
use crate::domain::image::ImageId;
use crate::domain::upload::SelectedFile;
use crate::error::Error;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Upload(SelectedFile),
    Replace(ImageId, SelectedFile),
    Delete(ImageId),
    Fetch(ImageId),
    Download { id: ImageId, directory: PathBuf },
}

impl Command {
    /// Runs the command against `gateway` and wraps the result.
    pub async fn execute(self, gateway: &dyn ImageGateway) -> Message {
        match self {
            Command::List => Message::ImagesLoaded(gateway.list().await),
            Command::Upload(file) => Message::Submitted {
                target: None,
                result: gateway.upload(&file).await,
            },
            Command::Replace(id, file) => Message::Submitted {
                target: Some(id),
                result: gateway.replace(id, &file).await,
            },
            Command::Delete(id) => Message::Deleted {
                id,
                result: gateway.delete(id).await,
            },
            Command::Fetch(id) => Message::Fetched(gateway.fetch(id).await),
            Command::Download { id, directory } => {
                let result = match gateway.download(id).await {
                    Ok(image) => downloads::save(&directory, &image)
                        .await
                        .map_err(Error::from),
                    Err(err) => Err(Error::Transfer(err)),
                };
                Message::Downloaded { directory, result }
            }
        }
    }
}
