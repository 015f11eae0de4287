// SPDX-License-Identifier: MPL-2.0
//! REST backend client implementing the [`ImageGateway`] port.
//!
//! Endpoints, relative to the configured base URL (e.g.
//! `http://localhost:8080/api/images`):
//!
//! | Operation | Request |
//! |-----------|---------|
//! | list      | `GET {base}` |
//! | upload    | `POST {base}`, multipart field `file` |
//! | replace   | `PUT {base}/{id}`, multipart field `file` |
//! | delete    | `DELETE {base}/{id}` |
//! | fetch     | `GET {base}/{id}` |
//! | download  | `GET {base}/download/{id}` |
//!
//! No request timeout is set and failed requests are not retried.
//!
//! [`ImageGateway`]: crate::application::port::ImageGateway

mod dto;

pub use dto::ImageDto;

use crate::application::port::{GatewayKind, ImageGateway, TransferError, TransferResult};
use crate::domain::image::{
    content_type_for_file_name, DownloadedImage, ImageId, ImageRecord, FALLBACK_FILE_NAME,
};
use crate::domain::upload::SelectedFile;
use crate::infrastructure::files;
use async_trait::async_trait;
use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode};

/// Multipart form field carrying the file.
pub const FILE_FIELD: &str = "file";

const USER_AGENT: &str = concat!("ImageDepot/", env!("CARGO_PKG_VERSION"));

/// Gateway talking to the image backend over HTTP.
#[derive(Debug, Clone)]
pub struct RemoteGateway {
    client: Client,
    base_url: String,
}

impl RemoteGateway {
    /// Creates a gateway for the given base URL.
    ///
    /// # Errors
    ///
    /// Returns [`TransferError::Transport`] if the HTTP client cannot be built
    /// (e.g. the TLS backend fails to initialise).
    pub fn new(base_url: &str) -> TransferResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransferError::Transport(e.to_string()))?;

        Ok(Self::with_client(client, base_url))
    }

    /// Creates a gateway reusing an existing client.
    #[must_use]
    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn item_url(&self, id: ImageId) -> String {
        format!("{}/{id}", self.base_url)
    }

    fn download_url(&self, id: ImageId) -> String {
        format!("{}/download/{id}", self.base_url)
    }

    async fn file_form(file: &SelectedFile) -> TransferResult<Form> {
        let bytes = files::read_contents(file).await?;
        let part = Part::bytes(bytes)
            .file_name(file.name().to_string())
            .mime_str(file.media_type())
            .map_err(|e| TransferError::ReadFailure(e.to_string()))?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

/// Maps a `reqwest` failure to a transfer error.
fn transport_error(err: reqwest::Error) -> TransferError {
    if err.is_decode() {
        TransferError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        status_error(status)
    } else {
        TransferError::Transport(err.to_string())
    }
}

fn status_error(status: StatusCode) -> TransferError {
    if status == StatusCode::NOT_FOUND {
        TransferError::NotFound
    } else {
        TransferError::Status(status.as_u16())
    }
}

/// Fails on any non-success status.
fn check_status(response: Response) -> TransferResult<Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        tracing::warn!(%status, url = %response.url(), "backend rejected request");
        Err(status_error(status))
    }
}

async fn read_record(response: Response) -> TransferResult<ImageRecord> {
    let dto: ImageDto = response.json().await.map_err(transport_error)?;
    Ok(dto.into())
}

/// Extracts the file name from a `Content-Disposition` header value.
///
/// Handles both `attachment; filename="a.png"` and the
/// `form-data; name="attachment"; filename="a.png"` form. Quoted values may
/// contain `;` and backslash escapes. An RFC 5987 `filename*=UTF-8''...`
/// parameter is percent-decoded and used only when no plain `filename` is
/// present.
#[must_use]
pub fn file_name_from_disposition(value: &str) -> Option<String> {
    let params = disposition_params(value);
    let plain = params
        .iter()
        .find(|(name, value)| name == "filename" && !value.is_empty())
        .map(|(_, value)| value.clone());

    plain.or_else(|| {
        params
            .iter()
            .filter(|(name, _)| name == "filename*")
            .find_map(|(_, value)| decode_extended(value))
            .filter(|name| !name.is_empty())
    })
}

/// Splits the parameters after the disposition type into lowercase names
/// and unquoted values.
fn disposition_params(value: &str) -> Vec<(String, String)> {
    let mut params = Vec::new();
    let mut chars = value.chars().peekable();
    if chars.by_ref().find(|&c| c == ';').is_none() {
        return params;
    }

    loop {
        let mut name = String::new();
        while let Some(c) = chars.next_if(|&c| c != '=' && c != ';') {
            name.push(c);
        }

        let mut param_value = String::new();
        if chars.next_if_eq(&'=').is_some() {
            while chars.next_if(|c| c.is_whitespace()).is_some() {}
            if chars.next_if_eq(&'"').is_some() {
                while let Some(c) = chars.next() {
                    match c {
                        '\\' => param_value.extend(chars.next()),
                        '"' => break,
                        _ => param_value.push(c),
                    }
                }
            } else {
                while let Some(c) = chars.next_if(|&c| c != ';') {
                    param_value.push(c);
                }
                param_value.truncate(param_value.trim_end().len());
            }
        }

        let name = name.trim().to_ascii_lowercase();
        if !name.is_empty() {
            params.push((name, param_value));
        }
        // Anything between a closing quote and the next `;` is ignored.
        if chars.by_ref().find(|&c| c == ';').is_none() {
            return params;
        }
    }
}

/// Decodes an RFC 5987 `charset'language'percent-encoded` value.
fn decode_extended(value: &str) -> Option<String> {
    let mut parts = value.splitn(3, '\'');
    let (charset, _language, encoded) = (parts.next()?, parts.next()?, parts.next()?);
    let bytes = percent_decode(encoded)?;

    if charset.eq_ignore_ascii_case("utf-8") {
        String::from_utf8(bytes).ok()
    } else if charset.eq_ignore_ascii_case("iso-8859-1") {
        Some(bytes.into_iter().map(char::from).collect())
    } else {
        tracing::debug!(charset, "unsupported filename* charset");
        None
    }
}

fn percent_decode(encoded: &str) -> Option<Vec<u8>> {
    let bytes = encoded.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = bytes.get(index + 1..index + 3)?;
            if !hex.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            let hex = std::str::from_utf8(hex).ok()?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            index += 3;
        } else {
            decoded.push(bytes[index]);
            index += 1;
        }
    }
    Some(decoded)
}

#[async_trait]
impl ImageGateway for RemoteGateway {
    async fn list(&self) -> TransferResult<Vec<ImageRecord>> {
        tracing::debug!(url = %self.base_url, "remote: listing images");
        let response = self
            .client
            .get(&self.base_url)
            .send()
            .await
            .map_err(transport_error)?;
        let dtos: Vec<ImageDto> = check_status(response)?
            .json()
            .await
            .map_err(transport_error)?;
        Ok(dtos.into_iter().map(ImageRecord::from).collect())
    }

    async fn upload(&self, file: &SelectedFile) -> TransferResult<ImageRecord> {
        tracing::debug!(name = file.name(), size = file.size(), "remote: uploading image");
        let form = Self::file_form(file).await?;
        let response = self
            .client
            .post(&self.base_url)
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let record = read_record(check_status(response)?).await?;
        tracing::info!(id = %record.id, name = %record.file_name, "remote: uploaded image");
        Ok(record)
    }

    async fn replace(&self, id: ImageId, file: &SelectedFile) -> TransferResult<ImageRecord> {
        tracing::debug!(%id, name = file.name(), "remote: replacing image");
        let form = Self::file_form(file).await?;
        let response = self
            .client
            .put(self.item_url(id))
            .multipart(form)
            .send()
            .await
            .map_err(transport_error)?;
        let record = read_record(check_status(response)?).await?;
        tracing::info!(%id, name = %record.file_name, "remote: replaced image");
        Ok(record)
    }

    async fn delete(&self, id: ImageId) -> TransferResult<()> {
        tracing::debug!(%id, "remote: deleting image");
        let response = self
            .client
            .delete(self.item_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        check_status(response)?;
        tracing::info!(%id, "remote: deleted image");
        Ok(())
    }

    async fn fetch(&self, id: ImageId) -> TransferResult<ImageRecord> {
        tracing::debug!(%id, "remote: fetching image");
        let response = self
            .client
            .get(self.item_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        read_record(check_status(response)?).await
    }

    async fn download(&self, id: ImageId) -> TransferResult<DownloadedImage> {
        use futures_util::StreamExt;

        tracing::debug!(%id, "remote: downloading image");
        let response = self
            .client
            .get(self.download_url(id))
            .send()
            .await
            .map_err(transport_error)?;
        let response = check_status(response)?;

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|value| value.to_str().ok())
            .and_then(file_name_from_disposition)
            .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string());
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .unwrap_or_else(|| content_type_for_file_name(Some(&file_name)).to_string());

        let capacity = usize::try_from(response.content_length().unwrap_or(0)).unwrap_or(0);
        let mut bytes = Vec::with_capacity(capacity);
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(transport_error)?;
            bytes.extend_from_slice(&chunk);
        }

        tracing::info!(%id, name = %file_name, size = bytes.len(), "remote: downloaded image");
        Ok(DownloadedImage::new(&file_name, content_type, bytes))
    }

    fn kind(&self) -> GatewayKind {
        GatewayKind::Remote
    }
}
