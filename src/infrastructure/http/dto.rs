// SPDX-License-Identifier: MPL-2.0
//! JSON wire format of image records.

use crate::domain::image::{ImageId, ImageRecord};
use serde::Deserialize;

/// Image record as serialised by the backend.
///
/// `fileName` and `data` may be `null` on records created by other clients;
/// both default to an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDto {
    pub id: i64,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

impl From<ImageDto> for ImageRecord {
    fn from(dto: ImageDto) -> Self {
        ImageRecord::new(
            ImageId::new(dto.id),
            dto.file_name.unwrap_or_default(),
            dto.data.unwrap_or_default(),
        )
    }
}
