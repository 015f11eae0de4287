// SPDX-License-Identifier: MPL-2.0
//! Text rendering of controller state.

use crate::app::controller::Controller;
use crate::app::i18n::I18n;
use crate::app::notice::Notice;
use crate::application::port::GatewayKind;
use crate::domain::image::ImageRecord;

pub fn notice_line(notice: &Notice, i18n: &I18n) -> String {
    format!("{} {}", notice.severity().marker(), notice.render(i18n))
}

/// Pending notices, error first.
pub fn notices(controller: &Controller, i18n: &I18n) -> Vec<String> {
    controller
        .error()
        .into_iter()
        .chain(controller.success())
        .map(|notice| notice_line(notice, i18n))
        .collect()
}

fn record_line(image: &ImageRecord, i18n: &I18n) -> String {
    i18n.tr_with_args(
        "view-record",
        &[
            ("id", &image.id.to_string()),
            ("file_name", &image.file_name),
            ("size", &image.approx_size().to_string()),
        ],
    )
}

pub fn image_list(images: &[ImageRecord], i18n: &I18n) -> Vec<String> {
    if images.is_empty() {
        return vec![i18n.tr("view-empty-list")];
    }
    let mut lines = Vec::with_capacity(images.len() + 1);
    lines.push(i18n.tr_with_count("view-list-header", images.len()));
    lines.extend(images.iter().map(|image| format!("  {}", record_line(image, i18n))));
    lines
}

pub fn focused(image: &ImageRecord, i18n: &I18n) -> String {
    i18n.tr_with_args(
        "view-focused",
        &[
            ("id", &image.id.to_string()),
            ("file_name", &image.file_name),
            ("content_type", image.content_type()),
            ("size", &image.approx_size().to_string()),
        ],
    )
}

/// Backend, busy state, selection and edit target.
pub fn status(controller: &Controller, kind: GatewayKind, i18n: &I18n) -> Vec<String> {
    let mut lines = vec![
        i18n.tr_with_args("view-status-backend", &[("backend", &kind.to_string())]),
        i18n.tr_with_args("view-status-mode", &[("mode", &i18n.tr(controller.mode().i18n_key()))]),
    ];
    if let Some(file) = controller.selected() {
        lines.push(i18n.tr_with_args("view-status-selected", &[("file_name", file.name())]));
    }
    if let Some(id) = controller.edit_target() {
        lines.push(i18n.tr_with_args("view-status-editing", &[("id", &id.to_string())]));
    }
    lines
}
