// SPDX-License-Identifier: MPL-2.0
//! Localization of user-facing text.
//!
//! Translations are Fluent resources embedded at build time from
//! `assets/i18n/*.ftl`. The active locale is chosen once at startup.

pub mod fluent;

pub use fluent::I18n;
