// SPDX-License-Identifier: MPL-2.0
//! User-facing notices.
//!
//! A notice stores an i18n key plus named arguments; text is resolved only
//! when it is rendered, so the controller stays independent of the locale.

use crate::app::i18n::I18n;

/// Severity level determines how a notice is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    /// Operation completed successfully.
    #[default]
    Success,
    /// Informational message.
    Info,
    /// Warning that doesn't block operation.
    Warning,
    /// Operation failed.
    Error,
}

impl Severity {
    /// Prefix printed before the message.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Severity::Success => "✓",
            Severity::Info => "·",
            Severity::Warning => "!",
            Severity::Error => "✗",
        }
    }
}

/// A message to show the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    severity: Severity,
    key: String,
    args: Vec<(String, String)>,
    /// Untranslated technical detail, e.g. the underlying error.
    detail: Option<String>,
}

impl Notice {
    pub fn new(severity: Severity, key: impl Into<String>) -> Self {
        Self {
            severity,
            key: key.into(),
            args: Vec::new(),
            detail: None,
        }
    }

    pub fn success(key: impl Into<String>) -> Self {
        Self::new(Severity::Success, key)
    }

    pub fn info(key: impl Into<String>) -> Self {
        Self::new(Severity::Info, key)
    }

    pub fn warning(key: impl Into<String>) -> Self {
        Self::new(Severity::Warning, key)
    }

    pub fn error(key: impl Into<String>) -> Self {
        Self::new(Severity::Error, key)
    }

    /// Adds an argument for message interpolation.
    #[must_use]
    pub fn with_arg(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.args.push((key.into(), value.to_string()));
        self
    }

    /// Attaches the technical cause, shown after the translated text.
    #[must_use]
    pub fn with_detail(mut self, detail: impl ToString) -> Self {
        self.detail = Some(detail.to_string());
        self
    }

    #[must_use]
    pub fn severity(&self) -> Severity {
        self.severity
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn args(&self) -> &[(String, String)] {
        &self.args
    }

    #[must_use]
    pub fn detail(&self) -> Option<&str> {
        self.detail.as_deref()
    }

    /// Resolves the notice to display text.
    #[must_use]
    pub fn render(&self, i18n: &I18n) -> String {
        let args: Vec<(&str, &str)> = self
            .args
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
            .collect();
        let text = i18n.tr_with_args(&self.key, &args);
        match &self.detail {
            Some(detail) => format!("{text} ({detail})"),
            None => text,
        }
    }
}
