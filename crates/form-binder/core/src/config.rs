// File: form-binder-core/src/config.rs
// Purpose: Binder configuration (selector, error class, message id convention)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::BinderError;

/// What to do when a field's message element is absent from the document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingMessagePolicy {
    /// Update the error class only and log a warning
    Skip,
    /// Report `BinderError::MissingMessage` once the pass is applied
    Fail,
}

impl Default for MissingMessagePolicy {
    fn default() -> Self {
        Self::Skip
    }
}

/// Binder configuration
///
/// Every key is optional; the defaults match the markup convention
/// `<input class="input" id="F" ...>` followed by `<p id="F-message">`.
///
/// ```toml
/// selector = ".input,.textarea"
/// error_class = "is-danger"
/// message_suffix = "-message"
/// missing_message = "skip"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinderConfig {
    /// Selector for input-like descendants of the form
    #[serde(default = "default_selector")]
    pub selector: String,

    /// Class toggled on a field while it has an error
    #[serde(default = "default_error_class", alias = "errorClass")]
    pub error_class: String,

    /// Appended to a field id to find its message element
    #[serde(default = "default_message_suffix", alias = "messageSuffix")]
    pub message_suffix: String,

    #[serde(default, alias = "missingMessage")]
    pub missing_message: MissingMessagePolicy,
}

fn default_selector() -> String {
    ".input,.textarea".to_string()
}

fn default_error_class() -> String {
    "is-danger".to_string()
}

fn default_message_suffix() -> String {
    "-message".to_string()
}

impl Default for BinderConfig {
    fn default() -> Self {
        Self {
            selector: default_selector(),
            error_class: default_error_class(),
            message_suffix: default_message_suffix(),
            missing_message: MissingMessagePolicy::default(),
        }
    }
}

impl BinderConfig {
    /// Parse from a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self, BinderError> {
        let config: Self =
            toml::from_str(content).map_err(|e| BinderError::Config(e.to_string()))?;
        config.validated()
    }

    /// Parse from a JSON document (e.g. a `data-binder` attribute)
    pub fn from_json_str(content: &str) -> Result<Self, BinderError> {
        let config: Self =
            serde_json::from_str(content).map_err(|e| BinderError::Config(e.to_string()))?;
        config.validated()
    }

    /// Load from a TOML file, falling back to defaults if it doesn't exist
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            tracing::debug!("No binder config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;

        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    /// Message element id for a field id
    pub fn message_id(&self, field_id: &str) -> String {
        format!("{}{}", field_id, self.message_suffix)
    }

    /// Reject empty selectors, suffixes and malformed class names
    pub fn validated(self) -> Result<Self, BinderError> {
        if self.selector.trim().is_empty() {
            return Err(BinderError::Config("selector must not be empty".into()));
        }
        if self.error_class.trim().is_empty() || self.error_class.contains(char::is_whitespace) {
            return Err(BinderError::Config(format!(
                "error_class must be a single class name, got '{}'",
                self.error_class
            )));
        }
        if self.message_suffix.is_empty() {
            return Err(BinderError::Config("message_suffix must not be empty".into()));
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = BinderConfig::default();
        assert_eq!(config.selector, ".input,.textarea");
        assert_eq!(config.error_class, "is-danger");
        assert_eq!(config.message_id("email"), "email-message");
        assert_eq!(config.missing_message, MissingMessagePolicy::Skip);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = BinderConfig::from_toml_str(
            r#"
            error_class = "has-error"
            missing_message = "fail"
            "#,
        )
        .unwrap();
        assert_eq!(config.error_class, "has-error");
        assert_eq!(config.missing_message, MissingMessagePolicy::Fail);
        assert_eq!(config.message_suffix, "-message");
    }

    #[test]
    fn test_json_accepts_camel_case() {
        let config =
            BinderConfig::from_json_str(r#"{"errorClass":"invalid","messageSuffix":"-help"}"#)
                .unwrap();
        assert_eq!(config.error_class, "invalid");
        assert_eq!(config.message_id("pw"), "pw-help");
    }

    #[test]
    fn test_rejects_multi_word_class() {
        let err = BinderConfig::from_toml_str(r#"error_class = "is danger""#).unwrap_err();
        assert!(matches!(err, BinderError::Config(_)));
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = BinderConfig::load_from_file("does/not/exist/binder.toml").unwrap();
        assert_eq!(config, BinderConfig::default());
    }
}
