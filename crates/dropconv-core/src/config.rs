//! Widget configuration supplied by the hosting page.

use serde::{Deserialize, Serialize};

/// Default upload limit: 20 MiB, matching the conversion endpoint.
pub const DEFAULT_SIZE_LIMIT: u64 = 20 * 1024 * 1024;

/// Errors produced while reading a [`WidgetConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config block is not valid JSON for a [`WidgetConfig`].
    #[error("malformed widget config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A required field was present but empty.
    #[error("widget config field `{0}` must not be empty")]
    Empty(&'static str),

    /// The size limit would reject every file.
    #[error("widget config `sizeLimit` must be greater than zero")]
    ZeroSizeLimit,
}

/// Constants the widget consumes from the surrounding page.
///
/// Every field has a default, so a page only needs to override what
/// differs. Field names are camelCase in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct WidgetConfig {
    /// Accepted file extension without the leading dot (compared
    /// case-sensitively).
    pub accept_extension: String,

    /// Files of this many bytes or more are rejected.
    pub size_limit: u64,

    /// URL the multipart form is posted to.
    pub endpoint: String,

    /// Multipart field name carrying the file.
    pub field_name: String,

    /// MIME type given to the downloadable result.
    pub result_mime: String,

    /// Download name used when the response has no
    /// `Content-Disposition` header.
    pub fallback_filename: String,

    /// How long a snackbar notification stays visible.
    pub snackbar_ms: u32,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            accept_extension: "epub".to_owned(),
            size_limit: DEFAULT_SIZE_LIMIT,
            endpoint: "/api/convert".to_owned(),
            field_name: "upload".to_owned(),
            result_mime: "application/epub+zip".to_owned(),
            fallback_filename: "converted.epub".to_owned(),
            snackbar_ms: 3000,
        }
    }
}

impl WidgetConfig {
    /// Parse and check a config block.
    ///
    /// A leading `.` on `acceptExtension` is stripped so both `"epub"`
    /// and `".epub"` work.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown
    /// fields, [`ConfigError::Empty`] for an empty extension, endpoint,
    /// or field name, and [`ConfigError::ZeroSizeLimit`] for a zero
    /// limit.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        if let Some(stripped) = config.accept_extension.strip_prefix('.') {
            config.accept_extension = stripped.to_owned();
        }
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.accept_extension.is_empty() {
            return Err(ConfigError::Empty("acceptExtension"));
        }
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::Empty("endpoint"));
        }
        if self.field_name.is_empty() {
            return Err(ConfigError::Empty("fieldName"));
        }
        if self.size_limit == 0 {
            return Err(ConfigError::ZeroSizeLimit);
        }
        Ok(())
    }

    /// Value for the file input's `accept` attribute, e.g. `".epub"`.
    #[must_use]
    pub fn accept_attr(&self) -> String {
        format!(".{}", self.accept_extension)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_gives_defaults() {
        let config = WidgetConfig::from_json("{}").unwrap();
        assert_eq!(config, WidgetConfig::default());
        assert_eq!(config.size_limit, 20_971_520);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config =
            WidgetConfig::from_json(r#"{"acceptExtension": "pdf", "sizeLimit": 1024}"#).unwrap();
        assert_eq!(config.accept_extension, "pdf");
        assert_eq!(config.size_limit, 1024);
        assert_eq!(config.endpoint, "/api/convert");
        assert_eq!(config.field_name, "upload");
    }

    #[test]
    fn leading_dot_is_stripped() {
        let config = WidgetConfig::from_json(r#"{"acceptExtension": ".epub"}"#).unwrap();
        assert_eq!(config.accept_extension, "epub");
        assert_eq!(config.accept_attr(), ".epub");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            WidgetConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"sizeLimit": "big"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(
            WidgetConfig::from_json(r#"{"sizelimit": 5}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn empty_fields_are_rejected() {
        assert!(matches!(
            WidgetConfig::from_json(r#"{"acceptExtension": "."}"#),
            Err(ConfigError::Empty("acceptExtension"))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"endpoint": "  "}"#),
            Err(ConfigError::Empty("endpoint"))
        ));
        assert!(matches!(
            WidgetConfig::from_json(r#"{"fieldName": ""}"#),
            Err(ConfigError::Empty("fieldName"))
        ));
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(matches!(
            WidgetConfig::from_json(r#"{"sizeLimit": 0}"#),
            Err(ConfigError::ZeroSizeLimit)
        ));
    }
}
