//! Selected file metadata and client-side validation.

use crate::config::WidgetConfig;
use crate::size::human_file_size;

/// The file the user picked or dropped.
///
/// Only metadata lives here; the bytes stay with the browser layer
/// until upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    /// File name as reported by the browser, without any path.
    pub name: String,
    /// Size in bytes.
    pub size: u64,
}

impl SelectedFile {
    /// Create file metadata.
    #[must_use]
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }

    /// Everything after the last `.` in the name.
    ///
    /// A name with no `.` yields the whole name, so `"epub"` has the
    /// extension `"epub"`. Case is preserved.
    #[must_use]
    pub fn extension(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(_, ext)| ext)
    }
}

/// Why a file was refused before upload.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The extension is not the accepted one.
    #[error("Only .{expected} files are accepted!")]
    WrongExtension {
        /// The accepted extension.
        expected: String,
    },

    /// The file is at or above the size limit.
    #[error("File is too large! Max upload size: {}", human_file_size(*limit, false))]
    TooLarge {
        /// The configured limit in bytes.
        limit: u64,
    },
}

/// Check a file against the accepted extension and the size limit.
///
/// The extension is checked first.
///
/// # Errors
///
/// Returns [`ValidationError::WrongExtension`] when the extension does
/// not match exactly, or [`ValidationError::TooLarge`] when
/// `file.size >= config.size_limit`.
pub fn validate(file: &SelectedFile, config: &WidgetConfig) -> Result<(), ValidationError> {
    if file.extension() != config.accept_extension {
        return Err(ValidationError::WrongExtension {
            expected: config.accept_extension.clone(),
        });
    }
    if file.size >= config.size_limit {
        return Err(ValidationError::TooLarge {
            limit: config.size_limit,
        });
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn config() -> WidgetConfig {
        WidgetConfig {
            size_limit: 1000,
            ..WidgetConfig::default()
        }
    }

    #[test]
    fn extension_is_after_last_dot() {
        assert_eq!(SelectedFile::new("book.epub", 1).extension(), "epub");
        assert_eq!(SelectedFile::new("a.b.c.epub", 1).extension(), "epub");
        assert_eq!(SelectedFile::new("archive.tar.gz", 1).extension(), "gz");
        assert_eq!(SelectedFile::new("trailing.", 1).extension(), "");
        assert_eq!(SelectedFile::new("noext", 1).extension(), "noext");
    }

    #[test]
    fn accepts_matching_small_file() {
        assert_eq!(validate(&SelectedFile::new("book.epub", 999), &config()), Ok(()));
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["book.pdf", "book.epub.zip", "book", "book."] {
            let err = validate(&SelectedFile::new(name, 1), &config()).unwrap_err();
            assert!(
                matches!(err, ValidationError::WrongExtension { .. }),
                "{name} should be rejected by extension"
            );
        }
    }

    #[test]
    fn extension_check_is_case_sensitive() {
        let err = validate(&SelectedFile::new("BOOK.EPUB", 1), &config()).unwrap_err();
        assert!(matches!(err, ValidationError::WrongExtension { .. }));
    }

    #[test]
    fn limit_is_exclusive() {
        let err = validate(&SelectedFile::new("book.epub", 1000), &config()).unwrap_err();
        assert_eq!(err, ValidationError::TooLarge { limit: 1000 });
        assert!(validate(&SelectedFile::new("book.epub", 1001), &config()).is_err());
    }

    #[test]
    fn extension_is_checked_before_size() {
        let err = validate(&SelectedFile::new("huge.pdf", 10_000), &config()).unwrap_err();
        assert!(matches!(err, ValidationError::WrongExtension { .. }));
    }

    #[test]
    fn messages_name_the_constraint() {
        let wrong = ValidationError::WrongExtension {
            expected: "epub".into(),
        };
        assert_eq!(wrong.to_string(), "Only .epub files are accepted!");
        let large = ValidationError::TooLarge {
            limit: 20 * 1024 * 1024,
        };
        assert_eq!(large.to_string(), "File is too large! Max upload size: 20.0 MiB");
    }
}
