//! Render snapshot of the widget.
//!
//! The browser layer renders only from a [`Presentation`], so every
//! visible attribute, class, and text is decided here.

use crate::machine::Widget;
use crate::size::human_file_size;
use crate::theme::ThemeState;

/// Drop zone header in the empty state.
pub const INITIAL_HEADER: &str = "Upload";

/// Drop zone description in the empty state.
pub const INITIAL_DESCRIPTION: &str =
    "Drag a file here to upload it, or click here to choose a file.";

/// Everything the DOM needs to reflect the current state.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Drop zone heading: the file name, or the initial copy.
    pub header: String,
    /// Line under the heading: the file size, or the initial copy.
    pub description: String,
    /// Extra hint shown only in the empty state (the size limit).
    pub hint: Option<String>,
    /// `data-mode` attribute value.
    pub data_mode: &'static str,
    /// Progress bar `--value`, `0.0..=100.0`.
    pub progress_value: f64,
    /// `is-processing` class on the progress bar.
    pub processing: bool,
    /// `is-negative` class on the progress bar.
    pub negative: bool,
    /// `is-dragover` class on the drop zone.
    pub dragover: bool,
    /// Whether the submit control is enabled.
    pub can_submit: bool,
    /// Download link `href`, if a result exists.
    pub download_href: Option<String>,
    /// Download link `download` attribute, if a result exists.
    pub download_name: Option<String>,
    /// `data-scheme` attribute for `<html>`.
    pub data_scheme: &'static str,
    /// Checked state of the theme toggle.
    pub theme_checked: bool,
    /// Icon class of the theme toggle.
    pub theme_icon: &'static str,
}

impl Presentation {
    /// Build the snapshot for a widget and theme.
    #[must_use]
    pub fn of(widget: &Widget, theme: ThemeState) -> Self {
        let (header, description, hint) = widget.file().map_or_else(
            || {
                (
                    INITIAL_HEADER.to_owned(),
                    INITIAL_DESCRIPTION.to_owned(),
                    Some(format!(
                        "Max upload size: {}",
                        human_file_size(widget.config().size_limit, false)
                    )),
                )
            },
            |file| {
                (
                    file.name.clone(),
                    format!("File size: {}", human_file_size(file.size, false)),
                    None,
                )
            },
        );

        let download = widget.download();

        Self {
            header,
            description,
            hint,
            data_mode: widget.mode().as_attr(),
            progress_value: widget.progress(),
            processing: widget.is_processing(),
            negative: widget.is_negative(),
            dragover: widget.is_dragover(),
            can_submit: widget.can_submit(),
            download_href: download.map(|d| d.url.clone()),
            download_name: download.map(|d| d.filename.clone()),
            data_scheme: theme.theme().scheme(),
            theme_checked: theme.toggle_checked(),
            theme_icon: theme.icon_class(),
        }
    }

    /// Class list for the progress bar.
    #[must_use]
    pub fn progress_class(&self) -> String {
        let mut class = String::from("progress");
        if self.processing {
            class.push_str(" is-processing");
        }
        if self.negative {
            class.push_str(" is-negative");
        }
        class
    }

    /// Class list for the drop zone.
    #[must_use]
    pub fn dragzone_class(&self) -> &'static str {
        if self.dragover {
            "dragzone is-dragover"
        } else {
            "dragzone"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WidgetConfig;
    use crate::file::SelectedFile;
    use crate::machine::{Event, UploadFailure};

    fn widget() -> Widget {
        Widget::new(WidgetConfig::default())
    }

    #[test]
    fn empty_state_shows_initial_copy_and_limit() {
        let p = Presentation::of(&widget(), ThemeState::default());
        assert_eq!(p.header, INITIAL_HEADER);
        assert_eq!(p.description, INITIAL_DESCRIPTION);
        assert_eq!(p.hint.as_deref(), Some("Max upload size: 20.0 MiB"));
        assert_eq!(p.data_mode, "selecting");
        assert!(!p.can_submit);
        assert_eq!(p.download_href, None);
        assert_eq!(p.dragzone_class(), "dragzone");
        assert_eq!(p.progress_class(), "progress");
    }

    #[test]
    fn selected_file_is_previewed() {
        let mut w = widget();
        w.handle(Event::FilesPicked(vec![SelectedFile::new("novel.epub", 1536)]));
        let p = Presentation::of(&w, ThemeState::default());
        assert_eq!(p.header, "novel.epub");
        assert_eq!(p.description, "File size: 1.5 KiB");
        assert_eq!(p.hint, None);
        assert_eq!(p.data_mode, "selected");
        assert!(p.can_submit);
    }

    #[test]
    fn classes_follow_flags() {
        let mut w = widget();
        w.handle(Event::DragEnter);
        w.handle(Event::FilesDropped(vec![SelectedFile::new("b.epub", 1)]));
        w.handle(Event::Submit);
        w.handle(Event::Progress {
            loaded: 2.0,
            total: 2.0,
        });
        let p = Presentation::of(&w, ThemeState::default());
        assert_eq!(p.progress_class(), "progress is-processing");
        assert_eq!(p.dragzone_class(), "dragzone");
        assert!(!p.can_submit);

        w.handle(Event::Failed(UploadFailure::Network("x".into())));
        let p = Presentation::of(&w, ThemeState::default());
        assert_eq!(p.progress_class(), "progress is-negative");
        assert_eq!(p.data_mode, "uploadend");
    }

    #[test]
    fn download_attributes_after_success() {
        let mut w = widget();
        w.handle(Event::FilesPicked(vec![SelectedFile::new("b.epub", 1)]));
        w.handle(Event::Submit);
        w.handle(Event::Succeeded {
            download_url: "blob:x".into(),
            content_disposition: Some("attachment; filename=out.epub".into()),
        });
        let p = Presentation::of(&w, ThemeState::default());
        assert_eq!(p.download_href.as_deref(), Some("blob:x"));
        assert_eq!(p.download_name.as_deref(), Some("out.epub"));
        assert_eq!(p.data_mode, "converted");
    }

    #[test]
    fn theme_fields() {
        let p = Presentation::of(&widget(), ThemeState::from_os(true));
        assert_eq!(p.data_scheme, "dark");
        assert!(!p.theme_checked);
        assert_eq!(p.theme_icon, "is-moon-icon");
    }
}
