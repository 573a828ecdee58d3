//! Dioxus UI components for dropconv.
//!
//! Provides the drop zone with its file picker, submit, close and
//! download controls, the progress bar, the snackbar, and the theme
//! toggle.

mod dropzone;
mod progress;
mod snackbar;
mod theme_toggle;

pub use dropzone::DropZone;
pub use progress::ProgressBar;
pub use snackbar::Snackbar;
pub use theme_toggle::{ThemeToggle, use_theme};
