//! dropconv-io: Browser I/O and Dioxus component library.
//!
//! Sends the upload over `XMLHttpRequest`, manages download object
//! URLs, reads the page config, follows the OS color scheme, and
//! provides the widget's UI components.

pub mod components;
pub mod config;
pub mod controller;
pub mod download;
pub mod theme;
pub mod transport;

pub use components::{DropZone, ProgressBar, Snackbar, ThemeToggle, use_theme};
pub use controller::{Controller, Notice, use_controller};
pub use transport::{TransportError, Upload, UploadHandle, UploadProgress, UploadResponse};
