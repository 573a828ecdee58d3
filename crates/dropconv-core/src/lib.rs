//! dropconv-core: Upload widget logic (sans-IO).
//!
//! Everything the drag-and-drop upload widget decides lives here:
//! file validation, human-readable sizes, `Content-Disposition`
//! filename extraction, the drag counter, the light/dark theme, and
//! the mode state machine that turns user, network, and OS events
//! into a list of [`Effect`]s for the browser layer to carry out.
//!
//! No browser APIs are used, so the whole crate is unit tested on the
//! host.

pub mod config;
pub mod disposition;
pub mod drag;
pub mod file;
pub mod machine;
pub mod presentation;
pub mod size;
pub mod theme;

pub use config::{ConfigError, WidgetConfig};
pub use disposition::filename_from_disposition;
pub use drag::DragCounter;
pub use file::{SelectedFile, ValidationError, validate};
pub use machine::{Download, Effect, Event, LogLevel, Mode, UploadFailure, Widget};
pub use presentation::Presentation;
pub use size::human_file_size;
pub use theme::{Theme, ThemeState};
