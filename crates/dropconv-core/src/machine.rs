//! The upload widget state machine.
//!
//! [`Widget::handle`] is the only way state changes. It takes an
//! [`Event`] (user input, upload progress, upload outcome) and returns
//! the [`Effect`]s the browser layer must perform, in order. Rendering
//! is derived separately via [`Presentation`](crate::Presentation).
//!
//! ```text
//! selecting --pick/drop--> selected --submit--> uploading --ok--> converted
//!     ^                                            |  |
//!     +----------------cancelled-------------------+  +--err--> uploadend
//! ```
//!
//! `close` returns to `selecting` from every mode, cancelling first if
//! an upload is in flight.

use std::fmt;

use serde::Deserialize;

use crate::config::WidgetConfig;
use crate::disposition::filename_from_disposition;
use crate::drag::DragCounter;
use crate::file::{SelectedFile, validate};

/// Shown when more than one file is picked or dropped.
pub const ONE_FILE_MESSAGE: &str = "Only one file can be uploaded at a time.";

/// Shown when the user cancels an upload.
pub const CANCELLED_MESSAGE: &str = "Upload cancelled";

/// Tags whose clicks belong to the control itself, not the drop zone.
const INTERACTIVE_TAGS: [&str; 3] = ["button", "a", "span"];

/// Interaction mode, mirrored to the drop zone's `data-mode` attribute.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Waiting for a file.
    #[default]
    Selecting,
    /// A valid file is ready to submit.
    Selected,
    /// The file is being sent or converted.
    Uploading,
    /// The converted result is ready to download.
    Converted,
    /// The last upload failed.
    UploadEnd,
}

impl Mode {
    /// Attribute value for `data-mode`.
    #[must_use]
    pub const fn as_attr(self) -> &'static str {
        match self {
            Self::Selecting => "selecting",
            Self::Selected => "selected",
            Self::Uploading => "uploading",
            Self::Converted => "converted",
            Self::UploadEnd => "uploadend",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_attr())
    }
}

/// How an upload ended without a usable result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// The server answered with a non-success status.
    Server {
        /// HTTP status code.
        status: u16,
        /// `Content-Type` of the response, if any.
        content_type: Option<String>,
        /// Response body as text, if it could be read.
        body: Option<String>,
    },
    /// The request was aborted by the user.
    Cancelled,
    /// The request never produced a response.
    Network(String),
}

/// Input to [`Widget::handle`].
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The file picker's selection changed.
    FilesPicked(Vec<SelectedFile>),
    /// Files were dropped on the zone.
    FilesDropped(Vec<SelectedFile>),
    /// A drag entered the zone or a child.
    DragEnter,
    /// A drag left the zone or a child.
    DragLeave,
    /// The zone was clicked. `target_tag` is the clicked element's tag
    /// name, if known.
    ZoneClicked {
        /// Tag name of the click target (any case).
        target_tag: Option<String>,
    },
    /// The submit control was activated.
    Submit,
    /// Upload progress from the transport.
    Progress {
        /// Bytes sent so far.
        loaded: f64,
        /// Total bytes to send.
        total: f64,
    },
    /// The server returned the converted document.
    Succeeded {
        /// Object URL already created for the response body.
        download_url: String,
        /// `Content-Disposition` response header, if present.
        content_disposition: Option<String>,
    },
    /// The upload ended without a result.
    Failed(UploadFailure),
    /// The close control was activated.
    Close,
}

/// Severity of an [`Effect::Log`] entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Normal progress.
    Info,
    /// Recoverable oddity.
    Warn,
    /// A failure worth investigating.
    Error,
}

/// Work the browser layer performs after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a snackbar message.
    Notify(String),
    /// The offered file was accepted; keep its bytes for upload.
    FileAccepted,
    /// Open the native file picker.
    OpenFilePicker,
    /// Clear the file input and forget any kept file bytes.
    ClearFileInput,
    /// Send the kept file to the endpoint.
    StartUpload,
    /// Abort the in-flight request.
    CancelUpload,
    /// Release an object URL that is no longer referenced.
    RevokeObjectUrl(String),
    /// Write a log line.
    Log(LogLevel, String),
}

/// The converted document, ready to download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    /// Object URL for the result blob.
    pub url: String,
    /// Suggested file name.
    pub filename: String,
}

/// Structured error body sent by the conversion endpoint.
#[derive(Deserialize)]
struct ServerError {
    error: String,
}

/// Upload widget state.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    config: WidgetConfig,
    mode: Mode,
    file: Option<SelectedFile>,
    drag: DragCounter,
    progress: f64,
    processing: bool,
    negative: bool,
    download: Option<Download>,
}

impl Widget {
    /// A fresh widget in [`Mode::Selecting`].
    #[must_use]
    pub fn new(config: WidgetConfig) -> Self {
        Self {
            config,
            mode: Mode::Selecting,
            file: None,
            drag: DragCounter::default(),
            progress: 0.0,
            processing: false,
            negative: false,
            download: None,
        }
    }

    /// Configuration the widget was built with.
    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    /// Current mode.
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The accepted file, if any.
    #[must_use]
    pub const fn file(&self) -> Option<&SelectedFile> {
        self.file.as_ref()
    }

    /// Whether a drag is hovering over the zone.
    #[must_use]
    pub const fn is_dragover(&self) -> bool {
        self.drag.is_over()
    }

    /// Upload progress in percent, `0.0..=100.0`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// All bytes are sent and the server is still converting.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        self.processing
    }

    /// The progress bar shows the failure state.
    #[must_use]
    pub const fn is_negative(&self) -> bool {
        self.negative
    }

    /// The current downloadable result.
    #[must_use]
    pub const fn download(&self) -> Option<&Download> {
        self.download.as_ref()
    }

    /// Whether [`Event::Submit`] would start an upload.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        self.file.is_some() && !matches!(self.mode, Mode::Uploading | Mode::Selecting)
    }

    /// Apply one event and return the effects to perform, in order.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        let mut effects = Vec::new();
        match event {
            Event::FilesPicked(files) => self.on_picked(files, &mut effects),
            Event::FilesDropped(files) => self.on_dropped(files, &mut effects),
            Event::DragEnter => self.drag.enter(),
            Event::DragLeave => self.drag.leave(),
            Event::ZoneClicked { target_tag } => {
                if self.mode != Mode::Uploading && !is_interactive(target_tag.as_deref()) {
                    effects.push(Effect::OpenFilePicker);
                }
            }
            Event::Submit => self.on_submit(&mut effects),
            Event::Progress { loaded, total } => self.on_progress(loaded, total),
            Event::Succeeded {
                download_url,
                content_disposition,
            } => self.on_succeeded(download_url, content_disposition.as_deref(), &mut effects),
            Event::Failed(failure) => self.on_failed(failure, &mut effects),
            Event::Close => {
                let cancelling = self.mode == Mode::Uploading;
                if cancelling {
                    effects.push(Effect::CancelUpload);
                }
                self.reset(&mut effects);
                if cancelling {
                    effects.push(Effect::Log(LogLevel::Info, "upload cancelled".to_owned()));
                    effects.push(Effect::Notify(CANCELLED_MESSAGE.to_owned()));
                }
            }
        }
        effects
    }

    fn on_picked(&mut self, files: Vec<SelectedFile>, effects: &mut Vec<Effect>) {
        if self.mode == Mode::Uploading {
            return;
        }
        match files.len() {
            0 => self.reset(effects),
            1 => self.offer(files.into_iter().next(), effects),
            _ => effects.push(Effect::Notify(ONE_FILE_MESSAGE.to_owned())),
        }
    }

    fn on_dropped(&mut self, files: Vec<SelectedFile>, effects: &mut Vec<Effect>) {
        self.drag.reset();
        if self.mode == Mode::Uploading {
            return;
        }
        match files.len() {
            0 => {}
            1 => self.offer(files.into_iter().next(), effects),
            _ => effects.push(Effect::Notify(ONE_FILE_MESSAGE.to_owned())),
        }
    }

    /// Validate a single file and select it on success.
    fn offer(&mut self, file: Option<SelectedFile>, effects: &mut Vec<Effect>) {
        let Some(file) = file else {
            return;
        };
        if let Err(e) = validate(&file, &self.config) {
            effects.push(Effect::Notify(e.to_string()));
            return;
        }
        self.file = Some(file);
        self.mode = Mode::Selected;
        effects.push(Effect::FileAccepted);
    }

    fn on_submit(&mut self, effects: &mut Vec<Effect>) {
        if !self.can_submit() {
            return;
        }
        self.mode = Mode::Uploading;
        self.processing = false;
        self.negative = false;
        self.progress = 0.0;
        self.release_download(effects);
        if let Some(file) = &self.file {
            effects.push(Effect::Log(
                LogLevel::Info,
                format!("uploading {} ({} bytes)", file.name, file.size),
            ));
        }
        effects.push(Effect::StartUpload);
    }

    fn on_progress(&mut self, loaded: f64, total: f64) {
        // Browsers report a zero total when the length is not computable.
        if self.mode != Mode::Uploading || total.is_nan() || total <= 0.0 {
            return;
        }
        self.progress = (loaded / total * 100.0).clamp(0.0, 100.0);
        if self.progress >= 100.0 {
            self.processing = true;
        }
    }

    fn on_succeeded(
        &mut self,
        download_url: String,
        content_disposition: Option<&str>,
        effects: &mut Vec<Effect>,
    ) {
        if self.mode != Mode::Uploading {
            // The widget was reset while the response was in flight;
            // nothing will ever reference this URL.
            effects.push(Effect::RevokeObjectUrl(download_url));
            return;
        }
        let filename = content_disposition.map_or_else(
            || self.config.fallback_filename.clone(),
            filename_from_disposition,
        );
        effects.push(Effect::Log(LogLevel::Info, format!("converted: {filename}")));
        self.mode = Mode::Converted;
        self.processing = false;
        self.release_download(effects);
        self.download = Some(Download {
            url: download_url,
            filename,
        });
    }

    fn on_failed(&mut self, failure: UploadFailure, effects: &mut Vec<Effect>) {
        if failure == UploadFailure::Cancelled {
            // A close already reported its own cancellation; an abort
            // that lands afterwards must not touch the next selection.
            if self.mode != Mode::Uploading {
                effects.push(Effect::Log(
                    LogLevel::Info,
                    "ignoring cancellation outside an upload".to_owned(),
                ));
                return;
            }
            effects.push(Effect::Log(LogLevel::Info, "upload cancelled".to_owned()));
            self.processing = false;
            self.negative = false;
            self.mode = Mode::Selecting;
            effects.push(Effect::Notify(CANCELLED_MESSAGE.to_owned()));
            return;
        }
        if self.mode != Mode::Uploading {
            effects.push(Effect::Log(
                LogLevel::Warn,
                format!("ignoring failure outside an upload: {failure:?}"),
            ));
            return;
        }

        self.mode = Mode::UploadEnd;
        self.processing = false;
        self.negative = true;

        match failure {
            UploadFailure::Server {
                status,
                content_type,
                body,
            } => {
                let structured = is_json(content_type.as_deref())
                    .then(|| body.as_deref().and_then(parse_server_error))
                    .flatten();
                if let Some(message) = structured {
                    effects.push(Effect::Notify(format!("Error: {message}")));
                } else {
                    let message = format!("Request failed with status code {status}");
                    effects.push(Effect::Log(LogLevel::Error, format!("{message}: {body:?}")));
                    effects.push(Effect::Notify(format!("Error: {message}")));
                }
            }
            UploadFailure::Network(message) => {
                effects.push(Effect::Log(LogLevel::Error, format!("upload failed: {message}")));
                effects.push(Effect::Notify(format!("Error: {message}")));
            }
            UploadFailure::Cancelled => {}
        }
    }

    /// Return to the empty state.
    fn reset(&mut self, effects: &mut Vec<Effect>) {
        self.mode = Mode::Selecting;
        self.file = None;
        self.progress = 0.0;
        self.processing = false;
        self.negative = false;
        self.release_download(effects);
        effects.push(Effect::ClearFileInput);
    }

    fn release_download(&mut self, effects: &mut Vec<Effect>) {
        if let Some(download) = self.download.take() {
            effects.push(Effect::RevokeObjectUrl(download.url));
        }
    }
}

fn is_interactive(tag: Option<&str>) -> bool {
    tag.is_some_and(|t| INTERACTIVE_TAGS.iter().any(|i| i.eq_ignore_ascii_case(t)))
}

fn is_json(content_type: Option<&str>) -> bool {
    content_type.is_some_and(|ct| {
        ct.split(';')
            .next()
            .is_some_and(|mime| mime.trim().eq_ignore_ascii_case("application/json"))
    })
}

fn parse_server_error(body: &str) -> Option<String> {
    serde_json::from_str::<ServerError>(body)
        .ok()
        .map(|e| e.error)
}
