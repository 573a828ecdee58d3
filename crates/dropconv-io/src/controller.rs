//! Glue between the widget state machine and the browser.
//!
//! [`Controller`] owns the reactive state (the [`Widget`], the kept
//! file bytes, the single upload handle, the snackbar) and carries out
//! the [`Effect`]s returned by [`Widget::handle`].

use dioxus::html::FileData;
use dioxus::logger::tracing::{error, info, warn};
use dioxus::prelude::*;
use dropconv_core::{
    Effect, Event, LogLevel, Mode, Presentation, SelectedFile, ThemeState, UploadFailure, Widget,
    WidgetConfig,
};
use futures::StreamExt;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;

use crate::download;
use crate::transport::{TransportError, Upload, UploadHandle, UploadRequest};

/// Element id of the hidden file input.
pub const FILE_INPUT_ID: &str = "upload";

/// A snackbar message. `id` increases with every message so a newer
/// one is never dismissed by an older one's timer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Sequence number.
    pub id: u64,
    /// Message text.
    pub text: String,
}

/// Reactive handle to the upload widget. `Copy`, so it can be moved
/// into every event handler.
#[derive(Clone, Copy, PartialEq)]
pub struct Controller {
    widget: Signal<Widget>,
    pending: Signal<Option<FileData>>,
    upload: Signal<Option<UploadHandle>>,
    session: Signal<u64>,
    notice: Signal<Option<Notice>>,
    notice_seq: Signal<u64>,
}

/// Create the controller for the current component.
///
/// Any object URL still held when the component unmounts is revoked.
pub fn use_controller(config: WidgetConfig) -> Controller {
    let widget = use_signal(|| Widget::new(config));
    let controller = Controller {
        widget,
        pending: use_signal(|| None),
        upload: use_signal(|| None),
        session: use_signal(|| 0),
        notice: use_signal(|| None),
        notice_seq: use_signal(|| 0),
    };

    use_drop(move || {
        if let Ok(upload) = controller.upload.try_peek() {
            if let Some(handle) = upload.as_ref() {
                handle.cancel();
            }
        }
        if let Ok(widget) = controller.widget.try_peek() {
            if let Some(download) = widget.download() {
                download::revoke_object_url(&download.url);
            }
        }
    });

    controller
}

impl Controller {
    /// Render snapshot. Reading it subscribes the caller to changes.
    #[must_use]
    pub fn presentation(&self, theme: ThemeState) -> Presentation {
        Presentation::of(&self.widget.read(), theme)
    }

    /// The current snackbar message.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        self.notice.read().clone()
    }

    /// The accepted extension as an `accept` attribute value.
    #[must_use]
    pub fn accept_attr(&self) -> String {
        self.widget.peek().config().accept_attr()
    }

    /// Feed an event that carries no file data.
    pub fn dispatch(self, event: Event) {
        self.dispatch_with(event, None);
    }

    /// Offer files from the picker (`dropped = false`) or a drop.
    pub fn offer_files(self, files: Vec<FileData>, dropped: bool) {
        let selected = files
            .iter()
            .map(|f| SelectedFile::new(f.name(), f.size()))
            .collect();
        let candidate = match files.as_slice() {
            [only] => Some(only.clone()),
            _ => None,
        };
        let event = if dropped {
            Event::FilesDropped(selected)
        } else {
            Event::FilesPicked(selected)
        };
        self.dispatch_with(event, candidate);
    }

    fn dispatch_with(mut self, event: Event, mut candidate: Option<FileData>) {
        let effects = self.widget.write().handle(event);
        for effect in effects {
            self.apply(effect, &mut candidate);
        }
    }

    fn apply(mut self, effect: Effect, candidate: &mut Option<FileData>) {
        match effect {
            Effect::Notify(text) => self.notify(text),
            Effect::FileAccepted => self.pending.set(candidate.take()),
            Effect::OpenFilePicker => {
                if let Some(input) = file_input() {
                    input.click();
                }
            }
            Effect::ClearFileInput => {
                self.pending.set(None);
                if let Some(input) = file_input() {
                    input.set_value("");
                }
            }
            Effect::StartUpload => {
                let session = *self.session.peek() + 1;
                self.session.set(session);
                spawn(self.run_upload(session));
            }
            Effect::CancelUpload => {
                // Retire the running task first so whatever it reports
                // after the abort is dropped.
                let session = *self.session.peek() + 1;
                self.session.set(session);
                if let Some(handle) = self.upload.write().take() {
                    handle.cancel();
                }
            }
            Effect::RevokeObjectUrl(url) => download::revoke_object_url(&url),
            Effect::Log(LogLevel::Info, line) => info!("{line}"),
            Effect::Log(LogLevel::Warn, line) => warn!("{line}"),
            Effect::Log(LogLevel::Error, line) => error!("{line}"),
        }
    }

    fn notify(mut self, text: String) {
        let id = *self.notice_seq.peek() + 1;
        self.notice_seq.set(id);
        self.notice.set(Some(Notice { id, text }));

        let ms = self.widget.peek().config().snackbar_ms;
        spawn(async move {
            TimeoutFuture::new(ms).await;
            if self.notice.peek().as_ref().is_some_and(|n| n.id == id) {
                self.notice.set(None);
            }
        });
    }

    fn is_current(&self, session: u64) -> bool {
        *self.session.peek() == session
    }

    /// Read the kept file, send it, and report the outcome.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; Signals are !Send
    async fn run_upload(mut self, session: u64) {
        let Some(file) = self.pending.peek().clone() else {
            self.dispatch(Event::Failed(UploadFailure::Network(
                "no file selected".into(),
            )));
            return;
        };
        let config = self.widget.peek().config().clone();

        let bytes = match file.read_bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                if self.is_current(session) {
                    self.dispatch(Event::Failed(UploadFailure::Network(format!(
                        "failed to read file: {e}"
                    ))));
                }
                return;
            }
        };

        // Closed while the file was being read.
        if !self.is_current(session) || self.widget.peek().mode() != Mode::Uploading {
            return;
        }

        let name = file.name();
        let request = UploadRequest {
            endpoint: &config.endpoint,
            field_name: &config.field_name,
            file_name: &name,
            bytes: &bytes,
        };
        let (upload, mut progress) = match Upload::start(&request) {
            Ok(started) => started,
            Err(e) => {
                self.dispatch(Event::Failed(UploadFailure::Network(e.to_string())));
                return;
            }
        };
        self.upload.set(Some(upload.handle()));

        spawn(async move {
            while let Some(p) = progress.next().await {
                if !self.is_current(session) {
                    break;
                }
                self.dispatch(Event::Progress {
                    loaded: p.loaded,
                    total: p.total,
                });
            }
        });

        let outcome = upload.finish().await;
        if !self.is_current(session) {
            // A newer upload owns the widget now.
            if let Ok(response) = outcome {
                info!("discarding response ({}) from a superseded upload", response.status);
            }
            return;
        }
        self.upload.set(None);

        let event = match outcome {
            Ok(response) if response.is_success() => {
                match download::create_object_url(&response.body, &config.result_mime) {
                    Ok(download_url) => Event::Succeeded {
                        download_url,
                        content_disposition: response.content_disposition,
                    },
                    Err(e) => Event::Failed(UploadFailure::Network(e.to_string())),
                }
            }
            Ok(response) => {
                let body = match response.text().await {
                    Ok(text) => Some(text),
                    Err(e) => {
                        warn!("could not read error body: {e}");
                        None
                    }
                };
                Event::Failed(UploadFailure::Server {
                    status: response.status,
                    content_type: response.content_type,
                    body,
                })
            }
            Err(TransportError::Aborted) => Event::Failed(UploadFailure::Cancelled),
            Err(e) => Event::Failed(UploadFailure::Network(e.to_string())),
        };
        self.dispatch(event);
    }
}

fn file_input() -> Option<web_sys::HtmlInputElement> {
    web_sys::window()?
        .document()?
        .get_element_by_id(FILE_INPUT_ID)?
        .dyn_into()
        .ok()
}
