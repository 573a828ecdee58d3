//! Multipart upload over `XMLHttpRequest`.
//!
//! `fetch` cannot report upload progress, so the request goes through
//! `XMLHttpRequest`, whose `upload.onprogress` fires as bytes leave the
//! browser. Progress is delivered on an unbounded channel so it can be
//! consumed from a Dioxus task; completion is a JS promise resolved by
//! `onload` and rejected by `onerror`/`onabort`.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::mpsc::{UnboundedReceiver, unbounded};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{ProgressEvent, XmlHttpRequest, XmlHttpRequestResponseType};

/// Rejection value used when the request was aborted.
const ABORTED: &str = "aborted";

/// Rejection value used when the request failed at the network level.
const NETWORK: &str = "network";

/// Errors that can occur while sending the upload.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),

    /// The request never got a response (offline, CORS, DNS...).
    #[error("Network Error")]
    Network,

    /// The request was aborted through an [`UploadHandle`].
    #[error("upload aborted")]
    Aborted,

    /// The response body was not a Blob.
    #[error("response body is not a Blob")]
    UnexpectedBody,
}

impl From<JsValue> for TransportError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// What to send.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// URL the form is posted to.
    pub endpoint: &'a str,
    /// Multipart field name for the file.
    pub field_name: &'a str,
    /// File name reported in the multipart part.
    pub file_name: &'a str,
    /// File contents.
    pub bytes: &'a [u8],
}

/// Bytes sent so far and total bytes to send.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UploadProgress {
    /// Bytes sent.
    pub loaded: f64,
    /// Total bytes; zero when the browser cannot compute it.
    pub total: f64,
}

/// The server's answer, success or not.
#[derive(Debug, Clone)]
pub struct UploadResponse {
    /// HTTP status code.
    pub status: u16,
    /// `Content-Type` header.
    pub content_type: Option<String>,
    /// `Content-Disposition` header.
    pub content_disposition: Option<String>,
    /// Response body.
    pub body: web_sys::Blob,
}

impl UploadResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Read the body as UTF-8 text.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::JsError`] if the Blob cannot be read.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; Blob is !Send
    pub async fn text(&self) -> Result<String, TransportError> {
        let value = JsFuture::from(self.body.text()).await?;
        value
            .as_string()
            .ok_or_else(|| TransportError::JsError("Blob.text() did not return a string".into()))
    }
}

/// Cancels the request it was taken from.
///
/// Cloning is cheap; every clone refers to the same request.
#[derive(Debug, Clone)]
pub struct UploadHandle(XmlHttpRequest);

impl UploadHandle {
    /// Abort the request. The owning [`Upload::finish`] then resolves
    /// to [`TransportError::Aborted`]. Aborting a finished request does
    /// nothing.
    pub fn cancel(&self) {
        let _ = self.0.abort();
    }
}

/// An in-flight upload.
///
/// Keep it alive until [`finish`](Self::finish) resolves: it owns the
/// JS callbacks the request reports through.
pub struct Upload {
    xhr: XmlHttpRequest,
    done: js_sys::Promise,
    _onprogress: Closure<dyn FnMut(ProgressEvent)>,
    _onload: Closure<dyn FnMut()>,
    _onerror: Closure<dyn FnMut()>,
    _onabort: Closure<dyn FnMut()>,
}

impl Upload {
    /// Build the multipart body and send it.
    ///
    /// Returns the upload and a receiver of progress events. The
    /// receiver ends once the upload is finished and dropped.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::JsError`] if the request or its body
    /// cannot be constructed or sent.
    pub fn start(
        request: &UploadRequest<'_>,
    ) -> Result<(Self, UnboundedReceiver<UploadProgress>), TransportError> {
        let form = web_sys::FormData::new()?;
        let blob = bytes_to_blob(request.bytes)?;
        form.append_with_blob_and_filename(request.field_name, &blob, request.file_name)?;

        let xhr = XmlHttpRequest::new()?;
        xhr.open("POST", request.endpoint)?;
        xhr.set_response_type(XmlHttpRequestResponseType::Blob);

        let (tx, rx) = unbounded();
        let onprogress = Closure::<dyn FnMut(ProgressEvent)>::new(move |event: ProgressEvent| {
            let total = if event.length_computable() {
                event.total()
            } else {
                0.0
            };
            // The receiver may already be gone if the widget was torn
            // down; progress is then irrelevant.
            let _ = tx.unbounded_send(UploadProgress {
                loaded: event.loaded(),
                total,
            });
        });

        let (done, resolve, reject) = new_promise();
        let onload = Closure::<dyn FnMut()>::new(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let reject_abort = reject.clone();
        let onerror = Closure::<dyn FnMut()>::new(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str(NETWORK));
        });
        let onabort = Closure::<dyn FnMut()>::new(move || {
            let _ = reject_abort.call1(&JsValue::NULL, &JsValue::from_str(ABORTED));
        });

        xhr.upload()?
            .set_onprogress(Some(onprogress.as_ref().unchecked_ref()));
        xhr.set_onload(Some(onload.as_ref().unchecked_ref()));
        xhr.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        xhr.set_onabort(Some(onabort.as_ref().unchecked_ref()));

        xhr.send_with_opt_form_data(Some(&form))?;

        Ok((
            Self {
                xhr,
                done,
                _onprogress: onprogress,
                _onload: onload,
                _onerror: onerror,
                _onabort: onabort,
            },
            rx,
        ))
    }

    /// A handle that can abort this upload.
    #[must_use]
    pub fn handle(&self) -> UploadHandle {
        UploadHandle(self.xhr.clone())
    }

    /// Wait for the server's response.
    ///
    /// Non-2xx statuses are still `Ok`; inspect
    /// [`UploadResponse::is_success`].
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Aborted`] after [`UploadHandle::cancel`],
    /// [`TransportError::Network`] when no response arrived, and
    /// [`TransportError::UnexpectedBody`] if the body is not a Blob.
    #[allow(clippy::future_not_send)] // WASM is single-threaded; XmlHttpRequest is !Send
    pub async fn finish(self) -> Result<UploadResponse, TransportError> {
        let outcome = JsFuture::from(self.done.clone()).await;

        // Detach the callbacks before `self` (and the closures) drop.
        self.xhr.set_onload(None);
        self.xhr.set_onerror(None);
        self.xhr.set_onabort(None);
        if let Ok(upload) = self.xhr.upload() {
            upload.set_onprogress(None);
        }

        if let Err(reason) = outcome {
            return Err(match reason.as_string().as_deref() {
                Some(ABORTED) => TransportError::Aborted,
                Some(NETWORK) => TransportError::Network,
                _ => TransportError::JsError(format!("{reason:?}")),
            });
        }

        let body = self
            .xhr
            .response()?
            .dyn_into::<web_sys::Blob>()
            .map_err(|_| TransportError::UnexpectedBody)?;

        Ok(UploadResponse {
            status: self.xhr.status()?,
            content_type: self.xhr.get_response_header("content-type")?,
            content_disposition: self.xhr.get_response_header("content-disposition")?,
            body,
        })
    }
}

/// Copy file bytes into a JS `Blob`.
fn bytes_to_blob(bytes: &[u8]) -> Result<web_sys::Blob, TransportError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array.buffer());
    Ok(web_sys::Blob::new_with_buffer_source_sequence(&parts)?)
}

/// Create a JS Promise along with its resolve and reject functions.
fn new_promise() -> (js_sys::Promise, js_sys::Function, js_sys::Function) {
    let resolve = Rc::new(RefCell::new(None::<js_sys::Function>));
    let reject = Rc::new(RefCell::new(None::<js_sys::Function>));
    let resolve_clone = Rc::clone(&resolve);
    let reject_clone = Rc::clone(&reject);

    // The executor runs synchronously inside `Promise::new`.
    let promise = js_sys::Promise::new(&mut move |res, rej| {
        *resolve_clone.borrow_mut() = Some(res);
        *reject_clone.borrow_mut() = Some(rej);
    });

    let noop = || js_sys::Function::new_no_args("");
    let resolve_fn = resolve.borrow_mut().take().unwrap_or_else(noop);
    let reject_fn = reject.borrow_mut().take().unwrap_or_else(noop);

    (promise, resolve_fn, reject_fn)
}
