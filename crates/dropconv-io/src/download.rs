//! Object URLs for converted documents.
//!
//! The converted file is exposed through a `blob:` URL on the download
//! link. Each URL pins its Blob in memory until revoked, so every URL
//! created here must eventually be passed to [`revoke_object_url`].
//! The widget state machine decides when (new upload, close, late
//! response).
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating an object URL.
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for DownloadError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Re-type a response body as `mime_type` and create an object URL
/// for it.
///
/// The response Blob carries whatever type the server sent; wrapping
/// it gives the download the configured MIME type.
///
/// # Errors
///
/// Returns [`DownloadError::JsError`] if `Blob` construction or
/// `URL.createObjectURL` fails.
pub fn create_object_url(body: &web_sys::Blob, mime_type: &str) -> Result<String, DownloadError> {
    let parts = js_sys::Array::new();
    parts.push(body);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);

    let blob = web_sys::Blob::new_with_blob_sequence_and_options(&parts, &opts)?;
    Ok(web_sys::Url::create_object_url_with_blob(&blob)?)
}

/// Release an object URL created by [`create_object_url`].
///
/// Revoking an unknown or already-revoked URL is a no-op in browsers,
/// so failures are not reported.
pub fn revoke_object_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
