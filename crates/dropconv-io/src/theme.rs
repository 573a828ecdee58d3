//! OS color-scheme detection and the `data-scheme` attribute.
//!
//! All functions in this module require a browser environment
//! (`wasm32-unknown-unknown` target).

use dropconv_core::Theme;
use futures::channel::mpsc::{UnboundedReceiver, unbounded};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{MediaQueryList, MediaQueryListEvent};

const DARK_QUERY: &str = "(prefers-color-scheme: dark)";

fn dark_query() -> Option<MediaQueryList> {
    web_sys::window()?.match_media(DARK_QUERY).ok().flatten()
}

/// Whether the OS currently prefers a dark scheme.
///
/// `false` when media queries are unavailable.
#[must_use]
pub fn prefers_dark() -> bool {
    dark_query().is_some_and(|q| q.matches())
}

/// Set `data-scheme` on `<html>` for the stylesheet.
pub fn apply_scheme(theme: Theme) {
    let root = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element());
    if let Some(root) = root {
        let _ = root.set_attribute("data-scheme", theme.scheme());
    }
}

/// Subscription to OS color-scheme changes.
///
/// Each change sends the new "prefers dark" value on the receiver
/// returned by [`watch`](Self::watch). Dropping the watcher removes
/// the listener.
pub struct ColorSchemeWatcher {
    query: MediaQueryList,
    listener: Closure<dyn FnMut(MediaQueryListEvent)>,
}

impl ColorSchemeWatcher {
    /// Start listening. Returns `None` when media queries are
    /// unavailable.
    #[must_use]
    pub fn watch() -> Option<(Self, UnboundedReceiver<bool>)> {
        let query = dark_query()?;
        let (tx, rx) = unbounded();
        let listener =
            Closure::<dyn FnMut(MediaQueryListEvent)>::new(move |event: MediaQueryListEvent| {
                let _ = tx.unbounded_send(event.matches());
            });
        query
            .add_event_listener_with_callback("change", listener.as_ref().unchecked_ref())
            .ok()?;
        Some((Self { query, listener }, rx))
    }
}

impl Drop for ColorSchemeWatcher {
    fn drop(&mut self) {
        let _ = self
            .query
            .remove_event_listener_with_callback("change", self.listener.as_ref().unchecked_ref());
    }
}
