//! Transient notification banner.

use dioxus::prelude::*;

use crate::controller::Notice;

/// Shows the current [`Notice`], if any.
///
/// The content is keyed by the notice id so a new message restarts the
/// slide-in animation even when its text repeats.
#[component]
pub fn Snackbar(notice: Option<Notice>) -> Element {
    rsx! {
        div { class: "snackbar", role: "status", aria_live: "polite",
            if let Some(notice) = notice {
                div { key: "{notice.id}", class: "content active", "{notice.text}" }
            }
        }
    }
}
