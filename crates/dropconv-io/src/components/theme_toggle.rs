//! Light/dark theme toggle.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdMoon, LdSun};
use dropconv_core::ThemeState;
use futures::StreamExt;

use crate::theme::{ColorSchemeWatcher, apply_scheme, prefers_dark};

/// Theme state for the app root.
///
/// Starts from the OS preference, follows later OS changes, and keeps
/// `data-scheme` on `<html>` in sync with whatever the state becomes.
pub fn use_theme() -> Signal<ThemeState> {
    let mut theme = use_signal(|| ThemeState::from_os(prefers_dark()));

    use_hook(move || {
        spawn(async move {
            let Some((_watcher, mut changes)) = ColorSchemeWatcher::watch() else {
                return;
            };
            // `_watcher` lives as long as this task, which lives as
            // long as the component.
            while let Some(dark) = changes.next().await {
                theme.write().os_changed(dark);
            }
        });
    });

    use_effect(move || apply_scheme(theme().theme()));

    theme
}

/// Checkbox switch with a sun or moon icon. Checked means light.
#[component]
pub fn ThemeToggle(checked: bool, icon: &'static str, on_toggle: EventHandler<()>) -> Element {
    rsx! {
        label { class: "theme-switch", r#for: "theme-switch",
            input {
                id: "theme-switch",
                r#type: "checkbox",
                checked,
                aria_label: "Toggle theme",
                onchange: move |_| on_toggle.call(()),
            }
            span { id: "theme-icon", class: "{icon}",
                if checked {
                    Icon { width: 20, height: 20, icon: LdSun }
                } else {
                    Icon { width: 20, height: 20, icon: LdMoon }
                }
            }
        }
    }
}
