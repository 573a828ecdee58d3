//! Upload progress bar.

use dioxus::prelude::*;

/// Progress bar driven by a CSS custom property.
///
/// The fill width comes from `--value` (`0..=100`); the stylesheet
/// animates it and swaps colors for `is-processing` and `is-negative`.
#[component]
pub fn ProgressBar(value: f64, class: String) -> Element {
    let style = format!("--value: {value:.1}");

    rsx! {
        div {
            id: "progressbar",
            class: "{class}",
            role: "progressbar",
            aria_valuemin: "0",
            aria_valuemax: "100",
            aria_valuenow: "{value:.0}",
            div { class: "bar", style: "{style}" }
        }
    }
}
