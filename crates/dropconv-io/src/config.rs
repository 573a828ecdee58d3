//! Reading the widget configuration from the hosting page.
//!
//! The page embeds a JSON block:
//!
//! ```html
//! <script type="application/json" id="dropconv-config">
//!   { "acceptExtension": "epub", "sizeLimit": 20971520, "endpoint": "/api/convert" }
//! </script>
//! ```

use dioxus::logger::tracing::warn;
use dropconv_core::WidgetConfig;

/// Element id of the config block.
pub const CONFIG_ELEMENT_ID: &str = "dropconv-config";

/// Load the config block, falling back to defaults.
///
/// A missing block is normal for local development; a malformed one is
/// logged. Either way the widget starts with [`WidgetConfig::default`].
#[must_use]
pub fn load_from_page() -> WidgetConfig {
    let Some(text) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|el| el.text_content())
    else {
        warn!("no #{CONFIG_ELEMENT_ID} block on the page; using default widget config");
        return WidgetConfig::default();
    };

    WidgetConfig::from_json(&text).unwrap_or_else(|e| {
        warn!("{e}; using default widget config");
        WidgetConfig::default()
    })
}
