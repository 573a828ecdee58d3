use dioxus::logger::tracing::Level;
use dioxus::prelude::*;
use dropconv_io::config::load_from_page;
use dropconv_io::{DropZone, Snackbar, ThemeToggle, use_controller, use_theme};

fn main() {
    // Fails only if a subscriber is already installed, which is fine.
    let _ = dioxus::logger::init(Level::INFO);
    dioxus::launch(app);
}

/// Root application component.
///
/// Reads the page config once, then wires the controller and theme
/// state into the drop zone, snackbar, and theme toggle.
fn app() -> Element {
    let config = use_hook(load_from_page);
    let controller = use_controller(config);
    let mut theme = use_theme();

    let view = controller.presentation(theme());
    let (theme_checked, theme_icon) = (view.theme_checked, view.theme_icon);

    rsx! {
        // Widget stylesheet, copied from site/dropconv.css by build.rs.
        style { dangerous_inner_html: include_str!(env!("DROPCONV_CSS_PATH")) }

        header { class: "topbar",
            h1 { class: "title", "dropconv" }
            ThemeToggle {
                checked: theme_checked,
                icon: theme_icon,
                on_toggle: move |()| theme.write().toggle(),
            }
        }

        main { class: "page",
            form {
                class: "convert-form",
                onsubmit: move |evt: FormEvent| evt.prevent_default(),
                DropZone { controller, view }
            }
        }

        Snackbar { notice: controller.notice() }
    }
}
