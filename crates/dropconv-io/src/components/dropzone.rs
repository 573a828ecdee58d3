//! The drop zone: file picker, drag-and-drop target, submit, close,
//! and download controls.

use dioxus::html::HasFileData;
use dioxus::prelude::*;
use dropconv_core::{Event, Presentation};
use wasm_bindgen::JsCast;

use super::ProgressBar;
use crate::controller::{Controller, FILE_INPUT_ID};

/// Props for the [`DropZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct DropZoneProps {
    /// Widget controller events are sent to.
    controller: Controller,
    /// Snapshot to render.
    view: Presentation,
}

/// Drag-and-drop zone with a hidden file picker.
///
/// Clicking anywhere in the zone except its controls opens the picker.
/// All state is reflected through `data-mode` and classes; the
/// stylesheet decides which controls are visible in each mode.
#[component]
pub fn DropZone(props: DropZoneProps) -> Element {
    let controller = props.controller;
    let view = props.view;
    let accept = controller.accept_attr();
    let download = view.download_href.clone().zip(view.download_name.clone());

    let handle_files = move |evt: FormEvent| {
        controller.offer_files(evt.files(), false);
    };

    let handle_drop = move |evt: DragEvent| {
        evt.prevent_default();
        evt.stop_propagation();
        controller.offer_files(evt.files(), true);
    };

    let handle_zone_click = move |evt: MouseEvent| {
        controller.dispatch(Event::ZoneClicked {
            target_tag: click_target_tag(&evt),
        });
    };

    let handle_submit = move |evt: MouseEvent| {
        evt.prevent_default();
        evt.stop_propagation();
        controller.dispatch(Event::Submit);
    };

    let handle_close = move |evt: MouseEvent| {
        evt.prevent_default();
        evt.stop_propagation();
        controller.dispatch(Event::Close);
    };

    rsx! {
        input {
            id: FILE_INPUT_ID,
            r#type: "file",
            accept: "{accept}",
            class: "hidden",
            onchange: handle_files,
        }

        div {
            id: "dragzone",
            class: "{view.dragzone_class()}",
            "data-mode": view.data_mode,
            onclick: handle_zone_click,
            ondragenter: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                controller.dispatch(Event::DragEnter);
            },
            ondragleave: move |evt| {
                evt.prevent_default();
                evt.stop_propagation();
                controller.dispatch(Event::DragLeave);
            },
            ondragover: move |evt| {
                // Required for the browser to allow a drop here.
                evt.prevent_default();
                evt.stop_propagation();
            },
            ondrop: handle_drop,

            span {
                class: "close",
                role: "button",
                aria_label: "Close",
                onclick: handle_close,
                "×"
            }

            h3 { class: "header", "{view.header}" }
            p { class: "text", "{view.description}" }
            if let Some(ref hint) = view.hint {
                p { class: "hint", "{hint}" }
            }

            ProgressBar {
                value: view.progress_value,
                class: view.progress_class(),
            }

            div { class: "actions",
                button {
                    id: "submitbtn",
                    r#type: "button",
                    class: "button",
                    disabled: !view.can_submit,
                    onclick: handle_submit,
                    "Convert"
                }

                if let Some((href, name)) = download {
                    a {
                        id: "downloadbtn",
                        class: "button is-positive",
                        href: "{href}",
                        download: "{name}",
                        // Let the browser follow the link; keep the
                        // click away from the zone.
                        onclick: move |evt: MouseEvent| evt.stop_propagation(),
                        "Download"
                    }
                }
            }
        }
    }
}

/// Tag name of the element a click landed on.
fn click_target_tag(evt: &MouseEvent) -> Option<String> {
    evt.data()
        .downcast::<web_sys::MouseEvent>()
        .and_then(|e| e.target())
        .and_then(|target| target.dyn_into::<web_sys::Element>().ok())
        .map(|el| el.tag_name())
}
