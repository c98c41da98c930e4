//! Modal image viewer.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;

/// Props for the [`ImageViewerModal`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImageViewerModalProps {
    /// Image URL to display full-size.
    image: String,
    /// Heading shown above the image.
    title: String,
    /// Fired when the dismiss control or the backdrop is clicked.
    on_close: EventHandler<()>,
}

/// Full-screen modal preview of one image with a dismiss control.
/// The owner renders it only while the session's viewer state is open.
#[component]
pub fn ImageViewerModal(props: ImageViewerModalProps) -> Element {
    let on_close = props.on_close;

    rsx! {
        div {
            class: "modal-backdrop",
            onclick: move |_| on_close.call(()),

            div {
                class: "modal-panel",
                // Clicks on the panel must not dismiss via the backdrop.
                onclick: move |evt| evt.stop_propagation(),

                div { class: "modal-header",
                    h3 { class: "modal-title", "{props.title}" }
                    button {
                        class: "modal-close",
                        aria_label: "Close viewer",
                        onclick: move |_| on_close.call(()),
                        Icon { icon: LdX, width: 24, height: 24 }
                    }
                }
                div { class: "modal-body",
                    img {
                        src: "{props.image}",
                        alt: "{props.title}",
                        class: "modal-image",
                    }
                }
            }
        }
    }
}
