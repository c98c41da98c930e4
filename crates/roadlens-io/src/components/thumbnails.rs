//! Removable thumbnail grid for the current selection.
//!
//! One tile per selected file. The remove control releases the file and
//! its preview; clicking the image itself opens it in the viewer.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdX;

/// One thumbnail in the grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    /// Position in the session's selection.
    pub index: usize,
    /// Preview object URL.
    pub url: String,
    /// Original filename.
    pub name: String,
}

/// Props for the [`SelectionGrid`] component.
#[derive(Props, Clone, PartialEq)]
pub struct SelectionGridProps {
    /// Thumbnails in selection order.
    items: Vec<Thumbnail>,
    /// Fired with the selection index of the removed tile.
    on_remove: EventHandler<usize>,
    /// Fired when a thumbnail is clicked open: `(url, title)`.
    on_open: EventHandler<(String, String)>,
}

/// Grid of selected-image previews, each with a remove control.
#[component]
pub fn SelectionGrid(props: SelectionGridProps) -> Element {
    rsx! {
        div { class: "thumb-grid",
            for item in props.items.clone() {
                {render_tile(item, props.on_remove, props.on_open)}
            }
        }
    }
}

/// Render a single selection tile.
fn render_tile(
    item: Thumbnail,
    on_remove: EventHandler<usize>,
    on_open: EventHandler<(String, String)>,
) -> Element {
    let index = item.index;
    let title = format!("Original image {}", index + 1);
    let open_url = item.url.clone();

    rsx! {
        div { class: "thumb-card",
            button {
                class: "thumb-remove",
                aria_label: "Remove {item.name}",
                onclick: move |_| on_remove.call(index),
                Icon { icon: LdX, width: 16, height: 16 }
            }
            img {
                src: "{item.url}",
                alt: "Preview of {item.name}",
                class: "thumb-image",
                onclick: move |_| on_open.call((open_url.clone(), title.clone())),
            }
            p { class: "thumb-name", "{item.name}" }
        }
    }
}
