//! Processed-result display: a single image or a keyed grid.
//!
//! Each returned image is individually clickable into the viewer. A
//! reference that fails to decode client-side swaps to an inline
//! placeholder and raises the session's display-error flag; the
//! session status is untouched.

use dioxus::prelude::*;
use roadlens_session::{ImageRef, ProcessingResult, ResultImages};

/// Props for the [`ResultPane`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ResultPaneProps {
    /// Most recent processing result, if any.
    result: Option<ProcessingResult>,
    /// Whether a submit is in flight.
    processing: bool,
    /// Whether a result image previously failed to load.
    display_error: bool,
    /// Fired when a result image fails to load client-side.
    on_display_error: EventHandler<()>,
    /// Fired when a result image is clicked open: `(url, title)`.
    on_open: EventHandler<(String, String)>,
}

/// Result pane: busy placeholder while processing, then the returned
/// image (or one tile per keyed entry) plus any advisory notes.
#[component]
pub fn ResultPane(props: ResultPaneProps) -> Element {
    if props.processing {
        return rsx! {
            div { class: "result-pane",
                div { class: "result-placeholder busy", "Processing..." }
            }
        };
    }

    let Some(ref result) = props.result else {
        let message = if props.display_error {
            "Error loading image"
        } else {
            "Awaiting processing"
        };
        return rsx! {
            div { class: "result-pane",
                div { class: "result-placeholder", "{message}" }
            }
        };
    };

    let images = match &result.images {
        ResultImages::Single(image) => render_single(image, props.on_display_error, props.on_open),
        ResultImages::Keyed(entries) => render_keyed(entries, props.on_display_error, props.on_open),
    };

    rsx! {
        div { class: "result-pane",
            {images}

            if !result.notes.is_empty() {
                div { class: "result-notes",
                    h3 { class: "result-notes-title", "Detected directions" }
                    ul {
                        for note in result.notes.clone() {
                            li { "{note}" }
                        }
                    }
                }
            }
        }
    }
}

/// Render a lone result image.
fn render_single(
    image: &ImageRef,
    on_display_error: EventHandler<()>,
    on_open: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        ResultImage {
            image: image.clone(),
            title: "Result",
            on_display_error,
            on_open,
        }
    }
}

/// Render one labeled tile per keyed entry, in server order.
fn render_keyed(
    entries: &[(String, ImageRef)],
    on_display_error: EventHandler<()>,
    on_open: EventHandler<(String, String)>,
) -> Element {
    rsx! {
        div { class: "result-grid",
            for (key, image) in entries.to_vec() {
                div { class: "result-cell", key: "{key}",
                    ResultImage {
                        image,
                        title: stage_title(&key),
                        on_display_error,
                        on_open,
                    }
                    p { class: "result-label", "{key}" }
                }
            }
        }
    }
}

/// Props for one displayed result image.
#[derive(Props, Clone, PartialEq)]
struct ResultImageProps {
    image: ImageRef,
    title: String,
    on_display_error: EventHandler<()>,
    on_open: EventHandler<(String, String)>,
}

/// One clickable result image; swaps to an inline placeholder when the
/// reference fails to decode.
#[component]
fn ResultImage(props: ResultImageProps) -> Element {
    let mut failed = use_signal(|| false);

    if failed() {
        return rsx! {
            div { class: "result-placeholder", "Error loading image" }
        };
    }

    let src = props.image.as_str().to_string();
    let open_src = src.clone();
    let open_title = props.title.clone();
    rsx! {
        img {
            src: "{src}",
            alt: "{props.title}",
            class: "result-image",
            onclick: move |_| props.on_open.call((open_src.clone(), open_title.clone())),
            onerror: move |_| {
                failed.set(true);
                props.on_display_error.call(());
            },
        }
    }
}

/// Viewer title for a keyed result entry, e.g. `stitched` -> `Stitched`.
fn stage_title(key: &str) -> String {
    let mut chars = key.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().collect::<String>() + chars.as_str()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_titles_are_capitalized() {
        assert_eq!(stage_title("stitched"), "Stitched");
        assert_eq!(stage_title("final"), "Final");
        assert_eq!(stage_title(""), "");
    }
}
