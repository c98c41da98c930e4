//! File upload component with drag-and-drop and a multi-file picker.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use roadlens_session::SelectedImage;

/// Allowed file extensions for image uploads.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "webp"];

/// Check whether a filename has an allowed image extension.
fn has_allowed_extension(name: &str) -> bool {
    name.rsplit_once('.').is_some_and(|(_, ext)| {
        ALLOWED_EXTENSIONS
            .iter()
            .any(|a| a.eq_ignore_ascii_case(ext))
    })
}

/// Props for the [`UploadZone`] component.
#[derive(Props, Clone, PartialEq)]
pub struct UploadZoneProps {
    /// Called with every file read from a selection or drop.
    on_select: EventHandler<Vec<SelectedImage>>,
}

/// A drag-and-drop zone with a multi-file picker.
///
/// Accepts PNG, JPEG, BMP, and WebP images. All files in a selection or
/// drop are read and forwarded in one `on_select` call; files with an
/// unsupported extension or a failed read are reported inline and
/// skipped.
#[component]
pub fn UploadZone(props: UploadZoneProps) -> Element {
    let mut dragging = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);

    // Validate, read, and forward every file from a list. Shared by the
    // file-picker (`handle_files`) and drag-and-drop (`handle_drop`)
    // paths so the validation/read/callback logic lives in one place.
    let process_files = move |files: Vec<FileData>| async move {
        let mut selected = Vec::with_capacity(files.len());
        let mut problems = Vec::new();
        for file in files {
            let name = file.name();
            if !has_allowed_extension(&name) {
                problems.push(format!("Unsupported file type: {name}"));
                continue;
            }
            match file.read_bytes().await {
                Ok(bytes) => selected.push(SelectedImage {
                    bytes: bytes.to_vec(),
                    name,
                }),
                Err(e) => problems.push(format!("Failed to read {name}: {e}")),
            }
        }
        error.set(if problems.is_empty() {
            None
        } else {
            Some(problems.join("; "))
        });
        if !selected.is_empty() {
            props.on_select.call(selected);
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    let zone_class = if dragging() {
        "upload-zone dragging"
    } else {
        "upload-zone"
    };

    rsx! {
        div {
            class: "{zone_class}",
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| {
                dragging.set(false);
            },
            ondrop: handle_drop,

            if let Some(ref err) = error() {
                p { class: "upload-error", "{err}" }
            }

            p { class: "upload-hint", "Drop images here or " }

            label { class: "upload-button",
                input {
                    r#type: "file",
                    accept: ".png,.jpg,.jpeg,.bmp,.webp",
                    multiple: true,
                    class: "upload-input",
                    onchange: handle_files,
                }
                "Choose Files"
            }

            p { class: "upload-formats", "PNG, JPEG, BMP, WebP" }
        }
    }
}
