use dioxus::prelude::*;
use roadlens_io::net::push_parameters;
use roadlens_io::{
    BlobPreviews, FetchClient, ImageViewerModal, ParameterPanel, ResultPane, SelectionGrid,
    StatusBanner, Thumbnail, UploadZone,
};
use roadlens_session::{
    ImageRef, ParamUpdate, ProcessingClient, SelectedImage, SessionPolicy, UploadSession,
};

fn main() {
    dioxus::launch(app);
}

/// Root application component.
///
/// Owns the upload session for the lifetime of the page and wires the
/// upload, selection, parameter, result, and viewer components to it.
/// The session is dropped on teardown, which releases any outstanding
/// preview URLs.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    let mut session = use_signal(|| UploadSession::new(BlobPreviews, SessionPolicy::batch()));
    let client = use_hook(FetchClient::default);

    // --- Selection handlers ---
    let on_select = move |files: Vec<SelectedImage>| {
        if let Err(e) = session.write().add_files(files) {
            web_sys::console::error_1(&format!("preview allocation failed: {e}").into());
        }
    };

    let on_remove = move |index: usize| {
        if let Err(e) = session.write().remove_file(index) {
            web_sys::console::error_1(&format!("{e}").into());
        }
    };

    // --- Submit handler ---
    // The submit is split around the await so the session is never
    // borrowed while the request is in flight; the Processing status
    // guard (not this task) is what prevents duplicate submits.
    let submit_client = client.clone();
    let on_submit = move |_| {
        let client = submit_client.clone();
        spawn(async move {
            let Some(parts) = session.write().begin_submit() else {
                return;
            };
            // Yield once so the Processing state paints before the
            // request goes out.
            gloo_timers::future::TimeoutFuture::new(0).await;
            let outcome = client.process_images(parts).await;
            session.write().finish_submit(outcome);
        });
    };

    // --- Parameter handler ---
    let params_client = client.clone();
    let on_param_update = move |update: ParamUpdate| {
        match session.write().update_parameter(update) {
            Ok(snapshot) => {
                let client = params_client.clone();
                // Advisory sync: failures are logged inside and dropped.
                spawn(async move {
                    push_parameters(&client, snapshot).await;
                });
            }
            Err(e) => {
                web_sys::console::warn_1(&format!("rejected parameter update: {e}").into());
            }
        }
    };

    // --- Viewer and display-error handlers ---
    let on_open = move |(url, title): (String, String)| {
        session.write().open_viewer(ImageRef::new(url), title);
    };
    let on_close = move |()| session.write().close_viewer();
    let on_display_error = move |()| session.write().mark_display_error();

    // --- Snapshot session state for this render ---
    let (thumbnails, status, params, result, display_error, viewer, can_submit) = {
        let state = session.read();
        let thumbnails: Vec<Thumbnail> = state
            .selection()
            .enumerate()
            .map(|(index, (image, preview))| Thumbnail {
                index,
                url: preview.url().to_string(),
                name: image.name.clone(),
            })
            .collect();
        let status = state.status().clone();
        let can_submit = !state.is_empty() && status.can_submit();
        (
            thumbnails,
            status,
            state.params(),
            state.result().cloned(),
            state.display_error(),
            state.viewer().cloned(),
            can_submit,
        )
    };
    let processing = status.is_processing();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/app.css") }

        div { class: "page",
            header { class: "page-header",
                h1 { class: "page-title", "Road Intersection Pathfinding" }
                p { class: "page-subtitle",
                    "Stitching and segmentation of road imagery"
                }
            }

            ParameterPanel { params, on_update: on_param_update }

            div { class: "columns",
                section { class: "column",
                    h2 { class: "section-title", "Original Images" }
                    UploadZone { on_select }
                    SelectionGrid {
                        items: thumbnails,
                        on_remove,
                        on_open,
                    }
                }
                section { class: "column",
                    h2 { class: "section-title", "Result" }
                    ResultPane {
                        result,
                        processing,
                        display_error,
                        on_display_error,
                        on_open,
                    }
                }
            }

            StatusBanner { status }

            button {
                class: "submit-button",
                disabled: !can_submit,
                onclick: on_submit,
                if processing { "Processing..." } else { "Process Images" }
            }

            if let Some(viewer) = viewer {
                ImageViewerModal {
                    image: viewer.image.as_str().to_string(),
                    title: viewer.title.clone(),
                    on_close,
                }
            }
        }
    }
}
