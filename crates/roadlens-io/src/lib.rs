//! roadlens-io: Browser I/O and Dioxus component library.
//!
//! Object-URL lifecycle for local previews, the fetch-backed client for
//! the processing service, and the reusable UI components for the
//! roadlens web application.

pub mod blob;
pub mod components;
pub mod net;

pub use blob::BlobPreviews;
pub use components::{
    ImageViewerModal, ParameterPanel, ResultPane, SelectionGrid, StatusBanner, Thumbnail,
    UploadZone,
};
pub use net::FetchClient;
