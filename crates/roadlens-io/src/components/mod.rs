//! Dioxus UI components for roadlens.
//!
//! Provides the upload drop zone, removable thumbnail grid, processed
//! result pane, status banner, edge-parameter panel, and the modal
//! image viewer.

mod params;
mod results;
mod status;
mod thumbnails;
mod upload;
mod viewer;

pub use params::ParameterPanel;
pub use results::ResultPane;
pub use status::StatusBanner;
pub use thumbnails::{SelectionGrid, Thumbnail};
pub use upload::UploadZone;
pub use viewer::ImageViewerModal;
