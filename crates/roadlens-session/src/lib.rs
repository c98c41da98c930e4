//! roadlens-session: Upload session state machine (sans-IO).
//!
//! Tracks the set of locally selected images, their transient preview
//! handles, and the outcome of one submitted processing request.
//!
//! This crate has **no I/O dependencies** -- the browser supplies a
//! [`PreviewAllocator`] for object-URL lifetimes and a
//! [`ProcessingClient`] for the network, so the whole state machine runs
//! (and is tested) on the native host. All browser and network
//! interaction lives in `roadlens-io`.

pub mod api;
pub mod params;
pub mod preview;
pub mod session;
pub mod status;

pub use api::{ApiError, ImageRef, ProcessingClient, ProcessingResult, ResultImages, UploadPart};
pub use params::{EdgeParams, KernelSize, ParamError, ParamUpdate};
pub use preview::{PreviewAllocator, PreviewError, PreviewHandle};
pub use session::{SelectedImage, SessionError, SessionPolicy, UploadSession, ViewerState};
pub use status::{SessionStatus, SubmitFailure};
