//! The upload session: selected files, their preview handles, and the
//! outcome of one submitted processing request.
//!
//! A page constructs one [`UploadSession`] when it mounts and drops it
//! on teardown; all mutation goes through the session's methods. The
//! session is single-threaded and event-driven -- the only suspending
//! operation is [`submit`](UploadSession::submit), and a duplicate
//! submit is prevented by the `Processing` status guard rather than by
//! locking.

use crate::api::{ApiError, ImageRef, ProcessingClient, ProcessingResult, UploadPart};
use crate::params::{EdgeParams, ParamError, ParamUpdate};
use crate::preview::{PreviewAllocator, PreviewError, PreviewHandle};
use crate::status::{SessionStatus, SubmitFailure};

/// A user-chosen image awaiting upload.
#[derive(Debug, Clone)]
pub struct SelectedImage {
    /// Raw file bytes, owned by the session until removal or clear.
    pub bytes: Vec<u8>,
    /// Original filename, forwarded with the multipart part.
    pub name: String,
}

/// One selection slot: a file and the preview handle derived from it.
///
/// Pairing the two in one struct keeps the handle count equal to the
/// file count by construction -- there is no way to add or remove one
/// without the other.
#[derive(Debug)]
struct Entry {
    image: SelectedImage,
    preview: PreviewHandle,
}

/// Per-variant policy knobs for the upload pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionPolicy {
    /// Release previews and empty the selection as soon as a submit
    /// succeeds, leaving only the result on screen.
    pub clear_after_success: bool,
    /// Keep at most one selected image: adding replaces the current
    /// selection instead of appending to it.
    pub single_selection: bool,
}

impl SessionPolicy {
    /// Multi-image batch page: append freely, clear once processed.
    #[must_use]
    pub const fn batch() -> Self {
        Self {
            clear_after_success: true,
            single_selection: false,
        }
    }

    /// Single-image page: one file at a time, selection kept after
    /// success so it can be re-run with adjusted parameters.
    #[must_use]
    pub const fn single() -> Self {
        Self {
            clear_after_success: false,
            single_selection: true,
        }
    }
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self::batch()
    }
}

/// Modal viewer state: which image is enlarged, under what title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerState {
    /// The enlarged image.
    pub image: ImageRef,
    /// Heading shown above it.
    pub title: String,
}

/// Errors surfaced to callers as `Result`s. Everything recoverable
/// lands in [`SessionStatus`] instead.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// Removal index past the end of the selection. Normal UI
    /// interaction never produces this; treat it as a caller bug.
    #[error("remove index {index} out of range, selection holds {len}")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Selection length at the time of the call.
        len: usize,
    },
}

/// In-memory state machine for one upload-preview-submit-display cycle.
#[derive(Debug)]
pub struct UploadSession<P: PreviewAllocator> {
    previews: P,
    policy: SessionPolicy,
    entries: Vec<Entry>,
    status: SessionStatus,
    params: EdgeParams,
    result: Option<ProcessingResult>,
    display_error: bool,
    viewer: Option<ViewerState>,
}

impl<P: PreviewAllocator> UploadSession<P> {
    /// Create an empty session using `previews` for handle lifetimes.
    #[must_use]
    pub fn new(previews: P, policy: SessionPolicy) -> Self {
        Self {
            previews,
            policy,
            entries: Vec::new(),
            status: SessionStatus::Idle,
            params: EdgeParams::default(),
            result: None,
            display_error: false,
            viewer: None,
        }
    }

    /// Current status.
    #[must_use]
    pub const fn status(&self) -> &SessionStatus {
        &self.status
    }

    /// Current parameter record.
    #[must_use]
    pub const fn params(&self) -> EdgeParams {
        self.params
    }

    /// Result of the most recent successful submit.
    #[must_use]
    pub const fn result(&self) -> Option<&ProcessingResult> {
        self.result.as_ref()
    }

    /// Whether a returned result image failed to load client-side.
    #[must_use]
    pub const fn display_error(&self) -> bool {
        self.display_error
    }

    /// Modal viewer state, if open.
    #[must_use]
    pub const fn viewer(&self) -> Option<&ViewerState> {
        self.viewer.as_ref()
    }

    /// Number of selected files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the selection is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Selected files with their preview handles, in selection order.
    pub fn selection(&self) -> impl Iterator<Item = (&SelectedImage, &PreviewHandle)> {
        self.entries.iter().map(|e| (&e.image, &e.preview))
    }

    /// Append files to the selection, deriving one preview handle per
    /// file. No upper bound, no deduplication. Under a single-selection
    /// policy the previous selection is released first.
    ///
    /// # Errors
    ///
    /// Returns the first [`PreviewError`] hit; files added before the
    /// failure stay selected, the failing file and the rest of the
    /// batch are not added.
    pub fn add_files(&mut self, files: Vec<SelectedImage>) -> Result<(), PreviewError> {
        if self.policy.single_selection && !files.is_empty() {
            self.release_selection();
        }
        let mut failure = None;
        for image in files {
            match self.previews.allocate(&image.bytes, &image.name) {
                Ok(preview) => self.entries.push(Entry { image, preview }),
                Err(e) => {
                    failure = Some(e);
                    break;
                }
            }
        }
        if self.status == SessionStatus::Idle && !self.entries.is_empty() {
            self.status = SessionStatus::AwaitingSelection;
        }
        failure.map_or(Ok(()), Err)
    }

    /// Remove the file at `index`, releasing its preview handle. The
    /// relative order of the remaining selection is preserved.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::IndexOutOfRange`] with the state
    /// untouched when `index` is past the end.
    pub fn remove_file(&mut self, index: usize) -> Result<(), SessionError> {
        if index >= self.entries.len() {
            return Err(SessionError::IndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let entry = self.entries.remove(index);
        self.previews.release(&entry.preview);
        if self.entries.is_empty() && self.status == SessionStatus::AwaitingSelection {
            self.status = SessionStatus::Idle;
        }
        Ok(())
    }

    /// Release every preview handle, empty the selection, and reset the
    /// display-error flag. Idempotent. The last processing result (and
    /// its `Succeeded`/`Failed` banner) survives a clear -- the
    /// clear-after-success policy depends on that.
    pub fn clear(&mut self) {
        self.release_selection();
        self.display_error = false;
        if self.status == SessionStatus::AwaitingSelection {
            self.status = SessionStatus::Idle;
        }
    }

    /// First half of a submit: run the guards and, when they pass, flip
    /// into `Processing` and hand back the multipart payload.
    ///
    /// Returns `None` when the submit is blocked, without any I/O: an
    /// in-flight request makes this a silent no-op, an empty selection
    /// records [`SubmitFailure::EmptySelection`].
    ///
    /// The payload must be fed back through
    /// [`finish_submit`](Self::finish_submit) once the request settles;
    /// [`submit`](Self::submit) composes the two. The split exists so a
    /// UI task can await the request without borrowing the session
    /// across the await.
    pub fn begin_submit(&mut self) -> Option<Vec<UploadPart>> {
        if self.status.is_processing() {
            return None;
        }
        if self.entries.is_empty() {
            self.status = SessionStatus::Failed(SubmitFailure::EmptySelection);
            return None;
        }
        self.status = SessionStatus::Processing;
        self.result = None;
        self.display_error = false;
        Some(
            self.entries
                .iter()
                .map(|e| UploadPart {
                    bytes: e.image.bytes.clone(),
                    filename: e.image.name.clone(),
                })
                .collect(),
        )
    }

    /// Second half of a submit: record the outcome. Both arms assign a
    /// terminal status, so the session always leaves `Processing`
    /// however the request went.
    ///
    /// On success the result is stored and, under the
    /// clear-after-success policy, the selection is released. On
    /// failure the selection is untouched so the user can retry without
    /// re-choosing files.
    pub fn finish_submit(&mut self, outcome: Result<ProcessingResult, ApiError>) {
        match outcome {
            Ok(result) => {
                self.result = Some(result);
                self.status = SessionStatus::Succeeded;
                if self.policy.clear_after_success {
                    self.clear();
                }
            }
            Err(e) => {
                self.result = None;
                self.status = SessionStatus::Failed(SubmitFailure::Api(e));
            }
        }
    }

    /// Package the whole selection into one request against `client`
    /// and record the outcome. See [`begin_submit`](Self::begin_submit)
    /// for the guards.
    #[allow(clippy::future_not_send)] // single-threaded browser target
    pub async fn submit<C: ProcessingClient>(&mut self, client: &C) {
        let Some(parts) = self.begin_submit() else {
            return;
        };
        let outcome = client.process_images(parts).await;
        self.finish_submit(outcome);
    }

    /// Apply a validated parameter update to the local record and
    /// return the updated snapshot for the caller to push to the
    /// parameter endpoint. The push is advisory (fire-and-forget): its
    /// failure is logged by the caller and never reaches
    /// [`SessionStatus`].
    ///
    /// # Errors
    ///
    /// Returns [`ParamError`] when the value is rejected; the record is
    /// unchanged.
    pub fn update_parameter(&mut self, update: ParamUpdate) -> Result<EdgeParams, ParamError> {
        self.params.apply(update)?;
        Ok(self.params)
    }

    /// Open the modal viewer on an image.
    pub fn open_viewer(&mut self, image: ImageRef, title: impl Into<String>) {
        self.viewer = Some(ViewerState {
            image,
            title: title.into(),
        });
    }

    /// Dismiss the modal viewer.
    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    /// Record that a returned result image failed to load client-side.
    /// Display-only: status and retry eligibility are unaffected.
    pub fn mark_display_error(&mut self) {
        self.display_error = true;
    }

    fn release_selection(&mut self) {
        for entry in self.entries.drain(..) {
            self.previews.release(&entry.preview);
        }
    }
}

impl<P: PreviewAllocator> Drop for UploadSession<P> {
    /// Teardown path of the release discipline: whatever is still
    /// selected when the owner drops the session is released here.
    fn drop(&mut self) {
        self.release_selection();
    }
}
