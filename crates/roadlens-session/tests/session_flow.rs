//! Integration tests: drive the upload session through the full
//! add/remove/clear/submit lifecycle with a counting preview allocator
//! and a scripted processing client standing in for the browser and
//! the backend.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use roadlens_session::api::parse_error_body;
use roadlens_session::{
    ApiError, EdgeParams, ImageRef, ParamUpdate, PreviewAllocator, PreviewError, PreviewHandle,
    ProcessingClient, ProcessingResult, ResultImages, SelectedImage, SessionError, SessionPolicy,
    SessionStatus, SubmitFailure, UploadPart, UploadSession,
};

/// Allocator that hands out sequential fake URLs and counts releases.
#[derive(Debug, Clone, Default)]
struct CountingAllocator {
    allocated: Rc<Cell<usize>>,
    released: Rc<Cell<usize>>,
}

impl CountingAllocator {
    /// Handles currently outstanding (allocated minus released).
    fn live(&self) -> usize {
        self.allocated.get() - self.released.get()
    }
}

impl PreviewAllocator for CountingAllocator {
    fn allocate(&self, _bytes: &[u8], name: &str) -> Result<PreviewHandle, PreviewError> {
        let id = self.allocated.get();
        self.allocated.set(id + 1);
        Ok(PreviewHandle::new(format!("blob:{name}#{id}")))
    }

    fn release(&self, _handle: &PreviewHandle) {
        self.released.set(self.released.get() + 1);
    }
}

/// Client that replays a scripted response and records what it was
/// asked to send.
struct ScriptedClient {
    response: Result<ProcessingResult, ApiError>,
    process_calls: Cell<usize>,
    param_calls: Cell<usize>,
    last_parts: RefCell<Vec<UploadPart>>,
}

impl ScriptedClient {
    fn new(response: Result<ProcessingResult, ApiError>) -> Self {
        Self {
            response,
            process_calls: Cell::new(0),
            param_calls: Cell::new(0),
            last_parts: RefCell::new(Vec::new()),
        }
    }
}

impl ProcessingClient for ScriptedClient {
    async fn process_images(
        &self,
        parts: Vec<UploadPart>,
    ) -> Result<ProcessingResult, ApiError> {
        self.process_calls.set(self.process_calls.get() + 1);
        *self.last_parts.borrow_mut() = parts;
        self.response.clone()
    }

    async fn update_parameters(&self, _params: &EdgeParams) -> Result<(), ApiError> {
        self.param_calls.set(self.param_calls.get() + 1);
        Ok(())
    }
}

fn file(name: &str) -> SelectedImage {
    SelectedImage {
        bytes: vec![0x89, 0x50, 0x4e, 0x47],
        name: name.into(),
    }
}

fn keyed(entries: &[(&str, &str)]) -> ProcessingResult {
    ProcessingResult {
        images: ResultImages::Keyed(
            entries
                .iter()
                .map(|(k, v)| ((*k).to_string(), ImageRef::new(*v)))
                .collect(),
        ),
        notes: Vec::new(),
    }
}

#[test]
fn handle_count_tracks_selection_through_edits() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());

    session.add_files(vec![file("a.png"), file("b.png")]).unwrap();
    assert_eq!(allocator.live(), session.len());

    session.add_files(vec![file("c.png")]).unwrap();
    assert_eq!(allocator.live(), session.len());
    assert_eq!(session.len(), 3);

    session.remove_file(1).unwrap();
    assert_eq!(allocator.live(), session.len());
    assert_eq!(session.len(), 2);
}

#[test]
fn duplicate_files_are_kept_and_get_their_own_handles() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());

    session.add_files(vec![file("a.png"), file("a.png")]).unwrap();
    assert_eq!(session.len(), 2);
    assert_eq!(allocator.live(), 2);
}

#[test]
fn remove_preserves_relative_order() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());
    session
        .add_files(vec![file("a.png"), file("b.png"), file("c.png")])
        .unwrap();

    session.remove_file(1).unwrap();
    let names: Vec<&str> = session.selection().map(|(img, _)| img.name.as_str()).collect();
    assert_eq!(names, ["a.png", "c.png"]);
}

#[test]
fn remove_out_of_range_fails_and_leaves_state_unmodified() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());
    session.add_files(vec![file("a.png"), file("b.png")]).unwrap();

    let err = session.remove_file(2).unwrap_err();
    assert_eq!(err, SessionError::IndexOutOfRange { index: 2, len: 2 });
    assert_eq!(session.len(), 2);
    assert_eq!(allocator.live(), 2);
    assert_eq!(*session.status(), SessionStatus::AwaitingSelection);
}

#[test]
fn clear_releases_every_handle_and_is_idempotent() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());
    session
        .add_files(vec![file("a.png"), file("b.png"), file("c.png")])
        .unwrap();

    session.clear();
    assert!(session.is_empty());
    assert_eq!(allocator.released.get(), 3);
    assert_eq!(*session.status(), SessionStatus::Idle);

    // Clearing an empty session releases nothing further.
    session.clear();
    assert_eq!(allocator.released.get(), 3);
}

#[tokio::test]
async fn submit_with_empty_selection_makes_no_request() {
    let client = ScriptedClient::new(Ok(keyed(&[("final", "x")])));
    let mut session = UploadSession::new(CountingAllocator::default(), SessionPolicy::batch());

    session.submit(&client).await;

    assert_eq!(client.process_calls.get(), 0);
    assert_eq!(
        *session.status(),
        SessionStatus::Failed(SubmitFailure::EmptySelection)
    );
}

#[tokio::test]
async fn submit_while_processing_dispatches_no_second_request() {
    let client = ScriptedClient::new(Ok(keyed(&[("final", "x")])));
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator, SessionPolicy::batch());
    session.add_files(vec![file("a.png")]).unwrap();

    // First submit is split in half, as the UI does it: the request is
    // "in flight" between begin and finish.
    let parts = session.begin_submit().expect("guards should pass");
    assert_eq!(*session.status(), SessionStatus::Processing);

    session.submit(&client).await;
    assert_eq!(client.process_calls.get(), 0, "duplicate submit must not fetch");
    assert_eq!(*session.status(), SessionStatus::Processing);

    let outcome = client.process_images(parts).await;
    session.finish_submit(outcome);
    assert_eq!(*session.status(), SessionStatus::Succeeded);
}

#[tokio::test]
async fn successful_submit_stores_keyed_result_and_clears_selection() {
    let client = ScriptedClient::new(Ok(keyed(&[("a", "x"), ("b", "y")])));
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());
    session.add_files(vec![file("left.png"), file("right.png")]).unwrap();

    session.submit(&client).await;

    assert_eq!(*session.status(), SessionStatus::Succeeded);
    let result = session.result().expect("result should be stored");
    let ResultImages::Keyed(entries) = &result.images else {
        panic!("expected keyed images");
    };
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], ("a".to_string(), ImageRef::new("x")));
    assert_eq!(entries[1], ("b".to_string(), ImageRef::new("y")));

    // Clear-after-success: selection emptied, every preview released.
    assert!(session.is_empty());
    assert_eq!(allocator.live(), 0);

    // The one request carried both files under their original names.
    assert_eq!(client.process_calls.get(), 1);
    let parts = client.last_parts.borrow();
    let names: Vec<&str> = parts.iter().map(|p| p.filename.as_str()).collect();
    assert_eq!(names, ["left.png", "right.png"]);
}

#[tokio::test]
async fn failed_submit_keeps_selection_for_retry() {
    let client = ScriptedClient::new(Err(ApiError::Server("bad format".into())));
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());
    session.add_files(vec![file("a.png"), file("b.png")]).unwrap();

    session.submit(&client).await;

    match session.status() {
        SessionStatus::Failed(SubmitFailure::Api(e)) => {
            assert_eq!(e.to_string(), "bad format");
        }
        other => panic!("expected an API failure, got {other:?}"),
    }
    assert!(session.result().is_none());
    assert_eq!(session.len(), 2);
    assert_eq!(allocator.live(), 2);
}

#[tokio::test]
async fn http_500_error_body_surfaces_the_server_message() {
    // The fetch client maps a non-2xx body through parse_error_body;
    // feed the same mapping through a submit.
    let error = parse_error_body(500, r#"{"error":"bad format"}"#);
    assert_eq!(error, ApiError::Server("bad format".into()));

    let client = ScriptedClient::new(Err(error));
    let mut session = UploadSession::new(CountingAllocator::default(), SessionPolicy::batch());
    session.add_files(vec![file("a.png")]).unwrap();
    session.submit(&client).await;

    assert_eq!(
        *session.status(),
        SessionStatus::Failed(SubmitFailure::Api(ApiError::Server("bad format".into())))
    );
}

#[test]
fn keep_selection_policy_retains_files_after_success() {
    let allocator = CountingAllocator::default();
    let policy = SessionPolicy {
        clear_after_success: false,
        single_selection: false,
    };
    let mut session = UploadSession::new(allocator.clone(), policy);
    session.add_files(vec![file("a.png")]).unwrap();

    session.begin_submit().expect("guards should pass");
    session.finish_submit(Ok(keyed(&[("final", "x")])));

    assert_eq!(*session.status(), SessionStatus::Succeeded);
    assert_eq!(session.len(), 1);
    assert_eq!(allocator.live(), 1);
}

#[test]
fn single_selection_policy_replaces_the_previous_file() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator.clone(), SessionPolicy::single());

    session.add_files(vec![file("first.png")]).unwrap();
    session.add_files(vec![file("second.png")]).unwrap();

    assert_eq!(session.len(), 1);
    let names: Vec<&str> = session.selection().map(|(img, _)| img.name.as_str()).collect();
    assert_eq!(names, ["second.png"]);
    assert_eq!(allocator.released.get(), 1);
    assert_eq!(allocator.live(), 1);
}

#[test]
fn display_error_is_display_only_and_resets_on_resubmit() {
    let allocator = CountingAllocator::default();
    let mut session = UploadSession::new(allocator, SessionPolicy::batch());
    session.add_files(vec![file("a.png")]).unwrap();
    session.begin_submit().expect("guards should pass");
    session.finish_submit(Ok(keyed(&[("final", "x")])));

    session.mark_display_error();
    assert!(session.display_error());
    assert_eq!(*session.status(), SessionStatus::Succeeded);

    session.add_files(vec![file("b.png")]).unwrap();
    session.begin_submit().expect("guards should pass");
    assert!(!session.display_error());
}

#[test]
fn dropping_the_session_releases_outstanding_handles() {
    let allocator = CountingAllocator::default();
    {
        let mut session = UploadSession::new(allocator.clone(), SessionPolicy::batch());
        session.add_files(vec![file("a.png"), file("b.png")]).unwrap();
        assert_eq!(allocator.live(), 2);
    }
    assert_eq!(allocator.live(), 0);
}

#[tokio::test]
async fn parameter_updates_push_a_snapshot_without_touching_status() {
    let client = ScriptedClient::new(Ok(keyed(&[("final", "x")])));
    let mut session = UploadSession::new(CountingAllocator::default(), SessionPolicy::single());

    let snapshot = session
        .update_parameter(ParamUpdate::UpperThreshold(180))
        .expect("valid update");
    assert_eq!(snapshot.upper_threshold, 180);

    client
        .update_parameters(&snapshot)
        .await
        .expect("scripted client accepts parameters");
    assert_eq!(client.param_calls.get(), 1);
    assert_eq!(*session.status(), SessionStatus::Idle);
}
