//! Session status: the finite-state summary of where the current
//! upload/processing cycle stands.
//!
//! Status is an explicit tagged variant. Display tone, button states,
//! and tests key off the variant itself, never off message text.

use crate::api::ApiError;

/// Why a submit attempt ended in failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SubmitFailure {
    /// Submit was attempted with nothing selected. No request is made.
    #[error("no images selected")]
    EmptySelection,

    /// The processing request itself failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Where the current upload/processing cycle stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    /// Fresh session: nothing selected, no outcome to show.
    Idle,
    /// A selection is being assembled; nothing has been submitted yet.
    AwaitingSelection,
    /// Exactly one processing request is in flight.
    Processing,
    /// The most recent submit stored a result.
    Succeeded,
    /// The most recent submit failed.
    Failed(SubmitFailure),
}

impl SessionStatus {
    /// Whether a request is currently in flight.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self, Self::Processing)
    }

    /// Whether a new submit may start. Guards duplicate in-flight
    /// requests; the selection-empty guard lives in the session itself.
    #[must_use]
    pub const fn can_submit(&self) -> bool {
        !self.is_processing()
    }
}
