//! Preview handles: transient, revocable references used to display a
//! selected file before it is uploaded.
//!
//! Handles are created and released through a [`PreviewAllocator`] so
//! the session stays free of browser APIs. Every handle the session
//! acquires is released exactly once -- on removal, on clear, or when
//! the session itself is dropped.

/// A revocable display reference (an object URL in the browser).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewHandle {
    url: String,
}

impl PreviewHandle {
    /// Wrap an allocator-produced URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    /// The displayable URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }
}

/// Preview allocation failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// The underlying handle factory rejected the data.
    #[error("preview allocation failed: {0}")]
    Allocation(String),
}

/// Creates and revokes preview handles.
///
/// The browser implementation wraps `URL.createObjectURL` /
/// `URL.revokeObjectURL`; tests substitute a counting allocator.
pub trait PreviewAllocator {
    /// Derive a displayable handle for raw image bytes.
    ///
    /// # Errors
    ///
    /// Returns [`PreviewError::Allocation`] when the handle cannot be
    /// created.
    fn allocate(&self, bytes: &[u8], name: &str) -> Result<PreviewHandle, PreviewError>;

    /// Release a handle previously returned by
    /// [`allocate`](Self::allocate). Called exactly once per handle.
    fn release(&self, handle: &PreviewHandle);
}
