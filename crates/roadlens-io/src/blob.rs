//! Preview Blob URLs for selected files.
//!
//! Turns raw file bytes into browser-displayable object URLs and
//! revokes them when the session lets go of a file. URL creation and
//! revocation require a browser environment
//! (`wasm32-unknown-unknown` target).

use roadlens_session::{PreviewAllocator, PreviewError, PreviewHandle};
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Errors that can occur when creating a preview Blob URL.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// A browser API call returned an error.
    #[error("browser API error: {0}")]
    JsError(String),
}

impl From<JsValue> for BlobError {
    fn from(value: JsValue) -> Self {
        Self::JsError(format!("{value:?}"))
    }
}

/// Guess the MIME type of an image from its magic bytes.
///
/// Falls back to `application/octet-stream` for unrecognized data; the
/// Blob is still created, the browser just won't render it as an image.
#[must_use]
pub fn sniff_image_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes).map_or("application/octet-stream", |format| format.to_mime_type())
}

/// Create an object URL displaying `bytes` as `mime_type`.
///
/// The returned URL must be revoked via [`revoke_url`] when no longer
/// needed to avoid leaking browser-level handles.
///
/// # Errors
///
/// Returns [`BlobError::JsError`] if Blob or URL creation fails.
pub fn create_preview_url(bytes: &[u8], mime_type: &str) -> Result<String, BlobError> {
    let array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    let url = web_sys::Url::create_object_url_with_blob(&blob)?;
    Ok(url)
}

/// Revoke an object URL previously created by [`create_preview_url`].
///
/// Best-effort: failures are silently ignored since the URL may have
/// already been revoked.
pub fn revoke_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}

/// [`PreviewAllocator`] backed by `URL.createObjectURL` /
/// `URL.revokeObjectURL`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlobPreviews;

impl PreviewAllocator for BlobPreviews {
    fn allocate(&self, bytes: &[u8], name: &str) -> Result<PreviewHandle, PreviewError> {
        let mime = sniff_image_mime(bytes);
        create_preview_url(bytes, mime)
            .map(PreviewHandle::new)
            .map_err(|e| PreviewError::Allocation(format!("{name}: {e}")))
    }

    fn release(&self, handle: &PreviewHandle) {
        revoke_url(handle.url());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_magic_bytes_sniff_as_png() {
        let png_header = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a];
        assert_eq!(sniff_image_mime(&png_header), "image/png");
    }

    #[test]
    fn jpeg_magic_bytes_sniff_as_jpeg() {
        let jpeg_header = [0xff, 0xd8, 0xff, 0xe0];
        assert_eq!(sniff_image_mime(&jpeg_header), "image/jpeg");
    }

    #[test]
    fn unrecognized_bytes_fall_back_to_octet_stream() {
        assert_eq!(sniff_image_mime(b"not an image"), "application/octet-stream");
        assert_eq!(sniff_image_mime(&[]), "application/octet-stream");
    }
}
