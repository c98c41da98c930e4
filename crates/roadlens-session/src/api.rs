//! Processing API contract: request parts, response payloads, and the
//! client seam the session submits through.
//!
//! A successful `process_image` response carries one of three image
//! shapes -- a single `processed_image`, a keyed `processed_images`
//! mapping, or an `edges` image -- plus optional advisory `directions`.
//! Failure responses carry an `error` string. Parsing lives here so the
//! browser fetch client and the native tests share one implementation.

use std::fmt;

use serde::Deserialize;

use crate::params::EdgeParams;

/// Reference to a displayable image returned by the service, typically
/// a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef(String);

impl ImageRef {
    /// Wrap an image URL.
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    /// The URL as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One file of the multipart request body. Every part is sent under the
/// form field name `image`, which is what the endpoint reads.
#[derive(Debug, Clone)]
pub struct UploadPart {
    /// Raw file bytes.
    pub bytes: Vec<u8>,
    /// Filename forwarded with the part.
    pub filename: String,
}

/// Images carried by a successful processing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultImages {
    /// One output image.
    Single(ImageRef),
    /// Logical stage key (e.g. `stitched`, `masked`, `final`) to image,
    /// in the order the server sent the entries.
    Keyed(Vec<(String, ImageRef)>),
}

/// Outcome of a successful processing request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    /// The returned image or images.
    pub images: ResultImages,
    /// Advisory notes, e.g. detected road directions. Often empty.
    pub notes: Vec<String>,
}

/// Errors from a processing or parameter-update request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The request never completed (offline, refused, DNS failure).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with an error payload or a non-2xx status.
    #[error("{0}")]
    Server(String),

    /// A 2xx response whose body does not match the documented shape.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Transport seam for the two service endpoints.
///
/// No `Send` bounds: the browser target is single-threaded, and the
/// native tests drive these futures on a current-thread runtime.
#[allow(async_fn_in_trait)]
pub trait ProcessingClient {
    /// POST all parts as one multipart request to `/api/process_image`.
    async fn process_images(
        &self,
        parts: Vec<UploadPart>,
    ) -> Result<ProcessingResult, ApiError>;

    /// POST the parameter record to `/api/update_parameters`.
    async fn update_parameters(&self, params: &EdgeParams) -> Result<(), ApiError>;
}

/// Success body of `process_image`. Unknown fields are ignored.
#[derive(Deserialize)]
struct SuccessBody {
    processed_image: Option<String>,
    processed_images: Option<serde_json::Map<String, serde_json::Value>>,
    edges: Option<String>,
    directions: Option<Vec<String>>,
}

/// Failure body of either endpoint.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Parse the JSON body of a 2xx `process_image` response.
///
/// The keyed mapping wins over the single-image fields so a server that
/// sends both is interpreted consistently.
///
/// # Errors
///
/// Returns [`ApiError::Malformed`] when the body is not JSON, carries
/// none of the documented image fields, or maps a key to a non-string.
pub fn parse_success_body(body: &str) -> Result<ProcessingResult, ApiError> {
    let parsed: SuccessBody = serde_json::from_str(body)
        .map_err(|e| ApiError::Malformed(format!("invalid JSON: {e}")))?;

    let images = if let Some(map) = parsed.processed_images {
        if map.is_empty() {
            return Err(ApiError::Malformed("processed_images is empty".into()));
        }
        let mut keyed = Vec::with_capacity(map.len());
        for (key, value) in map {
            let Some(url) = value.as_str() else {
                return Err(ApiError::Malformed(format!(
                    "non-string image for key {key:?}"
                )));
            };
            keyed.push((key, ImageRef::new(url)));
        }
        ResultImages::Keyed(keyed)
    } else if let Some(url) = parsed.processed_image.or(parsed.edges) {
        ResultImages::Single(ImageRef::new(url))
    } else {
        return Err(ApiError::Malformed("no image field in response".into()));
    };

    Ok(ProcessingResult {
        images,
        notes: parsed.directions.unwrap_or_default(),
    })
}

/// Interpret a non-2xx response, preferring the server-supplied message.
#[must_use]
pub fn parse_error_body(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.is_empty());
    message.map_or_else(
        || ApiError::Server(format!("request failed with HTTP {status}")),
        ApiError::Server,
    )
}
