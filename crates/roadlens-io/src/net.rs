//! Fetch-backed client for the processing service.
//!
//! Wraps `window.fetch()` for the two endpoints: a multipart POST of
//! the selected images to `process_image`, and a JSON POST of the
//! edge-detection parameters to `update_parameters`. Requires a browser
//! environment (`wasm32-unknown-unknown` target).

use roadlens_session::api::{parse_error_body, parse_success_body};
use roadlens_session::{ApiError, EdgeParams, ProcessingClient, ProcessingResult, UploadPart};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{BlobPropertyBag, FormData, Headers, RequestInit, Response};

/// Default base URL of the processing service.
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8080";

/// HTTP client for the processing service.
#[derive(Debug, Clone)]
pub struct FetchClient {
    base_url: String,
}

impl FetchClient {
    /// Client against a specific service base URL (no trailing slash).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for FetchClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl ProcessingClient for FetchClient {
    #[allow(clippy::future_not_send)] // WASM is single-threaded; fetch types are !Send
    async fn process_images(
        &self,
        parts: Vec<UploadPart>,
    ) -> Result<ProcessingResult, ApiError> {
        let form = FormData::new().map_err(|e| ApiError::Network(js_error_message(&e)))?;
        for part in &parts {
            let blob = part_blob(part).map_err(|e| ApiError::Network(js_error_message(&e)))?;
            form.append_with_blob_and_filename("image", &blob, &part.filename)
                .map_err(|e| ApiError::Network(js_error_message(&e)))?;
        }

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&form);

        let response = post(&self.endpoint("/api/process_image"), &init).await?;
        let status = response.status();
        let body = body_text(&response).await?;
        if response.ok() {
            parse_success_body(&body)
        } else {
            Err(parse_error_body(status, &body))
        }
    }

    #[allow(clippy::future_not_send)] // WASM is single-threaded; fetch types are !Send
    async fn update_parameters(&self, params: &EdgeParams) -> Result<(), ApiError> {
        let payload = serde_json::to_string(params)
            .map_err(|e| ApiError::Malformed(format!("parameter encode failed: {e}")))?;

        let headers = Headers::new().map_err(|e| ApiError::Network(js_error_message(&e)))?;
        headers
            .append("Content-Type", "application/json")
            .map_err(|e| ApiError::Network(js_error_message(&e)))?;

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_headers(&headers);
        init.set_body(&JsValue::from_str(&payload));

        let response = post(&self.endpoint("/api/update_parameters"), &init).await?;
        if response.ok() {
            Ok(())
        } else {
            let status = response.status();
            let body = body_text(&response).await?;
            Err(parse_error_body(status, &body))
        }
    }
}

/// Push a parameter snapshot to the service, fire-and-forget.
///
/// Parameter sync is advisory: a failure is logged to the console and
/// otherwise dropped, so it can never block the upload flow or surface
/// in the session status.
#[allow(clippy::future_not_send)] // WASM is single-threaded
pub async fn push_parameters<C: ProcessingClient>(client: &C, params: EdgeParams) {
    if let Err(e) = client.update_parameters(&params).await {
        web_sys::console::warn_1(&format!("parameter sync failed: {e}").into());
    }
}

/// Issue a POST and hand back the response object.
#[allow(clippy::future_not_send)] // WASM is single-threaded
async fn post(url: &str, init: &RequestInit) -> Result<Response, ApiError> {
    let window =
        web_sys::window().ok_or_else(|| ApiError::Network("no global window".into()))?;
    let response = JsFuture::from(window.fetch_with_str_and_init(url, init))
        .await
        .map_err(|e| ApiError::Network(js_error_message(&e)))?;
    response
        .dyn_into::<Response>()
        .map_err(|_| ApiError::Network("fetch did not return a Response".into()))
}

/// Read a response body as text. An unreadable body is treated as
/// empty rather than as a second error.
#[allow(clippy::future_not_send)] // WASM is single-threaded
async fn body_text(response: &Response) -> Result<String, ApiError> {
    let promise = response
        .text()
        .map_err(|e| ApiError::Network(js_error_message(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| ApiError::Network(js_error_message(&e)))?;
    Ok(value.as_string().unwrap_or_default())
}

/// Wrap one upload part's bytes as a Blob for the multipart form.
fn part_blob(part: &UploadPart) -> Result<web_sys::Blob, JsValue> {
    let array = js_sys::Uint8Array::from(part.bytes.as_slice());
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&array);
    let opts = BlobPropertyBag::new();
    opts.set_type(crate::blob::sniff_image_mime(&part.bytes));
    web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &opts)
}

/// Human-readable message out of an arbitrary JS error value.
fn js_error_message(value: &JsValue) -> String {
    value
        .as_string()
        .unwrap_or_else(|| format!("{value:?}"))
}
