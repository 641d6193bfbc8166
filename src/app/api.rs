//! Client-side API functions for the catalog server.
//!
//! Browser builds talk to the server with `fetch`; SSR builds get stubs
//! that return an error so nothing blocks during server rendering.

use serde::{Deserialize, Serialize};

use crate::bot::{CatalogRecord, SharedSettings, SubmissionRequest};

// =============================================================================
// Typed endpoints
// =============================================================================

pub async fn fetch_settings() -> Result<SharedSettings, String> {
    fetch_json("/api/settings").await
}

pub async fn save_settings(settings: &SharedSettings) -> Result<(), String> {
    post_json_no_response("/api/settings", settings).await
}

pub async fn fetch_catalog() -> Result<Vec<CatalogRecord>, String> {
    fetch_json("/api/catalog").await
}

pub async fn fetch_record(id: u64) -> Result<CatalogRecord, String> {
    fetch_json(&format!("/api/catalog/{}", id)).await
}

/// Append a record; the server answers with the record as stored
pub async fn append_record(record: &CatalogRecord) -> Result<CatalogRecord, String> {
    post_json("/api/catalog", record).await
}

pub async fn submit_request(request: &SubmissionRequest) -> Result<(), String> {
    post_json_no_response("/api/submissions", request).await
}

// =============================================================================
// Client-side fetch helpers (for use in effects/resources)
// =============================================================================

/// Fetch JSON from a URL (client-side only)
#[cfg(target_arch = "wasm32")]
pub async fn fetch_json<T: for<'de> Deserialize<'de>>(url: &str) -> Result<T, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    let window = web_sys::window().ok_or("No window")?;
    let opts = RequestInit::new();
    opts.set_method("GET");

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{:?}", e))?;

    let resp: Response = resp_value.dyn_into().map_err(|_| "Not a Response")?;
    if !resp.ok() {
        return Err(format!("GET {} failed: HTTP {}", url, resp.status()));
    }

    let json = JsFuture::from(resp.json().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| format!("{:?}", e))
}

/// SSR stub - returns error (should not be called during SSR)
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_json<T: for<'de> Deserialize<'de>>(_url: &str) -> Result<T, String> {
    Err("fetch_json is only available in browser".to_string())
}

#[cfg(target_arch = "wasm32")]
async fn send_json<T: Serialize>(url: &str, body: &T) -> Result<web_sys::Response, String> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Headers, Request, RequestInit, Response};

    let window = web_sys::window().ok_or("No window")?;

    let headers = Headers::new().map_err(|e| format!("{:?}", e))?;
    headers
        .set("Content-Type", "application/json")
        .map_err(|e| format!("{:?}", e))?;

    let body_str = serde_json::to_string(body).map_err(|e| e.to_string())?;

    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_headers(&headers);
    opts.set_body(&wasm_bindgen::JsValue::from_str(&body_str));

    let request = Request::new_with_str_and_init(url, &opts).map_err(|e| format!("{:?}", e))?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{:?}", e))?;

    let resp: Response = resp_value.dyn_into().map_err(|_| "Not a Response")?;
    if !resp.ok() {
        return Err(format!("POST {} failed: HTTP {}", url, resp.status()));
    }
    Ok(resp)
}

/// POST JSON to a URL (client-side only)
#[cfg(target_arch = "wasm32")]
pub async fn post_json<T: Serialize, R: for<'de> Deserialize<'de>>(
    url: &str,
    body: &T,
) -> Result<R, String> {
    use wasm_bindgen_futures::JsFuture;

    let resp = send_json(url, body).await?;

    let json = JsFuture::from(resp.json().map_err(|e| format!("{:?}", e))?)
        .await
        .map_err(|e| format!("{:?}", e))?;

    serde_wasm_bindgen::from_value(json).map_err(|e| format!("{:?}", e))
}

/// SSR stub - returns error (should not be called during SSR)
#[cfg(not(target_arch = "wasm32"))]
pub async fn post_json<T: Serialize, R: for<'de> Deserialize<'de>>(
    _url: &str,
    _body: &T,
) -> Result<R, String> {
    Err("post_json is only available in browser".to_string())
}

/// POST JSON without expecting response body
#[cfg(target_arch = "wasm32")]
pub async fn post_json_no_response<T: Serialize>(url: &str, body: &T) -> Result<(), String> {
    send_json(url, body).await.map(|_| ())
}

/// SSR stub - returns error (should not be called during SSR)
#[cfg(not(target_arch = "wasm32"))]
pub async fn post_json_no_response<T: Serialize>(_url: &str, _body: &T) -> Result<(), String> {
    Err("post_json_no_response is only available in browser".to_string())
}
