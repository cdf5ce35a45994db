//! Backend access: base URL, bearer header and the `{success, message, data}`
//! envelope.
//!
//! Every function returns `Result<T, String>`; the `Err` text is what the
//! toast shows.

use contracts::shared::api::{error_message_from_body, ApiResponse};
use gloo_net::http::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use web_sys::FormData;

use crate::system::auth::storage;

/// Local storage key overriding the backend URL.
pub const API_URL_STORAGE_KEY: &str = "erp_api_url";

/// Port of the backend when nothing else is configured.
pub const DEFAULT_API_PORT: u16 = 8085;

/// Base URL for API requests, always ending in `/api/`.
///
/// Resolution order: local storage `erp_api_url`, build-time `ERP_API_URL`,
/// then `{protocol}//{hostname}:8085`.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let stored = window
        .local_storage()
        .ok()
        .flatten()
        .and_then(|s| s.get_item(API_URL_STORAGE_KEY).ok().flatten());
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    resolve_api_base(
        stored.as_deref(),
        option_env!("ERP_API_URL"),
        &protocol,
        &hostname,
    )
}

pub fn resolve_api_base(
    stored: Option<&str>,
    build_time: Option<&str>,
    protocol: &str,
    hostname: &str,
) -> String {
    let root = [stored, build_time]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|| format!("{}//{}:{}", protocol, hostname, DEFAULT_API_PORT));
    if root.ends_with("/api") {
        format!("{}/", root)
    } else {
        format!("{}/api/", root)
    }
}

/// Build a full API URL from a path like `sale/getAll`
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path.trim_start_matches('/'))
}

pub fn get_auth_header() -> Option<String> {
    storage::get_access_token().map(|token| format!("Bearer {}", token))
}

fn authorized(method: Method, path: &str) -> Result<RequestBuilder, String> {
    let auth_header = get_auth_header().ok_or("Not authenticated")?;
    Ok(RequestBuilder::new(&api_url(path))
        .method(method)
        .header("Authorization", &auth_header))
}

async fn read_envelope<T: DeserializeOwned>(response: Response) -> Result<ApiResponse<T>, String> {
    if !response.ok() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(status, &body);
        log::warn!("request failed with {}: {}", status, message);
        return Err(message);
    }
    response
        .json::<ApiResponse<T>>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// GET returning the envelope's `data`
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    get_envelope(path).await?.into_result()
}

/// GET returning the whole envelope (for `total`/`page`)
pub async fn get_envelope<T: DeserializeOwned>(path: &str) -> Result<ApiResponse<T>, String> {
    let response = authorized(Method::GET, path)?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_envelope(response).await
}

/// Request with a JSON body; returns the confirmation message.
pub async fn send_json<B: Serialize>(method: Method, path: &str, body: &B) -> Result<String, String> {
    let response = authorized(method, path)?
        .json(body)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_envelope::<serde_json::Value>(response).await?.into_message()
}

/// Request without a body; returns the confirmation message.
pub async fn send_empty(method: Method, path: &str) -> Result<String, String> {
    let response = authorized(method, path)?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_envelope::<serde_json::Value>(response).await?.into_message()
}

/// Multipart request; the browser sets the boundary header.
pub async fn send_form(method: Method, path: &str, form: FormData) -> Result<String, String> {
    let response = authorized(method, path)?
        .body(form)
        .map_err(|e| format!("Failed to build request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;
    read_envelope::<serde_json::Value>(response).await?.into_message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_api_base_order() {
        assert_eq!(
            resolve_api_base(Some("https://erp.example.com/"), Some("http://build"), "http:", "h"),
            "https://erp.example.com/api/"
        );
        assert_eq!(
            resolve_api_base(Some("  "), Some("http://build:9000/api"), "http:", "h"),
            "http://build:9000/api/"
        );
        assert_eq!(
            resolve_api_base(None, None, "https:", "console.local"),
            "https://console.local:8085/api/"
        );
    }
}
