//! Shared HTTP utilities for the REST gateway.

use http::header::{HeaderMap, HeaderValue};

/// Response header carrying the commit listing cursor.
pub(super) const CONTINUATION_TOKEN_HEADER: &str = "x-ms-continuationtoken";

pub(super) fn header_to_string(header_value: Option<&HeaderValue>) -> Option<String> {
    header_value
        .and_then(|raw| raw.to_str().ok())
        .map(ToOwned::to_owned)
}

pub(super) fn continuation_token(headers: &HeaderMap) -> Option<String> {
    header_to_string(headers.get(CONTINUATION_TOKEN_HEADER)).filter(|token| !token.is_empty())
}

/// Pulls the `message` field out of an Azure DevOps error body.
pub(super) fn extract_service_message(body: &str) -> Option<String> {
    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return None;
    };
    value
        .get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
}
