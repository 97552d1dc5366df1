//! Blocking HTTP plumbing shared by the chat backends.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::EnhanceError;

const ERROR_BODY_PREVIEW_CHARS: usize = 160;

/// Builds a client with the configured timeout.
pub(super) fn create_http_client(timeout: Duration) -> Result<Client, EnhanceError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|error| EnhanceError::Configuration {
            message: format!("failed to configure chat HTTP client: {error}"),
        })
}

/// Joins a base URL and an endpoint path without doubling slashes.
pub(super) fn endpoint_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Creates a JSON `POST` request builder for `endpoint`.
pub(super) fn post_json<T: Serialize>(
    client: &Client,
    endpoint: &str,
    payload: &T,
) -> RequestBuilder {
    client.post(endpoint).json(payload)
}

/// Sends `request`, enforces a success status, and decodes the JSON body.
pub(super) fn send_and_decode<R: DeserializeOwned>(
    request: RequestBuilder,
) -> Result<R, EnhanceError> {
    let response = request.send().map_err(|error| {
        if error.is_timeout() {
            EnhanceError::external(format!("chat request timed out: {error}"))
        } else {
            EnhanceError::external(format!("chat request transport failed: {error}"))
        }
    })?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().map_or_else(
            |_| "(failed to read error response body)".to_owned(),
            |content| truncate_for_message(content.as_str(), ERROR_BODY_PREVIEW_CHARS),
        );
        return Err(EnhanceError::external(format!(
            "chat request failed with status {}: {body}",
            status.as_u16()
        )));
    }

    response
        .json()
        .map_err(|error| EnhanceError::external(format!("chat response decoding failed: {error}")))
}

/// Truncates `message` to `max_chars` characters, appending `...` when cut.
pub(super) fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
