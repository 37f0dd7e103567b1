//! Generic HTTP client tools
//!
//! One uniform flow for every control API call: send, log, read the body,
//! then normalize it into a [`RemoteResponse`].
//!
//! # design principles
//! - **Transport failures are classified, never propagated raw** - timeouts and
//!   connection errors become distinct [`ClientError`] variants
//! - **HTTP status is informational only** - the node reports its verdict in the JSON `code`
//! - **No retries** - every call is a single attempt

use reqwest::RequestBuilder;

use crate::error::ClientError;
use crate::types::RemoteResponse;
use crate::utils::log_sanitizer::truncate_for_log;

/// HTTP tool function set
pub struct HttpUtils;

impl HttpUtils {
    /// Performs an HTTP request and returns response text
    ///
    /// # Arguments
    /// * `request_builder` - configured request constructor (URL, headers, body)
    /// * `node` - `host:port` of the target node (for logging and errors)
    /// * `method_name` - request method name (such as "GET", "POST", used for logs)
    /// * `path` - API path (for logging)
    ///
    /// # Returns
    /// * `Ok((status_code, response_text))`
    /// * `Err(ClientError::Timeout)` / `Err(ClientError::NetworkError)` - transport failure
    pub async fn execute_request(
        request_builder: RequestBuilder,
        node: &str,
        method_name: &str,
        path: &str,
    ) -> Result<(u16, String), ClientError> {
        log::debug!("[{node}] {method_name} {path}");

        let response = request_builder
            .send()
            .await
            .map_err(|e| transport_error(node, &e))?;

        let status_code = response.status().as_u16();
        log::debug!("[{node}] Response Status: {status_code}");

        let response_text = response.text().await.map_err(|e| {
            if e.is_timeout() {
                transport_error(node, &e)
            } else {
                ClientError::NetworkError {
                    node: node.to_string(),
                    detail: format!("Failed to read response body: {e}"),
                }
            }
        })?;

        log::debug!(
            "[{node}] Response Body: {}",
            truncate_for_log(&response_text)
        );

        Ok((status_code, response_text))
    }

    /// Parse and normalize a response body
    ///
    /// # Returns
    /// * `Ok(RemoteResponse)` - well-formed body, whatever its `code`
    /// * `Err(ClientError::MalformedResponse)` - not JSON, or `code` missing / not an integer
    pub fn parse_response(response_text: &str, node: &str) -> Result<RemoteResponse, ClientError> {
        let value: serde_json::Value = serde_json::from_str(response_text).map_err(|e| {
            log::error!("[{node}] JSON parse failed: {e}");
            log::error!("[{node}] Raw response: {}", truncate_for_log(response_text));
            ClientError::MalformedResponse {
                node: node.to_string(),
                detail: format!("invalid JSON: {e}"),
            }
        })?;

        RemoteResponse::from_json(value).map_err(|detail| {
            log::error!("[{node}] Unexpected response shape: {detail}");
            ClientError::MalformedResponse {
                node: node.to_string(),
                detail,
            }
        })
    }
}

/// Classify a reqwest send error
fn transport_error(node: &str, e: &reqwest::Error) -> ClientError {
    if e.is_timeout() {
        ClientError::Timeout {
            node: node.to_string(),
            detail: e.to_string(),
        }
    } else {
        ClientError::NetworkError {
            node: node.to_string(),
            detail: e.to_string(),
        }
    }
}
