//! # lxd-connector-client
//!
//! HTTP client for the private control API exposed by an LXD hypervisor node.
//!
//! ## Contract
//!
//! Given a [`NodeEndpoint`] (address, port, API key) and an [`ApiRequest`]
//! (path, method, payload), a [`ControlClient`] performs exactly one call and
//! returns either:
//!
//! - `Ok(`[`RemoteResponse`]`)`: any well-formed `{code, msg|message, data?}`
//!   body, success or not. `code` may arrive as `200` or `"200"`; it is
//!   normalized to an integer here so callers compare once.
//! - [`ClientError::Timeout`] / [`ClientError::NetworkError`]: the node could
//!   not be reached ([`ClientError::is_transport`]).
//! - [`ClientError::MalformedResponse`]: the node answered something that is
//!   not JSON, or has no usable `code`.
//!
//! ## Payload Encodings
//!
//! | Payload | Used by |
//! |---------|---------|
//! | [`Payload::Query`] | `check`, `getinfo`, `delete`, `boot`, `stop`, `reboot`, `natlist` |
//! | [`Payload::Form`] | `addport`, `delport` |
//! | [`Payload::Json`] | `create`, `password`, `reinstall` |
//!
//! Every request carries the API key in the `apikey` header.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use lxd_connector_client::{
//!     ApiRequest, ClientConfig, ControlClient, HttpControlClient, NodeEndpoint,
//! };
//!
//! # async fn example() -> lxd_connector_client::Result<()> {
//! let client = HttpControlClient::new(ClientConfig::default())?;
//! let node = NodeEndpoint::new("10.0.0.2", 8080, "api-key");
//!
//! let resp = client
//!     .call(&node, ApiRequest::get("/api/getinfo").query("hostname", "c1"))
//!     .await?;
//! if resp.is_success() {
//!     println!("status: {:?}", resp.data_str("Status"));
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod http_client;
mod traits;
mod types;
mod utils;

// Re-export error types
pub use error::{ClientError, Result};

// Re-export the client trait and its HTTP implementation
pub use client::HttpControlClient;
pub use traits::ControlClient;

// Re-export types
pub use types::{
    API_KEY_HEADER, ApiRequest, ClientConfig, DEFAULT_CONNECT_TIMEOUT_SECS,
    DEFAULT_REQUEST_TIMEOUT_SECS, HttpMethod, NodeEndpoint, Payload, RemoteResponse, SUCCESS_CODE,
};

// Re-export utils module
pub use utils::log_sanitizer;
