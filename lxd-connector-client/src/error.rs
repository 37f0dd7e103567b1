use serde::{Deserialize, Serialize};

/// Unified error type for all node control API calls.
///
/// Call-level variants include a `node` field (`host:port`) identifying which node produced the
/// error, plus variant-specific context. All variants are serializable for structured error
/// reporting.
///
/// A well-formed reply carrying a non-success `code` is **not** an error at this layer: it is
/// returned as a [`RemoteResponse`](crate::RemoteResponse) and interpreted by the caller.
///
/// # Transport Errors
///
/// The following variants mean the node could not be reached or did not answer in time:
/// - [`NetworkError`](Self::NetworkError): connection refused, DNS failure, reset, etc.
/// - [`Timeout`](Self::Timeout): connect or total request timeout elapsed
///
/// Calls are never retried by the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "code")]
pub enum ClientError {
    /// A network-level error occurred (connection refused, DNS resolution failure, etc.).
    NetworkError {
        /// Node that produced the error.
        node: String,
        /// Error details.
        detail: String,
    },

    /// The HTTP request timed out.
    Timeout {
        /// Node that produced the error.
        node: String,
        /// Error details.
        detail: String,
    },

    /// The node answered, but the body is not JSON or carries no usable `code`.
    MalformedResponse {
        /// Node that produced the error.
        node: String,
        /// Details about the protocol violation.
        detail: String,
    },

    /// Failed to serialize a request body.
    SerializationError {
        /// Node the request was meant for.
        node: String,
        /// Details about the serialization failure.
        detail: String,
    },

    /// The underlying HTTP client could not be constructed.
    ClientInit {
        /// Details about the failure.
        detail: String,
    },
}

impl ClientError {
    /// 是否为传输层失败（节点不可达 / 超时）。
    ///
    /// 用于区分"无法连接到节点"与"节点返回了错误"。
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::NetworkError { .. } | Self::Timeout { .. })
    }
}

impl std::fmt::Display for ClientError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NetworkError { node, detail } => {
                write!(f, "[{node}] Network error: {detail}")
            }
            Self::Timeout { node, detail } => {
                write!(f, "[{node}] Request timeout: {detail}")
            }
            Self::MalformedResponse { node, detail } => {
                write!(f, "[{node}] Malformed response: {detail}")
            }
            Self::SerializationError { node, detail } => {
                write!(f, "[{node}] Serialization error: {detail}")
            }
            Self::ClientInit { detail } => {
                write!(f, "HTTP client initialization failed: {detail}")
            }
        }
    }
}

impl std::error::Error for ClientError {}

/// Convenience type alias for `Result<T, ClientError>`.
pub type Result<T> = std::result::Result<T, ClientError>;
