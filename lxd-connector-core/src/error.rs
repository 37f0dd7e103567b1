//! Unified error type definition

use serde::Serialize;
use thiserror::Error;

// Re-export client error type
pub use lxd_connector_client::ClientError;

use crate::types::ErrorKind;

/// NAT 转发参数校验错误（本地校验，先失败者胜出）
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum NatValidationError {
    /// 协议不是 tcp / udp
    #[error("未知映射类型")]
    UnknownProtocol { protocol: String },

    /// 容器端口不在 1-65535
    #[error("容器内部端口超过范围")]
    ContainerPortOutOfRange { port: i64 },

    /// 外网端口不在 10000-65535
    #[error("外网端口映射范围为10000-65535")]
    HostPortOutOfRange { port: i64 },
}

/// Core layer error type
#[derive(Error, Debug, Serialize)]
#[serde(tag = "code", content = "details")]
pub enum CoreError {
    /// Validation error (missing or invalid panel parameter)
    #[error("{0}")]
    ValidationError(String),

    /// NAT rule parameter rejected before any remote call
    #[error("{0}")]
    NatValidation(NatValidationError),

    /// Host record not found
    #[error("Host not found: {0}")]
    HostNotFound(String),

    /// Storage layer error
    #[error("Storage error: {0}")]
    StorageError(String),

    /// serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Node answered with a well-formed, non-success code
    #[error("Remote rejected request (code {code}): {}", message.as_deref().unwrap_or("-"))]
    Rejected { code: i64, message: Option<String> },

    /// Client error (transport failure or malformed response)
    #[error("{0}")]
    Client(#[from] ClientError),
}

impl From<NatValidationError> for CoreError {
    fn from(err: NatValidationError) -> Self {
        Self::NatValidation(err)
    }
}

impl CoreError {
    /// Whether it is expected behavior (bad input, node said no) is used for log classification.
    ///
    /// Level `warn` should be used when returning `true` and level `error` when returning `false`.
    /// **Please update this method simultaneously when new variants are added. **
    #[must_use]
    pub fn is_expected(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::NatValidation(_) | Self::Rejected { .. }
        )
    }

    /// 面板侧可见的错误分类
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ValidationError(_) | Self::NatValidation(_) => ErrorKind::Validation,
            // 主机记录缺失只会在写库阶段出现
            Self::HostNotFound(_) | Self::StorageError(_) | Self::SerializationError(_) => {
                ErrorKind::Storage
            }
            Self::Rejected { .. } => ErrorKind::Rejected,
            Self::Client(e) if e.is_transport() => ErrorKind::Transport,
            Self::Client(_) => ErrorKind::MalformedResponse,
        }
    }

    /// 节点返回的消息（仅 `Rejected` 携带）
    #[must_use]
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Core layer Result type alias
pub type CoreResult<T> = std::result::Result<T, CoreError>;
