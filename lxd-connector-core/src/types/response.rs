//! 返回给面板的结果类型

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 结果状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultStatus {
    Success,
    Error,
}

/// 失败分类，用于区分“节点不可达”与“节点拒绝”
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// 本地参数校验失败，未发出请求
    Validation,
    /// 连接失败 / 超时
    Transport,
    /// 节点响应不是合法的 `{code, ...}`
    MalformedResponse,
    /// 节点返回非 200
    Rejected,
    /// 节点已成功，本地持久化失败
    Storage,
}

/// 生命周期 / NAT 操作的统一结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleResult {
    pub status: ResultStatus,
    pub msg: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// 传输 / 格式错误的技术细节
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ModuleResult {
    #[must_use]
    pub fn success(msg: impl Into<String>) -> Self {
        Self {
            status: ResultStatus::Success,
            msg: msg.into(),
            data: None,
            error_kind: None,
            detail: None,
        }
    }

    #[must_use]
    pub fn success_with_data(msg: impl Into<String>, data: Value) -> Self {
        Self {
            data: Some(data),
            ..Self::success(msg)
        }
    }

    #[must_use]
    pub fn error(kind: ErrorKind, msg: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            status: ResultStatus::Error,
            msg: msg.into(),
            data: None,
            error_kind: Some(kind),
            detail,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == ResultStatus::Success
    }
}

/// 容器电源状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PowerState {
    On,
    Off,
    Unknown,
}

impl PowerState {
    /// 节点 `data.Status` -> 电源状态，其余值一律为 `Unknown`
    #[must_use]
    pub fn from_remote(status: Option<&str>) -> Self {
        match status {
            Some("stop") => Self::Off,
            Some("running") => Self::On,
            _ => Self::Unknown,
        }
    }

    /// 面板显示文案
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::On => "运行中",
            Self::Off => "关机",
            Self::Unknown => "未知",
        }
    }
}

/// `status` 操作返回的数据
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerStatus {
    pub status: PowerState,
    pub des: String,
}

impl From<PowerState> for PowerStatus {
    fn from(state: PowerState) -> Self {
        Self {
            status: state,
            des: state.description().to_string(),
        }
    }
}

/// 连接测试结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionCheck {
    /// 1 = 连接正常且密钥有效，0 = 其他
    pub server_status: u8,
    pub msg: String,
}

impl ConnectionCheck {
    #[must_use]
    pub fn ok(msg: impl Into<String>) -> Self {
        Self {
            server_status: 1,
            msg: msg.into(),
        }
    }

    #[must_use]
    pub fn failed(msg: impl Into<String>) -> Self {
        Self {
            server_status: 0,
            msg: msg.into(),
        }
    }
}
