//! 请求 / 响应类型定义

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::log_sanitizer::mask_secret;

/// 远端约定的成功响应码
pub const SUCCESS_CODE: i64 = 200;

/// 发送 API 密钥的请求头
pub const API_KEY_HEADER: &str = "apikey";

// ============ 节点 ============

/// 目标节点：地址、端口与 API 密钥
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeEndpoint {
    /// 节点地址（IP 或主机名）
    pub host: String,
    /// 控制 API 端口
    pub port: u16,
    /// API 密钥（通过 `apikey` 请求头发送）
    pub api_key: String,
}

impl NodeEndpoint {
    pub fn new(host: impl Into<String>, port: u16, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            api_key: api_key.into(),
        }
    }

    /// `http://{host}:{port}`
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }

    /// `host:port`，用于日志与错误上下文
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl std::fmt::Debug for NodeEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeEndpoint")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("api_key", &mask_secret(&self.api_key))
            .finish()
    }
}

// ============ 客户端配置 ============

/// 默认连接超时（秒）
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
/// 默认请求超时（秒）
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// HTTP 客户端超时配置
///
/// 两个超时始终生效；超时会以 [`ClientError::Timeout`](crate::ClientError::Timeout) 返回。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClientConfig {
    /// 建立 TCP 连接的超时
    pub connect_timeout: Duration,
    /// 整个请求（含读取响应体）的超时
    pub request_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }
}

// ============ 请求 ============

/// HTTP 方法（控制 API 只用到 GET / POST）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// 请求负载及其编码方式（逐个请求选择）
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// 无负载
    Empty,
    /// 追加为 URL 查询串
    Query(Vec<(String, String)>),
    /// `application/x-www-form-urlencoded` 请求体
    Form(Vec<(String, String)>),
    /// `application/json` 请求体
    Json(Value),
}

/// 单次控制 API 调用
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    /// 路径（含前缀），如 `/api/getinfo`
    pub path: String,
    /// HTTP 方法
    pub method: HttpMethod,
    /// 负载
    pub payload: Payload,
}

impl ApiRequest {
    /// GET 请求，参数编码在查询串中
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            payload: Payload::Empty,
        }
    }

    /// POST 请求，JSON 请求体
    pub fn post_json(path: impl Into<String>, body: Value) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            payload: Payload::Json(body),
        }
    }

    /// POST 请求，表单请求体
    pub fn post_form(path: impl Into<String>, fields: Vec<(String, String)>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Post,
            payload: Payload::Form(fields),
        }
    }

    /// 追加一个查询参数（仅对 `Empty` / `Query` 负载有效）
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let pair = (key.into(), value.into());
        match &mut self.payload {
            Payload::Query(pairs) => pairs.push(pair),
            Payload::Empty => self.payload = Payload::Query(vec![pair]),
            Payload::Form(_) | Payload::Json(_) => {
                log::warn!("Ignoring query parameter '{}' on {}", pair.0, self.path);
            }
        }
        self
    }
}

// ============ 响应 ============

/// 归一化后的远端响应 `{code, message, data?}`
///
/// `code` 在客户端边界统一为整数：远端返回字符串 `"200"` 或数字 `200` 均可。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteResponse {
    /// 响应码，200 为成功
    pub code: i64,
    /// 远端消息（取自 `msg`，缺失时取 `message`）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// 不透明负载，原样交给调用方
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RemoteResponse {
    /// 是否为成功响应
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// 从已解析的 JSON 构建；`code` 缺失或不是整数时返回错误描述
    pub fn from_json(value: Value) -> std::result::Result<Self, String> {
        let Value::Object(mut map) = value else {
            return Err("response body is not a JSON object".to_string());
        };

        let code = match map.get("code") {
            None | Some(Value::Null) => return Err("missing `code` field".to_string()),
            Some(raw) => normalize_code(raw)
                .ok_or_else(|| format!("`code` is not an integer: {raw}"))?,
        };

        let message = ["msg", "message"]
            .iter()
            .find_map(|key| match map.get(*key) {
                Some(Value::String(s)) => Some(s.clone()),
                _ => None,
            });

        let data = map.remove("data").filter(|v| !v.is_null());

        Ok(Self {
            code,
            message,
            data,
        })
    }

    /// 读取 `data` 中的字符串字段
    #[must_use]
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.as_ref()?.get(field)?.as_str()
    }
}

/// 将 `200` / `"200"` 统一为 `i64`
fn normalize_code(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
}
