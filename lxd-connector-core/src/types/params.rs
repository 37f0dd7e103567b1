//! 面板参数包
//!
//! 面板每次事件都会带上完整的参数包。字段名同时接受驼峰形式
//! （`serverIp`）和面板原始字段名（`server_ip`、`accesshash`）。

use std::collections::HashMap;
use std::fmt;

use lxd_connector_client::{NodeEndpoint, log_sanitizer::mask_secret};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::utils::lenient;

/// 面板配置项键名
pub mod option_keys {
    pub const CPU: &str = "CPU";
    pub const DISK: &str = "Disk Space";
    pub const MEMORY: &str = "Memory";
    pub const NET_IN: &str = "net_in";
    pub const NET_OUT: &str = "net_out";
    pub const FLOW_LIMIT: &str = "flow_limit";
    pub const NAT_ACL_LIMIT: &str = "nat_acl_limit";
    pub const OS: &str = "os";
}

/// 产品配置项（键 -> 任意 JSON 值）
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ConfigOptions(HashMap<String, Value>);

impl<'de> Deserialize<'de> for ConfigOptions {
    /// 面板在无配置项时可能传 `[]` 或 `null`，一律视为空
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match Value::deserialize(deserializer)? {
            Value::Object(map) => Self(map.into_iter().collect()),
            _ => Self::default(),
        })
    }
}

impl ConfigOptions {
    /// 插入一个配置项
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// 读取字符串配置；空串与 `null` 视为缺失，数字转为字符串
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// 读取整数配置；缺失、空或无法解析时回落到默认值
    #[must_use]
    pub fn int_or(&self, key: &str, default: i64) -> i64 {
        let Some(raw) = self.0.get(key) else {
            return default;
        };
        if raw.is_null() || raw.as_str().is_some_and(|s| s.trim().is_empty()) {
            return default;
        }
        lenient::value_as_i64(raw).unwrap_or_else(|| {
            log::warn!("Config option '{key}' is not a number ({raw}), using default {default}");
            default
        })
    }
}

/// NAT 表单字段：`dport`（外网端口）、`sport`（容器端口）、`dtype`（协议）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatForm {
    #[serde(default, deserialize_with = "lenient::int_or_zero")]
    pub dport: i64,
    #[serde(default, deserialize_with = "lenient::int_or_zero")]
    pub sport: i64,
    #[serde(default)]
    pub dtype: String,
}

/// 单次面板事件的参数包
#[derive(Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelParams {
    /// 容器主机名
    pub domain: String,
    /// 节点地址
    #[serde(alias = "server_ip")]
    pub server_ip: String,
    /// 节点控制 API 端口
    #[serde(deserialize_with = "lenient::port")]
    pub port: u16,
    /// 控制 API 密钥
    #[serde(alias = "accesshash")]
    pub access_key: String,
    /// 面板主机 ID
    #[serde(alias = "hostid", deserialize_with = "lenient::string")]
    pub host_id: String,
    /// 面板提供的系统密码
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, alias = "configoptions")]
    pub config_options: ConfigOptions,
    /// 重装目标镜像
    #[serde(default, alias = "reinstall_os", skip_serializing_if = "Option::is_none")]
    pub reinstall_os: Option<String>,
    /// NAT 事件的表单字段
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nat_form: Option<NatForm>,
}

impl PanelParams {
    /// 目标节点
    #[must_use]
    pub fn node(&self) -> NodeEndpoint {
        NodeEndpoint::new(&self.server_ip, self.port, &self.access_key)
    }

    /// 面板提供的非空密码
    #[must_use]
    pub fn supplied_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }
}

impl fmt::Debug for PanelParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanelParams")
            .field("domain", &self.domain)
            .field("server_ip", &self.server_ip)
            .field("port", &self.port)
            .field("access_key", &mask_secret(&self.access_key))
            .field("host_id", &self.host_id)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("config_options", &self.config_options)
            .field("reinstall_os", &self.reinstall_os)
            .field("nat_form", &self.nat_form)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_camel_case_bundle() {
        let params: PanelParams = serde_json::from_value(json!({
            "domain": "c1",
            "serverIp": "10.0.0.1",
            "port": 8080,
            "accessKey": "k-123456789",
            "hostId": "42",
            "configOptions": {"CPU": "2"}
        }))
        .unwrap();

        assert_eq!(params.server_ip, "10.0.0.1");
        assert_eq!(params.port, 8080);
        assert_eq!(params.host_id, "42");
        assert_eq!(params.config_options.int_or(option_keys::CPU, 1), 2);
        assert!(params.nat_form.is_none());
    }

    #[test]
    fn accepts_panel_field_names() {
        let params: PanelParams = serde_json::from_value(json!({
            "domain": "c1",
            "server_ip": "10.0.0.1",
            "port": "8080",
            "accesshash": "k",
            "hostid": 42,
            "configoptions": [],
            "reinstall_os": "debian12"
        }))
        .unwrap();

        assert_eq!(params.port, 8080);
        assert_eq!(params.access_key, "k");
        assert_eq!(params.host_id, "42");
        assert_eq!(params.config_options, ConfigOptions::default());
        assert_eq!(params.reinstall_os.as_deref(), Some("debian12"));
    }

    #[test]
    fn config_option_defaults() {
        let options = ConfigOptions::default()
            .with(option_keys::CPU, "")
            .with(option_keys::MEMORY, "lots")
            .with(option_keys::DISK, 2048)
            .with(option_keys::OS, "  ");

        assert_eq!(options.int_or(option_keys::CPU, 1), 1);
        assert_eq!(options.int_or(option_keys::MEMORY, 128), 128);
        assert_eq!(options.int_or(option_keys::DISK, 1024), 2048);
        assert_eq!(options.int_or(option_keys::NET_IN, 1), 1);
        assert_eq!(options.text(option_keys::OS), None);
    }

    #[test]
    fn nat_form_is_lenient() {
        let params: PanelParams = serde_json::from_value(json!({
            "domain": "c1",
            "serverIp": "10.0.0.1",
            "port": 8080,
            "accessKey": "k",
            "hostId": "1",
            "natForm": {"dport": "20022", "sport": "oops", "dtype": "TCP"}
        }))
        .unwrap();

        let form = params.nat_form.unwrap();
        assert_eq!(form.dport, 20022);
        assert_eq!(form.sport, 0);
        assert_eq!(form.dtype, "TCP");
    }

    #[test]
    fn debug_masks_secrets() {
        let params: PanelParams = serde_json::from_value(json!({
            "domain": "c1",
            "serverIp": "10.0.0.1",
            "port": 8080,
            "accessKey": "super-secret-key",
            "hostId": "1",
            "password": "hunter22"
        }))
        .unwrap();

        let out = format!("{params:?}");
        assert!(!out.contains("super-secret-key"));
        assert!(!out.contains("hunter22"));
    }

    #[test]
    fn empty_password_is_not_supplied() {
        let params: PanelParams = serde_json::from_value(json!({
            "domain": "c1",
            "serverIp": "10.0.0.1",
            "port": 8080,
            "accessKey": "k",
            "hostId": "1",
            "password": ""
        }))
        .unwrap();
        assert_eq!(params.supplied_password(), None);
    }
}
