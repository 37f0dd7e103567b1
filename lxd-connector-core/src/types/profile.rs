//! 连接器配置档
//!
//! 面板上的两个模块（`lxdserver`、`senkinlxc`）逻辑完全一致，只是显示名不同，
//! 这里用同一个实现按配置档实例化。

use serde::{Deserialize, Serialize};

/// 默认 API 前缀
pub const DEFAULT_API_PREFIX: &str = "/api";

/// 连接器配置档
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectorProfile {
    /// 面板模块 ID
    pub id: String,
    /// 显示名称
    pub display_name: String,
    /// 控制 API 路径前缀
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
    /// 模块 API 版本
    #[serde(default)]
    pub api_version: String,
    /// 帮助文档地址
    #[serde(default)]
    pub help_doc: String,
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

impl ConnectorProfile {
    /// `lxdserver` 模块
    #[must_use]
    pub fn lxd_server() -> Self {
        Self {
            id: "lxdserver".to_string(),
            display_name: "魔方财务-LXD对接插件".to_string(),
            api_prefix: default_api_prefix(),
            api_version: "1.0.0".to_string(),
            help_doc: "https://github.com/xkatld/zjmf-lxd-server".to_string(),
        }
    }

    /// `senkinlxc` 模块
    #[must_use]
    pub fn senkin_lxc() -> Self {
        Self {
            id: "senkinlxc".to_string(),
            display_name: "Senkin的LXC对接插件".to_string(),
            api_prefix: default_api_prefix(),
            api_version: "1.0.0".to_string(),
            help_doc: String::new(),
        }
    }

    /// 内置配置档列表
    #[must_use]
    pub fn builtin() -> Vec<Self> {
        vec![Self::lxd_server(), Self::senkin_lxc()]
    }

    /// 按 ID 查找内置配置档
    #[must_use]
    pub fn by_id(id: &str) -> Option<Self> {
        Self::builtin().into_iter().find(|p| p.id == id)
    }

    /// 拼接完整路径：`{api_prefix}/{endpoint}`
    #[must_use]
    pub fn path(&self, endpoint: &str) -> String {
        format!(
            "{}/{}",
            self.api_prefix.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

impl Default for ConnectorProfile {
    fn default() -> Self {
        Self::lxd_server()
    }
}
