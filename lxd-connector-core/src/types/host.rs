//! 面板主机记录

use std::fmt;

use serde::{Deserialize, Serialize};

/// 主机状态（面板侧）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HostStatus {
    /// 等待开通
    #[default]
    Pending,
    /// 已开通（仅在节点确认创建后设置）
    Active,
    /// 已终止
    Terminated,
}

impl HostStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Active => "Active",
            Self::Terminated => "Terminated",
        }
    }

    /// 从存储中的字符串解析，未知值视为 `Pending`
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Active" => Self::Active,
            "Terminated" => Self::Terminated,
            _ => Self::Pending,
        }
    }
}

impl fmt::Display for HostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 主机记录
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostRecord {
    pub host_id: String,
    /// 容器主机名（面板内唯一）
    pub domain: String,
    /// 所在节点地址
    pub dedicated_ip: Option<String>,
    pub domain_status: HostStatus,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl HostRecord {
    /// 新建一条待开通记录
    #[must_use]
    pub fn pending(host_id: impl Into<String>, domain: impl Into<String>) -> Self {
        Self {
            host_id: host_id.into(),
            domain: domain.into(),
            dedicated_ip: None,
            domain_status: HostStatus::Pending,
            username: None,
            password: None,
        }
    }
}

impl fmt::Debug for HostRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostRecord")
            .field("host_id", &self.host_id)
            .field("domain", &self.domain)
            .field("dedicated_ip", &self.dedicated_ip)
            .field("domain_status", &self.domain_status)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .finish()
    }
}

/// 主机记录更新
///
/// 只在节点返回成功后构造，字段完整给出。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostUpdate {
    /// 创建成功：写入节点地址、凭据，状态置为 `Active`
    Provisioned {
        dedicated_ip: String,
        username: String,
        password: String,
    },
    /// 同步成功：只刷新节点地址
    Synced { dedicated_ip: String },
}

impl HostUpdate {
    /// 应用到记录上
    pub fn apply_to(&self, record: &mut HostRecord) {
        match self {
            Self::Provisioned {
                dedicated_ip,
                username,
                password,
            } => {
                record.dedicated_ip = Some(dedicated_ip.clone());
                record.domain_status = HostStatus::Active;
                record.username = Some(username.clone());
                record.password = Some(password.clone());
            }
            Self::Synced { dedicated_ip } => {
                record.dedicated_ip = Some(dedicated_ip.clone());
            }
        }
    }
}
