//! NAT 端口转发规则

use std::fmt;
use std::ops::RangeInclusive;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::NatValidationError;

/// 容器端口允许范围
pub const CONTAINER_PORT_RANGE: RangeInclusive<i64> = 1..=65535;
/// 外网端口允许范围
pub const HOST_PORT_RANGE: RangeInclusive<i64> = 10000..=65535;

/// 转发协议
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NatProtocol {
    Tcp,
    Udp,
}

impl NatProtocol {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }

    /// 去空白、忽略大小写
    pub fn parse(raw: &str) -> Result<Self, NatValidationError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            _ => Err(NatValidationError::UnknownProtocol {
                protocol: raw.to_string(),
            }),
        }
    }
}

impl fmt::Display for NatProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 校验通过的转发映射
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NatMapping {
    pub protocol: NatProtocol,
    pub container_port: u16,
    pub host_port: u16,
}

impl NatMapping {
    /// 按 协议 -> 容器端口 -> 外网端口 的顺序校验，返回第一个失败
    pub fn validate(
        protocol: &str,
        container_port: i64,
        host_port: i64,
    ) -> Result<Self, NatValidationError> {
        let protocol = NatProtocol::parse(protocol)?;

        let container_port = in_range(container_port, &CONTAINER_PORT_RANGE).ok_or(
            NatValidationError::ContainerPortOutOfRange {
                port: container_port,
            },
        )?;

        let host_port = in_range(host_port, &HOST_PORT_RANGE)
            .ok_or(NatValidationError::HostPortOutOfRange { port: host_port })?;

        Ok(Self {
            protocol,
            container_port,
            host_port,
        })
    }

    /// 该映射在某容器上的自然键
    #[must_use]
    pub fn key(&self, hostname: &str) -> NatRuleKey {
        NatRuleKey {
            hostname: hostname.to_string(),
            protocol: self.protocol,
            host_port: self.host_port,
        }
    }

    /// `addport` / `delport` 表单字段
    #[must_use]
    pub fn form_fields(&self, hostname: &str) -> Vec<(String, String)> {
        vec![
            ("hostname".to_string(), hostname.to_string()),
            ("dtype".to_string(), self.protocol.as_str().to_string()),
            ("dport".to_string(), self.host_port.to_string()),
            ("sport".to_string(), self.container_port.to_string()),
        ]
    }
}

fn in_range(port: i64, range: &RangeInclusive<i64>) -> Option<u16> {
    if range.contains(&port) {
        u16::try_from(port).ok()
    } else {
        None
    }
}

/// 规则自然键 `(hostname, protocol, hostPort)`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NatRuleKey {
    pub hostname: String,
    pub protocol: NatProtocol,
    pub host_port: u16,
}

/// 面板侧维护的转发规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NatRule {
    pub id: String,
    pub hostname: String,
    pub protocol: NatProtocol,
    pub host_port: u16,
    pub container_port: u16,
    #[serde(with = "crate::utils::datetime")]
    pub created_at: DateTime<Utc>,
}

impl NatRule {
    /// 以新 ID 和当前时间创建规则
    #[must_use]
    pub fn new(hostname: impl Into<String>, mapping: NatMapping) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            hostname: hostname.into(),
            protocol: mapping.protocol,
            host_port: mapping.host_port,
            container_port: mapping.container_port,
            created_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn key(&self) -> NatRuleKey {
        NatRuleKey {
            hostname: self.hostname.clone(),
            protocol: self.protocol,
            host_port: self.host_port,
        }
    }
}
