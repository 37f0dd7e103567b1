//! 开通请求

use rand::Rng;
use rand::distr::Alphanumeric;
use serde::Serialize;

use super::params::{PanelParams, option_keys};

/// 自动生成的系统密码长度
pub const GENERATED_PASSWORD_LEN: usize = 8;

/// `/create` 请求体，每次调用从面板配置重新构造，不落库
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct ProvisionRequest {
    pub hostname: String,
    pub password: String,
    pub cpu: i64,
    /// MB
    pub disk: i64,
    /// MB
    pub ram: i64,
    /// 镜像标识，未设置时为空串
    pub system: String,
    /// Mbps
    pub up: i64,
    /// Mbps
    pub down: i64,
    /// 端口转发配额
    pub ports: i64,
    /// 流量配额（GB），0 表示不限
    pub bandwidth: i64,
}

impl ProvisionRequest {
    /// 从面板参数构造；缺失的配置项使用默认值，未提供密码时随机生成
    #[must_use]
    pub fn from_params(params: &PanelParams) -> Self {
        let options = &params.config_options;
        let password = params
            .supplied_password()
            .map_or_else(generate_password, str::to_string);

        Self {
            hostname: params.domain.clone(),
            password,
            cpu: options.int_or(option_keys::CPU, 1),
            disk: options.int_or(option_keys::DISK, 1024),
            ram: options.int_or(option_keys::MEMORY, 128),
            system: options.text(option_keys::OS).unwrap_or_default(),
            up: options.int_or(option_keys::NET_IN, 1),
            down: options.int_or(option_keys::NET_OUT, 1),
            ports: options.int_or(option_keys::NAT_ACL_LIMIT, 2),
            bandwidth: options.int_or(option_keys::FLOW_LIMIT, 0),
        }
    }
}

impl std::fmt::Debug for ProvisionRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProvisionRequest")
            .field("hostname", &self.hostname)
            .field("password", &"***")
            .field("cpu", &self.cpu)
            .field("disk", &self.disk)
            .field("ram", &self.ram)
            .field("system", &self.system)
            .field("up", &self.up)
            .field("down", &self.down)
            .field("ports", &self.ports)
            .field("bandwidth", &self.bandwidth)
            .finish()
    }
}

/// 随机 8 位字母数字密码
#[must_use]
pub fn generate_password() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_PASSWORD_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(extra: serde_json::Value) -> PanelParams {
        let mut base = json!({
            "domain": "c1",
            "serverIp": "10.0.0.1",
            "port": 8080,
            "accessKey": "k",
            "hostId": "1"
        });
        if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
            base.extend(extra.clone());
        }
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn defaults_fill_every_omitted_option() {
        let req = ProvisionRequest::from_params(&params(json!({})));

        assert_eq!(req.hostname, "c1");
        assert_eq!(req.cpu, 1);
        assert_eq!(req.disk, 1024);
        assert_eq!(req.ram, 128);
        assert_eq!(req.system, "");
        assert_eq!(req.up, 1);
        assert_eq!(req.down, 1);
        assert_eq!(req.ports, 2);
        assert_eq!(req.bandwidth, 0);
        assert_eq!(req.password.len(), GENERATED_PASSWORD_LEN);
        assert!(req.password.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn full_options_are_converted() {
        let req = ProvisionRequest::from_params(&params(json!({
            "password": "Abc12345",
            "configOptions": {
                "CPU": "2", "Disk Space": "2048", "Memory": "256",
                "net_in": "5", "net_out": "5", "flow_limit": "10",
                "nat_acl_limit": "4", "os": "debian11"
            }
        })));

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            json!({
                "hostname": "c1", "password": "Abc12345",
                "cpu": 2, "disk": 2048, "ram": 256, "system": "debian11",
                "up": 5, "down": 5, "ports": 4, "bandwidth": 10
            })
        );
    }

    #[test]
    fn only_net_in_missing_falls_back_to_one() {
        let req = ProvisionRequest::from_params(&params(json!({
            "configOptions": {"net_out": "7"}
        })));
        assert_eq!(req.up, 1);
        assert_eq!(req.down, 7);
    }

    #[test]
    fn generated_passwords_differ() {
        assert_ne!(generate_password(), generate_password());
    }
}
