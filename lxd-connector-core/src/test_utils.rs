//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use lxd_connector_client::{
    ApiRequest, ClientError, ControlClient, NodeEndpoint, RemoteResponse,
};
use serde_json::{Value, json};
use tokio::sync::{Mutex, RwLock};

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{HostRepository, NatRuleRepository};
use crate::types::{
    ConnectorProfile, HostRecord, HostUpdate, NatRule, NatRuleKey, PanelParams,
};

// ===== MockControlClient =====

/// 按脚本依次返回响应，并记录每次调用
pub struct MockControlClient {
    replies: Mutex<VecDeque<Result<RemoteResponse, ClientError>>>,
    calls: Mutex<Vec<(NodeEndpoint, ApiRequest)>>,
}

impl MockControlClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// 追加一个 `{code, msg, data}` 响应
    pub async fn reply(&self, code: i64, msg: Option<&str>, data: Option<Value>) {
        self.replies.lock().await.push_back(Ok(RemoteResponse {
            code,
            message: msg.map(str::to_string),
            data,
        }));
    }

    /// 追加一个客户端错误
    pub async fn fail(&self, err: ClientError) {
        self.replies.lock().await.push_back(Err(err));
    }

    pub async fn calls(&self) -> Vec<(NodeEndpoint, ApiRequest)> {
        self.calls.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }
}

#[async_trait]
impl ControlClient for MockControlClient {
    async fn call(
        &self,
        node: &NodeEndpoint,
        request: ApiRequest,
    ) -> lxd_connector_client::Result<RemoteResponse> {
        self.calls.lock().await.push((node.clone(), request));
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| {
                Err(ClientError::NetworkError {
                    node: node.label(),
                    detail: "no scripted reply".to_string(),
                })
            })
    }
}

pub fn timeout_error() -> ClientError {
    ClientError::Timeout {
        node: "10.0.0.1:8080".to_string(),
        detail: "operation timed out".to_string(),
    }
}

pub fn refused_error() -> ClientError {
    ClientError::NetworkError {
        node: "10.0.0.1:8080".to_string(),
        detail: "connection refused".to_string(),
    }
}

// ===== MockHostRepository =====

pub struct MockHostRepository {
    hosts: RwLock<HashMap<String, HostRecord>>,
    /// 如果 Some，写入时返回此错误
    write_error: RwLock<Option<String>>,
}

impl MockHostRepository {
    pub fn new() -> Self {
        Self {
            hosts: RwLock::new(HashMap::new()),
            write_error: RwLock::new(None),
        }
    }

    pub async fn set_write_error(&self, err: Option<String>) {
        *self.write_error.write().await = err;
    }

    pub async fn get(&self, host_id: &str) -> Option<HostRecord> {
        self.hosts.read().await.get(host_id).cloned()
    }
}

#[async_trait]
impl HostRepository for MockHostRepository {
    async fn find_by_id(&self, host_id: &str) -> CoreResult<Option<HostRecord>> {
        Ok(self.hosts.read().await.get(host_id).cloned())
    }

    async fn save(&self, record: &HostRecord) -> CoreResult<()> {
        if let Some(ref msg) = *self.write_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        self.hosts
            .write()
            .await
            .insert(record.host_id.clone(), record.clone());
        Ok(())
    }

    async fn apply_update(&self, host_id: &str, update: &HostUpdate) -> CoreResult<()> {
        if let Some(ref msg) = *self.write_error.read().await {
            return Err(CoreError::StorageError(msg.clone()));
        }
        let mut hosts = self.hosts.write().await;
        let record = hosts
            .get_mut(host_id)
            .ok_or_else(|| CoreError::HostNotFound(host_id.to_string()))?;
        update.apply_to(record);
        Ok(())
    }
}

// ===== MockNatRuleRepository =====

pub struct MockNatRuleRepository {
    rules: RwLock<HashMap<NatRuleKey, NatRule>>,
}

impl MockNatRuleRepository {
    pub fn new() -> Self {
        Self {
            rules: RwLock::new(HashMap::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rules.read().await.len()
    }
}

#[async_trait]
impl NatRuleRepository for MockNatRuleRepository {
    async fn find_by_hostname(&self, hostname: &str) -> CoreResult<Vec<NatRule>> {
        let mut rules: Vec<NatRule> = self
            .rules
            .read()
            .await
            .values()
            .filter(|r| r.hostname == hostname)
            .cloned()
            .collect();
        rules.sort_by_key(|r| (r.host_port, r.protocol));
        Ok(rules)
    }

    async fn find(&self, key: &NatRuleKey) -> CoreResult<Option<NatRule>> {
        Ok(self.rules.read().await.get(key).cloned())
    }

    async fn save(&self, rule: &NatRule) -> CoreResult<()> {
        let mut rules = self.rules.write().await;
        let stored = rules.entry(rule.key()).or_insert_with(|| rule.clone());
        stored.container_port = rule.container_port;
        Ok(())
    }

    async fn delete(&self, key: &NatRuleKey) -> CoreResult<bool> {
        Ok(self.rules.write().await.remove(key).is_some())
    }
}

// ===== 工厂方法 =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub client: Arc<MockControlClient>,
    pub hosts: Arc<MockHostRepository>,
    pub nat_rules: Arc<MockNatRuleRepository>,
}

/// 创建测试用 `ServiceContext`
pub fn create_test_context() -> TestContext {
    let client = Arc::new(MockControlClient::new());
    let hosts = Arc::new(MockHostRepository::new());
    let nat_rules = Arc::new(MockNatRuleRepository::new());

    let ctx = Arc::new(ServiceContext::new(
        client.clone(),
        hosts.clone(),
        nat_rules.clone(),
        ConnectorProfile::lxd_server(),
    ));

    TestContext {
        ctx,
        client,
        hosts,
        nat_rules,
    }
}

/// 面板参数包，`extra` 中的字段覆盖默认值
pub fn test_params(extra: Value) -> PanelParams {
    let mut base = json!({
        "domain": "c1",
        "serverIp": "10.0.0.1",
        "port": 8080,
        "accessKey": "test-api-key",
        "hostId": "42"
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        base.extend(extra.clone());
    }
    serde_json::from_value(base).unwrap()
}
