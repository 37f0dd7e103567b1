use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lxd_connector_app::adapters::SqliteStore;
use lxd_connector_app::AppStateBuilder;
use lxd_connector_client::{ApiRequest, ClientError, ControlClient, NodeEndpoint, RemoteResponse};
use lxd_connector_core::error::{CoreError, CoreResult};
use lxd_connector_core::traits::HostRepository;
use lxd_connector_core::types::{HostRecord, HostUpdate};

use super::*;

/// Returns queued responses in order and records every request path.
#[derive(Default)]
pub struct ScriptedClient {
    replies: Mutex<VecDeque<RemoteResponse>>,
    paths: Mutex<Vec<String>>,
}

impl ScriptedClient {
    pub fn push(&self, code: i64, msg: Option<&str>, data: Option<Value>) {
        self.replies.lock().unwrap().push_back(RemoteResponse {
            code,
            message: msg.map(str::to_string),
            data,
        });
    }

    pub fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap().clone()
    }
}

#[async_trait]
impl ControlClient for ScriptedClient {
    async fn call(
        &self,
        node: &NodeEndpoint,
        request: ApiRequest,
    ) -> lxd_connector_client::Result<RemoteResponse> {
        self.paths.lock().unwrap().push(request.path);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| ClientError::NetworkError {
                node: node.label(),
                detail: "connection refused".to_string(),
            })
    }
}

/// Host repository whose writes always fail.
pub struct ReadOnlyHostRepository;

#[async_trait]
impl HostRepository for ReadOnlyHostRepository {
    async fn find_by_id(&self, _host_id: &str) -> CoreResult<Option<HostRecord>> {
        Ok(None)
    }

    async fn save(&self, _record: &HostRecord) -> CoreResult<()> {
        Err(CoreError::StorageError("database is locked".to_string()))
    }

    async fn apply_update(&self, host_id: &str, _update: &HostUpdate) -> CoreResult<()> {
        Err(CoreError::HostNotFound(host_id.to_string()))
    }
}

pub struct TestState {
    pub state: AppState,
    pub client: Arc<ScriptedClient>,
    pub store: Arc<SqliteStore>,
    _tmp: tempfile::TempDir,
}

pub async fn build_state() -> TestState {
    let tmp = tempfile::tempdir().unwrap();
    let store = Arc::new(SqliteStore::new(&tmp.path().join("hook.db")).await.unwrap());
    let client = Arc::new(ScriptedClient::default());

    let state = AppStateBuilder::new()
        .client(client.clone())
        .host_repository(store.clone())
        .nat_rule_repository(store.clone())
        .build()
        .unwrap();

    TestState {
        state,
        client,
        store,
        _tmp: tmp,
    }
}

pub async fn build_state_with_read_only_hosts() -> TestState {
    let t = build_state().await;
    let state = AppStateBuilder::new()
        .client(t.client.clone())
        .host_repository(Arc::new(ReadOnlyHostRepository))
        .nat_rule_repository(t.store.clone())
        .build()
        .unwrap();
    TestState { state, ..t }
}

pub fn bundle(extra: Value) -> PanelParams {
    let mut base = serde_json::json!({
        "domain": "c1",
        "server_ip": "10.0.0.1",
        "port": "8080",
        "accesshash": "test-api-key",
        "hostid": 42,
    });
    if let (Some(base), Some(extra)) = (base.as_object_mut(), extra.as_object()) {
        for (k, v) in extra {
            base.insert(k.clone(), v.clone());
        }
    }
    serde_json::from_value(base).unwrap()
}
