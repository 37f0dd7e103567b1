//! 节点连接测试与容器信息

use std::sync::Arc;

use lxd_connector_client::{ApiRequest, ClientError};
use serde_json::json;

use crate::services::{ServiceContext, failure_result};
use crate::types::{ConnectionCheck, ModuleResult, Operation, PanelParams};

/// 节点服务
pub struct NodeService {
    ctx: Arc<ServiceContext>,
}

impl NodeService {
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 测试节点连通性与 API 密钥
    ///
    /// 区分四种情况：不可达、200（正常）、401（密钥无效）、其他响应码；
    /// 响应缺少 `code` 时单独报告。
    pub async fn test_connection(&self, params: &PanelParams) -> ConnectionCheck {
        let node = params.node();
        let request = ApiRequest::get(self.ctx.path("check"));

        let check = match self.ctx.client.call(&node, request).await {
            Ok(resp) if resp.is_success() => ConnectionCheck::ok(format!(
                "LXD API服务器连接成功且API密钥有效。({})",
                resp.message
                    .as_deref()
                    .unwrap_or(Operation::TestConnection.success_message())
            )),
            Ok(resp) if resp.code == 401 => ConnectionCheck::failed(format!(
                "LXD API服务器连接成功，但提供的API密钥无效。API响应: {}",
                resp.message.as_deref().unwrap_or("无详细错误信息")
            )),
            Ok(resp) => ConnectionCheck::failed(format!(
                "LXD API服务器连接成功，但API响应了非预期的状态。API Code: {}, Msg: {}",
                resp.code,
                resp.message.as_deref().unwrap_or("N/A")
            )),
            Err(ClientError::MalformedResponse { detail, .. }) => ConnectionCheck::failed(format!(
                "连接到LXD API服务器但收到意外的响应格式 (缺少'code'字段)。响应: {detail}"
            )),
            Err(e) => {
                log::warn!("Node {} unreachable: {e}", node.label());
                ConnectionCheck::failed(
                    "无法连接到LXD API服务器，请检查服务器IP、端口或确认API服务是否正在运行。",
                )
            }
        };

        log::info!(
            "Connection test for {} -> server_status={}",
            node.label(),
            check.server_status
        );
        check
    }

    /// 容器详情（IP、名称、创建时间等），`data` 原样返回给面板
    pub async fn container_info(&self, params: &PanelParams) -> ModuleResult {
        let op = Operation::ContainerInfo;
        let request = ApiRequest::get(self.ctx.path("getinfo")).query("hostname", &params.domain);

        match self.ctx.call_remote(params, op, request).await {
            Ok(resp) => ModuleResult::success_with_data(
                resp.message.unwrap_or_default(),
                resp.data.unwrap_or_else(|| json!({})),
            ),
            Err(e) => failure_result(op, &params.domain, &e),
        }
    }
}
