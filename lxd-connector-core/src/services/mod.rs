//! 业务逻辑服务层

mod lifecycle_service;
mod nat_rule_service;
mod node_service;

pub use lifecycle_service::LifecycleService;
pub use nat_rule_service::NatRuleService;
pub use node_service::NodeService;

use std::sync::Arc;

use lxd_connector_client::{ApiRequest, ControlClient, RemoteResponse};

use crate::error::{CoreError, CoreResult};
use crate::traits::{HostRepository, NatRuleRepository};
use crate::types::{ConnectorProfile, ErrorKind, ModuleResult, Operation, PanelParams};

/// 服务上下文 - 持有所有依赖
///
/// 平台层需要创建此上下文，并注入控制 API 客户端和存储实现。
pub struct ServiceContext {
    /// 节点控制 API 客户端
    pub client: Arc<dyn ControlClient>,
    /// 主机记录仓库
    pub host_repository: Arc<dyn HostRepository>,
    /// NAT 规则仓库
    pub nat_rule_repository: Arc<dyn NatRuleRepository>,
    /// 连接器配置档
    pub profile: ConnectorProfile,
}

impl ServiceContext {
    /// 创建服务上下文
    #[must_use]
    pub fn new(
        client: Arc<dyn ControlClient>,
        host_repository: Arc<dyn HostRepository>,
        nat_rule_repository: Arc<dyn NatRuleRepository>,
        profile: ConnectorProfile,
    ) -> Self {
        Self {
            client,
            host_repository,
            nat_rule_repository,
            profile,
        }
    }

    /// 带 API 前缀的完整路径
    #[must_use]
    pub fn path(&self, endpoint: &str) -> String {
        self.profile.path(endpoint)
    }

    /// 发起一次远端调用，非 200 转为 `CoreError::Rejected`
    pub async fn call_remote(
        &self,
        params: &PanelParams,
        op: Operation,
        request: ApiRequest,
    ) -> CoreResult<RemoteResponse> {
        let node = params.node();
        log::debug!(
            "[{}] {op} -> {} {} {}",
            self.profile.id,
            node.label(),
            request.method.as_str(),
            request.path
        );

        let resp = self.client.call(&node, request).await?;
        if resp.is_success() {
            Ok(resp)
        } else {
            Err(CoreError::Rejected {
                code: resp.code,
                message: resp.message,
            })
        }
    }
}

/// 成功结果：优先使用节点消息
pub(crate) fn success_result(op: Operation, resp: &RemoteResponse) -> ModuleResult {
    ModuleResult::success(
        resp.message
            .clone()
            .unwrap_or_else(|| op.success_message().to_string()),
    )
}

/// 失败结果：记录日志并映射为面板可见的错误
pub(crate) fn failure_result(op: Operation, hostname: &str, err: &CoreError) -> ModuleResult {
    if err.is_expected() {
        log::warn!("{op} failed for {hostname}: {err}");
    } else {
        log::error!("{op} failed for {hostname}: {err}");
    }

    let kind = err.kind();
    let msg = match err {
        CoreError::ValidationError(_) | CoreError::NatValidation(_) => err.to_string(),
        CoreError::Rejected { .. } => err
            .remote_message()
            .map_or_else(|| op.failure_message().to_string(), str::to_string),
        _ => op.failure_message().to_string(),
    };
    let detail = match kind {
        ErrorKind::Transport | ErrorKind::MalformedResponse | ErrorKind::Storage => {
            Some(err.to_string())
        }
        ErrorKind::Validation | ErrorKind::Rejected => None,
    };

    ModuleResult::error(kind, msg, detail)
}

/// 统一收尾
pub(crate) fn finish(
    op: Operation,
    hostname: &str,
    outcome: CoreResult<RemoteResponse>,
) -> ModuleResult {
    match outcome {
        Ok(resp) => success_result(op, &resp),
        Err(e) => failure_result(op, hostname, &e),
    }
}
