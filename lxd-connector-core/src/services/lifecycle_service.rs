//! 容器生命周期服务
//!
//! 每个面板事件对应一次远端调用：构造请求 -> 调用 -> 判断 -> 副作用 -> 结果。
//! 主机记录只在节点确认成功后更新。

use std::sync::Arc;

use lxd_connector_client::{ApiRequest, RemoteResponse};
use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, failure_result, finish, success_result};
use crate::types::{
    HostUpdate, ModuleResult, Operation, PanelParams, PowerState, PowerStatus, ProvisionRequest,
};

/// 重装时缺少镜像参数
const MISSING_OS_MESSAGE: &str = "操作系统参数错误";

/// 容器生命周期服务
pub struct LifecycleService {
    ctx: Arc<ServiceContext>,
}

impl LifecycleService {
    /// 创建生命周期服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 开通容器
    ///
    /// 成功后写入节点地址、用户名（= 主机名）与密码，状态置为 `Active`。
    /// 失败时不写库。
    pub async fn create(&self, params: &PanelParams) -> ModuleResult {
        let op = Operation::Create;
        let request = ProvisionRequest::from_params(params);
        log::info!("Creating container {}: {request:?}", params.domain);

        finish(op, &params.domain, self.try_create(params, &request).await)
    }

    async fn try_create(
        &self,
        params: &PanelParams,
        request: &ProvisionRequest,
    ) -> CoreResult<RemoteResponse> {
        let body = serde_json::to_value(request)
            .map_err(|e| CoreError::SerializationError(e.to_string()))?;

        let resp = self
            .ctx
            .call_remote(
                params,
                Operation::Create,
                ApiRequest::post_json(self.ctx.path("create"), body),
            )
            .await?;

        let update = HostUpdate::Provisioned {
            dedicated_ip: params.server_ip.clone(),
            username: params.domain.clone(),
            password: request.password.clone(),
        };
        self.ctx
            .host_repository
            .apply_update(&params.host_id, &update)
            .await?;

        log::info!("Container {} is now active", params.domain);
        Ok(resp)
    }

    /// 同步：确认容器存在并刷新节点地址
    pub async fn sync(&self, params: &PanelParams) -> ModuleResult {
        finish(Operation::Sync, &params.domain, self.try_sync(params).await)
    }

    async fn try_sync(&self, params: &PanelParams) -> CoreResult<RemoteResponse> {
        let resp = self
            .ctx
            .call_remote(params, Operation::Sync, self.hostname_get(params, "getinfo"))
            .await?;

        let update = HostUpdate::Synced {
            dedicated_ip: params.server_ip.clone(),
        };
        self.ctx
            .host_repository
            .apply_update(&params.host_id, &update)
            .await?;
        Ok(resp)
    }

    /// 删除容器（不改动本地主机记录与 NAT 规则表）
    pub async fn terminate(&self, params: &PanelParams) -> ModuleResult {
        self.simple(params, Operation::Terminate, "delete").await
    }

    /// 开机
    pub async fn power_on(&self, params: &PanelParams) -> ModuleResult {
        self.simple(params, Operation::PowerOn, "boot").await
    }

    /// 关机
    pub async fn power_off(&self, params: &PanelParams) -> ModuleResult {
        self.simple(params, Operation::PowerOff, "stop").await
    }

    /// 重启
    pub async fn reboot(&self, params: &PanelParams) -> ModuleResult {
        self.simple(params, Operation::Reboot, "reboot").await
    }

    /// 查询电源状态
    ///
    /// `data.Status`: `stop` -> off，`running` -> on，其余 -> unknown。
    pub async fn status(&self, params: &PanelParams) -> ModuleResult {
        let op = Operation::Status;
        match self
            .ctx
            .call_remote(params, op, self.hostname_get(params, "getinfo"))
            .await
        {
            Ok(resp) => {
                let state = PowerState::from_remote(resp.data_str("Status"));
                let data = serde_json::to_value(PowerStatus::from(state)).unwrap_or_default();
                ModuleResult::success_with_data(resp.message.unwrap_or_default(), data)
            }
            Err(e) => failure_result(op, &params.domain, &e),
        }
    }

    /// 重置系统密码
    ///
    /// 只调用节点，本地记录中的密码不随之更新。
    pub async fn reset_password(&self, params: &PanelParams, new_password: &str) -> ModuleResult {
        let op = Operation::ResetPassword;
        let body = json!({
            "hostname": params.domain,
            "password": new_password,
        });

        let outcome = self
            .ctx
            .call_remote(params, op, ApiRequest::post_json(self.ctx.path("password"), body))
            .await;
        finish(op, &params.domain, outcome)
    }

    /// 重装系统，`reinstall_os` 为空时本地直接失败
    pub async fn reinstall(&self, params: &PanelParams) -> ModuleResult {
        let op = Operation::Reinstall;

        let outcome = async {
            let system = params
                .reinstall_os
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| CoreError::ValidationError(MISSING_OS_MESSAGE.to_string()))?;

            let body = json!({
                "hostname": params.domain,
                "system": system,
            });
            self.ctx
                .call_remote(params, op, ApiRequest::post_json(self.ctx.path("reinstall"), body))
                .await
        }
        .await;

        finish(op, &params.domain, outcome)
    }

    /// `GET {prefix}/{endpoint}?hostname=` 且无本地副作用的操作
    async fn simple(&self, params: &PanelParams, op: Operation, endpoint: &str) -> ModuleResult {
        let outcome = self
            .ctx
            .call_remote(params, op, self.hostname_get(params, endpoint))
            .await;
        match outcome {
            Ok(resp) => {
                log::info!("{op} succeeded for {}", params.domain);
                success_result(op, &resp)
            }
            Err(e) => failure_result(op, &params.domain, &e),
        }
    }

    fn hostname_get(&self, params: &PanelParams, endpoint: &str) -> ApiRequest {
        ApiRequest::get(self.ctx.path(endpoint)).query("hostname", &params.domain)
    }
}
