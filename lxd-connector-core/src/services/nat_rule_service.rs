//! NAT 端口转发规则服务
//!
//! 规则状态机：`absent -> present -> absent`。只有本地校验通过且节点确认成功后
//! 才改动规则表；节点拒绝或不可达时规则表保持不变。

use std::sync::Arc;

use lxd_connector_client::{ApiRequest, RemoteResponse};
use serde_json::json;

use crate::error::{CoreError, CoreResult};
use crate::services::{ServiceContext, failure_result, finish};
use crate::types::{ModuleResult, NatForm, NatMapping, NatRule, Operation, PanelParams};

/// NAT 规则服务
pub struct NatRuleService {
    ctx: Arc<ServiceContext>,
}

impl NatRuleService {
    /// 创建 NAT 规则服务实例
    #[must_use]
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    /// 添加端口转发
    ///
    /// 校验顺序：协议 -> 容器端口 -> 外网端口，任一失败都不会发出请求。
    pub async fn add_rule(
        &self,
        params: &PanelParams,
        protocol: &str,
        container_port: i64,
        host_port: i64,
    ) -> ModuleResult {
        let outcome = self
            .try_add(params, protocol, container_port, host_port)
            .await;
        finish(Operation::AddNatRule, &params.domain, outcome)
    }

    /// 删除端口转发
    pub async fn remove_rule(
        &self,
        params: &PanelParams,
        protocol: &str,
        container_port: i64,
        host_port: i64,
    ) -> ModuleResult {
        let outcome = self
            .try_remove(params, protocol, container_port, host_port)
            .await;
        finish(Operation::RemoveNatRule, &params.domain, outcome)
    }

    /// 按参数包中的 `natForm` 添加（缺失字段按 0 / 空处理，随后校验失败）
    pub async fn add_rule_from_form(&self, params: &PanelParams) -> ModuleResult {
        let form = params.nat_form.clone().unwrap_or_default();
        self.add_rule(params, &form.dtype, form.sport, form.dport)
            .await
    }

    /// 按参数包中的 `natForm` 删除
    pub async fn remove_rule_from_form(&self, params: &PanelParams) -> ModuleResult {
        let NatForm {
            dport,
            sport,
            dtype,
        } = params.nat_form.clone().unwrap_or_default();
        self.remove_rule(params, &dtype, sport, dport).await
    }

    /// 本地记录的规则，按外网端口排序
    ///
    /// 规则表只随 `addport` / `delport` 成功而变化。容器终止后其规则仍留在表中，
    /// 同名主机被新订单复用时会一并列出；以节点为准时用 [`Self::remote_nat_rules`] 对账。
    pub async fn list_rules(&self, hostname: &str) -> ModuleResult {
        let op = Operation::ListNatRules;
        match self.ctx.nat_rule_repository.find_by_hostname(hostname).await {
            Ok(rules) => match serde_json::to_value(&rules) {
                Ok(data) => ModuleResult::success_with_data(op.success_message(), data),
                Err(e) => failure_result(
                    op,
                    hostname,
                    &CoreError::SerializationError(e.to_string()),
                ),
            },
            Err(e) => failure_result(op, hostname, &e),
        }
    }

    /// 节点自身的转发列表，用于展示与对账
    pub async fn remote_nat_rules(&self, params: &PanelParams) -> ModuleResult {
        let op = Operation::RemoteNatRules;
        let request =
            ApiRequest::get(self.ctx.path("natlist")).query("hostname", &params.domain);

        match self.ctx.call_remote(params, op, request).await {
            Ok(resp) => ModuleResult::success_with_data(
                resp.message.unwrap_or_default(),
                resp.data.unwrap_or_else(|| json!([])),
            ),
            Err(e) => failure_result(op, &params.domain, &e),
        }
    }

    async fn try_add(
        &self,
        params: &PanelParams,
        protocol: &str,
        container_port: i64,
        host_port: i64,
    ) -> CoreResult<RemoteResponse> {
        let mapping = NatMapping::validate(protocol, container_port, host_port)?;

        let request = ApiRequest::post_form(
            self.ctx.path("addport"),
            mapping.form_fields(&params.domain),
        );
        let resp = self
            .ctx
            .call_remote(params, Operation::AddNatRule, request)
            .await?;

        let rule = NatRule::new(&params.domain, mapping);
        self.ctx.nat_rule_repository.save(&rule).await?;
        log::info!(
            "NAT rule added for {}: {} {} -> {}",
            params.domain,
            mapping.protocol,
            mapping.host_port,
            mapping.container_port
        );
        Ok(resp)
    }

    async fn try_remove(
        &self,
        params: &PanelParams,
        protocol: &str,
        container_port: i64,
        host_port: i64,
    ) -> CoreResult<RemoteResponse> {
        let mapping = NatMapping::validate(protocol, container_port, host_port)?;

        let request = ApiRequest::post_form(
            self.ctx.path("delport"),
            mapping.form_fields(&params.domain),
        );
        let resp = self
            .ctx
            .call_remote(params, Operation::RemoveNatRule, request)
            .await?;

        let key = mapping.key(&params.domain);
        if self.ctx.nat_rule_repository.delete(&key).await? {
            log::info!(
                "NAT rule removed for {}: {} {}",
                params.domain,
                mapping.protocol,
                mapping.host_port
            );
        } else {
            log::warn!(
                "Node removed untracked NAT rule for {}: {} {}",
                params.domain,
                mapping.protocol,
                mapping.host_port
            );
        }
        Ok(resp)
    }
}
