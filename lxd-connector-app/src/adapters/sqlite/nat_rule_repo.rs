//! `NatRuleRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, sea_query::OnConflict,
};

use lxd_connector_core::error::{CoreError, CoreResult};
use lxd_connector_core::traits::NatRuleRepository;
use lxd_connector_core::types::{NatProtocol, NatRule, NatRuleKey};
use lxd_connector_core::utils::datetime;

use super::SqliteStore;
use super::entity::nat_rule;

impl nat_rule::Model {
    /// Convert a `SeaORM` row model into a domain `NatRule`.
    fn into_rule(self) -> CoreResult<NatRule> {
        let protocol = NatProtocol::parse(&self.protocol)
            .map_err(|_| CoreError::SerializationError(format!("Invalid protocol: {}", self.protocol)))?;
        let host_port = u16::try_from(self.host_port)
            .map_err(|e| CoreError::SerializationError(format!("Invalid host_port: {e}")))?;
        let container_port = u16::try_from(self.container_port)
            .map_err(|e| CoreError::SerializationError(format!("Invalid container_port: {e}")))?;
        let created_at = datetime::parse_rfc3339(&self.created_at)
            .map_err(|e| CoreError::SerializationError(format!("Invalid created_at: {e}")))?;

        Ok(NatRule {
            id: self.id,
            hostname: self.hostname,
            protocol,
            host_port,
            container_port,
            created_at,
        })
    }
}

fn rule_to_active_model(rule: &NatRule) -> nat_rule::ActiveModel {
    nat_rule::ActiveModel {
        id: Set(rule.id.clone()),
        hostname: Set(rule.hostname.clone()),
        protocol: Set(rule.protocol.as_str().to_string()),
        host_port: Set(i32::from(rule.host_port)),
        container_port: Set(i32::from(rule.container_port)),
        created_at: Set(rule.created_at.to_rfc3339()),
    }
}

#[async_trait]
impl NatRuleRepository for SqliteStore {
    async fn find_by_hostname(&self, hostname: &str) -> CoreResult<Vec<NatRule>> {
        let rows = nat_rule::Entity::find()
            .filter(nat_rule::Column::Hostname.eq(hostname))
            .order_by_asc(nat_rule::Column::HostPort)
            .order_by_asc(nat_rule::Column::Protocol)
            .all(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query NAT rules: {e}")))?;

        rows.into_iter().map(nat_rule::Model::into_rule).collect()
    }

    async fn find(&self, key: &NatRuleKey) -> CoreResult<Option<NatRule>> {
        let row = nat_rule::Entity::find()
            .filter(nat_rule::Column::Hostname.eq(&key.hostname))
            .filter(nat_rule::Column::Protocol.eq(key.protocol.as_str()))
            .filter(nat_rule::Column::HostPort.eq(i32::from(key.host_port)))
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query NAT rule: {e}")))?;

        row.map(nat_rule::Model::into_rule).transpose()
    }

    async fn save(&self, rule: &NatRule) -> CoreResult<()> {
        // 冲突时只更新容器端口，保留原有 id 与 created_at
        nat_rule::Entity::insert(rule_to_active_model(rule))
            .on_conflict(
                OnConflict::columns([
                    nat_rule::Column::Hostname,
                    nat_rule::Column::Protocol,
                    nat_rule::Column::HostPort,
                ])
                .update_column(nat_rule::Column::ContainerPort)
                .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save NAT rule: {e}")))?;

        Ok(())
    }

    async fn delete(&self, key: &NatRuleKey) -> CoreResult<bool> {
        let result = nat_rule::Entity::delete_many()
            .filter(nat_rule::Column::Hostname.eq(&key.hostname))
            .filter(nat_rule::Column::Protocol.eq(key.protocol.as_str()))
            .filter(nat_rule::Column::HostPort.eq(i32::from(key.host_port)))
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to delete NAT rule: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
