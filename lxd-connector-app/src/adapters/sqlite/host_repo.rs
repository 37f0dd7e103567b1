//! `HostRepository` implementation for `SqliteStore`.

use async_trait::async_trait;
use sea_orm::{ActiveValue::Set, EntityTrait, sea_query::OnConflict};

use lxd_connector_core::error::{CoreError, CoreResult};
use lxd_connector_core::traits::HostRepository;
use lxd_connector_core::types::{HostRecord, HostStatus, HostUpdate};

use super::SqliteStore;
use super::entity::host;

impl host::Model {
    fn into_record(self) -> HostRecord {
        HostRecord {
            host_id: self.host_id,
            domain: self.domain,
            dedicated_ip: self.dedicated_ip,
            domain_status: HostStatus::parse(&self.domain_status),
            username: self.username,
            password: self.password,
        }
    }
}

fn record_to_active_model(record: &HostRecord) -> host::ActiveModel {
    host::ActiveModel {
        host_id: Set(record.host_id.clone()),
        domain: Set(record.domain.clone()),
        dedicated_ip: Set(record.dedicated_ip.clone()),
        domain_status: Set(record.domain_status.as_str().to_string()),
        username: Set(record.username.clone()),
        password: Set(record.password.clone()),
        updated_at: Set(chrono::Utc::now().to_rfc3339()),
    }
}

#[async_trait]
impl HostRepository for SqliteStore {
    async fn find_by_id(&self, host_id: &str) -> CoreResult<Option<HostRecord>> {
        let row = host::Entity::find_by_id(host_id.to_string())
            .one(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to query host: {e}")))?;

        Ok(row.map(host::Model::into_record))
    }

    async fn save(&self, record: &HostRecord) -> CoreResult<()> {
        host::Entity::insert(record_to_active_model(record))
            .on_conflict(
                OnConflict::column(host::Column::HostId)
                    .update_columns([
                        host::Column::Domain,
                        host::Column::DedicatedIp,
                        host::Column::DomainStatus,
                        host::Column::Username,
                        host::Column::Password,
                        host::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(|e| CoreError::StorageError(format!("Failed to save host: {e}")))?;

        Ok(())
    }

    async fn apply_update(&self, host_id: &str, update: &HostUpdate) -> CoreResult<()> {
        let mut record = HostRepository::find_by_id(self, host_id)
            .await?
            .ok_or_else(|| CoreError::HostNotFound(host_id.to_string()))?;

        update.apply_to(&mut record);
        HostRepository::save(self, &record).await?;

        log::debug!(
            "Host {host_id} updated: status={}, ip={:?}",
            record.domain_status,
            record.dedicated_ip
        );
        Ok(())
    }
}
