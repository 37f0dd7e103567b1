//! Host record persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{HostRecord, HostUpdate};

/// Host Record Warehouse Trait
///
/// Platform implementation:
/// - `SqliteStore` (`SeaORM`, app crate)
/// - `MockHostRepository` (tests)
#[async_trait]
pub trait HostRepository: Send + Sync {
    /// Get host record based on panel host ID
    ///
    /// # Arguments
    /// * `host_id` - Panel host ID
    async fn find_by_id(&self, host_id: &str) -> CoreResult<Option<HostRecord>>;

    /// Save host record (new or update)
    ///
    /// # Arguments
    /// * `record` - Host record
    async fn save(&self, record: &HostRecord) -> CoreResult<()>;

    /// Apply an update built on a confirmed remote success
    ///
    /// Returns `CoreError::HostNotFound` when no record exists for `host_id`.
    ///
    /// # Arguments
    /// * `host_id` - Panel host ID
    /// * `update` - Fully populated update
    async fn apply_update(&self, host_id: &str, update: &HostUpdate) -> CoreResult<()>;
}
