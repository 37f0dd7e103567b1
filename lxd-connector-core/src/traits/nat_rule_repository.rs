//! NAT rule persistence abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::{NatRule, NatRuleKey};

/// NAT Rule Warehouse Trait
///
/// Rules are identified by their natural key `(hostname, protocol, host_port)`.
#[async_trait]
pub trait NatRuleRepository: Send + Sync {
    /// All rules of one container, ordered by host port
    async fn find_by_hostname(&self, hostname: &str) -> CoreResult<Vec<NatRule>>;

    /// Look up a rule by natural key
    async fn find(&self, key: &NatRuleKey) -> CoreResult<Option<NatRule>>;

    /// Save rule (upsert on natural key; an existing row keeps its `id` and `created_at`)
    async fn save(&self, rule: &NatRule) -> CoreResult<()>;

    /// Delete rule by natural key, returns whether a row was removed
    async fn delete(&self, key: &NatRuleKey) -> CoreResult<bool>;
}
