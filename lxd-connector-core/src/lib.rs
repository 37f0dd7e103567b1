//! LXD Connector Core Library
//!
//! Provides the provisioning lifecycle adapter and NAT rule manager used by
//! the panel connector:
//! - Lifecycle Service (create / sync / terminate / power / status / password / reinstall)
//! - NAT Rule Service (validated port forwards tracked in a panel-owned table)
//! - Node Service (connection test, container info)
//!
//! This library is platform-independent: the control API client and the
//! storage layer are injected through traits.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult, NatValidationError};
pub use services::{LifecycleService, NatRuleService, NodeService, ServiceContext};
pub use traits::{HostRepository, NatRuleRepository};
