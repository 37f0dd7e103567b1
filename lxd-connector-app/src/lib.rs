//! Application bootstrap for the LXD panel connector.
//!
//! Provides `AppConfig` (TOML configuration), `AppState` (service container)
//! and `AppStateBuilder` (adapter injection).

pub mod adapters;
pub mod config;

use std::sync::Arc;

use lxd_connector_client::ControlClient;
use lxd_connector_core::error::{CoreError, CoreResult};
use lxd_connector_core::services::{
    LifecycleService, NatRuleService, NodeService, ServiceContext,
};
use lxd_connector_core::traits::{HostRepository, NatRuleRepository};
use lxd_connector_core::types::{ConnectorProfile, HostRecord, PanelParams};

pub use config::AppConfig;

/// Application state.
///
/// Holds all services and the `ServiceContext`. The hook binary constructs
/// this once per panel event via `AppStateBuilder` or `AppState::from_config`.
pub struct AppState {
    /// Service context (client, storage adapters, profile)
    pub ctx: Arc<ServiceContext>,
    /// Lifecycle service
    pub lifecycle_service: LifecycleService,
    /// NAT rule service
    pub nat_rule_service: NatRuleService,
    /// Node service
    pub node_service: NodeService,
}

impl AppState {
    /// Build the state from configuration: HTTP client + `SQLite` store.
    #[cfg(feature = "sqlite-store")]
    pub async fn from_config(config: &AppConfig) -> CoreResult<Self> {
        let client = lxd_connector_client::HttpControlClient::new(config.client_config())?;
        let store = Arc::new(adapters::SqliteStore::new(&config.database.path).await?);
        let profile = config.profile()?;

        log::info!(
            "Connector profile {} ({}), database {}",
            profile.id,
            profile.display_name,
            config.database.path.display()
        );

        AppStateBuilder::new()
            .client(Arc::new(client))
            .host_repository(store.clone())
            .nat_rule_repository(store)
            .profile(profile)
            .build()
    }

    /// Ensure a host record exists for the panel host, registering it as
    /// `Pending` when it is first seen.
    pub async fn register_host(&self, params: &PanelParams) -> CoreResult<HostRecord> {
        if let Some(record) = self.ctx.host_repository.find_by_id(&params.host_id).await? {
            return Ok(record);
        }

        let record = HostRecord::pending(&params.host_id, &params.domain);
        self.ctx.host_repository.save(&record).await?;
        log::info!("Registered host {} ({})", params.host_id, params.domain);
        Ok(record)
    }
}

/// Builder for constructing `AppState` with platform-specific adapters.
///
/// # Required adapters
/// - `client`: control API client
/// - `host_repository`: how host records are stored
/// - `nat_rule_repository`: how NAT rules are stored
///
/// # Optional
/// - `profile`: defaults to `ConnectorProfile::lxd_server()`
pub struct AppStateBuilder {
    client: Option<Arc<dyn ControlClient>>,
    host_repository: Option<Arc<dyn HostRepository>>,
    nat_rule_repository: Option<Arc<dyn NatRuleRepository>>,
    profile: Option<ConnectorProfile>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            client: None,
            host_repository: None,
            nat_rule_repository: None,
            profile: None,
        }
    }

    #[must_use]
    pub fn client(mut self, client: Arc<dyn ControlClient>) -> Self {
        self.client = Some(client);
        self
    }

    #[must_use]
    pub fn host_repository(mut self, repo: Arc<dyn HostRepository>) -> Self {
        self.host_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn nat_rule_repository(mut self, repo: Arc<dyn NatRuleRepository>) -> Self {
        self.nat_rule_repository = Some(repo);
        self
    }

    #[must_use]
    pub fn profile(mut self, profile: ConnectorProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if required adapters are missing.
    pub fn build(self) -> CoreResult<AppState> {
        let client = self
            .client
            .ok_or_else(|| CoreError::ValidationError("client is required".to_string()))?;
        let host_repository = self.host_repository.ok_or_else(|| {
            CoreError::ValidationError("host_repository is required".to_string())
        })?;
        let nat_rule_repository = self.nat_rule_repository.ok_or_else(|| {
            CoreError::ValidationError("nat_rule_repository is required".to_string())
        })?;
        let profile = self.profile.unwrap_or_default();

        let ctx = Arc::new(ServiceContext::new(
            client,
            host_repository,
            nat_rule_repository,
            profile,
        ));

        Ok(AppState {
            lifecycle_service: LifecycleService::new(Arc::clone(&ctx)),
            nat_rule_service: NatRuleService::new(Arc::clone(&ctx)),
            node_service: NodeService::new(Arc::clone(&ctx)),
            ctx,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
