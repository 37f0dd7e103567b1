//! Event dispatch: one panel event -> one service call -> one JSON document.

use std::io::Read;

use anyhow::Context;
use lxd_connector_app::AppState;
use lxd_connector_core::types::{ErrorKind, ModuleResult, PanelParams};
use serde_json::Value;

use crate::cli::Event;

/// Exit status for a success result.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status for an error result (the document on stdout says why).
pub const EXIT_ERROR_RESULT: u8 = 1;
/// Exit status when config, stdin or storage could not be set up.
pub const EXIT_BOOTSTRAP_FAILURE: u8 = 2;

/// What the hook prints and how it exits.
#[derive(Debug)]
pub struct EventOutcome {
    pub body: Value,
    pub success: bool,
}

impl EventOutcome {
    fn from_module(result: &ModuleResult) -> anyhow::Result<Self> {
        Ok(Self {
            body: serde_json::to_value(result)?,
            success: result.is_success(),
        })
    }

    pub fn exit_status(&self) -> u8 {
        if self.success {
            EXIT_SUCCESS
        } else {
            EXIT_ERROR_RESULT
        }
    }
}

/// Parse the parameter bundle the panel writes to stdin.
pub fn read_params(mut reader: impl Read) -> anyhow::Result<PanelParams> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .context("Failed to read parameter bundle from stdin")?;
    serde_json::from_str(&raw).context("Invalid parameter bundle")
}

/// `meta` needs no parameter bundle.
pub fn needs_params(event: &Event) -> bool {
    !matches!(event, Event::Meta)
}

/// Module metadata: the active connector profile.
pub fn metadata(state: &AppState) -> anyhow::Result<EventOutcome> {
    Ok(EventOutcome {
        body: serde_json::to_value(&state.ctx.profile)?,
        success: true,
    })
}

pub async fn dispatch(
    state: &AppState,
    event: &Event,
    params: &PanelParams,
) -> anyhow::Result<EventOutcome> {
    if let Some(op) = event.host_operation() {
        if let Err(e) = state.register_host(params).await {
            tracing::error!("Failed to register host {}: {}", params.host_id, e);
            let result = ModuleResult::error(
                ErrorKind::Storage,
                op.failure_message(),
                Some(e.to_string()),
            );
            return EventOutcome::from_module(&result);
        }
    }

    let lifecycle = &state.lifecycle_service;
    let nat = &state.nat_rule_service;

    let result = match event {
        Event::Meta => return metadata(state),
        Event::TestLink => {
            let check = state.node_service.test_connection(params).await;
            return Ok(EventOutcome {
                success: check.server_status == 1,
                body: serde_json::to_value(&check)?,
            });
        }
        Event::Create => lifecycle.create(params).await,
        Event::Sync => lifecycle.sync(params).await,
        Event::Terminate => lifecycle.terminate(params).await,
        Event::On => lifecycle.power_on(params).await,
        Event::Off => lifecycle.power_off(params).await,
        Event::Reboot => lifecycle.reboot(params).await,
        Event::Status => lifecycle.status(params).await,
        Event::Password { new_password } => lifecycle.reset_password(params, new_password).await,
        Event::Reinstall => lifecycle.reinstall(params).await,
        Event::Info => state.node_service.container_info(params).await,
        Event::NatList => nat.list_rules(&params.domain).await,
        Event::NatAdd => nat.add_rule_from_form(params).await,
        Event::NatDel => nat.remove_rule_from_form(params).await,
        Event::NatRemote => nat.remote_nat_rules(params).await,
    };

    EventOutcome::from_module(&result)
}

#[cfg(test)]
#[path = "test_mocks.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
pub(crate) mod test_mocks;

#[cfg(test)]
#[path = "dispatch_tests.rs"]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests;
