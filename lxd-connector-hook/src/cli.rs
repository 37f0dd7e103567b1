//! Command line surface of the hook binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lxd_connector_core::types::Operation;

#[derive(Debug, Parser)]
#[command(name = "lxd-connector-hook")]
#[command(
    about = "LXD panel connector hook - reads the parameter bundle from stdin, prints the result as JSON",
    long_about = None
)]
pub struct Cli {
    /// Configuration file (TOML); a missing file means defaults
    #[arg(short, long, default_value = "lxd-connector.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub event: Event,
}

/// Panel events, one per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Event {
    /// Module metadata (display name, API version, help doc)
    Meta,
    /// Check node reachability and API key
    TestLink,
    /// Provision the container
    Create,
    /// Re-read provisioning info from the node
    Sync,
    /// Delete the container
    Terminate,
    /// Power on
    On,
    /// Power off
    Off,
    /// Reboot
    Reboot,
    /// Query power state
    Status,
    /// Reset the root password
    Password {
        /// New password
        #[arg(long)]
        new_password: String,
    },
    /// Reinstall with the bundle's `reinstallOs`
    Reinstall,
    /// Fetch container details
    Info,
    /// NAT rules tracked by the panel
    NatList,
    /// Add a NAT rule from the bundle's `natForm`
    NatAdd,
    /// Remove a NAT rule from the bundle's `natForm`
    NatDel,
    /// NAT rules as reported by the node
    NatRemote,
}

impl Event {
    /// Operation of events that need the panel host recorded before the
    /// node is called.
    pub fn host_operation(&self) -> Option<Operation> {
        match self {
            Self::Create => Some(Operation::Create),
            Self::Sync => Some(Operation::Sync),
            _ => None,
        }
    }
}
