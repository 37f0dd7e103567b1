//! 类型定义模块

mod host;
mod nat;
mod operation;
mod params;
mod profile;
mod provision;
mod response;

pub use host::{HostRecord, HostStatus, HostUpdate};
pub use nat::{
    CONTAINER_PORT_RANGE, HOST_PORT_RANGE, NatMapping, NatProtocol, NatRule, NatRuleKey,
};
pub use operation::Operation;
pub use params::{ConfigOptions, NatForm, PanelParams, option_keys};
pub use profile::{ConnectorProfile, DEFAULT_API_PREFIX};
pub use provision::{GENERATED_PASSWORD_LEN, ProvisionRequest, generate_password};
pub use response::{
    ConnectionCheck, ErrorKind, ModuleResult, PowerState, PowerStatus, ResultStatus,
};
