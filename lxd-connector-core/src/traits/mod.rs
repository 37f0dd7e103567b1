//! Storage layer abstraction trait definition

mod host_repository;
mod nat_rule_repository;

pub use host_repository::HostRepository;
pub use nat_rule_repository::NatRuleRepository;
