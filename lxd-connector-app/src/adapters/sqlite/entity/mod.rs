//! `SeaORM` entities backing `SqliteStore`.

pub mod host;
pub mod nat_rule;
