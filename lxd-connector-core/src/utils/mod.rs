//! 工具模块

pub mod datetime;
pub mod lenient;
