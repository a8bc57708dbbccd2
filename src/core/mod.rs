//! 核心类型：Agent 错误

pub mod error;

pub use error::AgentError;
