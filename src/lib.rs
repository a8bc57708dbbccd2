//! Shopmate - Rust 购物助手智能体
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: Agent 错误类型
//! - **observability**: tracing 日志初始化
//! - **react**: 条件抽取、决策规划、ReAct 主循环、最终应答合成
//! - **tools**: 内存商品目录（搜索 / 配送 / 优惠码 / 比价 / 退货政策）与执行器

pub mod config;
pub mod core;
pub mod observability;
pub mod react;
pub mod tools;

pub use react::{process_query, QueryReport};
pub use tools::ToolExecutor;
