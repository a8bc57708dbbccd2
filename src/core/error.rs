//! Agent 错误类型
//!
//! 抽取失败不是错误（对应条件字段为 None）；搜索为空由重试策略处理；
//! 无效优惠码是正常的否定结果。这里只保留真正的故障态。

use thiserror::Error;

/// Agent 运行过程中可能出现的错误
#[derive(Error, Debug)]
pub enum AgentError {
    /// 放宽重试要求先有价格上限；缺失说明规划器与重试策略不一致
    #[error("Relaxed retry requires a prior max_price bound")]
    MissingRetryBound,
}
