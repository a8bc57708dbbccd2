//! 单次查询的上下文与输出报告
//!
//! QueryContext 由主循环独占持有，随查询创建、随查询丢弃；
//! CollectedInfo 对每个工具只保留最近一次结果（再次调用覆盖旧值）。

use serde::Serialize;

use crate::react::criteria::extract_search_criteria;
use crate::tools::{PriceQuote, Product, PromoOutcome, ShippingEstimate, ToolOutput};

/// 从查询中抽取的搜索条件；None 表示该维度不受约束
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub max_price: Option<f64>,
    pub size: Option<String>,
    pub color: Option<String>,
    pub product_type: Option<String>,
}

impl SearchCriteria {
    /// 已设置的条件键值对（不含 product_type），按抽取顺序排列
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        let mut entries = Vec::new();
        if let Some(max_price) = self.max_price {
            entries.push(("max_price", max_price.to_string()));
        }
        if let Some(size) = &self.size {
            entries.push(("size", size.clone()));
        }
        if let Some(color) = &self.color {
            entries.push(("color", color.clone()));
        }
        entries
    }

    /// 以 `key: value` 逗号连接的条件摘要（不含 product_type）
    pub fn summary(&self) -> String {
        self.entries()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, value))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// 各工具的最近一次结果；None 表示尚未调用
#[derive(Debug, Default)]
pub struct CollectedInfo {
    pub search_products: Option<Vec<Product>>,
    pub estimate_shipping: Option<ShippingEstimate>,
    pub check_promo: Option<PromoOutcome>,
    pub compare_prices: Option<Vec<PriceQuote>>,
    pub get_return_policy: Option<Option<String>>,
}

impl CollectedInfo {
    /// 按工具归档结果；同一工具的旧结果被覆盖
    pub fn store(&mut self, output: ToolOutput) {
        match output {
            ToolOutput::Products(products) => self.search_products = Some(products),
            ToolOutput::Shipping(estimate) => self.estimate_shipping = Some(estimate),
            ToolOutput::Promo(outcome) => self.check_promo = Some(outcome),
            ToolOutput::PriceComparison(quotes) => self.compare_prices = Some(quotes),
            ToolOutput::ReturnPolicy(policy) => self.get_return_policy = Some(policy),
        }
    }
}

/// 单次查询的可变状态：原始查询、搜索条件、已收集结果、最近观察
#[derive(Debug)]
pub struct QueryContext {
    pub query: String,
    pub criteria: SearchCriteria,
    pub collected: CollectedInfo,
    pub last_observation: Option<String>,
}

impl QueryContext {
    /// 创建上下文并一次性抽取搜索条件（此后不再重抽）
    pub fn new(query: &str) -> Self {
        Self {
            query: query.to_string(),
            criteria: extract_search_criteria(query),
            collected: CollectedInfo::default(),
            last_observation: None,
        }
    }
}

/// 已执行动作的记录：动作描述（JSON）与观察摘要
#[derive(Debug, Clone, Serialize)]
pub struct ActionRecord {
    pub action: serde_json::Value,
    pub result: String,
}

/// 一次 process_query 的完整输出：思考链、动作日志与最终应答
#[derive(Debug, Default, Serialize)]
pub struct QueryReport {
    pub reasoning_chain: Vec<String>,
    pub actions_taken: Vec<ActionRecord>,
    pub final_response: String,
}
