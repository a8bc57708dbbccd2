//! 动作执行器
//!
//! 在 Action 枚举上做类型化分发调用目录服务，未知工具一类故障在类型层面不存在；
//! 每次调用输出结构化审计日志（JSON）。

use std::time::Instant;

use crate::react::planner::Action;
use crate::tools::{CatalogService, PriceQuote, Product, PromoOutcome, ShippingEstimate};

/// 工具调用的原始结果，与 Action 变体一一对应
#[derive(Debug, Clone)]
pub enum ToolOutput {
    Products(Vec<Product>),
    Shipping(ShippingEstimate),
    Promo(PromoOutcome),
    PriceComparison(Vec<PriceQuote>),
    ReturnPolicy(Option<String>),
}

/// 动作执行器：持有目录服务，按动作变体分发
pub struct ToolExecutor {
    catalog: CatalogService,
}

impl ToolExecutor {
    pub fn new(catalog: CatalogService) -> Self {
        Self { catalog }
    }

    /// 执行指定动作并返回原始结果；输出 JSON 审计日志
    pub fn execute(&self, action: &Action) -> ToolOutput {
        let start = Instant::now();
        let output = match action {
            Action::SearchProducts { query, max_price, size, color } => {
                ToolOutput::Products(self.catalog.search_products(
                    query,
                    *max_price,
                    size.as_deref(),
                    color.as_deref(),
                ))
            }
            Action::EstimateShipping { store, target_date } => {
                ToolOutput::Shipping(self.catalog.estimate_shipping(store, *target_date))
            }
            Action::CheckPromo { code, base_price } => {
                ToolOutput::Promo(self.catalog.check_promo(code, *base_price))
            }
            Action::ComparePrices { product_name } => {
                ToolOutput::PriceComparison(self.catalog.compare_prices(product_name))
            }
            Action::GetReturnPolicy { store } => {
                ToolOutput::ReturnPolicy(self.catalog.get_return_policy(store))
            }
        };

        let duration_ms = start.elapsed().as_millis() as u64;
        let audit = serde_json::json!({
            "event": "tool_audit",
            "tool": action.tool_name(),
            "duration_ms": duration_ms,
            "args_preview": args_preview(action),
        });
        tracing::info!(audit = %audit.to_string(), "tool");

        output
    }
}

fn args_preview(action: &Action) -> String {
    let s = serde_json::to_string(action).unwrap_or_default();
    if s.len() > 200 {
        format!("{}...", s.chars().take(200).collect::<String>())
    } else {
        s
    }
}
