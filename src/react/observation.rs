//! 观察摘要：把工具原始结果压成一行可读状态

use crate::tools::{PromoOutcome, ToolOutput};

/// 汇总一次工具调用的结果；纯函数
pub fn summarize(output: &ToolOutput) -> String {
    match output {
        ToolOutput::Products(products) => {
            if products.is_empty() {
                "No products found matching criteria".to_string()
            } else {
                format!("Found {} matching products", products.len())
            }
        }
        ToolOutput::Shipping(estimate) => format!(
            "Retrieved information: feasible: {}, cost: {}, estimated_delivery: {}, store: {}",
            estimate.feasible, estimate.cost, estimate.estimated_delivery, estimate.store
        ),
        ToolOutput::Promo(PromoOutcome::Applied { discount_percentage, final_price }) => format!(
            "Retrieved information: valid: true, discount_percentage: {}, final_price: {}",
            discount_percentage, final_price
        ),
        ToolOutput::Promo(PromoOutcome::Invalid { error }) => {
            format!("Retrieved information: valid: false, error: {}", error)
        }
        ToolOutput::PriceComparison(quotes) => format!(
            "Got result: {}",
            serde_json::to_string(quotes).unwrap_or_else(|_| "[]".to_string())
        ),
        ToolOutput::ReturnPolicy(policy) => match policy {
            Some(policy) => format!("Got result: {}", policy),
            None => "Got result: none".to_string(),
        },
    }
}
