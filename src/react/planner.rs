//! 决策规划器：固定优先级议程，依据上下文给出下一步思考与动作
//!
//! 议程顺序：搜索 -> 配送 -> 优惠码 -> 结束；每条规则都有「尚未收集」守卫，
//! 保证每个工具在正常流程中至多调用一次（放宽重试是唯一例外）。

use std::sync::OnceLock;

use chrono::{DateTime, Duration, Local};
use regex::Regex;
use serde::Serialize;

use crate::react::context::QueryContext;

/// "Friday" 的固定替身：now + 5 天
const FRIDAY_LEAD_DAYS: i64 = 5;

static PROMO_CODE_RE: OnceLock<Regex> = OnceLock::new();

/// 一次工具调用请求，每个变体携带自己的类型化参数；
/// 序列化为 `{"tool": <snake_case>, "params": {...}}`
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "tool", content = "params", rename_all = "snake_case")]
pub enum Action {
    SearchProducts {
        query: String,
        max_price: Option<f64>,
        size: Option<String>,
        color: Option<String>,
    },
    EstimateShipping {
        store: String,
        target_date: DateTime<Local>,
    },
    CheckPromo {
        code: String,
        base_price: f64,
    },
    ComparePrices {
        product_name: String,
    },
    GetReturnPolicy {
        store: String,
    },
}

impl Action {
    pub fn tool_name(&self) -> &'static str {
        match self {
            Action::SearchProducts { .. } => "search_products",
            Action::EstimateShipping { .. } => "estimate_shipping",
            Action::CheckPromo { .. } => "check_promo",
            Action::ComparePrices { .. } => "compare_prices",
            Action::GetReturnPolicy { .. } => "get_return_policy",
        }
    }
}

/// 依据上下文决定下一步：返回思考文本与动作；动作为 None 表示可以作答
pub fn next_step(ctx: &QueryContext) -> (String, Option<Action>) {
    let query = ctx.query.to_lowercase();
    let criteria = &ctx.criteria;
    let collected = &ctx.collected;

    // 第一步总是商品搜索
    if collected.search_products.is_none() {
        let thought = format!(
            "User is searching for a {} with criteria: {}",
            criteria.product_type.as_deref().unwrap_or("product"),
            criteria.summary()
        );
        let action = Action::SearchProducts {
            query: ctx.query.clone(),
            max_price: criteria.max_price,
            size: criteria.size.clone(),
            color: criteria.color.clone(),
        };
        return (thought, Some(action));
    }

    // 提到截止日期且尚未估算配送，要求已有非空搜索结果
    if (query.contains("arrive by") || query.contains("by friday"))
        && collected.estimate_shipping.is_none()
    {
        if let Some(products) = &collected.search_products {
            if let Some(first) = products.first() {
                let thought =
                    "User needs this by a specific date. Checking shipping feasibility.".to_string();
                let action = Action::EstimateShipping {
                    store: first.store.clone(),
                    target_date: Local::now() + Duration::days(FRIDAY_LEAD_DAYS),
                };
                return (thought, Some(action));
            }
        }
    }

    // 提到优惠码且尚未校验，要求已有非空搜索结果
    if query.contains("code") && collected.check_promo.is_none() {
        if let Some(products) = &collected.search_products {
            if let Some(first) = products.first() {
                let re = PROMO_CODE_RE
                    .get_or_init(|| Regex::new(r#"(?i)code ['"](\w+)['"]"#).unwrap());
                let code = re
                    .captures(&ctx.query)
                    .map(|caps| caps[1].to_string())
                    .unwrap_or_default();
                let thought = "Found products. Checking promo code validity.".to_string();
                let action = Action::CheckPromo {
                    code,
                    base_price: first.price,
                };
                return (thought, Some(action));
            }
        }
    }

    (
        "Have gathered all necessary information. Ready to provide final response.".to_string(),
        None,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{Product, ToolOutput};

    fn sneaker() -> Product {
        Product {
            name: "White Canvas Sneakers".to_string(),
            price: 65.99,
            size: "8".to_string(),
            color: "white".to_string(),
            store: "ShoeMart".to_string(),
            in_stock: true,
        }
    }

    #[test]
    fn test_first_step_is_always_search() {
        let ctx = QueryContext::new("white sneakers size 8 under $70 arrive by friday code 'SAVE10'");
        let (thought, action) = next_step(&ctx);
        assert!(thought.contains("searching for a sneakers"));
        assert!(matches!(action, Some(Action::SearchProducts { .. })));
    }

    #[test]
    fn test_search_action_carries_criteria() {
        let ctx = QueryContext::new("I need white sneakers size 8 under $70");
        let (_, action) = next_step(&ctx);
        match action {
            Some(Action::SearchProducts { query, max_price, size, color }) => {
                assert_eq!(query, "I need white sneakers size 8 under $70");
                assert_eq!(max_price, Some(70.0));
                assert_eq!(size.as_deref(), Some("8"));
                assert_eq!(color.as_deref(), Some("white"));
            }
            other => panic!("expected search action, got {:?}", other),
        }
    }

    #[test]
    fn test_shipping_requires_nonempty_search() {
        let mut ctx = QueryContext::new("sneakers that arrive by friday");
        ctx.collected.store(ToolOutput::Products(vec![]));
        let (_, action) = next_step(&ctx);
        assert!(action.is_none());
    }

    #[test]
    fn test_shipping_uses_first_result_store() {
        let mut ctx = QueryContext::new("white sneakers that can arrive by Friday");
        ctx.collected.store(ToolOutput::Products(vec![sneaker()]));
        let (thought, action) = next_step(&ctx);
        assert!(thought.contains("shipping feasibility"));
        match action {
            Some(Action::EstimateShipping { store, target_date }) => {
                assert_eq!(store, "ShoeMart");
                assert!(target_date > Local::now());
            }
            other => panic!("expected shipping action, got {:?}", other),
        }
    }

    #[test]
    fn test_promo_extracts_quoted_code() {
        let mut ctx = QueryContext::new("sneakers with discount code 'SAVE10' please");
        ctx.collected.store(ToolOutput::Products(vec![sneaker()]));
        let (_, action) = next_step(&ctx);
        match action {
            Some(Action::CheckPromo { code, base_price }) => {
                assert_eq!(code, "SAVE10");
                assert!((base_price - 65.99).abs() < f64::EPSILON);
            }
            other => panic!("expected promo action, got {:?}", other),
        }
    }

    #[test]
    fn test_promo_without_quoted_token_sends_empty_code() {
        let mut ctx = QueryContext::new("sneakers, any discount code available?");
        ctx.collected.store(ToolOutput::Products(vec![sneaker()]));
        let (_, action) = next_step(&ctx);
        assert!(matches!(action, Some(Action::CheckPromo { code, .. }) if code.is_empty()));
    }

    #[test]
    fn test_done_when_nothing_left_to_gather() {
        let mut ctx = QueryContext::new("Looking for a floral dress under $150");
        ctx.collected.store(ToolOutput::Products(vec![sneaker()]));
        let (thought, action) = next_step(&ctx);
        assert!(thought.contains("Ready to provide final response"));
        assert!(action.is_none());
    }
}
