//! 最终应答合成：把收集到的上下文渲染成自然语言回复
//!
//! 无搜索结果时直接致歉并列出条件（此时不渲染优惠/配送段落）；
//! 否则按固定顺序输出：商品列表、优惠码结果、配送信息。

use crate::react::context::QueryContext;
use crate::tools::PromoOutcome;

/// 依据最终上下文合成回复；纯函数
pub fn format_final_response(ctx: &QueryContext) -> String {
    let criteria = &ctx.criteria;
    let products = ctx.collected.search_products.as_deref().unwrap_or(&[]);

    if products.is_empty() {
        let mut response = String::from("I couldn't find any exact matches for your search. ");
        response.push_str(&format!(
            "I looked for a {} with these criteria:\n",
            criteria.product_type.as_deref().unwrap_or("product")
        ));
        for (key, value) in criteria.entries() {
            response.push_str(&format!("- {}: {}\n", key, value));
        }
        response.push_str("\nWould you like me to try with broader criteria or different options?");
        return response;
    }

    let mut parts: Vec<String> = Vec::new();

    parts.push(format!("Found {} matching product(s):", products.len()));
    for product in products {
        parts.push(format!("\n- {}", product.name));
        parts.push(format!("  Price: ${:.2}", product.price));
        parts.push(format!("  Store: {}", product.store));
        parts.push(format!("  Size: {}", product.size));
        parts.push(format!(
            "  In Stock: {}",
            if product.in_stock { "Yes" } else { "No" }
        ));
    }

    if let Some(promo) = &ctx.collected.check_promo {
        match promo {
            PromoOutcome::Applied { discount_percentage, final_price } => {
                parts.push("\nPromo code applied!".to_string());
                parts.push(format!(
                    "Final price after {:.1}% discount: ${:.2}",
                    discount_percentage, final_price
                ));
            }
            PromoOutcome::Invalid { .. } => {
                parts.push("\nThe provided promo code is invalid.".to_string());
            }
        }
    }

    if let Some(shipping) = &ctx.collected.estimate_shipping {
        parts.push("\nShipping Details:".to_string());
        parts.push(format!("- Cost: ${:.2}", shipping.cost));
        parts.push(format!("- Estimated delivery: {}", shipping.estimated_delivery));
        parts.push(format!(
            "- Can meet deadline: {}",
            if shipping.feasible { "Yes" } else { "No" }
        ));
    }

    parts.join("\n")
}
