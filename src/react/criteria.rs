//! 搜索条件抽取：固定规则，无副作用
//!
//! 规则相互独立：价格匹配 "under $<数字>"、尺码匹配 "size <词>"（转大写）、
//! 品类与颜色按固定词表顺序取第一个命中的子串。未命中即对应字段为 None。

use std::sync::OnceLock;

use regex::Regex;

use crate::react::context::SearchCriteria;

/// 品类词表，按优先级排列，先命中者生效
const PRODUCT_TYPES: [&str; 5] = ["skirt", "dress", "jacket", "sneakers", "shoes"];
/// 颜色词表，按优先级排列，先命中者生效
const COLORS: [&str; 5] = ["floral", "white", "black", "blue", "red"];

static PRICE_RE: OnceLock<Regex> = OnceLock::new();
static SIZE_RE: OnceLock<Regex> = OnceLock::new();

/// 从查询中抽取搜索条件；同一查询总是得到相同结果
pub fn extract_search_criteria(query: &str) -> SearchCriteria {
    let lower = query.to_lowercase();
    let mut criteria = SearchCriteria::default();

    let price_re = PRICE_RE.get_or_init(|| Regex::new(r"under \$(\d+)").unwrap());
    if let Some(caps) = price_re.captures(&lower) {
        criteria.max_price = caps[1].parse::<f64>().ok();
    }

    let size_re = SIZE_RE.get_or_init(|| Regex::new(r"size (\w+)").unwrap());
    if let Some(caps) = size_re.captures(&lower) {
        criteria.size = Some(caps[1].to_uppercase());
    }

    criteria.product_type = PRODUCT_TYPES
        .iter()
        .find(|t| lower.contains(**t))
        .map(|t| t.to_string());

    criteria.color = COLORS
        .iter()
        .find(|c| lower.contains(**c))
        .map(|c| c.to_string());

    criteria
}
