//! 商品目录服务：固定数据集上的搜索、配送估算、优惠码校验、比价与退货政策查询
//!
//! 数据全部驻留内存；库存标志与配送时间/运费是模拟随机量，调用方不应假设
//! 两次同参调用返回一致结果。

use std::collections::HashMap;

use chrono::{DateTime, Duration, Local};
use rand::Rng;
use serde::Serialize;

use crate::config::CatalogSection;

/// 商品记录：目录构造，核心侧只读
#[derive(Debug, Clone, Serialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub size: String,
    pub color: String,
    pub store: String,
    pub in_stock: bool,
}

impl Product {
    fn new(name: &str, price: f64, size: &str, color: &str, store: &str) -> Self {
        Self {
            name: name.to_string(),
            price,
            size: size.to_string(),
            color: color.to_string(),
            store: store.to_string(),
            // 库存是模拟量，构造时随机
            in_stock: rand::thread_rng().gen_bool(0.5),
        }
    }
}

/// 配送估算结果
#[derive(Debug, Clone, Serialize)]
pub struct ShippingEstimate {
    pub feasible: bool,
    pub cost: f64,
    pub estimated_delivery: String,
    pub store: String,
}

/// 优惠码校验结果：有效时给出折扣与到手价，无效时给出原因
#[derive(Debug, Clone, Serialize)]
pub enum PromoOutcome {
    Applied { discount_percentage: f64, final_price: f64 },
    Invalid { error: String },
}

/// 比价条目
#[derive(Debug, Clone, Serialize)]
pub struct PriceQuote {
    pub store: String,
    pub price: f64,
    pub product_name: String,
}

/// 商品目录服务：持有商品表、优惠码表与退货政策表
pub struct CatalogService {
    products: Vec<Product>,
    promo_codes: HashMap<&'static str, f64>,
    return_policies: HashMap<&'static str, &'static str>,
    config: CatalogSection,
}

impl Default for CatalogService {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogService {
    pub fn new() -> Self {
        Self::with_config(CatalogSection::default())
    }

    pub fn with_config(config: CatalogSection) -> Self {
        let products = vec![
            Product::new("Floral A-Line Skirt", 35.99, "S", "floral", "FashionStore"),
            Product::new("Floral Pleated Skirt", 42.99, "S", "floral", "StyleHub"),
            Product::new("White Canvas Sneakers", 65.99, "8", "white", "ShoeMart"),
            Product::new("White Running Shoes", 69.99, "8", "white", "SportStyle"),
            Product::new("Classic Denim Jacket", 79.99, "M", "blue", "DenimCo"),
            Product::new("Vintage Denim Jacket", 72.99, "M", "blue", "VintageStyle"),
            Product::new("Black Cocktail Dress", 129.99, "M", "black", "EveningWear"),
            Product::new("Floral Summer Skirt", 38.99, "S", "floral", "StyleHub"),
            Product::new("White Fashion Sneakers", 68.99, "8", "white", "FashionFeet"),
            Product::new("Black Evening Dress", 145.99, "S", "black", "ElegantWear"),
        ];

        let promo_codes = HashMap::from([("SAVE10", 0.10), ("SPRING20", 0.20), ("SUMMER15", 0.15)]);

        let return_policies = HashMap::from([
            ("FashionStore", "30-day returns with original tags. Free returns."),
            ("StyleHub", "14-day returns. Customer pays return shipping."),
            ("ShoeMart", "60-day returns. Free returns with membership."),
            ("DenimCo", "45-day returns. Free in-store returns."),
            ("EveningWear", "7-day returns for unworn items only."),
            ("FashionFeet", "30-day returns, free shipping."),
            ("ElegantWear", "21-day returns for unworn items."),
        ]);

        Self {
            products,
            promo_codes,
            return_policies,
            config,
        }
    }

    /// 按条件搜索商品：价格上限、尺码精确匹配（忽略大小写）、颜色子串匹配；
    /// None 表示对应维度不过滤
    pub fn search_products(
        &self,
        _query: &str,
        max_price: Option<f64>,
        size: Option<&str>,
        color: Option<&str>,
    ) -> Vec<Product> {
        self.products
            .iter()
            .filter(|product| {
                if let Some(max_price) = max_price {
                    if product.price > max_price {
                        return false;
                    }
                }
                if let Some(size) = size {
                    if !size.eq_ignore_ascii_case(&product.size) {
                        return false;
                    }
                }
                if let Some(color) = color {
                    if !product.color.to_lowercase().contains(&color.to_lowercase()) {
                        return false;
                    }
                }
                true
            })
            .cloned()
            .collect()
    }

    /// 估算配送：随机出库天数与运费，判断能否在 target_date 前送达
    pub fn estimate_shipping(&self, store: &str, target_date: DateTime<Local>) -> ShippingEstimate {
        let mut rng = rand::thread_rng();
        let days_to_deliver =
            rng.gen_range(self.config.delivery_days_min..=self.config.delivery_days_max);
        let estimated_delivery = Local::now() + Duration::days(days_to_deliver);
        let shipping_cost =
            rng.gen_range(self.config.shipping_cost_min..=self.config.shipping_cost_max);

        ShippingEstimate {
            feasible: estimated_delivery <= target_date,
            cost: round2(shipping_cost),
            estimated_delivery: estimated_delivery.format("%Y-%m-%d").to_string(),
            store: store.to_string(),
        }
    }

    /// 校验优惠码并计算到手价
    pub fn check_promo(&self, code: &str, base_price: f64) -> PromoOutcome {
        match self.promo_codes.get(code) {
            Some(discount) => PromoOutcome::Applied {
                discount_percentage: discount * 100.0,
                final_price: round2(base_price * (1.0 - discount)),
            },
            None => PromoOutcome::Invalid {
                error: "Invalid promo code".to_string(),
            },
        }
    }

    /// 按名称子串跨店铺比价
    pub fn compare_prices(&self, product_name: &str) -> Vec<PriceQuote> {
        let needle = product_name.to_lowercase();
        self.products
            .iter()
            .filter(|product| product.name.to_lowercase().contains(&needle))
            .map(|product| PriceQuote {
                store: product.store.clone(),
                price: product.price,
                product_name: product.name.clone(),
            })
            .collect()
    }

    /// 查询指定店铺的退货政策
    pub fn get_return_policy(&self, store: &str) -> Option<String> {
        self.return_policies.get(store).map(|policy| policy.to_string())
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_by_price_size_color() {
        let catalog = CatalogService::new();
        let results = catalog.search_products("white sneakers", Some(70.0), Some("8"), Some("white"));
        assert_eq!(results.len(), 3);
        assert!(results.iter().all(|p| p.price <= 70.0 && p.size == "8"));
    }

    #[test]
    fn test_search_size_case_insensitive() {
        let catalog = CatalogService::new();
        let results = catalog.search_products("skirt", None, Some("s"), Some("floral"));
        assert_eq!(results.len(), 3);
    }

    #[test]
    fn test_search_unconstrained_returns_all() {
        let catalog = CatalogService::new();
        let results = catalog.search_products("anything", None, None, None);
        assert_eq!(results.len(), 10);
    }

    #[test]
    fn test_search_no_match() {
        let catalog = CatalogService::new();
        let results = catalog.search_products("red shoes", None, None, Some("red"));
        assert!(results.is_empty());
    }

    #[test]
    fn test_check_promo_valid() {
        let catalog = CatalogService::new();
        match catalog.check_promo("SAVE10", 100.0) {
            PromoOutcome::Applied { discount_percentage, final_price } => {
                assert!((discount_percentage - 10.0).abs() < f64::EPSILON);
                assert!((final_price - 90.0).abs() < f64::EPSILON);
            }
            PromoOutcome::Invalid { .. } => panic!("SAVE10 should be valid"),
        }
    }

    #[test]
    fn test_check_promo_invalid() {
        let catalog = CatalogService::new();
        match catalog.check_promo("BOGUS", 100.0) {
            PromoOutcome::Invalid { error } => assert_eq!(error, "Invalid promo code"),
            PromoOutcome::Applied { .. } => panic!("BOGUS should be invalid"),
        }
    }

    #[test]
    fn test_estimate_shipping_within_generous_deadline() {
        let catalog = CatalogService::new();
        let estimate = catalog.estimate_shipping("ShoeMart", Local::now() + Duration::days(30));
        assert!(estimate.feasible);
        assert!(estimate.cost >= 5.99 && estimate.cost <= 15.99);
        assert_eq!(estimate.estimated_delivery.len(), 10);
        assert_eq!(estimate.store, "ShoeMart");
    }

    #[test]
    fn test_compare_prices_substring() {
        let catalog = CatalogService::new();
        let quotes = catalog.compare_prices("denim jacket");
        assert_eq!(quotes.len(), 2);
        assert!(quotes.iter().any(|q| q.store == "DenimCo"));
    }

    #[test]
    fn test_get_return_policy() {
        let catalog = CatalogService::new();
        assert!(catalog.get_return_policy("ShoeMart").is_some());
        assert!(catalog.get_return_policy("NoSuchStore").is_none());
    }
}
