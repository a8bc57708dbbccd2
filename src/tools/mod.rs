//! 工具箱：内存商品目录与动作执行器

pub mod catalog;
pub mod executor;

pub use catalog::{CatalogService, PriceQuote, Product, PromoOutcome, ShippingEstimate};
pub use executor::{ToolExecutor, ToolOutput};
