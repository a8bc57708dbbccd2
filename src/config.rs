//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `SHOPMATE__*` 覆盖
//! （双下划线表示嵌套，如 `SHOPMATE__AGENT__MAX_STEPS=8`）。

use std::path::PathBuf;

use serde::Deserialize;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSection,
    #[serde(default)]
    pub agent: AgentSection,
    #[serde(default)]
    pub catalog: CatalogSection,
}

/// [app] 段：应用名
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppSection {
    pub name: Option<String>,
}

/// [agent] 段：单次查询的推理步数上限与放宽重试系数
#[derive(Debug, Clone, Deserialize)]
pub struct AgentSection {
    /// 单次查询最大推理步数，防止死循环
    #[serde(default = "default_max_steps")]
    pub max_steps: usize,
    /// 搜索为空时价格上限的放宽倍数
    #[serde(default = "default_retry_price_factor")]
    pub retry_price_factor: f64,
}

impl Default for AgentSection {
    fn default() -> Self {
        Self {
            max_steps: default_max_steps(),
            retry_price_factor: default_retry_price_factor(),
        }
    }
}

fn default_max_steps() -> usize {
    5
}

fn default_retry_price_factor() -> f64 {
    1.2
}

/// [catalog] 段：配送模拟的天数与运费区间
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogSection {
    #[serde(default = "default_delivery_days_min")]
    pub delivery_days_min: i64,
    #[serde(default = "default_delivery_days_max")]
    pub delivery_days_max: i64,
    #[serde(default = "default_shipping_cost_min")]
    pub shipping_cost_min: f64,
    #[serde(default = "default_shipping_cost_max")]
    pub shipping_cost_max: f64,
}

impl Default for CatalogSection {
    fn default() -> Self {
        Self {
            delivery_days_min: default_delivery_days_min(),
            delivery_days_max: default_delivery_days_max(),
            shipping_cost_min: default_shipping_cost_min(),
            shipping_cost_max: default_shipping_cost_max(),
        }
    }
}

fn default_delivery_days_min() -> i64 {
    2
}

fn default_delivery_days_max() -> i64 {
    7
}

fn default_shipping_cost_min() -> f64 {
    5.99
}

fn default_shipping_cost_max() -> f64 {
    15.99
}

/// 从 config 目录加载配置，环境变量 SHOPMATE__* 可覆盖
///
/// 1. 按顺序查找 config/default.toml、../config/default.toml、default.toml，找到则作为第一源
/// 2. 若传入 config_path 且文件存在，则追加该文件（可覆盖前面的键）
/// 3. 最后叠加环境变量 SHOPMATE__*（双下划线表示嵌套键）
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("SHOPMATE")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.agent.max_steps, 5);
        assert!((cfg.agent.retry_price_factor - 1.2).abs() < f64::EPSILON);
        assert_eq!(cfg.catalog.delivery_days_min, 2);
        assert_eq!(cfg.catalog.delivery_days_max, 7);
    }
}
