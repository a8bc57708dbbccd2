//! Shopmate - Rust 购物助手智能体
//!
//! 入口：初始化日志、加载配置、对演示查询跑 ReAct 循环并打印完整轨迹。

use anyhow::Context;
use shopmate::config::load_config;
use shopmate::react::process_query;
use shopmate::tools::{CatalogService, ToolExecutor};

fn main() -> anyhow::Result<()> {
    shopmate::observability::init();

    let cfg = load_config(None).context("Failed to load config")?;
    let executor = ToolExecutor::new(CatalogService::with_config(cfg.catalog.clone()));

    let queries = [
        "I need white sneakers size 8 under $70 that can arrive by Friday",
        "Looking for a floral dress under $150. What's the return policy?",
    ];

    for query in queries {
        println!("\nTesting query: {}", query);
        println!("{}", "-".repeat(80));

        let report = process_query(&executor, &cfg.agent, query)
            .with_context(|| format!("Query processing failed: {query}"))?;

        println!("Reasoning Chain:");
        for thought in &report.reasoning_chain {
            println!("{}", thought);
        }

        println!("\nActions Taken:");
        for record in &report.actions_taken {
            println!("Action: {}", record.action);
            println!("Result: {}", record.result);
        }

        println!("\nFinal Response:");
        println!("{}", report.final_response);
        println!("{}", "-".repeat(80));
    }

    Ok(())
}
