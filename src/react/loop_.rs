//! ReAct 主循环
//!
//! 每步：规划下一动作 -> 执行 -> 观察摘要 -> 写回上下文；搜索为空时做一次
//! 放宽重试（价格上限 ×retry_price_factor、清除尺码），绝不二次重试。
//! 步数到达 max_steps 后无条件停止；此时不再合成最终应答，报告里只有已
//! 积累的思考链与动作日志。

use crate::config::AgentSection;
use crate::core::AgentError;
use crate::react::context::{ActionRecord, QueryContext, QueryReport};
use crate::react::observation::summarize;
use crate::react::planner::{next_step, Action};
use crate::react::response::format_final_response;
use crate::tools::{ToolExecutor, ToolOutput};

/// 动作日志里放宽重试条目的参数占位标记
pub const RETRY_MARKER: &str = "Retrying with relaxed criteria";

/// 处理一条用户查询：跑 ReAct 循环并返回思考链、动作日志与最终应答
pub fn process_query(
    executor: &ToolExecutor,
    cfg: &AgentSection,
    query: &str,
) -> Result<QueryReport, AgentError> {
    let mut report = QueryReport::default();
    let mut ctx = QueryContext::new(query);
    let mut thought_no = 0;

    for step in 1..=cfg.max_steps {
        tracing::debug!(step, max_steps = cfg.max_steps, "agent step");

        let (thought, action) = next_step(&ctx);
        thought_no += 1;
        report.reasoning_chain.push(format!("Thought {}: {}", thought_no, thought));

        let Some(mut action) = action else {
            report.final_response = format_final_response(&ctx);
            break;
        };

        let result = executor.execute(&action);
        let observation = summarize(&result);
        report.actions_taken.push(ActionRecord {
            action: serde_json::to_value(&action).unwrap_or(serde_json::Value::Null),
            result: observation.clone(),
        });
        let empty_search = matches!(&result, ToolOutput::Products(p) if p.is_empty());
        ctx.collected.store(result);
        ctx.last_observation = Some(observation);

        // 空搜索结果：放宽条件重试一次
        if empty_search {
            if let Action::SearchProducts { max_price, size, .. } = &mut action {
                thought_no += 1;
                report.reasoning_chain.push(format!(
                    "Thought {}: No products found with exact criteria. Should try broader search.",
                    thought_no
                ));

                let bound = max_price.ok_or(AgentError::MissingRetryBound)?;
                *max_price = Some(bound * cfg.retry_price_factor);
                *size = None;

                let result = executor.execute(&action);
                let observation = summarize(&result);
                ctx.collected.store(result);
                report.actions_taken.push(ActionRecord {
                    action: serde_json::json!({
                        "tool": action.tool_name(),
                        "params": RETRY_MARKER,
                    }),
                    result: observation.clone(),
                });
                ctx.last_observation = Some(observation);
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::CatalogService;

    fn executor() -> ToolExecutor {
        ToolExecutor::new(CatalogService::new())
    }

    #[test]
    fn test_loop_terminates_within_bound() {
        let cfg = AgentSection::default();
        let report = process_query(&executor(), &cfg, "Looking for a floral dress under $150")
            .expect("query should succeed");
        assert!(report.reasoning_chain.len() <= cfg.max_steps);
        assert!(!report.final_response.is_empty());
    }

    #[test]
    fn test_thoughts_are_numbered_sequentially() {
        let cfg = AgentSection::default();
        // 红色商品不存在：首次搜索为空，触发重试思考
        let report = process_query(&executor(), &cfg, "Find a red dress under $50")
            .expect("query should succeed");
        for (i, thought) in report.reasoning_chain.iter().enumerate() {
            assert!(thought.starts_with(&format!("Thought {}:", i + 1)), "bad numbering: {}", thought);
        }
    }

    #[test]
    fn test_relaxed_retry_runs_exactly_once() {
        let cfg = AgentSection::default();
        let report = process_query(&executor(), &cfg, "Find a red dress under $50")
            .expect("query should succeed");
        let searches: Vec<_> = report
            .actions_taken
            .iter()
            .filter(|r| r.action["tool"] == "search_products")
            .collect();
        assert_eq!(searches.len(), 2);
        assert_eq!(searches[1].action["params"], RETRY_MARKER);
        // 重试后仍无结果，最终应答走致歉分支
        assert!(report.final_response.contains("I couldn't find any exact matches"));
    }

    #[test]
    fn test_retry_without_price_bound_fails_loudly() {
        let cfg = AgentSection::default();
        let result = process_query(&executor(), &cfg, "Looking for red shoes");
        assert!(matches!(result, Err(AgentError::MissingRetryBound)));
    }

    #[test]
    fn test_retry_relaxes_price_and_size() {
        let cfg = AgentSection::default();
        // $33 上限搜不到花色短裙；×1.2 后 $39.6 能覆盖 35.99 与 38.99 两件
        let report = process_query(&executor(), &cfg, "Find a floral skirt under $33 in size S")
            .expect("query should succeed");
        assert_eq!(report.actions_taken.len(), 2);
        assert_eq!(report.actions_taken[0].result, "No products found matching criteria");
        assert_eq!(report.actions_taken[1].result, "Found 2 matching products");
        assert!(report.final_response.contains("Found 2 matching product(s):"));
    }
}
