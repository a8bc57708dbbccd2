//! 认知层：条件抽取、决策规划、观察摘要、应答合成与 ReAct 主循环

pub mod context;
pub mod criteria;
pub mod loop_;
pub mod observation;
pub mod planner;
pub mod response;

pub use context::{ActionRecord, CollectedInfo, QueryContext, QueryReport, SearchCriteria};
pub use criteria::extract_search_criteria;
pub use loop_::process_query;
pub use observation::summarize;
pub use planner::{next_step, Action};
pub use response::format_final_response;
