//! 认知层：Planner、输出解析与编排主循环

pub mod loop_;
pub mod planner;

pub use loop_::{react_loop, TurnResult, FALLBACK_RESPONSE};
pub use planner::{parse_llm_output, Planner, PlannerOutput, ToolCall};
