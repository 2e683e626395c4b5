//! Planner：规划调用与输出解析
//!
//! 调用 LLM 得到最终回复或 JSON 工具调用；parse_llm_output 从文本中提取 JSON，
//! 支持单个对象或数组（一步内多个查询），否则视为直接回复。

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::AgentError;
use crate::llm::LlmClient;
use crate::session::Turn;

/// LLM 返回的工具调用（{"tool": "find_hotels", "args": {"city": "Paris"}}）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCall {
    pub tool: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Planner 输出
#[derive(Debug, Clone)]
pub enum PlannerOutput {
    /// 直接回复用户（本回合结束）
    Response(String),
    /// 需要执行的一个或多个工具调用，按给出顺序分发
    ToolCalls(Vec<ToolCall>),
}

/// 解析 LLM 输出：含合法 JSON（对象或数组）且 tool 非空则为 ToolCalls，否则为 Response
pub fn parse_llm_output(output: &str) -> Result<PlannerOutput, AgentError> {
    let trimmed = output.trim();

    // 尝试提取 JSON 块（```json ... ```、数组、或文本中的 {...}）
    let json_str = if let Some(start) = trimmed.find("```json") {
        let rest = &trimmed[start + 7..];
        rest.find("```")
            .map(|end| rest[..end].trim())
            .unwrap_or_else(|| rest.trim())
    } else if trimmed.starts_with('[') {
        trimmed
    } else if let Some(start) = trimmed.find('{') {
        if let Some(end) = trimmed.rfind('}') {
            &trimmed[start..=end]
        } else {
            trimmed
        }
    } else {
        return Ok(PlannerOutput::Response(trimmed.to_string()));
    };

    let calls: Vec<ToolCall> = if json_str.starts_with('[') {
        serde_json::from_str(json_str)
            .map_err(|e| AgentError::JsonParseError(format!("{}: {}", e, json_str)))?
    } else {
        let call: ToolCall = serde_json::from_str(json_str)
            .map_err(|e| AgentError::JsonParseError(format!("{}: {}", e, json_str)))?;
        vec![call]
    };

    if calls.is_empty() || calls.iter().any(|c| c.tool.is_empty()) {
        Ok(PlannerOutput::Response(trimmed.to_string()))
    } else {
        Ok(PlannerOutput::ToolCalls(calls))
    }
}

/// Planner：持有 LLM、system prompt 与请求超时，拼 system + 历史后调用 LLM
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    system_prompt: String,
    request_timeout: Duration,
}

impl Planner {
    pub fn new(
        llm: Arc<dyn LlmClient>,
        system_prompt: impl Into<String>,
        request_timeout_secs: u64,
    ) -> Self {
        Self {
            llm,
            system_prompt: system_prompt.into(),
            request_timeout: Duration::from_secs(request_timeout_secs),
        }
    }

    pub fn base_system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// 获取 LLM 累计 token 使用统计
    pub fn token_usage(&self) -> (u64, u64, u64) {
        self.llm.token_usage()
    }

    /// system + 会话视图 -> LLM；超时与传输错误统一为 LlmError
    pub async fn plan(&self, history: &[Turn]) -> Result<String, AgentError> {
        let mut turns = vec![Turn::system(self.system_prompt.clone())];
        turns.extend_from_slice(history);

        match tokio::time::timeout(self.request_timeout, self.llm.complete(&turns)).await {
            Ok(Ok(output)) => Ok(output),
            Ok(Err(e)) => Err(AgentError::LlmError(e)),
            Err(_) => Err(AgentError::LlmError(format!(
                "request timed out after {}s",
                self.request_timeout.as_secs()
            ))),
        }
    }
}
