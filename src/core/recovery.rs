//! 错误恢复引擎
//!
//! 根据 AgentError 返回 RecoveryAction，供编排循环决定是注入提示重试还是终止回合。

use crate::core::{AgentError, RecoveryAction};

/// 语义化错误恢复：格式错误可重试，其余终止
#[derive(Debug, Default)]
pub struct RecoveryEngine;

impl RecoveryEngine {
    pub fn new() -> Self {
        Self
    }

    /// JSON 解析失败时重申工具调用格式让模型重试；其余错误终止本回合
    pub fn handle(&self, err: &AgentError) -> RecoveryAction {
        match err {
            AgentError::JsonParseError(raw) => RecoveryAction::RetryWithPrompt(format!(
                "Your previous output was not valid JSON: {raw}. \
                 When calling a tool you must output only a JSON object of the form \
                 {{\"tool\": \"name\", \"args\": {{...}}}}, or a JSON array of such objects \
                 to run several lookups in one step. No code fences, no extra text."
            )),
            _ => RecoveryAction::Abort,
        }
    }
}
