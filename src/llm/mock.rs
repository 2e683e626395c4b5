//! Mock 与脚本化 LLM 客户端（无需 API）
//!
//! MockLlmClient：无 Key 时的兜底，直接以文本回复最后一条用户消息；
//! ScriptedLlmClient：按队列返回预置输出，供测试驱动编排循环（耗尽后返回错误）。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::llm::LlmClient;
use crate::session::{Role, Turn};

/// Mock 客户端：回显用户最后一条消息
#[derive(Debug, Default)]
pub struct MockLlmClient;

#[async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, turns: &[Turn]) -> Result<String, String> {
        let last_user = turns
            .iter()
            .rev()
            .find(|t| matches!(t.role, Role::User))
            .map(|t| t.content.as_str())
            .unwrap_or("(no input)");

        Ok(format!(
            "(mock) No LLM backend is configured, so I can't plan this trip for real. You said: {}",
            last_user
        ))
    }
}

/// 脚本化客户端：按顺序弹出预置输出，耗尽后返回错误（可用于测试引擎失败路径）
#[derive(Debug, Default)]
pub struct ScriptedLlmClient {
    responses: Mutex<VecDeque<String>>,
}

impl ScriptedLlmClient {
    pub fn new<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(&self, _turns: &[Turn]) -> Result<String, String> {
        self.responses
            .lock()
            .expect("scripted responses lock poisoned")
            .pop_front()
            .ok_or_else(|| "scripted responses exhausted".to_string())
    }
}
