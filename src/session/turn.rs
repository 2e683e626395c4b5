//! 会话回合：角色与单条 Turn
//!
//! 角色与 LLM API 对应，Tool 角色承载一次工具调用的结果；
//! 成功与失败统一渲染为 Observation 文本（作为数据，由模型决定下一步）。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::tools::ToolError;

/// 回合角色
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
    /// 工具结果（一条 Turn 恰好承载一次调用的结果）
    Tool,
}

/// 单条回合：追加进会话后不可变
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Turn {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// 工具结果回合：Ok 与 Err 同样写回历史，循环不视为致命
    pub fn tool_result(tool: &str, outcome: &Result<String, ToolError>) -> Self {
        let rendered = match outcome {
            Ok(payload) => format!("Observation from {}: {}", tool, payload),
            Err(e) => format!("Observation from {}: Error: {}", tool, e),
        };
        Self::new(Role::Tool, rendered)
    }
}
