//! LLM 客户端抽象
//!
//! 推理引擎边界：给定会话回合序列，返回一段文本（最终回复，或 JSON 工具调用）。
//! 引擎内部策略视为黑盒，由 react 层解析其输出。

use async_trait::async_trait;

use crate::session::Turn;

/// LLM 客户端 trait：非流式完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(&self, turns: &[Turn]) -> Result<String, String>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
