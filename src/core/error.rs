//! 编排层错误类型与恢复动作
//!
//! 与 RecoveryEngine 配合：JSON 解析失败可注入提示重试，推理引擎失败终止本回合。

use thiserror::Error;

/// 编排循环自身可能出现的错误（工具错误不在此列：它们作为数据写回历史）
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    LlmError(String),

    #[error("JSON parse error: {0}")]
    JsonParseError(String),

    #[error("Unknown session: {0}")]
    UnknownSession(String),
}

/// 恢复引擎根据错误类型给出的建议动作
#[derive(Debug, Clone)]
pub enum RecoveryAction {
    /// 将提示注入下一轮，让 LLM 重试（如 JSON 格式错误）
    RetryWithPrompt(String),
    /// 终止当前回合，由循环给出兜底回复
    Abort,
}
