//! Wander - Rust 旅行规划智能体
//!
//! 模块划分：
//! - **agent**: 组件装配、单条消息处理与脚本化对话驱动
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型与恢复动作
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / Mock / 脚本化）
//! - **react**: Planner、输出解析与编排主循环
//! - **session**: 会话标识、回合历史与内存存储
//! - **tools**: 旅行查询工具（weather / hotels / activities）、注册表与执行器

pub mod agent;
pub mod config;
pub mod core;
pub mod llm;
pub mod react;
pub mod session;
pub mod tools;
