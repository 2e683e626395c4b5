//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameters_schema / execute），
//! ToolRegistry 按名注册与查找，并在分发前校验工具名与必填参数。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// 工具错误分类：配置缺失 / 数据未命中 / 上游依赖失败 / 参数与名称校验
///
/// 所有变体都会作为 Observation 写回会话历史，由模型决定下一步；编排循环不视为致命。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToolError {
    /// 缺少凭证等进程配置问题，对该工具永久生效，不重试
    #[error("configuration error: {0}")]
    Configuration(String),

    /// 给定键查不到数据，对该输入永久生效
    #[error("not found: {0}")]
    NotFound(String),

    /// 远程依赖失败（网络、非 2xx、响应不完整、超时），未定义重试策略，原样上报
    #[error("upstream error: {0}")]
    Upstream(String),

    /// 必填参数缺失或类型不符（分发前校验）
    #[error("invalid arguments: {0}")]
    InvalidArguments(String),

    /// manifest 中不存在的工具名（分发前校验）
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// 工具 trait：名称、描述（供 LLM 理解）、参数 schema、异步执行（args 为 JSON）
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（manifest 与工具调用 JSON 中的 "tool" 字段）
    fn name(&self) -> &str;

    /// 工具用途描述（供 LLM 理解功能）
    fn description(&self) -> &str;

    /// 参数 JSON Schema；required 列表用于分发前校验
    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    /// 执行工具
    async fn execute(&self, args: Value) -> Result<String, ToolError>;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，支持 register / validate / execute / manifest
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// 分发前校验：工具必须已注册，schema 中 required 的参数必须存在且非 null
    pub fn validate(&self, name: &str, args: &Value) -> Result<Arc<dyn Tool>, ToolError> {
        let tool = self
            .tools
            .get(name)
            .cloned()
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;

        let schema = tool.parameters_schema();
        if let Some(required) = schema.get("required").and_then(|r| r.as_array()) {
            let missing: Vec<&str> = required
                .iter()
                .filter_map(|r| r.as_str())
                .filter(|key| args.get(*key).map_or(true, |v| v.is_null()))
                .collect();
            if !missing.is_empty() {
                return Err(ToolError::InvalidArguments(format!(
                    "{} requires arguments: {}",
                    name,
                    missing.join(", ")
                )));
            }
        }

        Ok(tool)
    }

    pub async fn execute(&self, name: &str, args: Value) -> Result<String, ToolError> {
        let tool = self.validate(name, &args)?;
        tool.execute(args).await
    }

    /// manifest：name / description / parameters 列表 JSON，拼入 system prompt（按名排序，输出稳定）
    pub fn to_manifest_json(&self) -> String {
        let mut tools: Vec<&Arc<dyn Tool>> = self.tools.values().collect();
        tools.sort_by(|a, b| a.name().cmp(b.name()));
        let manifest: Vec<Value> = tools
            .iter()
            .map(|tool| {
                serde_json::json!({
                    "name": tool.name(),
                    "description": tool.description(),
                    "parameters": tool.parameters_schema(),
                })
            })
            .collect();
        serde_json::to_string_pretty(&manifest).unwrap_or_else(|_| "[]".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct GreetTool;

    #[async_trait]
    impl Tool for GreetTool {
        fn name(&self) -> &str {
            "greet"
        }

        fn description(&self) -> &str {
            "Greet someone by name."
        }

        fn parameters_schema(&self) -> Value {
            serde_json::json!({
                "type": "object",
                "properties": { "name": { "type": "string" } },
                "required": ["name"]
            })
        }

        async fn execute(&self, args: Value) -> Result<String, ToolError> {
            let name = args.get("name").and_then(|v| v.as_str()).unwrap_or("world");
            Ok(format!("hello {}", name))
        }
    }

    #[tokio::test]
    async fn test_execute_registered_tool() {
        let mut registry = ToolRegistry::new();
        registry.register(GreetTool);
        let out = registry
            .execute("greet", serde_json::json!({"name": "Ada"}))
            .await
            .unwrap();
        assert_eq!(out, "hello Ada");
    }

    #[tokio::test]
    async fn test_unknown_tool_rejected_before_dispatch() {
        let registry = ToolRegistry::new();
        let err = registry
            .execute("book_flight", serde_json::json!({}))
            .await
            .unwrap_err();
        assert_eq!(err, ToolError::UnknownTool("book_flight".to_string()));
    }

    #[tokio::test]
    async fn test_missing_required_args_rejected_before_dispatch() {
        let mut registry = ToolRegistry::new();
        registry.register(GreetTool);
        let err = registry.execute("greet", serde_json::json!({})).await.unwrap_err();
        match err {
            ToolError::InvalidArguments(msg) => assert!(msg.contains("name")),
            other => panic!("Expected InvalidArguments, got {:?}", other),
        }
    }

    #[test]
    fn test_manifest_lists_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(GreetTool);
        let manifest = registry.to_manifest_json();
        assert!(manifest.contains("\"greet\""));
        assert!(manifest.contains("Greet someone"));
    }
}
