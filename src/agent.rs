//! Agent 装配与脚本化对话入口
//!
//! create_agent_components 从配置构建 LLM / 工具注册表 / Planner / 执行器 / 恢复引擎，
//! process_message 对单条用户输入跑编排循环并返回最终回复，
//! run_scripted_conversation 按固定脚本发送用户消息并打印往来对话。

use crate::config::AppConfig;
use crate::core::{AgentError, RecoveryEngine};
use crate::llm::create_llm_from_config;
use crate::react::{react_loop, Planner};
use crate::session::{Session, SessionId, SessionStore};
use crate::tools::{
    tool_call_schema_json, ActivitiesTool, HotelsTool, ToolExecutor, ToolRegistry, WeatherTool,
};

/// 内置 system 指令（可被 config/prompts/system.txt 覆盖）
const DEFAULT_INSTRUCTION: &str = "You are a friendly and helpful vacation planning assistant. \
Your goal is to help the user plan their perfect trip. \
1. First, understand the user's needs. If the destination, budget for hotels (max price), or \
their interests (e.g., food, history, art) are missing, ask for them. \
2. Once you have enough information, use your available tools (get_weather, find_hotels, \
suggest_activities) to gather information. You can use several tools in one turn. \
3. Finally, combine all the information into a helpful summary for the user. \
4. Be conversational and friendly.";

/// 预构建的 Agent 组件：Planner、ToolExecutor、RecoveryEngine，可多会话共享
pub struct AgentComponents {
    pub planner: Planner,
    pub executor: ToolExecutor,
    pub recovery: RecoveryEngine,
    /// LLM 上下文视图保留的对话轮数
    pub max_context_turns: usize,
}

/// 拼 system prompt：指令 + 工具调用协议 + manifest + 调用格式 Schema
fn build_system_prompt(instruction: &str, registry: &ToolRegistry) -> String {
    format!(
        "{}\n\n\
         When you need a tool, output ONLY a JSON object {{\"tool\": \"name\", \"args\": {{...}}}}, \
         or a JSON array of such objects to run several lookups in one step. \
         Tool results come back as observations. \
         When you have what you need, reply to the user in plain text.\n\n\
         Available tools:\n{}\n\n\
         Tool call format schema:\n{}",
        instruction,
        registry.to_manifest_json(),
        tool_call_schema_json(),
    )
}

/// 创建 Agent 组件：从配置加载 LLM 后端、三个旅行查询工具与超时
pub fn create_agent_components(cfg: &AppConfig) -> AgentComponents {
    let llm = create_llm_from_config(cfg);

    let instruction = [
        "config/prompts/system.txt",
        "../config/prompts/system.txt",
    ]
    .into_iter()
    .find_map(|p| std::fs::read_to_string(p).ok())
    .unwrap_or_else(|| DEFAULT_INSTRUCTION.to_string());

    let weather_key = cfg
        .tools
        .weather
        .api_key
        .clone()
        .or_else(|| std::env::var("OPENWEATHER_API_KEY").ok());
    if weather_key.is_none() {
        tracing::warn!("OPENWEATHER_API_KEY not set, get_weather will report a configuration error");
    }

    let mut tools = ToolRegistry::new();
    tools.register(WeatherTool::new(weather_key, &cfg.tools.weather));
    tools.register(HotelsTool);
    tools.register(ActivitiesTool);

    let system_prompt = build_system_prompt(&instruction, &tools);

    AgentComponents {
        planner: Planner::new(llm, system_prompt, cfg.llm.timeouts.request),
        executor: ToolExecutor::new(tools, cfg.tools.tool_timeout_secs),
        recovery: RecoveryEngine::new(),
        max_context_turns: cfg.app.max_context_turns,
    }
}

/// 处理单条用户消息：跑编排循环，返回最终回复文本（引擎失败时为兜底文本）
pub async fn process_message(
    components: &AgentComponents,
    session: &mut Session,
    user_input: &str,
) -> Result<String, AgentError> {
    let result = react_loop(
        &components.planner,
        &components.executor,
        &components.recovery,
        session,
        user_input,
        components.max_context_turns,
    )
    .await?;
    Ok(result.response)
}

/// 按脚本顺序发送用户消息并打印对话
pub async fn run_scripted_conversation(
    components: &AgentComponents,
    store: &mut SessionStore,
    id: &SessionId,
    queries: &[&str],
) -> Result<(), AgentError> {
    for query in queries {
        println!("\n>>> User Query: {}", query);
        let session = store.session_mut(id)?;
        let response = process_message(components, session, query).await?;
        println!("<<< Agent Response: {}", response);

        let (prompt, completion, total) = components.planner.token_usage();
        tracing::debug!(prompt, completion, total, "cumulative token usage");
    }
    Ok(())
}
