//! 行程规划集成测试
//!
//! 用脚本化 LLM 驱动完整编排循环：多工具分发顺序、错误结果继续对话、引擎失败兜底。

use std::sync::Arc;

use wander::config::AppConfig;
use wander::core::RecoveryEngine;
use wander::llm::ScriptedLlmClient;
use wander::react::{react_loop, Planner, FALLBACK_RESPONSE};
use wander::session::{Role, SessionStore};
use wander::tools::{ActivitiesTool, HotelsTool, ToolExecutor, ToolRegistry, WeatherTool};

fn executor_with_travel_tools() -> ToolExecutor {
    let cfg = AppConfig::default();
    let mut tools = ToolRegistry::new();
    tools.register(WeatherTool::new(None, &cfg.tools.weather));
    tools.register(HotelsTool);
    tools.register(ActivitiesTool);
    ToolExecutor::new(tools, cfg.tools.tool_timeout_secs)
}

#[tokio::test]
async fn test_multi_tool_turn_dispatches_in_request_order() {
    let llm = Arc::new(ScriptedLlmClient::new([
        r#"[{"tool": "find_hotels", "args": {"city": "Paris", "max_price": 300}},
            {"tool": "suggest_activities", "args": {"city": "Paris", "interests": ["museum", "food"]}}]"#,
        "Here is your Paris plan: two hotels under $300, the Louvre and a food tour.",
    ]));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s1");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(
        &planner,
        &executor,
        &recovery,
        session,
        "Plan Paris: museums and food, $300 per night.",
        20,
    )
    .await
    .unwrap();
    assert_eq!(
        result.response,
        "Here is your Paris plan: two hotels under $300, the Louvre and a food tour."
    );

    // 历史形态：user, assistant(工具请求), tool x2（请求顺序）, assistant(最终回复)
    let turns = store.history(&id).unwrap();
    assert_eq!(turns.len(), 5);
    assert_eq!(turns[0].role, Role::User);
    assert_eq!(turns[1].role, Role::Assistant);
    assert_eq!(turns[2].role, Role::Tool);
    assert!(turns[2].content.starts_with("Observation from find_hotels:"));
    assert!(turns[2].content.contains("Chic Parisian Flat"));
    assert!(turns[2].content.contains("Budget Inn Paris"));
    assert!(!turns[2].content.contains("Hotel de Louvre")); // 450 > 300
    assert_eq!(turns[3].role, Role::Tool);
    assert!(turns[3]
        .content
        .starts_with("Observation from suggest_activities:"));
    assert!(turns[3].content.contains("Visit the Louvre Museum."));
    assert_eq!(turns[4].role, Role::Assistant);

    // 时间顺序不变量
    for pair in turns.windows(2) {
        assert!(pair[0].created_at <= pair[1].created_at);
    }
}

#[tokio::test]
async fn test_tool_error_is_data_not_fatal() {
    let llm = Arc::new(ScriptedLlmClient::new([
        r#"{"tool": "find_hotels", "args": {"city": "Atlantis"}}"#,
        "I couldn't find hotel data for Atlantis. Could you pick another city?",
    ]));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s2");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(&planner, &executor, &recovery, session, "Hotels in Atlantis?", 20)
        .await
        .unwrap();
    assert!(result.response.contains("another city"));

    let turns = store.history(&id).unwrap();
    let observation = turns
        .iter()
        .find(|t| t.role == Role::Tool)
        .expect("tool turn present");
    assert!(observation.content.contains("Error:"));
    assert!(observation.content.contains("Atlantis"));
}

#[tokio::test]
async fn test_unknown_tool_is_rejected_and_folded_into_history() {
    let llm = Arc::new(ScriptedLlmClient::new([
        r#"{"tool": "book_flight", "args": {"city": "Paris"}}"#,
        "I can't book flights, but I can look up weather, hotels and activities.",
    ]));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s3");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(&planner, &executor, &recovery, session, "Book me a flight.", 20)
        .await
        .unwrap();
    assert!(result.response.contains("can't book flights"));

    let turns = store.history(&id).unwrap();
    let observation = turns
        .iter()
        .find(|t| t.role == Role::Tool)
        .expect("tool turn present");
    assert!(observation.content.contains("unknown tool: book_flight"));
}

#[tokio::test]
async fn test_missing_required_args_are_rejected_and_folded() {
    let llm = Arc::new(ScriptedLlmClient::new([
        r#"{"tool": "find_hotels", "args": {}}"#,
        "Which city should I search hotels in?",
    ]));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s4");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(&planner, &executor, &recovery, session, "Find me hotels.", 20)
        .await
        .unwrap();
    assert!(result.response.contains("Which city"));

    let turns = store.history(&id).unwrap();
    let observation = turns
        .iter()
        .find(|t| t.role == Role::Tool)
        .expect("tool turn present");
    assert!(observation.content.contains("invalid arguments"));
    assert!(observation.content.contains("city"));
}

#[tokio::test]
async fn test_engine_failure_surfaces_fallback_and_keeps_history_valid() {
    // 脚本耗尽 -> 第一次 plan 即失败
    let llm = Arc::new(ScriptedLlmClient::new(Vec::<String>::new()));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s5");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(&planner, &executor, &recovery, session, "Hi!", 20)
        .await
        .unwrap();
    assert_eq!(result.response, FALLBACK_RESPONSE);

    // 已写入的用户回合仍在，后续回合照常进行
    let turns = store.history(&id).unwrap();
    assert_eq!(turns.len(), 1);
    assert_eq!(turns[0].role, Role::User);
}

#[tokio::test]
async fn test_unparseable_output_is_retried_with_format_reminder() {
    let llm = Arc::new(ScriptedLlmClient::new([
        r#"{"tool": "find_hotels", "args": }"#,
        "Sorry about that. Where are you travelling to?",
    ]));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s6");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(&planner, &executor, &recovery, session, "Plan a trip.", 20)
        .await
        .unwrap();
    assert!(result.response.contains("Where are you travelling"));

    // 格式提醒以 user 回合写入历史
    let turns = store.history(&id).unwrap();
    assert!(turns
        .iter()
        .any(|t| t.role == Role::User && t.content.contains("not valid JSON")));
}

#[tokio::test]
async fn test_weather_without_credential_reports_configuration_error_as_data() {
    let llm = Arc::new(ScriptedLlmClient::new([
        r#"{"tool": "get_weather", "args": {"city": "Paris"}}"#,
        "I couldn't reach the weather service, but I can still help with hotels and activities.",
    ]));
    let planner = Planner::new(llm, "You are a trip planner.", 60);
    let executor = executor_with_travel_tools();
    let recovery = RecoveryEngine::new();

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "s7");
    let session = store.session_mut(&id).unwrap();

    let result = react_loop(&planner, &executor, &recovery, session, "Weather in Paris?", 20)
        .await
        .unwrap();
    assert!(result.response.contains("hotels and activities"));

    let turns = store.history(&id).unwrap();
    let observation = turns
        .iter()
        .find(|t| t.role == Role::Tool)
        .expect("tool turn present");
    assert!(observation.content.contains("configuration error"));
    assert!(observation.content.contains("API key is not configured"));
}
