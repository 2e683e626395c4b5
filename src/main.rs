//! Wander - 旅行规划智能体
//!
//! 入口：初始化日志、加载配置、创建会话并运行固定脚本对话。

use anyhow::Context;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use wander::agent::{create_agent_components, run_scripted_conversation};
use wander::config::{load_config, AppConfig};
use wander::session::SessionStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).unwrap_or_else(|e| {
        tracing::warn!("Config load failed ({}), using defaults", e);
        AppConfig::default()
    });

    let components = create_agent_components(&cfg);

    let mut store = SessionStore::new();
    let id = store.create("vacation_planner_app", "user_vacation_1", "session_vacation_001");

    run_scripted_conversation(
        &components,
        &mut store,
        &id,
        &[
            "Hi, I want to plan a trip.",
            "I'm thinking of going to Paris. I like museums and food, and my hotel budget is $300 per night.",
        ],
    )
    .await
    .context("Conversation failed")?;

    Ok(())
}
