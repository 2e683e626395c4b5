//! 编排主循环
//!
//! 单个用户回合的状态机：请求规划 -> 解析 -> 最终回复则结束；工具调用则按请求顺序逐个
//! 执行，结果（成功或失败）作为 Observation 写回历史，进入下一轮规划。
//! 工具错误永不中止回合；推理引擎失败或达到步数上限时返回兜底回复，已写入的历史保持有效。

use crate::core::{AgentError, RecoveryAction, RecoveryEngine};
use crate::react::{parse_llm_output, Planner, PlannerOutput};
use crate::session::{Session, Turn};
use crate::tools::ToolExecutor;

/// 单个用户回合内最大规划步数，防止死循环
const MAX_PLAN_STEPS: usize = 10;

/// 推理引擎不可用或始终未给出最终回复时的兜底文本
pub const FALLBACK_RESPONSE: &str = "Agent did not produce a final response.";

/// 回合执行结果：最终回复与回合结束时的完整历史快照
#[derive(Debug)]
pub struct TurnResult {
    pub response: String,
    pub turns: Vec<Turn>,
}

/// 执行一个用户回合
///
/// 用户输入写入会话 -> 规划 -> 解析输出 ->
/// 若 ToolCalls 则按请求顺序执行并逐条写回 Observation ->
/// 若 Response 则写入会话并返回
pub async fn react_loop(
    planner: &Planner,
    executor: &ToolExecutor,
    recovery: &RecoveryEngine,
    session: &mut Session,
    user_input: &str,
    max_context_turns: usize,
) -> Result<TurnResult, AgentError> {
    session.push(Turn::user(user_input));

    let mut step = 0;
    loop {
        if step >= MAX_PLAN_STEPS {
            tracing::error!(
                max_steps = MAX_PLAN_STEPS,
                "plan step limit reached without a final response"
            );
            return Ok(TurnResult {
                response: FALLBACK_RESPONSE.to_string(),
                turns: session.turns().to_vec(),
            });
        }

        let output = match planner.plan(session.context_view(max_context_turns)).await {
            Ok(o) => o,
            Err(e) => match recovery.handle(&e) {
                RecoveryAction::RetryWithPrompt(prompt) => {
                    tracing::warn!(error = %e, "plan failed, retrying with prompt");
                    session.push(Turn::user(prompt));
                    step += 1;
                    continue;
                }
                RecoveryAction::Abort => {
                    // 引擎不可用是唯一中止回合的故障；历史保持有效，下一条用户消息照常处理
                    tracing::error!(error = %e, "reasoning engine call failed, surfacing fallback");
                    return Ok(TurnResult {
                        response: FALLBACK_RESPONSE.to_string(),
                        turns: session.turns().to_vec(),
                    });
                }
            },
        };

        match parse_llm_output(&output) {
            Ok(PlannerOutput::Response(response)) => {
                session.push(Turn::assistant(response.clone()));
                return Ok(TurnResult {
                    response,
                    turns: session.turns().to_vec(),
                });
            }
            Ok(PlannerOutput::ToolCalls(calls)) => {
                // 先记录本步的原始请求输出，再按请求顺序分发，使历史与请求顺序一致
                session.push(Turn::assistant(output.clone()));
                for call in calls {
                    tracing::info!(tool = %call.tool, "dispatching tool call");
                    let outcome = executor.execute(&call.tool, call.args).await;
                    if let Err(ref e) = outcome {
                        tracing::warn!(tool = %call.tool, error = %e, "tool call failed, folded into history");
                    }
                    session.push(Turn::tool_result(&call.tool, &outcome));
                }
            }
            Err(e) => match recovery.handle(&e) {
                RecoveryAction::RetryWithPrompt(prompt) => {
                    tracing::warn!(error = %e, "unparseable planner output, retrying with format reminder");
                    session.push(Turn::user(prompt));
                }
                RecoveryAction::Abort => {
                    tracing::error!(error = %e, "aborting turn");
                    return Ok(TurnResult {
                        response: FALLBACK_RESPONSE.to_string(),
                        turns: session.turns().to_vec(),
                    });
                }
            },
        }

        step += 1;
    }
}
