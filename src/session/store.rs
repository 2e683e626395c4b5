//! 会话存储：按 (app, user, session) 管理回合历史
//!
//! create / append / history；历史只追加、仅进程生命周期内有效，无持久化与删除。
//! 对同一标识重复 create 会重置历史并输出 warn 日志。

use std::collections::HashMap;
use std::fmt;

use crate::core::AgentError;
use crate::session::Turn;

/// 会话标识三元组
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId {
    pub app: String,
    pub user: String,
    pub session: String,
}

impl SessionId {
    pub fn new(app: impl Into<String>, user: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            app: app.into(),
            user: user.into(),
            session: session.into(),
        }
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.app, self.user, self.session)
    }
}

/// 单个会话：只追加的回合序列
#[derive(Clone, Debug, Default)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// 供 LLM 上下文使用的视图：保留最近 max_turns*2 条；历史本身不剪枝
    pub fn context_view(&self, max_turns: usize) -> &[Turn] {
        let cap = max_turns.saturating_mul(2);
        if self.turns.len() > cap {
            &self.turns[self.turns.len() - cap..]
        } else {
            &self.turns
        }
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

/// 内存会话存储：进程内共享，无跨进程状态
#[derive(Default)]
pub struct SessionStore {
    sessions: HashMap<SessionId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 创建会话；同一标识再次 create 会重置历史（warn 而非报错）
    pub fn create(&mut self, app: &str, user: &str, session: &str) -> SessionId {
        let id = SessionId::new(app, user, session);
        if self.sessions.insert(id.clone(), Session::default()).is_some() {
            tracing::warn!(session = %id, "session re-created, history reset");
        }
        id
    }

    pub fn append(&mut self, id: &SessionId, turn: Turn) -> Result<(), AgentError> {
        self.session_mut(id)?.push(turn);
        Ok(())
    }

    pub fn history(&self, id: &SessionId) -> Result<&[Turn], AgentError> {
        self.sessions
            .get(id)
            .map(|s| s.turns())
            .ok_or_else(|| AgentError::UnknownSession(id.to_string()))
    }

    pub fn session_mut(&mut self, id: &SessionId) -> Result<&mut Session, AgentError> {
        self.sessions
            .get_mut(id)
            .ok_or_else(|| AgentError::UnknownSession(id.to_string()))
    }
}
