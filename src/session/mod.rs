//! 会话层：回合、标识与内存存储

pub mod store;
pub mod turn;

pub use store::{Session, SessionId, SessionStore};
pub use turn::{Role, Turn};
