//! 工具箱：旅行查询工具（weather / hotels / activities）、注册表与执行器

pub mod activities;
pub mod executor;
pub mod hotels;
pub mod registry;
pub mod schema;
pub mod weather;

pub use activities::ActivitiesTool;
pub use executor::ToolExecutor;
pub use hotels::{HotelRecord, HotelsTool};
pub use registry::{Tool, ToolError, ToolRegistry};
pub use schema::tool_call_schema_json;
pub use weather::WeatherTool;

/// 逐词首字母大写的城市名（面向用户的错误消息）
pub(crate) fn title_case(s: &str) -> String {
    s.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
