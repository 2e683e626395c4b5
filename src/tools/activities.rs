//! 活动建议工具：兴趣标签匹配静态目录
//!
//! 城市与兴趣均大小写不敏感；未命中的兴趣静默跳过，输出顺序跟随调用方提供的兴趣顺序
//! （而非目录顺序）。城市不存在与零命中返回不同的 NotFound 消息。纯函数。

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::{title_case, Tool, ToolError};

const PARIS_ACTIVITIES: &[(&str, &str)] = &[
    ("museum", "Visit the Louvre Museum."),
    ("food", "Take a food tour in Le Marais."),
    ("history", "Explore the Palace of Versailles."),
];

const LONDON_ACTIVITIES: &[(&str, &str)] = &[
    ("history", "Tour the Tower of London."),
    ("art", "Visit the Tate Modern art gallery."),
    ("food", "Enjoy afternoon tea at The Ritz."),
];

const TOKYO_ACTIVITIES: &[(&str, &str)] = &[
    ("technology", "Visit Akihabara."),
    ("food", "Explore the Tsukiji Outer Market."),
    ("culture", "Visit the Senso-ji Temple."),
];

fn city_activities(city: &str) -> Option<&'static [(&'static str, &'static str)]> {
    match city.to_lowercase().as_str() {
        "paris" => Some(PARIS_ACTIVITIES),
        "london" => Some(LONDON_ACTIVITIES),
        "tokyo" => Some(TOKYO_ACTIVITIES),
        _ => None,
    }
}

/// Activities 工具：按兴趣顺序在固定目录中匹配活动
#[derive(Debug, Default)]
pub struct ActivitiesTool;

impl ActivitiesTool {
    /// 匹配逻辑（纯函数）：按兴趣提供顺序返回命中的活动描述
    pub fn suggest(city: &str, interests: &[&str]) -> Result<Vec<&'static str>, ToolError> {
        let catalog = city_activities(city).ok_or_else(|| {
            ToolError::NotFound(format!(
                "Activity information not available for {}.",
                title_case(city)
            ))
        })?;

        let suggestions: Vec<&'static str> = interests
            .iter()
            .filter_map(|interest| {
                catalog
                    .iter()
                    .find(|(tag, _)| tag.eq_ignore_ascii_case(interest))
                    .map(|(_, description)| *description)
            })
            .collect();

        if suggestions.is_empty() {
            return Err(ToolError::NotFound(format!(
                "Couldn't find activities for your interests in {}.",
                title_case(city)
            )));
        }
        Ok(suggestions)
    }
}

#[async_trait]
impl Tool for ActivitiesTool {
    fn name(&self) -> &str {
        "suggest_activities"
    }

    fn description(&self) -> &str {
        "Suggest activities in a city based on a list of interests. Args: {\"city\": \"London\", \"interests\": [\"history\", \"art\"]}."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "City name" },
                "interests": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Interests in priority order, e.g. food, history, art"
                }
            },
            "required": ["city", "interests"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let city = args.get("city").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::InvalidArguments("suggest_activities: city must be a string".to_string())
        })?;
        let interests: Vec<&str> = args
            .get("interests")
            .and_then(|v| v.as_array())
            .ok_or_else(|| {
                ToolError::InvalidArguments(
                    "suggest_activities: interests must be an array of strings".to_string(),
                )
            })?
            .iter()
            .filter_map(|v| v.as_str())
            .collect();
        tracing::info!(city = %city, interests = ?interests, "suggest_activities execute");

        let suggestions = Self::suggest(city, &interests)?;
        Ok(serde_json::to_string(&suggestions).unwrap_or_else(|_| "[]".to_string()))
    }
}
