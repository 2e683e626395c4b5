//! 酒店查询工具：静态目录 + 价格过滤
//!
//! 三个城市各三条固定记录，城市名大小写不敏感；price <= max_price 过滤，保持目录顺序。
//! 城市不存在与过滤结果为空返回不同的 NotFound 消息。纯函数，无副作用。

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::tools::{title_case, Tool, ToolError};

/// 单条酒店记录（price 为每晚价格，货币无关）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct HotelRecord {
    pub name: &'static str,
    pub price: u32,
}

const PARIS_HOTELS: &[HotelRecord] = &[
    HotelRecord { name: "Hotel de Louvre", price: 450 },
    HotelRecord { name: "Chic Parisian Flat", price: 250 },
    HotelRecord { name: "Budget Inn Paris", price: 120 },
];

const LONDON_HOTELS: &[HotelRecord] = &[
    HotelRecord { name: "The Savoy", price: 800 },
    HotelRecord { name: "London Marriott Hotel", price: 350 },
    HotelRecord { name: "St. Giles London", price: 150 },
];

const TOKYO_HOTELS: &[HotelRecord] = &[
    HotelRecord { name: "Park Hyatt Tokyo", price: 750 },
    HotelRecord { name: "Shinjuku Granbell Hotel", price: 200 },
    HotelRecord { name: "APA Hotel Shinjuku", price: 90 },
];

/// 未指定时的价格上限
const DEFAULT_MAX_PRICE: u64 = 500;

fn city_hotels(city: &str) -> Option<&'static [HotelRecord]> {
    match city.to_lowercase().as_str() {
        "paris" => Some(PARIS_HOTELS),
        "london" => Some(LONDON_HOTELS),
        "tokyo" => Some(TOKYO_HOTELS),
        _ => None,
    }
}

/// Hotels 工具：固定目录内按城市与价格上限查询
#[derive(Debug, Default)]
pub struct HotelsTool;

impl HotelsTool {
    /// 查询逻辑（纯函数）：返回过滤后的记录或 NotFound
    pub fn find(city: &str, max_price: u64) -> Result<Vec<HotelRecord>, ToolError> {
        let records = city_hotels(city).ok_or_else(|| {
            ToolError::NotFound(format!(
                "Hotel information not available for {}.",
                title_case(city)
            ))
        })?;

        let available: Vec<HotelRecord> = records
            .iter()
            .filter(|h| u64::from(h.price) <= max_price)
            .copied()
            .collect();

        if available.is_empty() {
            return Err(ToolError::NotFound(format!(
                "No hotels found in {} under ${}.",
                title_case(city),
                max_price
            )));
        }
        Ok(available)
    }
}

#[async_trait]
impl Tool for HotelsTool {
    fn name(&self) -> &str {
        "find_hotels"
    }

    fn description(&self) -> &str {
        "Find hotels in a city under a maximum nightly price. Args: {\"city\": \"Paris\", \"max_price\": 300}."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "City name" },
                "max_price": { "type": "integer", "description": "Maximum price per night (default 500)" }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let city = args.get("city").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::InvalidArguments("find_hotels: city must be a string".to_string())
        })?;
        let max_price = args
            .get("max_price")
            .and_then(|v| v.as_u64())
            .unwrap_or(DEFAULT_MAX_PRICE);
        tracing::info!(city = %city, max_price, "find_hotels execute");

        let hotels = Self::find(city, max_price)?;
        Ok(serde_json::to_string(&hotels).unwrap_or_else(|_| "[]".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_city_is_not_found_naming_the_city() {
        let err = HotelsTool::find("Atlantis", 500).unwrap_err();
        match err {
            ToolError::NotFound(msg) => {
                assert_eq!(msg, "Hotel information not available for Atlantis.")
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_price_filter_is_subset_preserving_catalog_order() {
        let hotels = HotelsTool::find("paris", 300).unwrap();
        let names: Vec<&str> = hotels.iter().map(|h| h.name).collect();
        assert_eq!(names, vec!["Chic Parisian Flat", "Budget Inn Paris"]);
        assert!(hotels.iter().all(|h| h.price <= 300));
    }

    #[test]
    fn test_below_all_prices_is_not_found_not_empty_success() {
        let err = HotelsTool::find("paris", 50).unwrap_err();
        match err {
            ToolError::NotFound(msg) => assert_eq!(msg, "No hotels found in Paris under $50."),
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_city_lookup_is_case_insensitive() {
        assert_eq!(
            HotelsTool::find("PARIS", 300).unwrap(),
            HotelsTool::find("paris", 300).unwrap()
        );
    }

    #[test]
    fn test_tokyo_under_100_is_exactly_apa_shinjuku() {
        let hotels = HotelsTool::find("Tokyo", 100).unwrap();
        assert_eq!(
            hotels,
            vec![HotelRecord { name: "APA Hotel Shinjuku", price: 90 }]
        );
    }

    #[test]
    fn test_repeated_lookups_are_identical() {
        assert_eq!(
            HotelsTool::find("london", 400).unwrap(),
            HotelsTool::find("london", 400).unwrap()
        );
    }

    #[tokio::test]
    async fn test_execute_defaults_max_price_to_500() {
        let out = HotelsTool
            .execute(serde_json::json!({"city": "London"}))
            .await
            .unwrap();
        assert!(out.contains("London Marriott Hotel"));
        assert!(out.contains("St. Giles London"));
        assert!(!out.contains("The Savoy")); // 800 > 500
    }
}
