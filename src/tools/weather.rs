//! 天气查询工具：地理编码 + 当前天气（OpenWeatherMap）
//!
//! 两次串联 GET：按城市名取经纬度，再按坐标取当前天气（摄氏）。
//! 未配置 API Key 返回 Configuration 错误（任何城市都一样）；地理编码无结果返回 NotFound；
//! 网络失败 / 非 2xx / 响应不完整返回 Upstream。请求带超时，无重试。

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;

use crate::config::WeatherSection;
use crate::tools::{Tool, ToolError};

/// 地理编码响应条目（只取经纬度）
#[derive(Debug, Deserialize)]
struct GeoEntry {
    lat: f64,
    lon: f64,
}

/// 当前天气响应（只取描述与温度）
#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Vec<WeatherCondition>,
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

/// Weather 工具：持有 HTTP 客户端、可选 API Key 与两个端点地址
pub struct WeatherTool {
    client: Client,
    api_key: Option<String>,
    geocoding_url: String,
    weather_url: String,
}

impl WeatherTool {
    pub fn new(api_key: Option<String>, cfg: &WeatherSection) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_key,
            geocoding_url: cfg.geocoding_url.clone(),
            weather_url: cfg.weather_url.clone(),
        }
    }

    async fn geocode(&self, city: &str, api_key: &str) -> Result<GeoEntry, ToolError> {
        let entries: Vec<GeoEntry> = self
            .client
            .get(&self.geocoding_url)
            .query(&[("q", city), ("limit", "1"), ("appid", api_key)])
            .send()
            .await
            .map_err(|e| ToolError::Upstream(format!("Geocoding request failed for {}: {}", city, e)))?
            .error_for_status()
            .map_err(|e| ToolError::Upstream(format!("Geocoding request failed for {}: {}", city, e)))?
            .json()
            .await
            .map_err(|e| {
                ToolError::Upstream(format!("Geocoding response malformed for {}: {}", city, e))
            })?;

        entries.into_iter().next().ok_or_else(|| {
            ToolError::NotFound(format!("Could not find geocoding info for {}.", city))
        })
    }

    async fn current_weather(
        &self,
        location: &GeoEntry,
        api_key: &str,
    ) -> Result<WeatherResponse, ToolError> {
        self.client
            .get(&self.weather_url)
            .query(&[
                ("lat", location.lat.to_string()),
                ("lon", location.lon.to_string()),
                ("appid", api_key.to_string()),
                ("units", "metric".to_string()),
            ])
            .send()
            .await
            .map_err(|e| ToolError::Upstream(format!("Weather request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ToolError::Upstream(format!("Weather request failed: {}", e)))?
            .json()
            .await
            .map_err(|e| ToolError::Upstream(format!("Weather response malformed: {}", e)))
    }

    /// 完整查询：Key 校验 -> 地理编码 -> 当前天气 -> 单句报告
    async fn report(&self, city: &str) -> Result<String, ToolError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ToolError::Configuration("OpenWeatherMap API key is not configured.".to_string())
        })?;

        let location = self.geocode(city, api_key).await?;
        let weather = self.current_weather(&location, api_key).await?;

        let description = weather
            .weather
            .first()
            .map(|c| c.description.as_str())
            .unwrap_or("unknown conditions");
        Ok(format!(
            "The weather in {} is {} with a temperature of {}°C.",
            city, description, weather.main.temp
        ))
    }
}

#[async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str {
        "get_weather"
    }

    fn description(&self) -> &str {
        "Retrieve the live, current weather report for a city. Args: {\"city\": \"Paris\"}."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "city": { "type": "string", "description": "City name" }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, ToolError> {
        let city = args.get("city").and_then(|v| v.as_str()).ok_or_else(|| {
            ToolError::InvalidArguments("get_weather: city must be a string".to_string())
        })?;
        tracing::info!(city = %city, "get_weather execute");
        self.report(city).await
    }
}
