//! Weather lookup against the sojson city forecast API.

use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

use super::{error_body, json_text};
use crate::errors::DailyError;

pub const DEFAULT_WEATHER: &str = "未查询到天气，好可惜啊";

/// Formats today's forecast entry into the weather sentence.
///
/// Returns `None` when any of the template fields is missing.
#[must_use]
pub fn format_weather(payload: &Value) -> Option<String> {
    let today = payload.get("data")?.get("forecast")?.get(0)?;
    let field = |name: &str| today.get(name).and_then(json_text);

    let date = field("ymd")?;
    let week = field("week")?;
    let kind = field("type")?;
    let high = field("high")?;
    let low = field("low")?;
    let aqi = field("aqi")?;
    let city = payload.get("cityInfo")?.get("city").and_then(json_text)?;

    Some(format!(
        "今天是{date} {week}，{city}的天气是{kind}，{high}，{low}，空气质量指数{aqi}"
    ))
}

pub struct WeatherClient {
    http: Client,
    api_base: String,
}

impl WeatherClient {
    #[must_use]
    pub fn new(http: Client, api_base: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
        }
    }

    /// Today's weather sentence for `city_code`, or [`DEFAULT_WEATHER`].
    pub async fn fetch_weather(&self, city_code: &str) -> String {
        info!("Start making weather for city {}", city_code);
        match self.try_fetch_weather(city_code).await {
            Ok(weather) => weather,
            Err(e) => {
                error!("Weather lookup failed: {}", e);
                DEFAULT_WEATHER.to_string()
            }
        }
    }

    async fn try_fetch_weather(&self, city_code: &str) -> Result<String, DailyError> {
        let url = format!(
            "{}/api/weather/city/{}",
            self.api_base.trim_end_matches('/'),
            city_code
        );
        let response = self.http.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(DailyError::ApiError(format!(
                "weather API status {status}: {body}"
            )));
        }

        let payload: Value = response.json().await?;
        format_weather(&payload).ok_or_else(|| {
            DailyError::ParseError("weather payload is missing forecast fields".to_string())
        })
    }
}
