//! "每日一句" from TianAPI.

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::error_body;
use crate::errors::DailyError;

pub const DEFAULT_QUOTA: &str = "今天没有获取到每日一句";

#[derive(Debug, Deserialize)]
struct TianResponse {
    code: i64,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    result: Option<TianOne>,
}

#[derive(Debug, Deserialize)]
struct TianOne {
    word: String,
    #[serde(default)]
    wordfrom: Option<String>,
}

#[must_use]
pub fn format_quota(word: &str, source: Option<&str>) -> String {
    match source.map(str::trim).filter(|s| !s.is_empty()) {
        Some(source) => format!("每日一句：{} —— {}", word.trim(), source),
        None => format!("每日一句：{}", word.trim()),
    }
}

pub struct QuotaClient {
    http: Client,
    api_base: String,
    api_key: String,
}

impl QuotaClient {
    #[must_use]
    pub fn new(http: Client, api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn fetch_quota(&self) -> String {
        info!("Start making daily quota...");
        match self.try_fetch_quota().await {
            Ok(quota) => quota,
            Err(e) => {
                error!("Daily quota lookup failed: {}", e);
                DEFAULT_QUOTA.to_string()
            }
        }
    }

    async fn try_fetch_quota(&self) -> Result<String, DailyError> {
        let url = format!("{}/one/index", self.api_base.trim_end_matches('/'));
        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(DailyError::ApiError(format!(
                "TianAPI status {status}: {body}"
            )));
        }

        // TianAPI reports failures in-band with HTTP 200.
        let body: TianResponse = response.json().await?;
        if body.code != 200 {
            return Err(DailyError::ApiError(format!(
                "TianAPI code {}: {}",
                body.code,
                body.msg.unwrap_or_default()
            )));
        }
        let one = body
            .result
            .ok_or_else(|| DailyError::ParseError("TianAPI response has no result".to_string()))?;
        Ok(format_quota(&one.word, one.wordfrom.as_deref()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_quota_with_source() {
        assert_eq!(
            format_quota("路漫漫其修远兮", Some("屈原")),
            "每日一句：路漫漫其修远兮 —— 屈原"
        );
    }

    #[test]
    fn test_format_quota_blank_source() {
        assert_eq!(format_quota(" 一句话 ", Some("  ")), "每日一句：一句话");
        assert_eq!(format_quota("一句话", None), "每日一句：一句话");
    }
}
