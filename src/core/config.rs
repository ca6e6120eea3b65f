use std::env;

use crate::errors::DailyError;

pub const DEFAULT_WEATHER_CITY_CODE: &str = "101210101";
pub const DEFAULT_OPENAI_PROXY_URL: &str = "https://api.openai.com/v1/images/generations";
pub const DEFAULT_WEATHER_API_BASE: &str = "http://t.weather.sojson.com";
pub const DEFAULT_POEM_API_URL: &str = "https://v1.jinrishici.com/all";
pub const DEFAULT_TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const DEFAULT_TIAN_API_BASE: &str = "https://apis.tianapi.com";
pub const DEFAULT_TODOIST_API_BASE: &str = "https://api.todoist.com";
pub const DEFAULT_BING_BASE_URL: &str = "https://www.bing.com";

/// Everything a run needs, read once at startup.
///
/// Optional credentials are `None` when the variable is unset or empty; a
/// `None` disables the matching feature.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub openai_proxy_url: String,
    pub tg_bot_token: String,
    pub tg_chat_id: String,
    pub weather_city_code: String,
    pub tian_api_key: Option<String>,
    pub bing_cookie: Option<String>,
    pub todoist_api: Option<String>,
    pub webhook_url: Option<String>,
    pub weather_api_base: String,
    pub poem_api_url: String,
    pub telegram_api_base: String,
    pub tian_api_base: String,
    pub todoist_api_base: String,
    pub bing_base_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, DailyError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `DailyError::ConfigError` naming the first missing mandatory
    /// variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, DailyError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| {
            optional(key).ok_or_else(|| DailyError::ConfigError(format!("{key} is not set")))
        };
        let with_default = |key: &str, default: &str| optional(key).unwrap_or_else(|| default.to_string());

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            tg_bot_token: required("TG_BOT_TOKEN")?,
            tg_chat_id: required("TG_CHAT_ID")?,
            openai_proxy_url: with_default("OPENAI_PROXY_URL", DEFAULT_OPENAI_PROXY_URL),
            weather_city_code: with_default("WEATHER_CITY_CODE", DEFAULT_WEATHER_CITY_CODE),
            tian_api_key: optional("TIAN_API_KEY"),
            bing_cookie: optional("BING_COOKIE"),
            todoist_api: optional("TODOIST_API"),
            webhook_url: optional("WEBHOOK_URL"),
            weather_api_base: with_default("WEATHER_API_BASE", DEFAULT_WEATHER_API_BASE),
            poem_api_url: with_default("POEM_API_URL", DEFAULT_POEM_API_URL),
            telegram_api_base: with_default("TELEGRAM_API_BASE", DEFAULT_TELEGRAM_API_BASE),
            tian_api_base: with_default("TIAN_API_BASE", DEFAULT_TIAN_API_BASE),
            todoist_api_base: with_default("TODOIST_API_BASE", DEFAULT_TODOIST_API_BASE),
            bing_base_url: with_default("BING_BASE_URL", DEFAULT_BING_BASE_URL),
        })
    }

    /// Applies a command-line city code over the environment value. Blank
    /// codes are ignored.
    #[must_use]
    pub fn with_city_code(mut self, city_code: Option<String>) -> Self {
        if let Some(code) = city_code.filter(|c| !c.trim().is_empty()) {
            self.weather_city_code = code.trim().to_string();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const MANDATORY: &[(&str, &str)] = &[
        ("OPENAI_API_KEY", "sk-test"),
        ("TG_BOT_TOKEN", "123:abc"),
        ("TG_CHAT_ID", "42"),
    ];

    #[test]
    fn test_defaults_applied_when_only_mandatory_set() {
        let config = AppConfig::from_lookup(lookup_from(MANDATORY)).unwrap();
        assert_eq!(config.weather_city_code, DEFAULT_WEATHER_CITY_CODE);
        assert_eq!(config.openai_proxy_url, DEFAULT_OPENAI_PROXY_URL);
        assert_eq!(config.telegram_api_base, DEFAULT_TELEGRAM_API_BASE);
        assert!(config.tian_api_key.is_none());
        assert!(config.bing_cookie.is_none());
        assert!(config.todoist_api.is_none());
        assert!(config.webhook_url.is_none());
    }

    #[test]
    fn test_missing_mandatory_is_config_error() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("OPENAI_API_KEY", "sk-test"),
            ("TG_CHAT_ID", "42"),
        ]))
        .unwrap_err();
        match err {
            DailyError::ConfigError(msg) => assert!(msg.contains("TG_BOT_TOKEN")),
            other => panic!("Unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_empty_optional_counts_as_absent() {
        let mut pairs = MANDATORY.to_vec();
        pairs.push(("BING_COOKIE", ""));
        pairs.push(("WEBHOOK_URL", "   "));
        pairs.push(("TIAN_API_KEY", "tian-key"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert!(config.bing_cookie.is_none());
        assert!(config.webhook_url.is_none());
        assert_eq!(config.tian_api_key.as_deref(), Some("tian-key"));
    }

    #[test]
    fn test_city_code_override() {
        let config = AppConfig::from_lookup(lookup_from(MANDATORY))
            .unwrap()
            .with_city_code(Some("101020100".to_string()));
        assert_eq!(config.weather_city_code, "101020100");
    }

    #[test]
    fn test_blank_city_code_override_keeps_env_value() {
        let mut pairs = MANDATORY.to_vec();
        pairs.push(("WEATHER_CITY_CODE", "101010100"));
        let config = AppConfig::from_lookup(lookup_from(&pairs)).unwrap();
        assert_eq!(
            config.clone().with_city_code(Some("  ".to_string())).weather_city_code,
            "101010100"
        );
        assert_eq!(config.with_city_code(None).weather_city_code, "101010100");
    }

    #[test]
    fn test_empty_mandatory_is_config_error() {
        let mut pairs = MANDATORY.to_vec();
        pairs[0] = ("OPENAI_API_KEY", "");
        assert!(AppConfig::from_lookup(lookup_from(&pairs)).is_err());
    }
}
