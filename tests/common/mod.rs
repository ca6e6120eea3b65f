#![allow(dead_code)]

use daily_push::core::config::AppConfig;

pub const BOT_TOKEN: &str = "123:abc";
pub const CHAT_ID: &str = "42";

/// Config with every endpoint pointed at `base` (usually a wiremock server).
pub fn config_for(base: &str, extra: &[(&str, &str)]) -> AppConfig {
    let openai_url = format!("{base}/v1/images/generations");
    let poem_url = format!("{base}/all");
    let mut pairs: Vec<(String, String)> = vec![
        ("OPENAI_API_KEY".into(), "sk-test".into()),
        ("TG_BOT_TOKEN".into(), BOT_TOKEN.into()),
        ("TG_CHAT_ID".into(), CHAT_ID.into()),
        ("OPENAI_PROXY_URL".into(), openai_url),
        ("POEM_API_URL".into(), poem_url),
        ("WEATHER_API_BASE".into(), base.into()),
        ("TELEGRAM_API_BASE".into(), base.into()),
        ("TIAN_API_BASE".into(), base.into()),
        ("TODOIST_API_BASE".into(), base.into()),
        ("BING_BASE_URL".into(), base.into()),
    ];
    for (k, v) in extra {
        pairs.retain(|(key, _)| key != k);
        pairs.push(((*k).to_string(), (*v).to_string()));
    }
    AppConfig::from_lookup(|key| {
        pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    })
    .expect("test config is complete")
}
