//! Generic JSON webhook delivery (Discord-style `content` + `embeds`).

use reqwest::Client;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use serde_json::{Value, json};
use tracing::{error, info};

use super::poem_client::POEM_MESSAGE_PREFIX;
use crate::core::models::FRAGMENT_SEPARATOR;

/// Builds the webhook body.
///
/// The poem moves out of the message text into the embed, next to the image.
#[must_use]
pub fn build_webhook_payload(full_message: &str, poem_message: &str, image_url: Option<&str>) -> Value {
    let content = full_message
        .replace(&format!("{poem_message}{FRAGMENT_SEPARATOR}"), "")
        .trim()
        .to_string();
    let poem = poem_message.replace(POEM_MESSAGE_PREFIX, "").trim().to_string();

    let embed = match image_url {
        Some(url) => json!({
            "image": { "url": url },
            "description": format!("{poem} [:christmas_tree:]({url})"),
        }),
        None => json!({ "description": poem }),
    };

    json!({
        "content": format!(":wave:{content}"),
        "embeds": [embed],
    })
}

pub struct WebhookClient {
    http: Client,
    url: String,
}

impl WebhookClient {
    #[must_use]
    pub fn new(http: Client, url: impl Into<String>) -> Self {
        Self {
            http,
            url: url.into(),
        }
    }

    /// Posts the payload and returns the response body; `None` on transport failure.
    pub async fn send(&self, payload: &Value) -> Option<String> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let response = match self
            .http
            .post(&self.url)
            .headers(headers)
            .json(payload)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!("Webhook POST failed: {}", e);
                return None;
            }
        };

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "<failed to read body>".to_string());
        if status.is_success() {
            info!("Webhook status={} body={}", status, body);
        } else {
            error!("Webhook POST failed: status={} body={}", status, body);
        }
        Some(body)
    }
}
