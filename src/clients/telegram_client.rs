//! Telegram Bot API delivery.
//!
//! The daily message goes out as a single request: `sendPhoto` with the
//! message as caption when an image was generated, `sendMessage` otherwise.

use reqwest::Client;
use serde_json::Value;
use tracing::{error, info};

/// Bot API method plus its form-encoded fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelegramRequest {
    pub method: &'static str,
    pub fields: Vec<(&'static str, String)>,
}

impl TelegramRequest {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[must_use]
pub fn build_telegram_request(chat_id: &str, message: &str, image: Option<&str>) -> TelegramRequest {
    match image {
        Some(photo) => TelegramRequest {
            method: "sendPhoto",
            fields: vec![
                ("chat_id", chat_id.to_string()),
                ("photo", photo.to_string()),
                ("caption", message.to_string()),
            ],
        },
        None => TelegramRequest {
            method: "sendMessage",
            fields: vec![
                ("chat_id", chat_id.to_string()),
                ("text", message.to_string()),
            ],
        },
    }
}

pub struct TelegramClient {
    http: Client,
    api_base: String,
    bot_token: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(http: Client, api_base: impl Into<String>, bot_token: impl Into<String>) -> Self {
        Self {
            http,
            api_base: api_base.into(),
            bot_token: bot_token.into(),
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base.trim_end_matches('/'),
            self.bot_token,
            method
        )
    }

    /// Sends the message and returns the Bot API's JSON reply.
    ///
    /// Failures are logged and yield `None`; delivery never aborts the run.
    pub async fn send_message(
        &self,
        chat_id: &str,
        message: &str,
        image: Option<&str>,
    ) -> Option<Value> {
        info!("Sending to Chat {}", chat_id);
        let request = build_telegram_request(chat_id, message, image);

        let response = match self
            .http
            .post(self.method_url(request.method))
            .form(&request.fields)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                error!(
                    "Failed sending message to Telegram Bot via {}: {}",
                    request.method, e
                );
                return None;
            }
        };

        let status = response.status();
        match response.json::<Value>().await {
            Ok(body) => {
                if !status.is_success() {
                    error!("Telegram {} returned status {}: {}", request.method, status, body);
                }
                Some(body)
            }
            Err(e) => {
                error!(
                    "Failed to parse Telegram {} response (status {}): {}",
                    request.method, status, e
                );
                None
            }
        }
    }
}
