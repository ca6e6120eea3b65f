//! Client modules for external API interactions

use reqwest::Client;
use std::time::Duration;

use crate::errors::DailyError;

pub mod poem_client;
pub mod quota_client;
pub mod telegram_client;
pub mod todoist_client;
pub mod weather_client;
pub mod webhook_client;

pub use poem_client::PoemClient;
pub use quota_client::QuotaClient;
pub use telegram_client::TelegramClient;
pub use todoist_client::TodoistClient;
pub use weather_client::WeatherClient;
pub use webhook_client::WebhookClient;

pub const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Shared HTTP client for one run.
///
/// # Errors
///
/// Returns `DailyError::HttpError` if the TLS backend cannot be initialised.
pub fn build_http_client() -> Result<Client, DailyError> {
    Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(|e| DailyError::HttpError(format!("Failed to build HTTP client: {e}")))
}

/// Renders a JSON scalar for templating: strings without quotes, numbers as-is.
pub(crate) fn json_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Reads the body of a failed response for logging without failing again.
pub(crate) async fn error_body(response: reqwest::Response) -> String {
    let status = response.status();
    response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error response body (status {status}): {e}"))
}
