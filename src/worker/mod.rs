//! Daily run: compose the message, then deliver it

pub mod compose;
pub mod deliver;
pub mod handler;

// Re-export the main entry points for convenience
pub use compose::{compose_digest, make_message};
pub use deliver::deliver_digest;
pub use handler::{compose_only, run_daily};

use crate::ai::{ImageGenerator, providers_from_config};
use crate::clients::{
    PoemClient, QuotaClient, TelegramClient, TodoistClient, WeatherClient, WebhookClient,
    build_http_client,
};
use crate::core::config::AppConfig;
use crate::errors::DailyError;

/// Every client a run talks to. Optional enrichments and the webhook are
/// `None` when their credential is not configured.
pub struct Clients {
    pub weather: WeatherClient,
    pub poem: PoemClient,
    pub images: ImageGenerator,
    pub quota: Option<QuotaClient>,
    pub todoist: Option<TodoistClient>,
    pub telegram: TelegramClient,
    pub webhook: Option<WebhookClient>,
}

impl Clients {
    /// # Errors
    ///
    /// Returns `DailyError::HttpError` if an HTTP client cannot be built.
    pub fn from_config(config: &AppConfig) -> Result<Self, DailyError> {
        let http = build_http_client()?;
        Ok(Self {
            weather: WeatherClient::new(http.clone(), config.weather_api_base.as_str()),
            poem: PoemClient::new(http.clone(), config.poem_api_url.as_str()),
            images: ImageGenerator::new(providers_from_config(config, &http)?),
            quota: config
                .tian_api_key
                .as_deref()
                .map(|key| QuotaClient::new(http.clone(), config.tian_api_base.as_str(), key)),
            todoist: config
                .todoist_api
                .as_deref()
                .map(|token| TodoistClient::new(http.clone(), config.todoist_api_base.as_str(), token)),
            telegram: TelegramClient::new(
                http.clone(),
                config.telegram_api_base.as_str(),
                config.tg_bot_token.as_str(),
            ),
            webhook: config
                .webhook_url
                .as_deref()
                .map(|url| WebhookClient::new(http.clone(), url)),
        })
    }
}
