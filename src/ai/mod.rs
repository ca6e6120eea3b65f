//! Image generation for the daily poem

pub mod bing_image;
pub mod image;
pub mod openai_image;

// Re-export main types for convenience
pub use bing_image::BingImageProvider;
pub use image::{ImageGenerator, ImageProvider};
pub use openai_image::OpenAiImageProvider;

use crate::core::config::AppConfig;
use crate::errors::DailyError;

/// Provider order for this run: Bing first when a cookie is configured,
/// then the OpenAI image API.
///
/// # Errors
///
/// Returns `DailyError::HttpError` if a provider's HTTP client cannot be built.
pub fn providers_from_config(
    config: &AppConfig,
    http: &reqwest::Client,
) -> Result<Vec<Box<dyn ImageProvider>>, DailyError> {
    let mut providers: Vec<Box<dyn ImageProvider>> = Vec::new();
    match config.bing_cookie.as_deref() {
        Some(cookie) => providers.push(Box::new(BingImageProvider::new(
            config.bing_base_url.as_str(),
            cookie,
        )?)),
        None => tracing::info!("Bing Cookie is not set. Use OpenAI to generate Image"),
    }
    providers.push(Box::new(OpenAiImageProvider::new(
        http.clone(),
        config.openai_proxy_url.as_str(),
        config.openai_api_key.as_str(),
    )));
    Ok(providers)
}
