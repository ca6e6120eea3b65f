//! Builds the ordered fragment list and the joined daily message.

use tracing::info;

use super::Clients;
use crate::clients::poem_client::{poem_message, strip_punctuation};
use crate::core::config::AppConfig;
use crate::core::models::DailyDigest;
pub use crate::core::models::FRAGMENT_SEPARATOR;

pub const GREETING: &str = "又到了新的一天了！";

/// Joins fragments with [`FRAGMENT_SEPARATOR`], order preserved.
#[must_use]
pub fn make_message(fragments: &[String]) -> String {
    fragments.join(FRAGMENT_SEPARATOR)
}

/// Runs every fetch step in order. Never fails: each step falls back to its
/// canned text.
pub async fn compose_digest(config: &AppConfig, clients: &Clients) -> DailyDigest {
    let mut fragments = vec![GREETING.to_string()];

    fragments.push(clients.weather.fetch_weather(&config.weather_city_code).await);

    let poem = clients.poem.fetch_poem().await;
    let prompt = strip_punctuation(&poem.sentence);
    info!("Processed Sentence: {}", prompt);
    let image = clients.images.generate(&prompt).await;
    let poem_message = poem_message(&poem, image.as_ref());
    fragments.push(poem_message.clone());

    if let Some(quota) = &clients.quota {
        fragments.push(quota.fetch_quota().await);
    }

    if let Some(todoist) = &clients.todoist {
        fragments.push(todoist.fetch_todos().await);
    }

    info!("Message constructed with {} fragments", fragments.len());
    DailyDigest {
        fragments,
        poem_message,
        image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_message_uses_separator_between_each_pair() {
        let fragments = vec!["A".to_string(), "B".to_string(), "C".to_string()];
        assert_eq!(make_message(&fragments), "A\r\n---\r\nB\r\n---\r\nC");
    }

    #[test]
    fn test_make_message_single_fragment_has_no_separator() {
        assert_eq!(make_message(&[GREETING.to_string()]), GREETING);
    }
}
