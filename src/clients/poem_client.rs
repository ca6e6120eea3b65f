//! Daily poem line from the jinrishici API.

use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info};

use super::error_body;
use crate::core::models::{GeneratedImage, Poem};
use crate::errors::DailyError;

pub const DEFAULT_SENTENCE: &str = "落日净残阳 雾水拈薄浪 ";
pub const DEFAULT_POEM: &str = "落日净残阳，雾水拈薄浪。 —— Xiaowen.Z / 卜算子";
pub const POEM_MESSAGE_PREFIX: &str = "今日诗词和配图：";

#[derive(Debug, Deserialize)]
struct PoemResponse {
    content: String,
    author: String,
    origin: String,
}

impl Poem {
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            sentence: DEFAULT_SENTENCE.to_string(),
            poem: DEFAULT_POEM.to_string(),
        }
    }
}

/// Replaces sentence punctuation with spaces so the line reads as a bare
/// image prompt.
#[must_use]
pub fn strip_punctuation(sentence: &str) -> String {
    sentence
        .chars()
        .map(|c| match c {
            '，' | '。' | '.' => ' ',
            other => other,
        })
        .collect()
}

/// The poem fragment of the daily message, with the image attribution when
/// an image was generated.
#[must_use]
pub fn poem_message(poem: &Poem, image: Option<&GeneratedImage>) -> String {
    match image {
        Some(img) => format!("{POEM_MESSAGE_PREFIX}{}\r\n\r\n{}", poem.poem, img.attribution),
        None => format!("{POEM_MESSAGE_PREFIX}{}", poem.poem),
    }
}

pub struct PoemClient {
    http: Client,
    api_url: String,
}

impl PoemClient {
    #[must_use]
    pub fn new(http: Client, api_url: impl Into<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
        }
    }

    /// Today's poem, or the built-in fallback poem.
    pub async fn fetch_poem(&self) -> Poem {
        info!("Start making poem...");
        match self.try_fetch_poem().await {
            Ok(poem) => poem,
            Err(e) => {
                error!("Poem lookup failed: {}", e);
                Poem::fallback()
            }
        }
    }

    async fn try_fetch_poem(&self) -> Result<Poem, DailyError> {
        let response = self.http.get(&self.api_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = error_body(response).await;
            return Err(DailyError::ApiError(format!(
                "poem API status {status}: {body}"
            )));
        }

        let body: PoemResponse = response.json().await?;
        Ok(Poem {
            poem: format!("{} —— {} / {}", body.content, body.author, body.origin),
            sentence: body.content,
        })
    }
}
