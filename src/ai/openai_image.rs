//! DALL·E 3 image generation through an OpenAI-compatible proxy endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::image::ImageProvider;
use crate::clients::error_body;
use crate::core::models::GeneratedImage;
use crate::errors::DailyError;

pub const OPENAI_ATTRIBUTION: &str = "Image Powered by OpenAI DALL.E-3";
pub const IMAGE_MODEL: &str = "dall-e-3";
pub const IMAGE_SIZE: &str = "1024x1024";
pub const IMAGE_STYLE: &str = "vivid";

#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ImageGenerationRequest<'a> {
    pub prompt: &'a str,
    pub n: u32,
    pub size: &'a str,
    pub model: &'a str,
    pub style: &'a str,
}

impl<'a> ImageGenerationRequest<'a> {
    #[must_use]
    pub fn new(prompt: &'a str) -> Self {
        Self {
            prompt,
            n: 1,
            size: IMAGE_SIZE,
            model: IMAGE_MODEL,
            style: IMAGE_STYLE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ImageGenerationResponse {
    #[serde(default)]
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

fn parse_image_response(raw: &str) -> Result<ImageGenerationResponse, DailyError> {
    serde_json::from_str(raw).map_err(|e| {
        DailyError::ParseError(format!("Failed to parse OpenAI image response: {e}"))
    })
}

pub struct OpenAiImageProvider {
    http: Client,
    endpoint: String,
    api_key: String,
}

impl OpenAiImageProvider {
    #[must_use]
    pub fn new(http: Client, endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        }
    }
}

#[async_trait]
impl ImageProvider for OpenAiImageProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DailyError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ImageGenerationRequest::new(prompt))
            .send()
            .await
            .map_err(|e| DailyError::HttpError(format!("OpenAI image request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = error_body(response).await;
            return Err(DailyError::ImageError(format!(
                "OpenAI image API error (status {status}): {error_text}"
            )));
        }

        let raw = response.text().await?;

        #[cfg(feature = "debug-logs")]
        info!("Full response data: {}", raw);

        let body = parse_image_response(&raw)?;

        let first = body
            .data
            .into_iter()
            .next()
            .ok_or_else(|| DailyError::ImageError("OpenAI returned no images".to_string()))?;
        let url = first
            .url
            .ok_or_else(|| DailyError::ImageError("OpenAI image has no url".to_string()))?;

        info!("image_url: {}", url);
        if let Some(revised) = first.revised_prompt.as_deref() {
            info!("image_revised_prompt: {}", revised);
        }

        Ok(GeneratedImage {
            url,
            attribution: OPENAI_ATTRIBUTION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(ImageGenerationRequest::new("落日净残阳 ")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "prompt": "落日净残阳 ",
                "n": 1,
                "size": "1024x1024",
                "model": "dall-e-3",
                "style": "vivid"
            })
        );
    }

    #[test]
    fn test_parse_image_response_reads_first_url() {
        let parsed = parse_image_response(
            r#"{"created": 1, "data": [{"url": "https://img.example/a.png", "revised_prompt": "a"}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.data[0].url.as_deref(), Some("https://img.example/a.png"));
        assert_eq!(parsed.data[0].revised_prompt.as_deref(), Some("a"));
    }

    #[test]
    fn test_parse_image_response_rejects_non_json() {
        assert!(matches!(
            parse_image_response("<html>502 Bad Gateway</html>"),
            Err(DailyError::ParseError(_))
        ));
    }
}
