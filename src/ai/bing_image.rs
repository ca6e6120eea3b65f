//! DALL·E 3 via Bing Image Creator, authenticated with the `_U` session cookie.
//!
//! Flow: submit the prompt (the service answers with a redirect carrying the
//! request id), then poll the async results page until it renders the image
//! grid, and scrape the image URLs out of it.

use async_trait::async_trait;
use regex::Regex;
use reqwest::header::{COOKIE, LOCATION, USER_AGENT};
use reqwest::{Client, StatusCode, redirect};
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use super::image::ImageProvider;
use crate::clients::HTTP_TIMEOUT;
use crate::core::models::GeneratedImage;
use crate::errors::DailyError;

pub const BING_ATTRIBUTION: &str = "Image Powered by Bing DALL.E-3";

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36 Edg/120.0.0.0";
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(2);
const DEFAULT_MAX_POLLS: u32 = 60;

static IMAGE_SRC_RE: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r#"src="(https://[^"]+)""#)
        .unwrap_or_else(|_| Regex::new(r"$^").expect("fallback regex compiles"))
});

/// Extracts full-size image URLs from the results page, in page order.
///
/// Thumbnail size queries are removed, duplicates and `.svg` decorations dropped.
#[must_use]
pub fn parse_image_links(html: &str) -> Vec<String> {
    let mut links: Vec<String> = Vec::new();
    for caps in IMAGE_SRC_RE.captures_iter(html) {
        let Some(m) = caps.get(1) else { continue };
        let link = m.as_str().split("?w=").next().unwrap_or_default().to_string();
        if link.is_empty() || link.ends_with(".svg") || links.contains(&link) {
            continue;
        }
        links.push(link);
    }
    links
}

/// Pulls the request id out of the submit redirect (`...&id=<id>`).
#[must_use]
pub fn request_id_from_location(base: &str, location: &str) -> Option<String> {
    let absolute = Url::parse(location)
        .or_else(|_| Url::parse(base).and_then(|b| b.join(location)))
        .ok()?;
    absolute
        .query_pairs()
        .find(|(key, _)| key == "id")
        .map(|(_, value)| value.into_owned())
        .filter(|id| !id.is_empty())
}

pub struct BingImageProvider {
    http: Client,
    base_url: String,
    cookie: String,
    poll_interval: Duration,
    max_polls: u32,
}

impl BingImageProvider {
    /// # Errors
    ///
    /// Returns `DailyError::HttpError` if the non-redirecting client cannot be built.
    pub fn new(base_url: impl Into<String>, cookie: impl Into<String>) -> Result<Self, DailyError> {
        // The submit step must see the 302 itself to read the request id.
        let http = Client::builder()
            .timeout(HTTP_TIMEOUT)
            .redirect(redirect::Policy::none())
            .build()
            .map_err(|e| DailyError::HttpError(format!("Failed to build Bing HTTP client: {e}")))?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            cookie: cookie.into(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            max_polls: DEFAULT_MAX_POLLS,
        })
    }

    #[must_use]
    pub fn with_polling(mut self, interval: Duration, max_polls: u32) -> Self {
        self.poll_interval = interval;
        self.max_polls = max_polls;
        self
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header(COOKIE, format!("_U={}", self.cookie))
            .header(USER_AGENT, BROWSER_USER_AGENT)
    }

    async fn submit(&self, encoded_prompt: &str) -> Result<String, DailyError> {
        // rt=4 is the fast (boosted) queue, rt=3 the regular one.
        for rt in ["4", "3"] {
            let url = format!(
                "{}/images/create?q={}&rt={}&FORM=GENCRE",
                self.base_url, encoded_prompt, rt
            );
            let response = self.request(self.http.post(&url)).send().await?;
            let status = response.status();

            if status == StatusCode::FOUND || status == StatusCode::SEE_OTHER {
                let location = response
                    .headers()
                    .get(LOCATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .replace("&nfy=1", "");
                return request_id_from_location(&self.base_url, &location).ok_or_else(|| {
                    DailyError::ImageError(format!("Bing redirect has no request id: {location}"))
                });
            }

            let body = response.text().await.unwrap_or_default().to_lowercase();
            if body.contains("this prompt has been blocked") {
                return Err(DailyError::ImageError(
                    "Bing blocked the prompt".to_string(),
                ));
            }
            debug!("Bing submit with rt={} answered {}", rt, status);
        }
        Err(DailyError::ImageError(
            "Bing did not redirect to a result page".to_string(),
        ))
    }

    async fn poll(&self, request_id: &str, encoded_prompt: &str) -> Result<String, DailyError> {
        let url = format!(
            "{}/images/create/async/results/{}?q={}",
            self.base_url, request_id, encoded_prompt
        );
        for attempt in 1..=self.max_polls {
            let response = self.request(self.http.get(&url)).send().await?;
            let status = response.status();
            if !status.is_success() {
                return Err(DailyError::ApiError(format!(
                    "Bing results page status {status}"
                )));
            }
            let body = response.text().await?;
            if !body.trim().is_empty() && !body.contains("errorMessage") {
                info!("Bing results ready after {} polls", attempt);
                return Ok(body);
            }
            tokio::time::sleep(self.poll_interval).await;
        }
        Err(DailyError::ImageError(format!(
            "Bing results not ready after {} polls",
            self.max_polls
        )))
    }
}

#[async_trait]
impl ImageProvider for BingImageProvider {
    fn name(&self) -> &str {
        "bing"
    }

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DailyError> {
        let encoded_prompt = urlencoding::encode(prompt).into_owned();
        let request_id = self.submit(&encoded_prompt).await?;
        info!("Bing accepted prompt, request id {}", request_id);

        let html = self.poll(&request_id, &encoded_prompt).await?;
        let url = parse_image_links(&html)
            .into_iter()
            .next()
            .ok_or_else(|| DailyError::ImageError("Bing returned no images".to_string()))?;

        Ok(GeneratedImage {
            url,
            attribution: BING_ATTRIBUTION.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_image_links_strips_size_and_dedupes() {
        let html = r#"
            <img class="mimg" src="https://tse1.mm.bing.net/th/id/OIG.abc?w=270&h=270&c=6" />
            <img class="mimg" src="https://tse1.mm.bing.net/th/id/OIG.abc?w=540" />
            <img src="https://r.bing.com/rp/logo.svg" />
            <img class="mimg" src="https://tse2.mm.bing.net/th/id/OIG.def?w=270" />
        "#;
        assert_eq!(
            parse_image_links(html),
            vec![
                "https://tse1.mm.bing.net/th/id/OIG.abc".to_string(),
                "https://tse2.mm.bing.net/th/id/OIG.def".to_string(),
            ]
        );
    }

    #[test]
    fn test_parse_image_links_empty_page() {
        assert!(parse_image_links("<div>pending</div>").is_empty());
    }

    #[test]
    fn test_request_id_from_relative_location() {
        let id = request_id_from_location(
            "https://www.bing.com",
            "/images/create/async/results?q=sunset&rt=4&FORM=GENCRE&id=1-65a0b1c2",
        );
        assert_eq!(id.as_deref(), Some("1-65a0b1c2"));
    }

    #[test]
    fn test_request_id_missing() {
        assert!(request_id_from_location("https://www.bing.com", "/images/create?q=x").is_none());
    }
}
