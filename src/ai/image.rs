//! Image generation over an ordered list of interchangeable providers.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::core::models::GeneratedImage;
use crate::errors::DailyError;

#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Short label used in logs.
    fn name(&self) -> &str;

    async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DailyError>;
}

/// Tries each provider once, in order, and keeps the first image produced.
pub struct ImageGenerator {
    providers: Vec<Box<dyn ImageProvider>>,
}

impl ImageGenerator {
    #[must_use]
    pub fn new(providers: Vec<Box<dyn ImageProvider>>) -> Self {
        Self { providers }
    }

    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Returns `None` when every provider failed (or none is configured).
    pub async fn generate(&self, prompt: &str) -> Option<GeneratedImage> {
        for provider in &self.providers {
            info!("Generating image with {}", provider.name());
            match provider.generate(prompt).await {
                Ok(image) => {
                    info!("Image generated by {}: {}", provider.name(), image.url);
                    return Some(image);
                }
                Err(e) => warn!("Image generated from {} failed: {}", provider.name(), e),
            }
        }
        warn!("All image providers failed; sending without an image");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every prompt it sees and succeeds or fails on demand.
    struct RecordingProvider {
        label: &'static str,
        succeed: bool,
        prompts: Mutex<Vec<String>>,
    }

    impl RecordingProvider {
        fn new(label: &'static str, succeed: bool) -> Self {
            Self {
                label,
                succeed,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ImageProvider for Arc<RecordingProvider> {
        fn name(&self) -> &str {
            self.label
        }

        async fn generate(&self, prompt: &str) -> Result<GeneratedImage, DailyError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.succeed {
                Ok(GeneratedImage {
                    url: format!("https://img.example/{}.png", self.label),
                    attribution: format!("Image Powered by {}", self.label),
                })
            } else {
                Err(DailyError::ImageError(format!("{} unavailable", self.label)))
            }
        }
    }

    #[tokio::test]
    async fn test_first_success_wins_and_later_providers_are_skipped() {
        let first = Arc::new(RecordingProvider::new("first", true));
        let second = Arc::new(RecordingProvider::new("second", true));
        let providers: Vec<Box<dyn ImageProvider>> =
            vec![Box::new(first.clone()), Box::new(second.clone())];
        let generator = ImageGenerator::new(providers);

        let image = generator.generate("prompt").await.unwrap();
        assert_eq!(image.url, "https://img.example/first.png");
        assert!(second.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_all_providers_failing_yields_none() {
        let first = Arc::new(RecordingProvider::new("first", false));
        let second = Arc::new(RecordingProvider::new("second", false));
        let providers: Vec<Box<dyn ImageProvider>> =
            vec![Box::new(first.clone()), Box::new(second.clone())];
        let generator = ImageGenerator::new(providers);

        assert!(generator.generate("prompt").await.is_none());
        assert_eq!(first.prompts.lock().unwrap().len(), 1);
        assert_eq!(second.prompts.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_no_providers_yields_none() {
        let generator = ImageGenerator::new(Vec::new());
        assert!(generator.generate("prompt").await.is_none());
    }
}
