/// Delimiter between consecutive fragments of the daily message.
pub const FRAGMENT_SEPARATOR: &str = "\r\n---\r\n";

/// Today's poem line and its attributed form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Poem {
    /// Raw content line, used to derive the image prompt.
    pub sentence: String,
    /// `"{content} —— {author} / {origin}"`.
    pub poem: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedImage {
    pub url: String,
    pub attribution: String,
}

/// Output of the compose phase, handed to delivery.
#[derive(Debug, Clone)]
pub struct DailyDigest {
    pub fragments: Vec<String>,
    pub poem_message: String,
    pub image: Option<GeneratedImage>,
}

impl DailyDigest {
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image.as_ref().map(|img| img.url.as_str())
    }
}

/// What each delivery target answered. `None` means skipped or failed.
#[derive(Debug, Default)]
pub struct RunReport {
    pub telegram: Option<serde_json::Value>,
    pub webhook: Option<String>,
}
