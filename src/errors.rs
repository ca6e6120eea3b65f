use thiserror::Error;

#[derive(Debug, Error)]
pub enum DailyError {
    #[error("Missing or invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Upstream API returned an error: {0}")]
    ApiError(String),

    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    #[error("Failed to generate image: {0}")]
    ImageError(String),
}

impl From<reqwest::Error> for DailyError {
    fn from(error: reqwest::Error) -> Self {
        DailyError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for DailyError {
    fn from(error: serde_json::Error) -> Self {
        DailyError::ParseError(error.to_string())
    }
}
