pub mod image_client;

pub use image_client::ImageClient;

use crate::config::{OpenAiConfig, DEFAULT_TIMEOUT_SECS};
use crate::error::{Result, StoryImgError};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Build the shared HTTP client: bearer auth on every request plus an
/// overall request timeout so a stalled service call cannot hang forever.
pub(crate) fn build_http_client(config: &OpenAiConfig) -> Result<reqwest::Client> {
    let api_key = config
        .api_key
        .as_deref()
        .ok_or_else(|| StoryImgError::ConfigError("No API key configured".into()))?;

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|e| StoryImgError::ConfigError(e.to_string()))?;
    auth.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, auth);

    reqwest::Client::builder()
        .default_headers(headers)
        .timeout(Duration::from_secs(
            config.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ))
        .build()
        .map_err(|e| StoryImgError::ClientError(e.to_string()))
}
