use crate::{
    error::{Result, StoryImgError},
    models::{ApiErrorResponse, ImageGenerationResponse, SizeSpec},
    OpenAiConfig,
};
use reqwest::StatusCode;
use serde_json::json;
use std::time::Duration;

pub const DEFAULT_RETRIES: u32 = 3;
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(15);

#[derive(Clone)]
pub struct ImageClient {
    http: reqwest::Client,
    api_base: String,
}

impl ImageClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let http = super::build_http_client(&config)?;
        let api_base = config
            .api_base
            .unwrap_or_else(|| super::DEFAULT_API_BASE.to_string());
        Ok(Self { http, api_base })
    }

    /// Generate one image for `prompt` at the pipeline-supplied size and
    /// return its URL, retrying with the default policy on rate limits.
    pub async fn generate(&self, prompt: &str, size: &SizeSpec) -> Result<String> {
        self.generate_with_retry(prompt, size, DEFAULT_RETRIES, DEFAULT_RETRY_DELAY)
            .await
    }

    /// Generate one image for `prompt`, making up to `retries` attempts.
    ///
    /// Only rate-limit responses are retried, with a fixed `delay` between
    /// attempts. Any other failure propagates immediately. When every
    /// attempt is rate limited the call ends in
    /// [`StoryImgError::GenerationExhausted`]; retrying further is the
    /// caller's decision.
    pub async fn generate_with_retry(
        &self,
        prompt: &str,
        size: &SizeSpec,
        retries: u32,
        delay: Duration,
    ) -> Result<String> {
        for attempt in 0..retries {
            match self.request_generation(prompt, size).await {
                Ok(url) => {
                    log::info!("Generated image for prompt '{}': {}", prompt, url);
                    return Ok(url);
                }
                Err(StoryImgError::RateLimited(message)) => {
                    if attempt + 1 < retries {
                        log::warn!(
                            "Rate limit exceeded for prompt '{}': {}. Retrying in {}s... ({}/{})",
                            prompt,
                            message,
                            delay.as_secs(),
                            attempt + 1,
                            retries
                        );
                        tokio::time::sleep(delay).await;
                    } else {
                        log::warn!(
                            "Rate limit exceeded for prompt '{}': {} ({}/{})",
                            prompt,
                            message,
                            attempt + 1,
                            retries
                        );
                    }
                }
                Err(e) => return Err(e),
            }
        }

        log::error!(
            "Image generation failed for prompt '{}' after {} attempts",
            prompt,
            retries
        );
        Err(StoryImgError::GenerationExhausted {
            prompt: prompt.to_string(),
            attempts: retries,
        })
    }

    async fn request_generation(&self, prompt: &str, size: &SizeSpec) -> Result<String> {
        let payload = json!({
            "prompt": prompt,
            "n": 1,
            "size": size.as_str()
        });

        log::debug!("Image generation request payload: {}", payload);

        let response = self
            .http
            .post(format!("{}/images/generations", self.api_base))
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoryImgError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let message = response
                .text()
                .await
                .ok()
                .and_then(|body| serde_json::from_str::<ApiErrorResponse>(&body).ok())
                .map(|envelope| envelope.error.message)
                .unwrap_or_else(|| "request quota exceeded".to_string());
            return Err(StoryImgError::RateLimited(message));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(StoryImgError::ResponseError(format!("{}: {}", status, body)));
        }

        let generation: ImageGenerationResponse = response
            .json()
            .await
            .map_err(|e| StoryImgError::ResponseError(e.to_string()))?;

        match generation.data.into_iter().next() {
            Some(generated) => Ok(generated.url),
            None => Err(StoryImgError::ResponseError("No images generated".into())),
        }
    }
}
