use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoryImgError {
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Client error: {0}")]
    ClientError(String),
    #[error("Request error: {0}")]
    RequestError(String),
    #[error("Response error: {0}")]
    ResponseError(String),
    #[error("Rate limited: {0}")]
    RateLimited(String),
    #[error("Failed to generate image for prompt '{prompt}' after {attempts} attempts")]
    GenerationExhausted { prompt: String, attempts: u32 },
    #[error("Network error: {0}")]
    NetworkError(String),
    #[error("Image decode error: {0}")]
    DecodeError(String),
    #[error("I/O error: {0}")]
    IoError(String),
}

pub type Result<T> = std::result::Result<T, StoryImgError>;
