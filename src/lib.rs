pub mod config;
pub mod error;
pub mod fetch;
pub mod logger;
pub mod models;
pub mod openai;

pub use config::OpenAiConfig;
pub use error::{Result, StoryImgError};
pub use fetch::ImageFetcher;
pub use models::*;
pub use openai::ImageClient;
