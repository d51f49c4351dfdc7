use image::DynamicImage;
use serde::Deserialize;
use std::path::PathBuf;

/// Response body of a `POST /images/generations` call.
#[derive(Debug, Deserialize)]
pub struct ImageGenerationResponse {
    pub created: Option<i64>,
    pub data: Vec<GeneratedImage>,
}

#[derive(Debug, Deserialize)]
pub struct GeneratedImage {
    pub url: String,
}

/// Error envelope the service wraps failures in.
#[derive(Debug, Deserialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub code: Option<String>,
}

/// A downloaded illustration: the decoded bitmap plus where it was saved.
#[derive(Debug)]
pub struct FetchedImage {
    pub image: DynamicImage,
    pub path: PathBuf,
}
