use crate::{
    config::DEFAULT_TIMEOUT_SECS,
    error::{Result, StoryImgError},
    models::FetchedImage,
};
use image::ImageFormat;
use std::path::Path;
use std::time::Duration;

/// Downloads generated images into a working directory.
///
/// Stateless apart from the connection pool inside the HTTP client.
#[derive(Clone)]
pub struct ImageFetcher {
    http: reqwest::Client,
}

impl ImageFetcher {
    pub fn new() -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(|e| StoryImgError::ClientError(e.to_string()))?;
        Ok(Self { http })
    }

    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download the image at `url` and save it as
    /// `{workdir}/image_{image_number}.png`.
    ///
    /// The body is decoded in memory before anything touches the
    /// filesystem, so a decode failure leaves no file behind. The image is
    /// re-encoded as PNG whatever the source format was, and an existing
    /// file at the destination is overwritten. `image_number` is taken on
    /// trust; colliding numbers within one workdir overwrite each other.
    pub async fn fetch(
        &self,
        workdir: &Path,
        url: &str,
        image_number: &str,
    ) -> Result<FetchedImage> {
        log::debug!("Downloading image {} from {}", image_number, url);

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| StoryImgError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoryImgError::ResponseError(format!(
                "image download returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| StoryImgError::NetworkError(e.to_string()))?;

        let image = image::load_from_memory(&bytes)
            .map_err(|e| StoryImgError::DecodeError(e.to_string()))?;

        let path = workdir.join(format!("image_{}.png", image_number));
        image
            .save_with_format(&path, ImageFormat::Png)
            .map_err(|e| StoryImgError::IoError(e.to_string()))?;

        log::info!(
            "Saved image {} ({}x{}) to {}",
            image_number,
            image.width(),
            image.height(),
            path.display()
        );

        Ok(FetchedImage { image, path })
    }
}
