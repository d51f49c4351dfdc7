use std::env;
use std::path::Path;
use storyimg::{ImageClient, ImageFetcher, OpenAiConfig, SizeSpec};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    storyimg::logger::init_with_config(
        storyimg::logger::LoggerConfig::development().with_prefix("storyimg"),
    )?;

    match dotenv::dotenv() {
        Ok(_) => log::info!(".env file loaded"),
        Err(_) => log::warn!("No .env file found, using system environment variables"),
    }

    let mut args = env::args().skip(1);
    let prompt = match args.next() {
        Some(prompt) => prompt,
        None => {
            eprintln!("usage: storyimg <prompt> [workdir] [size]");
            std::process::exit(2);
        }
    };
    let workdir = args.next().unwrap_or_else(|| ".".to_string());
    let size = SizeSpec::new(args.next().unwrap_or_else(|| "1024x1024".to_string()));

    if env::var("OPENAI_API_KEY").is_err() {
        log::error!("OPENAI_API_KEY is not set");
        std::process::exit(1);
    }

    let config = OpenAiConfig::from_env();
    let client = ImageClient::new(config)?;

    log::info!("Requesting image for prompt '{}' at {}", prompt, size);
    let url = client.generate(&prompt, &size).await?;

    let fetcher = ImageFetcher::new()?;
    let fetched = fetcher.fetch(Path::new(&workdir), &url, "0").await?;

    log::info!(
        "Done: {} ({}x{})",
        fetched.path.display(),
        fetched.image.width(),
        fetched.image.height()
    );

    Ok(())
}
