use httpmock::prelude::*;
use serde_json::json;
use std::time::{Duration, Instant};
use storyimg::{ImageClient, OpenAiConfig, SizeSpec, StoryImgError};

fn client_for(server: &MockServer) -> ImageClient {
    let config = OpenAiConfig::new()
        .with_api_key("test-key")
        .with_api_base(server.base_url());
    ImageClient::new(config).unwrap()
}

fn rate_limit_body() -> serde_json::Value {
    json!({
        "error": {
            "message": "Rate limit reached for images per minute",
            "type": "requests",
            "code": "rate_limit_exceeded"
        }
    })
}

#[tokio::test]
async fn returns_url_from_single_successful_call() {
    let server = MockServer::start_async().await;
    let image_url = server.url("/files/story.png");

    let body = json!({"created": 1_700_000_000, "data": [{"url": image_url.clone()}]});
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/images/generations")
                .header("authorization", "Bearer test-key")
                .json_body_partial(r#"{"n": 1, "size": "512x512"}"#);
            then.status(200).json_body(body);
        })
        .await;

    let client = client_for(&server);
    let url = client
        .generate_with_retry(
            "a fox in the snow",
            &SizeSpec::new("512x512"),
            3,
            Duration::from_millis(50),
        )
        .await
        .unwrap();

    assert_eq!(url, image_url);
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn retries_until_rate_limit_clears() {
    let server = MockServer::start_async().await;
    let delay = Duration::from_millis(500);

    let mut rate_limited = server
        .mock_async(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(429).json_body(rate_limit_body());
        })
        .await;

    let client = client_for(&server);
    let started = Instant::now();
    let handle = tokio::spawn(async move {
        client
            .generate_with_retry("a ship at dawn", &SizeSpec::new("512x512"), 3, delay)
            .await
    });

    // The first attempt hits the rate limit; swap in a success response
    // while the client is sleeping out the fixed delay.
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(rate_limited.hits_async().await, 1);
    rate_limited.delete_async().await;

    let image_url = server.url("/files/ship.png");
    let body = json!({"created": 1_700_000_001, "data": [{"url": image_url.clone()}]});
    let success = server
        .mock_async(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(200).json_body(body);
        })
        .await;

    let url = handle.await.unwrap().unwrap();
    assert_eq!(url, image_url);
    assert_eq!(success.hits_async().await, 1);
    assert!(started.elapsed() >= delay);
}

#[tokio::test]
async fn exhausts_after_all_attempts_rate_limited() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(429).json_body(rate_limit_body());
        })
        .await;

    let client = client_for(&server);
    let err = client
        .generate_with_retry(
            "a lighthouse in fog",
            &SizeSpec::new("256x256"),
            2,
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();

    match err {
        StoryImgError::GenerationExhausted { ref prompt, attempts } => {
            assert_eq!(prompt, "a lighthouse in fog");
            assert_eq!(attempts, 2);
        }
        other => panic!("expected GenerationExhausted, got {:?}", other),
    }
    assert!(err.to_string().contains("a lighthouse in fog"));
    assert_eq!(mock.hits_async().await, 2);
}

#[tokio::test]
async fn does_not_retry_non_rate_limit_failures() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(500).body("internal error");
        })
        .await;

    let client = client_for(&server);
    let err = client
        .generate_with_retry(
            "a desert at noon",
            &SizeSpec::new("256x256"),
            3,
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoryImgError::ResponseError(_)));
    assert_eq!(mock.hits_async().await, 1);
}

#[tokio::test]
async fn zero_retries_exhausts_without_calling_the_service() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(200).json_body(json!({"created": 1, "data": [{"url": "unused"}]}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .generate_with_retry(
            "an empty page",
            &SizeSpec::new("256x256"),
            0,
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        StoryImgError::GenerationExhausted { attempts: 0, .. }
    ));
    assert_eq!(mock.hits_async().await, 0);
}

#[tokio::test]
async fn empty_result_list_is_a_response_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/images/generations");
            then.status(200).json_body(json!({"created": 1, "data": []}));
        })
        .await;

    let client = client_for(&server);
    let err = client
        .generate_with_retry(
            "a blank canvas",
            &SizeSpec::new("256x256"),
            3,
            Duration::from_millis(50),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, StoryImgError::ResponseError(_)));
}
