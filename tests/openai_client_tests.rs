// Outbound client tests against a local mock server

use prompt2image::config::{OpenAiConfig, PerformanceConfig, SecretString};
use prompt2image::error::ApiError;
use prompt2image::generation::{GenerationOptions, ImageBackend};
use prompt2image::openai::OpenAiClient;

fn client_for(server: &mockito::ServerGuard, key: &str) -> OpenAiClient {
    let config = OpenAiConfig {
        api_base_url: server.url(),
        api_key: SecretString::new(key),
        timeout_seconds: 5,
    };
    OpenAiClient::new(&config, &PerformanceConfig::default()).unwrap()
}

fn options() -> GenerationOptions {
    GenerationOptions {
        model: "dall-e-3".to_string(),
        size: "1024x1024".to_string(),
        quality: "standard".to_string(),
        style: "vivid".to_string(),
        use_cache: true,
        max_retries: 3,
    }
}

#[tokio::test]
async fn test_generate_success() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/images/generations")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "created": 1700000000,
                "data": [{"url": "https://example.com/fox.png", "revised_prompt": "a red fox"}]
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server, "test-key");
    let batch = client.generate("a red fox", &options()).await.unwrap();

    assert_eq!(batch.created, 1700000000);
    assert_eq!(batch.images.len(), 1);
    assert_eq!(
        batch.images[0].url.as_deref(),
        Some("https://example.com/fox.png")
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_generate_sends_expected_body() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/images/generations")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "model": "dall-e-3",
            "prompt": "a red fox",
            "n": 1,
            "size": "1024x1024",
            "quality": "standard",
            "style": "vivid"
        })))
        .with_status(200)
        .with_body(r#"{"created": 1, "data": []}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-key");
    client.generate("a red fox", &options()).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_upstream_error_message_is_extracted() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/images/generations")
        .with_status(400)
        .with_body(r#"{"error": {"message": "Billing hard limit reached"}}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-key");
    let err = client.generate("a red fox", &options()).await.unwrap_err();

    assert!(matches!(err, ApiError::Upstream(_)));
    let message = err.to_string();
    assert!(message.contains("400"));
    assert!(message.contains("Billing hard limit reached"));
}

#[tokio::test]
async fn test_malformed_response_body_is_an_upstream_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/images/generations")
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let client = client_for(&server, "test-key");
    let err = client.generate("a red fox", &options()).await.unwrap_err();
    assert!(matches!(err, ApiError::Upstream(_)));
}

#[tokio::test]
async fn test_is_configured_reflects_credential() {
    let server = mockito::Server::new_async().await;
    assert!(client_for(&server, "test-key").is_configured());
    assert!(!client_for(&server, "").is_configured());
}

#[tokio::test]
async fn test_check_connectivity() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/models")
        .match_header("authorization", "Bearer test-key")
        .with_status(200)
        .with_body(r#"{"object": "list", "data": []}"#)
        .create_async()
        .await;

    let client = client_for(&server, "test-key");
    assert!(client.check_connectivity().await.is_ok());
}

#[tokio::test]
async fn test_check_connectivity_surfaces_auth_failure() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/models")
        .with_status(401)
        .with_body(r#"{"error": {"message": "Incorrect API key provided"}}"#)
        .create_async()
        .await;

    let client = client_for(&server, "bad-key");
    let err = client.check_connectivity().await.unwrap_err();
    assert!(err.to_string().contains("Incorrect API key"));
}
