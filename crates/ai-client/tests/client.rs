//! Integration tests for `AiClient` using wiremock HTTP mocks.

use ai_client::{AiClient, AiError, AiRequest};
use uuid::Uuid;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> AiClient {
    AiClient::new(base_url, Some("test-key".to_string()), 2_000)
}

fn test_request() -> AiRequest {
    AiRequest {
        request_id: Uuid::new_v4(),
        price: 12.5,
        niche: "jewelry".to_string(),
        image_url: "https://img.example/ring.jpg".to_string(),
    }
}

#[tokio::test]
async fn analyze_posts_the_product_and_parses_the_payload() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "estimated_competitors": 120,
        "saturation_level": "saturation",
        "recommended_price": { "optimal": 39.99, "min": 29.0, "max": 55.0 },
        "launch_estimate": {
            "launch_potential_score": 6.5,
            "success_probability": 0.62,
            "average_competitor_rating": 4.4
        },
        "niche_match": true,
        "product_visual_description": "gold ring with wave engraving",
        "etsy_search_query": "gold wave ring",
        "seo_tags": ["gold ring", "wave ring"],
        "quality_perception": "premium",
        "originality": 0.8,
        "personalization": false
    });

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .and(header("x-api-key", "test-key"))
        .and(body_partial_json(serde_json::json!({
            "price": 12.5,
            "niche": "jewelry"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client
        .analyze(&test_request())
        .await
        .expect("should parse the analysis payload");

    assert_eq!(raw.estimated_competitors, Some(120));
    assert_eq!(raw.saturation_level.as_deref(), Some("saturation"));
    assert_eq!(raw.niche_match, Some(true));
    let band = raw.recommended_price.expect("price band present");
    assert_eq!(band.optimal, Some(39.99));
}

#[tokio::test]
async fn request_carries_the_response_schema() {
    let server = MockServer::start().await;

    // The payload pins the contract by shipping the expected schema.
    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .and(body_partial_json(serde_json::json!({
            "response_schema": { "title": "RawAiResponse" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "estimated_competitors": 10
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client
        .analyze(&test_request())
        .await
        .expect("schema-bearing request should be accepted");
    assert_eq!(raw.estimated_competitors, Some(10));
}

#[tokio::test]
async fn unknown_fields_in_the_payload_are_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "estimated_competitors": 42,
            "model_version": "v9",
            "debug": { "tokens": 512 }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let raw = client.analyze(&test_request()).await.expect("lenient parse");
    assert_eq!(raw.estimated_competitors, Some(42));
}

#[tokio::test]
async fn conflict_status_maps_to_in_progress() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze(&test_request()).await.unwrap_err();
    assert!(matches!(err, AiError::InProgress));
}

#[tokio::test]
async fn rate_limit_status_also_maps_to_in_progress() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze(&test_request()).await.unwrap_err();
    assert!(matches!(err, AiError::InProgress));
}

#[tokio::test]
async fn server_error_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze(&test_request()).await.unwrap_err();
    match err {
        AiError::Http { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "model overloaded");
        }
        other => panic!("expected Http error, got {other:?}"),
    }
}

#[tokio::test]
async fn non_json_body_is_a_json_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>gateway</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.analyze(&test_request()).await.unwrap_err();
    assert!(matches!(err, AiError::Json(_)));
}

#[tokio::test]
async fn single_attempt_only_even_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/analyze"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let _ = client.analyze(&test_request()).await;
    // Mock expectations verify exactly one request was made.
}
