use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use places_gateway::auth::AuthGuard;
use places_gateway::extract::QueryExtractor;
use places_gateway::llm::{GenerateError, TextGenerator};
use places_gateway::rate_limit::RateLimiter;
use places_gateway::state::AppState;

const API_KEY: &str = "test-secret";
const MAPS_KEY: &str = "maps-key";

struct CannedGenerator(&'static str);

#[async_trait::async_trait]
impl TextGenerator for CannedGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Ok(self.0.to_string())
    }
}

struct DownGenerator;

#[async_trait::async_trait]
impl TextGenerator for DownGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Unreachable("connection refused".to_string()))
    }
}

struct BrokenGenerator;

#[async_trait::async_trait]
impl TextGenerator for BrokenGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Call("parse error: missing field".to_string()))
    }
}

fn app_with(generator: Arc<dyn TextGenerator>, max_requests: u32) -> Router {
    let state = Arc::new(AppState {
        auth: AuthGuard::new(API_KEY),
        rate_limiter: RateLimiter::new(max_requests, Duration::from_secs(60)),
        extractor: QueryExtractor::new(generator),
        maps_api_key: MAPS_KEY.to_string(),
    });
    places_gateway::router(state)
}

fn app() -> Router {
    app_with(
        Arc::new(CannedGenerator("The query is: \"best ramen near me\"")),
        5,
    )
}

fn places_request(api_key: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/places")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn successful_request_returns_links_and_query() {
    let response = app()
        .oneshot(places_request(Some(API_KEY), r#"{"prompt":"I want ramen"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["original_prompt"], "I want ramen");
    assert_eq!(body["llm_query_extracted"], "best ramen near me");
    assert_eq!(body["llm_raw_response"], "The query is: \"best ramen near me\"");
    assert_eq!(
        body["maps_interactive_link"],
        "https://www.google.com/maps/search/?api=1&query=best%20ramen%20near%20me"
    );
    assert_eq!(
        body["maps_embed_iframe_url"],
        "https://www.google.com/maps/embed/v1/search?key=maps-key&q=best%20ramen%20near%20me"
    );
}

#[tokio::test]
async fn missing_api_key_is_unauthorized() {
    let response = app()
        .oneshot(places_request(None, r#"{"prompt":"anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_api_key_is_unauthorized() {
    let response = app()
        .oneshot(places_request(Some("nope"), r#"{"prompt":"anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let response = app()
        .oneshot(places_request(Some(API_KEY), "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_prompt_field_defaults_to_empty() {
    let response = app().oneshot(places_request(Some(API_KEY), "{}")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["original_prompt"], "");
}

#[tokio::test]
async fn whitespace_only_extraction_is_bad_request() {
    let app = app_with(Arc::new(CannedGenerator("  \n ")), 5);
    let response = app
        .oneshot(places_request(Some(API_KEY), r#"{"prompt":"anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn unreachable_backend_is_service_unavailable() {
    let app = app_with(Arc::new(DownGenerator), 5);
    let response = app
        .oneshot(places_request(Some(API_KEY), r#"{"prompt":"anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn backend_call_failure_is_internal_error() {
    let app = app_with(Arc::new(BrokenGenerator), 5);
    let response = app
        .oneshot(places_request(Some(API_KEY), r#"{"prompt":"anything"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn over_limit_requests_get_429_with_retry_after() {
    let app = app_with(
        Arc::new(CannedGenerator("The query is: \"best ramen near me\"")),
        2,
    );

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(places_request(Some(API_KEY), r#"{"prompt":"ramen"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(places_request(Some(API_KEY), r#"{"prompt":"ramen"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: u64 = response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .expect("Retry-After header must be present and numeric");
    assert!((1..=60).contains(&retry_after));
}

#[tokio::test]
async fn rejected_requests_do_not_consume_rate_limit() {
    // unauthorized calls never reach the limiter
    let app = app_with(
        Arc::new(CannedGenerator("The query is: \"best ramen near me\"")),
        1,
    );

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(places_request(Some("wrong"), r#"{"prompt":"x"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    let response = app
        .oneshot(places_request(Some(API_KEY), r#"{"prompt":"x"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn unknown_path_is_not_found_for_any_method() {
    for method in ["GET", "POST", "PUT", "DELETE"] {
        let request = Request::builder()
            .method(method)
            .uri("/somewhere-else")
            .header("x-api-key", API_KEY)
            .body(Body::empty())
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "method {method}");
    }
}

#[tokio::test]
async fn preflight_on_places_is_ok_with_empty_body() {
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/places")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
}
