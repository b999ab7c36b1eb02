use std::sync::Arc;
use std::time::Instant;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use tracing::{info, warn};

use crate::error::ApiError;
use crate::extract::ExtractError;
use crate::maps;
use crate::metrics::{AUTH_REJECTED, RATE_LIMITED, REQUEST_TOTAL, UPSTREAM_LATENCY};
use crate::models::{PlacesRequest, PlacesResponse};
use crate::rate_limit::Decision;
use crate::state::AppState;

// Zero-op answer for the CORS pre-check; the CORS layer adds the headers.
pub async fn places_preflight() -> StatusCode {
    StatusCode::OK
}

// POST /places handler. Stage order is fixed: auth, rate limit, body parse,
// extraction, link assembly. The first failing stage ends the request, and
// the body is only parsed once the caller is authorized and within limit.
pub async fn places_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<PlacesResponse>, ApiError> {
    REQUEST_TOTAL.inc();

    let api_key = headers.get("x-api-key").and_then(|value| value.to_str().ok());
    if !state.auth.verify(api_key) {
        AUTH_REJECTED.inc();
        return Err(ApiError::Unauthorized);
    }
    // verify() only passes a present, non-empty key
    let identity = api_key.unwrap_or_default();

    if let Decision::Denied { retry_after_secs } = state.rate_limiter.check_and_record(identity) {
        RATE_LIMITED.inc();
        warn!(retry_after_secs, "rate limit exceeded");
        return Err(ApiError::TooManyRequests { retry_after_secs });
    }

    let request: PlacesRequest = serde_json::from_slice(&body)
        .map_err(|_| ApiError::BadRequest("Invalid JSON body".to_string()))?;

    let start = Instant::now();
    let extraction = state
        .extractor
        .extract(&request.prompt)
        .await
        .map_err(|e| match e {
            ExtractError::Unavailable => ApiError::ServiceUnavailable,
            ExtractError::Upstream(detail) => ApiError::Internal(detail),
            ExtractError::Empty => ApiError::BadRequest("Empty query from LLM".to_string()),
        })?;
    UPSTREAM_LATENCY.observe(start.elapsed().as_secs_f64());

    info!(query = %extraction.query, "extracted map query");
    let links = maps::build_links(&extraction.query, &state.maps_api_key);

    Ok(Json(PlacesResponse {
        original_prompt: request.prompt,
        llm_query_extracted: extraction.query,
        llm_raw_response: extraction.raw,
        maps_interactive_link: links.interactive,
        maps_embed_iframe_url: links.embed_iframe,
    }))
}
