use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use booksnap_domain::{Error, SummaryRequest};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::AppState;

pub const MISSING_FIELDS_MESSAGE: &str = "Both book title and author name are required.";
pub const CONFIG_ERROR_MESSAGE: &str =
    "Server configuration error: Anthropic API key is not configured.";
pub const AUTH_FAILURE_MESSAGE: &str =
    "API authentication failed. Please check the API key configuration.";
pub const THROTTLED_MESSAGE: &str =
    "Too many requests to the AI service. Please wait a moment and try again.";
pub const TIMEOUT_MESSAGE: &str = "This is taking longer than expected. Please try again.";
pub const GENERIC_FAILURE_MESSAGE: &str = "Could not generate summary. Please try again.";

#[derive(Debug, Deserialize)]
pub struct SummarizePayload {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    author: Option<String>,
}

pub async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

pub async fn summarize(
    State(state): State<AppState>,
    Json(payload): Json<SummarizePayload>,
) -> Response {
    let (Some(title), Some(author)) = (payload.title, payload.author) else {
        return failure(StatusCode::BAD_REQUEST, MISSING_FIELDS_MESSAGE);
    };

    let request = match SummaryRequest::new(&title, &author) {
        Ok(request) => request,
        Err(error) => return failure(StatusCode::BAD_REQUEST, &error.to_string()),
    };

    let Some(orchestrator) = &state.orchestrator else {
        return failure(StatusCode::INTERNAL_SERVER_ERROR, CONFIG_ERROR_MESSAGE);
    };

    match orchestrator.summarize(&request).await {
        Ok(outcome) if outcome.is_success() => {
            let amazon_url = amazon_search_url(&request, &state.affiliate_tag);
            (
                StatusCode::OK,
                Json(json!({
                    "success": true,
                    "summary": outcome.summary(),
                    "amazonUrl": amazon_url,
                })),
            )
                .into_response()
        }
        Ok(outcome) => (StatusCode::BAD_REQUEST, Json(outcome)).into_response(),
        Err(provider_error) => map_provider_error(provider_error),
    }
}

/// Provider failures keep their distinct user-facing mappings; anything else
/// is logged and collapsed into a generic failure.
fn map_provider_error(error: Error) -> Response {
    match error {
        Error::Auth => failure(StatusCode::INTERNAL_SERVER_ERROR, AUTH_FAILURE_MESSAGE),
        Error::RateLimited => failure(StatusCode::TOO_MANY_REQUESTS, THROTTLED_MESSAGE),
        Error::Timeout => failure(StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE),
        other => {
            error!(error = %other, status = ?other.provider_status(), "summarization failed");
            failure(StatusCode::INTERNAL_SERVER_ERROR, GENERIC_FAILURE_MESSAGE)
        }
    }
}

fn failure(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({"success": false, "error": message}))).into_response()
}

/// Affiliate search link for the requested book.
fn amazon_search_url(request: &SummaryRequest, affiliate_tag: &str) -> String {
    let query: String = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("k", &format!("{} {}", request.title(), request.author()))
        .append_pair("tag", affiliate_tag)
        .finish();
    format!("https://www.amazon.com/s?{query}")
}
