use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use booksnap_app::{Orchestrator, NOT_FOUND_MESSAGE};
use booksnap_domain::{CompletionRequest, ContentBlock, Error, ModelReply, ProviderClient, StopReason};
use booksnap_server::{
    router, AppState, RateLimiter, AUTH_FAILURE_MESSAGE, CONFIG_ERROR_MESSAGE,
    MISSING_FIELDS_MESSAGE, RATE_LIMIT_MESSAGE, THROTTLED_MESSAGE, TIMEOUT_MESSAGE,
};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tower::ServiceExt;

struct StubProvider {
    behavior: Behavior,
}

enum Behavior {
    Reply(ModelReply),
    Auth,
    Throttle,
    Timeout,
}

#[async_trait]
impl ProviderClient for StubProvider {
    async fn complete(&self, _request: CompletionRequest) -> booksnap_domain::Result<ModelReply> {
        match &self.behavior {
            Behavior::Reply(reply) => Ok(reply.clone()),
            Behavior::Auth => Err(Error::Auth),
            Behavior::Throttle => Err(Error::RateLimited),
            Behavior::Timeout => Err(Error::Timeout),
        }
    }
}

fn text_reply(text: &str) -> ModelReply {
    ModelReply {
        content: vec![ContentBlock::text(text)],
        stop_reason: StopReason::EndTurn,
    }
}

fn summary_reply() -> ModelReply {
    text_reply(
        &json!({
            "bookTitle": "The Pragmatic Programmer",
            "author": "Andrew Hunt",
            "briefDescription": "Timeless advice for software craftsmen.",
            "mainPoints": [
                {"title": "Care about your craft", "description": "Quality is a habit."},
            ],
            "callToAction": "Fix broken windows as soon as you see them.",
            "conclusion": "Pragmatism compounds over a career.",
        })
        .to_string(),
    )
}

fn state_with(behavior: Behavior) -> AppState {
    AppState {
        orchestrator: Some(Arc::new(Orchestrator::new(Arc::new(StubProvider { behavior })))),
        affiliate_tag: "testtag-20".to_string(),
        rate_limiter: RateLimiter::default(),
    }
}

fn app(state: AppState) -> Router {
    router(state, Path::new("client/dist"))
}

async fn post_summarize(app: Router, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/summarize")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn test_missing_author_is_rejected() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Reply(summary_reply()))),
        json!({"title": "Dune"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], MISSING_FIELDS_MESSAGE);
}

#[tokio::test]
async fn test_whitespace_title_is_rejected() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Reply(summary_reply()))),
        json!({"title": "   ", "author": "Frank Herbert"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Book title and author name cannot be empty.");
}

#[tokio::test]
async fn test_unconfigured_api_key_is_a_server_error() {
    let state = AppState {
        orchestrator: None,
        affiliate_tag: "testtag-20".to_string(),
        rate_limiter: RateLimiter::default(),
    };

    let (status, body) = post_summarize(
        app(state),
        json!({"title": "Dune", "author": "Frank Herbert"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], CONFIG_ERROR_MESSAGE);
}

#[tokio::test]
async fn test_successful_summary_carries_affiliate_link() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Reply(summary_reply()))),
        json!({"title": "The Pragmatic Programmer", "author": "Andrew Hunt"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["summary"]["bookTitle"], "The Pragmatic Programmer");
    let amazon_url = body["amazonUrl"].as_str().unwrap();
    assert!(amazon_url.starts_with("https://www.amazon.com/s?"));
    assert!(amazon_url.contains("tag=testtag-20"));
}

#[tokio::test]
async fn test_not_found_outcome_is_a_bad_request() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Reply(text_reply(
            r#"{"error": "Book not found"}"#,
        )))),
        json!({"title": "Totally Made Up", "author": "Nobody"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], NOT_FOUND_MESSAGE);
}

#[tokio::test]
async fn test_auth_failure_maps_to_distinct_message() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Auth)),
        json!({"title": "Dune", "author": "Frank Herbert"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], AUTH_FAILURE_MESSAGE);
}

#[tokio::test]
async fn test_provider_throttling_maps_to_429() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Throttle)),
        json!({"title": "Dune", "author": "Frank Herbert"}),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], THROTTLED_MESSAGE);
}

#[tokio::test]
async fn test_provider_timeout_maps_to_504() {
    let (status, body) = post_summarize(
        app(state_with(Behavior::Timeout)),
        json!({"title": "Dune", "author": "Frank Herbert"}),
    )
    .await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert_eq!(body["error"], TIMEOUT_MESSAGE);
}

#[tokio::test]
async fn test_health_probe() {
    let response = app(state_with(Behavior::Reply(summary_reply())))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_api_requests_beyond_the_limit_are_rejected() {
    let mut state = state_with(Behavior::Reply(summary_reply()));
    state.rate_limiter = RateLimiter::new(2, Duration::from_secs(60));
    let app = app(state);

    for _ in 0..2 {
        let (status, _) = post_summarize(
            app.clone(),
            json!({"title": "Dune", "author": "Frank Herbert"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = post_summarize(
        app,
        json!({"title": "Dune", "author": "Frank Herbert"}),
    )
    .await;

    assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(body["error"], RATE_LIMIT_MESSAGE);
}
