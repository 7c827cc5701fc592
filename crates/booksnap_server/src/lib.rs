mod rate_limit;
mod routes;

use std::path::Path;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::{middleware, Router};
use booksnap_app::Orchestrator;
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

pub use rate_limit::{rate_limit_middleware, RateLimiter, RATE_LIMIT_MESSAGE};
pub use routes::{
    AUTH_FAILURE_MESSAGE, CONFIG_ERROR_MESSAGE, GENERIC_FAILURE_MESSAGE, MISSING_FIELDS_MESSAGE,
    THROTTLED_MESSAGE, TIMEOUT_MESSAGE,
};

/// Shared state of the HTTP edge. `orchestrator` is `None` until a provider
/// API key is configured; summarize requests then fail with a configuration
/// error instead of a crash.
#[derive(Clone)]
pub struct AppState {
    pub orchestrator: Option<Arc<Orchestrator>>,
    pub affiliate_tag: String,
    pub rate_limiter: RateLimiter,
}

/// Builds the application router: the rate-limited API, the health probe,
/// and static serving of the client build with an index.html fallback.
pub fn router(state: AppState, static_dir: &Path) -> Router {
    let api = Router::new()
        .route("/api/summarize", post(routes::summarize))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            rate_limit::rate_limit_middleware,
        ));

    let assets =
        ServeDir::new(static_dir).fallback(ServeFile::new(static_dir.join("index.html")));

    Router::new()
        .merge(api)
        .route("/health", get(routes::health))
        .fallback_service(assets)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
