use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{ConnectInfo, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tokio::sync::RwLock;
use tracing::warn;

use crate::AppState;

pub const RATE_LIMIT_MESSAGE: &str =
    "Too many requests. Please wait a minute before trying again.";

/// Sliding-window request counter per peer IP.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<RwLock<HashMap<String, Vec<Instant>>>>,
    limit: usize,
    window: Duration,
}

impl RateLimiter {
    pub fn new(limit: usize, window: Duration) -> Self {
        RateLimiter {
            requests: Arc::new(RwLock::new(HashMap::new())),
            limit,
            window,
        }
    }

    /// Records a request for the peer and reports whether it is within the
    /// limit. Stale entries are pruned on the way.
    pub async fn check(&self, peer_addr: &str) -> bool {
        let mut requests = self.requests.write().await;
        let peer_requests = requests.entry(peer_addr.to_string()).or_default();

        let now = Instant::now();
        peer_requests.retain(|&timestamp| now.duration_since(timestamp) < self.window);

        if peer_requests.len() >= self.limit {
            return false;
        }

        peer_requests.push(now);
        true
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        // 10 requests per minute per IP
        RateLimiter::new(10, Duration::from_secs(60))
    }
}

pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let peer_addr = extract_peer_addr(&request);

    if !state.rate_limiter.check(&peer_addr).await {
        warn!(peer = %peer_addr, "rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(serde_json::json!({"success": false, "error": RATE_LIMIT_MESSAGE})),
        )
            .into_response();
    }

    next.run(request).await
}

/// Peer identity for rate limiting: `x-forwarded-for` when behind a proxy,
/// otherwise the connection's remote address.
fn extract_peer_addr(request: &Request) -> String {
    if let Some(forwarded) = request.headers().get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next() {
                return first_ip.trim().to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
