//! Token bucket rate limiter middleware.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;

use alwc_core::config::rate_limit::{BucketConfig, RateLimitConfig};
use alwc_core::error::AppError;

use crate::error::ApiError;
use crate::state::AppState;

/// Tracked clients before fully refilled buckets are evicted.
const MAX_TRACKED_CLIENTS: usize = 10_000;

/// Simple in-memory token bucket rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    /// IP → bucket state.
    buckets: Arc<Mutex<HashMap<String, TokenBucket>>>,
    /// Maximum tokens per bucket.
    max_tokens: u32,
    /// Token refill rate per second.
    refill_rate: f64,
}

#[derive(Debug, Clone)]
struct TokenBucket {
    tokens: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self, now: Instant, max_tokens: f64, refill_rate: f64) {
        let elapsed = now.duration_since(self.last_refill).as_secs_f64();
        self.tokens = (self.tokens + elapsed * refill_rate).min(max_tokens);
        self.last_refill = now;
    }
}

impl RateLimiter {
    /// Creates a new rate limiter.
    pub fn new(max_tokens: u32, refill_rate: f64) -> Self {
        Self {
            buckets: Arc::new(Mutex::new(HashMap::new())),
            max_tokens,
            refill_rate,
        }
    }

    pub fn from_bucket(config: &BucketConfig) -> Self {
        Self::new(config.max_requests, config.refill_rate())
    }

    /// Attempts to consume a token for the given key.
    pub async fn check(&self, key: &str) -> bool {
        let mut buckets = self.buckets.lock().await;
        let now = Instant::now();
        let max = f64::from(self.max_tokens);

        if buckets.len() >= MAX_TRACKED_CLIENTS && !buckets.contains_key(key) {
            buckets.retain(|_, bucket| {
                bucket.refill(now, max, self.refill_rate);
                bucket.tokens < max
            });
        }

        let bucket = buckets.entry(key.to_string()).or_insert(TokenBucket {
            tokens: max,
            last_refill: now,
        });
        bucket.refill(now, max, self.refill_rate);

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Return a token consumed by [`check`](Self::check).
    pub async fn refund(&self, key: &str) {
        let mut buckets = self.buckets.lock().await;
        if let Some(bucket) = buckets.get_mut(key) {
            bucket.tokens = (bucket.tokens + 1.0).min(f64::from(self.max_tokens));
        }
    }
}

/// One limiter per throttled surface.
#[derive(Debug, Clone)]
pub struct RateLimits {
    enabled: bool,
    pub api: RateLimiter,
    pub login: RateLimiter,
    pub password_reset: RateLimiter,
    pub contact: RateLimiter,
}

impl RateLimits {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self {
            enabled: config.enabled,
            api: RateLimiter::from_bucket(&config.api),
            login: RateLimiter::from_bucket(&config.login),
            password_reset: RateLimiter::from_bucket(&config.password_reset),
            contact: RateLimiter::from_bucket(&config.contact),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Client address: first `X-Forwarded-For` hop, else the socket peer.
pub fn client_ip(request: &Request) -> String {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty());
    if let Some(ip) = forwarded {
        return ip.to_string();
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn throttle(
    limits: &RateLimits,
    limiter: &RateLimiter,
    message: &'static str,
    refund_success: bool,
    request: Request,
    next: Next,
) -> Response {
    if !limits.is_enabled() {
        return next.run(request).await;
    }

    let key = client_ip(&request);
    if !limiter.check(&key).await {
        return ApiError(AppError::rate_limited(message)).into_response();
    }

    let response = next.run(request).await;
    if refund_success && response.status().is_success() {
        limiter.refund(&key).await;
    }
    response
}

/// Every `/api` request.
pub async fn api_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limits = &state.rate_limits;
    throttle(
        limits,
        &limits.api,
        "Too many requests from this IP, please try again later.",
        false,
        request,
        next,
    )
    .await
}

/// Login attempts. Successful logins do not count.
pub async fn login_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let limits = &state.rate_limits;
    throttle(
        limits,
        &limits.login,
        "Too many login attempts, please try again later.",
        true,
        request,
        next,
    )
    .await
}

pub async fn password_reset_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let limits = &state.rate_limits;
    throttle(
        limits,
        &limits.password_reset,
        "Too many password reset requests, please try again later.",
        false,
        request,
        next,
    )
    .await
}

pub async fn contact_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let limits = &state.rate_limits;
    throttle(
        limits,
        &limits.contact,
        "Too many contact form submissions, please try again later.",
        false,
        request,
        next,
    )
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;

    #[tokio::test]
    async fn test_bucket_exhausts() {
        let limiter = RateLimiter::new(2, 0.0);
        assert!(limiter.check("10.0.0.1").await);
        assert!(limiter.check("10.0.0.1").await);
        assert!(!limiter.check("10.0.0.1").await);
        // Separate clients have separate buckets.
        assert!(limiter.check("10.0.0.2").await);
    }

    #[tokio::test]
    async fn test_refund_restores_token() {
        let limiter = RateLimiter::new(1, 0.0);
        assert!(limiter.check("a").await);
        assert!(!limiter.check("a").await);
        limiter.refund("a").await;
        assert!(limiter.check("a").await);
    }

    #[tokio::test]
    async fn test_refund_never_exceeds_capacity() {
        let limiter = RateLimiter::new(1, 0.0);
        assert!(limiter.check("a").await);
        limiter.refund("a").await;
        limiter.refund("a").await;
        assert!(limiter.check("a").await);
        assert!(!limiter.check("a").await);
    }

    #[test]
    fn test_client_ip_prefers_forwarded_for() {
        let request = Request::builder()
            .header("x-forwarded-for", "203.0.113.9, 10.0.0.1")
            .body(Body::empty())
            .unwrap();
        assert_eq!(client_ip(&request), "203.0.113.9");

        let request = Request::builder().body(Body::empty()).unwrap();
        assert_eq!(client_ip(&request), "unknown");
    }
}
