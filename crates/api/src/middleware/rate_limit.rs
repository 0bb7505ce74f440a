//! # Rate Limiting Middleware
//!
//! A sliding-window limiter applied in front of the booking API. Each client
//! may make at most `max_requests` requests in any `window`; further requests
//! are answered with `429 Too Many Requests` and a `Retry-After` header.
//!
//! Clients are identified by the peer address of the connection. When the
//! server sits behind a proxy that overwrites `X-Forwarded-For`, forwarding can
//! be trusted and the first address in that header is used instead. Requests
//! with no usable address share one bucket.

use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex, PoisonError},
    time::{Duration, Instant},
};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use slotwise_core::errors::{SlotError, SlotResult};
use tracing::warn;

use crate::{middleware::error_handling::AppError, ApiState};

const UNKNOWN_CLIENT: &str = "unknown";

/// Per-client request history.
pub struct RateLimiter {
    requests: Mutex<HashMap<String, Vec<Instant>>>,
    max_requests: u32,
    window: Duration,
    trust_forwarded: bool,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: Mutex::new(HashMap::new()),
            max_requests,
            window,
            trust_forwarded: false,
        }
    }

    /// Keys clients by `X-Forwarded-For` instead of the peer address.
    pub fn with_trusted_forwarding(mut self, trust_forwarded: bool) -> Self {
        self.trust_forwarded = trust_forwarded;
        self
    }

    /// Records a request from `key` made at `now`.
    ///
    /// # Errors
    ///
    /// * `SlotError::RateLimited` - `key` already used its allowance for the current window
    pub fn check_at(&self, key: &str, now: Instant) -> SlotResult<()> {
        let mut requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);

        let times = requests.entry(key.to_string()).or_default();
        times.retain(|&t| now.saturating_duration_since(t) < self.window);

        if times.len() >= self.max_requests as usize {
            let retry_after = times
                .first()
                .map(|t| self.window.saturating_sub(now.saturating_duration_since(*t)))
                .unwrap_or(self.window);
            return Err(SlotError::RateLimited {
                retry_after_secs: retry_after_secs(retry_after),
            });
        }

        times.push(now);
        Ok(())
    }

    pub fn check(&self, key: &str) -> SlotResult<()> {
        self.check_at(key, Instant::now())
    }

    /// Drops clients with no requests inside the window.
    pub fn prune(&self) {
        let now = Instant::now();
        let mut requests = self.requests.lock().unwrap_or_else(PoisonError::into_inner);
        requests.retain(|_, times| {
            times.retain(|&t| now.saturating_duration_since(t) < self.window);
            !times.is_empty()
        });
    }

    pub fn tracked_clients(&self) -> usize {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

fn retry_after_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    secs.max(1)
}

fn client_key(request: &Request, trust_forwarded: bool) -> String {
    if trust_forwarded {
        let forwarded = request
            .headers()
            .get("x-forwarded-for")
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split(',').next())
            .map(str::trim)
            .filter(|value| !value.is_empty());
        if let Some(forwarded) = forwarded {
            return forwarded.to_string();
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| UNKNOWN_CLIENT.to_string())
}

/// Axum middleware enforcing the shared [`RateLimiter`].
pub async fn rate_limit(
    State(state): State<Arc<ApiState>>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let key = client_key(&request, state.rate_limiter.trust_forwarded);
    if let Err(err) = state.rate_limiter.check(&key) {
        warn!(client = %key, "Rate limit exceeded");
        return Err(AppError(err));
    }

    Ok(next.run(request).await)
}
