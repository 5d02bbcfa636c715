//! Per-client request rate limiting

use std::collections::{HashMap, VecDeque};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use tokio::sync::Mutex;
use tracing::warn;

use crate::config::RateLimitConfig;
use crate::server::routes::ApiError;

/// Request times per client, plus when idle clients were last dropped
#[derive(Debug, Default)]
struct Clients {
    hits: HashMap<IpAddr, VecDeque<Instant>>,
    last_sweep: Option<Instant>,
}

/// Sliding-window limiter keyed by client IP
///
/// Each client may make at most `calls` requests in any `period`. Clients
/// with no request inside the window are dropped at most once per period.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    calls: usize,
    period: Duration,
    clients: Arc<Mutex<Clients>>,
}

impl RateLimiter {
    #[must_use]
    pub fn new(calls: usize, period: Duration) -> Self {
        Self {
            calls,
            period,
            clients: Arc::default(),
        }
    }

    #[must_use]
    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.calls, Duration::from_secs(config.period_secs))
    }

    /// Record a request from `ip` at `now`, returning false when over the limit
    ///
    /// Rejected requests are not recorded.
    pub async fn check(&self, ip: IpAddr, now: Instant) -> bool {
        let mut clients = self.clients.lock().await;
        self.sweep(&mut clients, now);

        let hits = clients.hits.entry(ip).or_default();
        while let Some(&oldest) = hits.front() {
            if now.duration_since(oldest) >= self.period {
                hits.pop_front();
            } else {
                break;
            }
        }

        if hits.len() >= self.calls {
            return false;
        }

        hits.push_back(now);
        true
    }

    /// Drop clients whose latest request has left the window
    fn sweep(&self, clients: &mut Clients, now: Instant) {
        let due = clients
            .last_sweep
            .map_or(true, |last| now.duration_since(last) >= self.period);
        if !due {
            return;
        }

        let period = self.period;
        clients
            .hits
            .retain(|_, hits| hits.back().is_some_and(|&last| now.duration_since(last) < period));
        clients.last_sweep = Some(now);
    }

    /// Number of clients currently tracked
    pub async fn tracked_clients(&self) -> usize {
        self.clients.lock().await.hits.len()
    }

    fn rejection(&self) -> ApiError {
        ApiError::new(
            StatusCode::TOO_MANY_REQUESTS,
            "RATE_LIMITED",
            format!(
                "Rate limit exceeded: {} requests per {} seconds",
                self.calls,
                self.period.as_secs()
            ),
        )
    }
}

/// Middleware enforcing the per-client limit
///
/// Requests without connection info (e.g. in-process tests) share one bucket.
pub async fn enforce_rate_limit(
    State(limiter): State<RateLimiter>,
    req: Request,
    next: Next,
) -> Response {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED), |info| info.0.ip());

    if !limiter.check(ip, Instant::now()).await {
        warn!(%ip, "rate limit exceeded");
        let err = limiter.rejection();
        return (err.status, Json(err)).into_response();
    }

    next.run(req).await
}
