//! Server shared state
//!
//! Holds configuration and shared resources for the HTTP server.

use crate::config::Config;
use crate::error::Result;
use crate::offers::DefaultSearch;
use crate::server::rate_limit::RateLimiter;
use std::time::Instant;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Offer search pipeline
    pub search: DefaultSearch,

    /// Per-client request limiter
    pub rate_limiter: RateLimiter,

    started_at: Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let search = DefaultSearch::from_config(&config)?;
        let rate_limiter = RateLimiter::from_config(&config.rate_limit);
        Ok(Self {
            config,
            search,
            rate_limiter,
            started_at: Instant::now(),
        })
    }

    /// Seconds since the state was created
    pub fn uptime_secs(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}
