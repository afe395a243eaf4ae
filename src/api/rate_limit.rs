//! Per-client request throttling
//!
//! Each client IP gets its own token bucket refilled evenly across the
//! configured window, with the full quota available as burst.

use crate::config::RateLimitConfig;
use crate::error::{AppError, Result};
use axum::{
    extract::{ConnectInfo, Request, State},
    http::{header, HeaderValue},
    middleware::Next,
    response::{IntoResponse, Response},
};
use governor::{
    clock::{Clock, DefaultClock},
    DefaultKeyedRateLimiter, Quota, RateLimiter,
};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

/// Buckets kept before idle clients are pruned
const MAX_TRACKED_CLIENTS: usize = 10_000;

/// Outcome of a rejected check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Throttled {
    /// Time until the client may retry
    pub retry_after: Duration,
}

/// Keyed rate limiter shared by every request to the throttled routes
#[derive(Clone)]
pub struct ClientRateLimiter {
    limiter: Arc<DefaultKeyedRateLimiter<IpAddr>>,
    clock: DefaultClock,
}

impl ClientRateLimiter {
    /// Build a limiter allowing `max_requests` per `window_secs` per client
    pub fn new(config: &RateLimitConfig) -> Result<Self> {
        let burst = NonZeroU32::new(config.max_requests).ok_or_else(|| {
            AppError::Configuration("rate_limit.max_requests must be at least 1".to_string())
        })?;
        let period = Duration::from_secs(config.window_secs) / burst.get();
        let quota = Quota::with_period(period)
            .ok_or_else(|| {
                AppError::Configuration("rate_limit.window_secs must be positive".to_string())
            })?
            .allow_burst(burst);

        Ok(Self {
            limiter: Arc::new(RateLimiter::keyed(quota)),
            clock: DefaultClock::default(),
        })
    }

    /// Take one request from `client`'s bucket
    pub fn check(&self, client: IpAddr) -> std::result::Result<(), Throttled> {
        if self.limiter.len() > MAX_TRACKED_CLIENTS {
            self.limiter.retain_recent();
        }

        self.limiter.check_key(&client).map_err(|not_until| Throttled {
            retry_after: not_until.wait_time_from(self.clock.now()),
        })
    }

    /// Number of clients currently tracked
    pub fn tracked_clients(&self) -> usize {
        self.limiter.len()
    }
}

/// Peer address of the connection, when the server was started with connect info
pub fn client_ip(request: &Request) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Middleware rejecting clients over quota with 429
pub async fn rate_limit(
    State(limiter): State<ClientRateLimiter>,
    request: Request,
    next: Next,
) -> Response {
    let client = client_ip(&request);

    match limiter.check(client) {
        Ok(()) => next.run(request).await,
        Err(throttled) => {
            warn!(
                client = %client,
                path = request.uri().path(),
                retry_after_secs = throttled.retry_after.as_secs(),
                "Rate limit exceeded"
            );

            let mut response = AppError::RateLimit.into_response();
            let retry_after = throttled.retry_after.as_secs().max(1).to_string();
            if let Ok(value) = HeaderValue::from_str(&retry_after) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
            response
        }
    }
}
