//! Fixed-window rate limiting keyed by client address.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, Request, State},
    http::{header::RETRY_AFTER, HeaderMap, HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::config::RateLimitConfig;

const RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
const RATELIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
const RATELIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// Requests counted in the current window for one client.
#[derive(Debug, Clone, Copy)]
struct ClientWindow {
    started: Instant,
    count: u32,
}

/// Outcome of charging one request to a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateDecision {
    /// Request admitted.
    Allowed { remaining: u32, reset_after: Duration },
    /// Budget exhausted until the window resets.
    Limited { reset_after: Duration },
}

impl RateDecision {
    pub fn is_allowed(&self) -> bool {
        matches!(self, RateDecision::Allowed { .. })
    }

    fn reset_after(&self) -> Duration {
        match self {
            RateDecision::Allowed { reset_after, .. } | RateDecision::Limited { reset_after } => {
                *reset_after
            }
        }
    }
}

/// Per-client fixed-window request counter.
#[derive(Clone)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    message: Arc<str>,
    clients: Arc<Mutex<HashMap<IpAddr, ClientWindow>>>,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration, message: impl Into<Arc<str>>) -> Self {
        Self {
            max_requests,
            window,
            message: message.into(),
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(
            config.max_requests,
            Duration::from_secs(config.window_secs),
            config.message.as_str(),
        )
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Charge one request to `client`.
    pub fn check(&self, client: IpAddr) -> RateDecision {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: IpAddr, now: Instant) -> RateDecision {
        let mut clients = self.lock();
        let entry = clients.entry(client_key(client)).or_insert(ClientWindow {
            started: now,
            count: 0,
        });

        if now.duration_since(entry.started) >= self.window {
            *entry = ClientWindow {
                started: now,
                count: 0,
            };
        }

        let reset_after = self.window.saturating_sub(now.duration_since(entry.started));

        if entry.count >= self.max_requests {
            return RateDecision::Limited { reset_after };
        }

        entry.count += 1;
        RateDecision::Allowed {
            remaining: self.max_requests - entry.count,
            reset_after,
        }
    }

    /// Drop windows that have expired. Returns how many were removed.
    pub fn prune(&self) -> usize {
        self.prune_at(Instant::now())
    }

    fn prune_at(&self, now: Instant) -> usize {
        let mut clients = self.lock();
        let before = clients.len();
        clients.retain(|_, w| now.duration_since(w.started) < self.window);
        before - clients.len()
    }

    /// Number of clients currently tracked.
    pub fn tracked_clients(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<IpAddr, ClientWindow>> {
        // Counters stay consistent even if a holder panicked.
        self.clients.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_headers(&self, headers: &mut HeaderMap, decision: &RateDecision) {
        let remaining = match decision {
            RateDecision::Allowed { remaining, .. } => *remaining,
            RateDecision::Limited { .. } => 0,
        };
        let reset_secs = ceil_secs(decision.reset_after());

        headers.insert(RATELIMIT_LIMIT, HeaderValue::from(self.max_requests));
        headers.insert(RATELIMIT_REMAINING, HeaderValue::from(remaining));
        headers.insert(RATELIMIT_RESET, HeaderValue::from(reset_secs));
        if !decision.is_allowed() {
            headers.insert(RETRY_AFTER, HeaderValue::from(reset_secs));
        }
    }
}

fn ceil_secs(duration: Duration) -> u64 {
    let secs = duration.as_secs();
    if duration.subsec_nanos() > 0 {
        secs + 1
    } else {
        secs
    }
}

/// Bucket a client is charged to.
///
/// IPv6 clients are grouped by their /64, the smallest block usually handed
/// to one subscriber. IPv4-mapped addresses count as their IPv4 address.
fn client_key(client: IpAddr) -> IpAddr {
    match client {
        IpAddr::V4(_) => client,
        IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
            Some(v4) => IpAddr::V4(v4),
            None => {
                let [a, b, c, d, ..] = v6.segments();
                IpAddr::V6(Ipv6Addr::new(a, b, c, d, 0, 0, 0, 0))
            }
        },
    }
}

/// Client identity for rate limiting: the peer address of the connection.
///
/// Requests without connection info (in-process callers) share one bucket.
fn client_addr(request: &Request<Body>) -> IpAddr {
    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Reject requests from clients that exhausted their budget.
pub async fn enforce_rate_limit(
    State(limiter): State<RateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let client = client_addr(&request);
    let decision = limiter.check(client);

    let mut response = if decision.is_allowed() {
        next.run(request).await
    } else {
        tracing::warn!(client = %client, "Rate limit exceeded");
        (StatusCode::TOO_MANY_REQUESTS, limiter.message.to_string()).into_response()
    };

    limiter.write_headers(response.headers_mut(), &decision);
    response
}
