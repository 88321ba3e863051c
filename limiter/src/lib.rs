use std::time::Duration;

use middleware::client::ClientRateLimiter;

pub mod middleware {
    pub mod client;
}

/// Keyed-by-client-IP limiter: at most `max_requests` per `window`.
/// Instances are cheap to clone; clones share the same state, so one tier
/// can be applied across several routes.
pub fn client_middleware(max_requests: u32, window: Duration) -> ClientRateLimiter {
    ClientRateLimiter::new(max_requests, window)
}
