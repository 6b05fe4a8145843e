//! Cold-start handling: one bounded retry on HTTP 503.
//!
//! # Design
//! A dormant backend answers 503 until it has warmed up. `ColdStartRetry`
//! wraps any `Transport`: on a 503 it waits a fixed delay and re-issues the
//! identical request exactly once, as an explicit loop. The second outcome
//! propagates as-is — a second 503 surfaces to the caller, bounding
//! worst-case latency at one delay window. Network errors are never
//! retried. The sleep function is injectable so tests never wait.

use std::time::Duration;

use tracing::warn;

use crate::error::ApiError;
use crate::http::{HttpRequest, HttpResponse};
use crate::transport::Transport;

/// Fixed wait before the single cold-start retry.
pub const COLD_START_DELAY: Duration = Duration::from_secs(5);

const SERVICE_UNAVAILABLE: u16 = 503;

/// Transport decorator that retries one 503 response after a fixed delay.
pub struct ColdStartRetry<T> {
    inner: T,
    delay: Duration,
    sleep: fn(Duration),
}

impl<T: Transport> ColdStartRetry<T> {
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            delay: COLD_START_DELAY,
            sleep: std::thread::sleep,
        }
    }

    /// Override the delay and sleep function. Tests pass `|_| {}`.
    pub fn with_sleep(inner: T, delay: Duration, sleep: fn(Duration)) -> Self {
        Self { inner, delay, sleep }
    }
}

impl<T: Transport> Transport for ColdStartRetry<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
        let mut retries_left = 1;
        loop {
            let response = self.inner.execute(request)?;
            if response.status != SERVICE_UNAVAILABLE || retries_left == 0 {
                return Ok(response);
            }
            retries_left -= 1;
            warn!(
                path = %request.path,
                delay_secs = self.delay.as_secs(),
                "service starting, retrying once after delay"
            );
            (self.sleep)(self.delay);
        }
    }
}
