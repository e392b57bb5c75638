//! Application state and rate limiting.

use std::collections::HashMap;
use std::net::IpAddr;
use std::time::Instant;

use boolex_storage::MemoryStorage;
use tokio::sync::Mutex;

use super::RATE_LIMIT_WINDOW_SECS;
use crate::service::ExpressionService;

/// One client's request count within its current window.
struct Window {
    count: u64,
    started: Instant,
}

impl Window {
    fn expired(&self, now: Instant, window_secs: u64) -> bool {
        now.duration_since(self.started).as_secs() >= window_secs
    }
}

/// In-memory per-IP rate limiter.
///
/// Expired windows are pruned on every admission, so idle clients never
/// accumulate entries over the server's lifetime.
pub(crate) struct RateLimiter {
    windows: Mutex<HashMap<IpAddr, Window>>,
    /// Maximum requests per window.
    max_requests: u64,
    /// Window length in seconds.
    window_secs: u64,
}

impl RateLimiter {
    pub(crate) fn new(max_requests: u64) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window_secs: RATE_LIMIT_WINDOW_SECS,
        }
    }

    #[cfg(test)]
    fn with_window(max_requests: u64, window_secs: u64) -> Self {
        Self {
            windows: Mutex::new(HashMap::new()),
            max_requests,
            window_secs,
        }
    }

    /// Admit or reject a request from `ip`.
    ///
    /// Returns Ok(()) if allowed, Err(retry_after_secs) once the caller's
    /// window quota is spent.
    pub(crate) async fn admit(&self, ip: IpAddr) -> Result<(), u64> {
        let mut windows = self.windows.lock().await;
        let now = Instant::now();

        // Drop every expired window, the caller's included; a fresh one
        // starts below if needed.
        windows.retain(|_, window| !window.expired(now, self.window_secs));

        let window = windows.entry(ip).or_insert(Window {
            count: 0,
            started: now,
        });
        window.count += 1;
        if window.count > self.max_requests {
            let elapsed = now.duration_since(window.started).as_secs();
            Err(self.window_secs.saturating_sub(elapsed))
        } else {
            Ok(())
        }
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.windows.lock().await.len()
    }
}

/// Application state shared across request handlers.
pub(crate) struct AppState {
    /// The expression service over the in-memory backend.
    pub(crate) service: ExpressionService<MemoryStorage>,
    /// Per-IP rate limiter.
    pub(crate) rate_limiter: RateLimiter,
    /// Optional API key for authentication. None = no auth required.
    pub(crate) api_key: Option<String>,
}
