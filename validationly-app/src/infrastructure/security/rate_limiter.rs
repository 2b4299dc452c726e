use dashmap::DashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use validationly_errors::AppError;

const MAX_REQUESTS_PER_WINDOW: u32 = 50;
const WINDOW: Duration = Duration::from_secs(15 * 60);
const CLEANUP_INTERVAL: Duration = Duration::from_secs(300);

#[derive(Clone)]
struct RequestRecord {
    count: u32,
    window_start: Instant,
}

/// Fixed-window per-client admission filter. Keys are client IPs as sent by
/// the proxy, so unparseable values still get their own bucket.
#[derive(Clone)]
pub struct RateLimiter {
    requests: Arc<DashMap<String, RequestRecord>>,
    last_cleanup: Arc<Mutex<Instant>>,
    max_requests: u32,
    window: Duration,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_REQUESTS_PER_WINDOW, WINDOW)
    }

    pub fn with_limits(max_requests: u32, window: Duration) -> Self {
        Self {
            requests: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            max_requests,
            window,
        }
    }

    pub fn check_rate_limit(&self, client: &str) -> Result<(), RateLimitError> {
        self.maybe_cleanup();

        let now = Instant::now();
        let mut record = self
            .requests
            .entry(client.to_string())
            .or_insert_with(|| RequestRecord {
                count: 0,
                window_start: now,
            });

        if now.duration_since(record.window_start) > self.window {
            record.count = 0;
            record.window_start = now;
        }

        if record.count >= self.max_requests {
            let elapsed = now.duration_since(record.window_start);
            let wait = self.window.saturating_sub(elapsed).max(Duration::from_secs(1));
            return Err(RateLimitError::TooManyRequests(wait));
        }

        record.count += 1;
        Ok(())
    }

    fn maybe_cleanup(&self) {
        let Ok(mut last_cleanup) = self.last_cleanup.lock() else {
            return;
        };
        if last_cleanup.elapsed() > CLEANUP_INTERVAL {
            let window = self.window;
            self.requests
                .retain(|_, record| record.window_start.elapsed() <= window);
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub enum RateLimitError {
    TooManyRequests(Duration),
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        match err {
            RateLimitError::TooManyRequests(wait) => AppError::RateLimited(wait),
        }
    }
}
