use dashmap::DashMap;
use ideanest_errors::AppError;
use std::net::IpAddr;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

const MAX_REQUESTS_PER_MINUTE: u32 = 5;
const MAX_REQUESTS_PER_HOUR: u32 = 20;
const CLEANUP_INTERVAL_SECS: u64 = 300;

#[derive(Clone)]
struct RequestWindow {
    minute_count: u32,
    hour_count: u32,
    minute_start: Instant,
    hour_start: Instant,
}

impl Default for RequestWindow {
    fn default() -> Self {
        let now = Instant::now();
        Self {
            minute_count: 0,
            hour_count: 0,
            minute_start: now,
            hour_start: now,
        }
    }
}

/// Per-client evaluation limiter with fixed minute and hour windows.
#[derive(Clone)]
pub struct RateLimiter {
    windows: Arc<DashMap<IpAddr, RequestWindow>>,
    last_cleanup: Arc<Mutex<Instant>>,
    per_minute: u32,
    per_hour: u32,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self::with_limits(MAX_REQUESTS_PER_MINUTE, MAX_REQUESTS_PER_HOUR)
    }

    pub fn with_limits(per_minute: u32, per_hour: u32) -> Self {
        Self {
            windows: Arc::new(DashMap::new()),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            per_minute,
            per_hour,
        }
    }

    pub fn check_rate_limit(&self, ip: IpAddr) -> Result<(), RateLimitError> {
        self.maybe_cleanup();

        let now = Instant::now();
        let mut window = self.windows.entry(ip).or_default();

        if now.duration_since(window.minute_start) > Duration::from_secs(60) {
            window.minute_count = 0;
            window.minute_start = now;
        }

        if now.duration_since(window.hour_start) > Duration::from_secs(3600) {
            window.hour_count = 0;
            window.hour_start = now;
        }

        if window.minute_count >= self.per_minute {
            let wait_secs = 60u64.saturating_sub(now.duration_since(window.minute_start).as_secs());
            return Err(RateLimitError::TooManyRequestsPerMinute(wait_secs));
        }

        if window.hour_count >= self.per_hour {
            let wait_secs =
                3600u64.saturating_sub(now.duration_since(window.hour_start).as_secs());
            return Err(RateLimitError::TooManyRequestsPerHour(wait_secs));
        }

        window.minute_count += 1;
        window.hour_count += 1;

        Ok(())
    }

    fn maybe_cleanup(&self) {
        let mut last_cleanup = self
            .last_cleanup
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if last_cleanup.elapsed() > Duration::from_secs(CLEANUP_INTERVAL_SECS) {
            if let Some(cutoff) = Instant::now().checked_sub(Duration::from_secs(3600)) {
                self.windows.retain(|_, w| w.hour_start > cutoff);
            }
            *last_cleanup = Instant::now();
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RateLimitError {
    #[error("Too many evaluations. Try again in {0} seconds.")]
    TooManyRequestsPerMinute(u64),
    #[error("Hourly evaluation limit reached. Try again in {} minutes.", minutes(.0))]
    TooManyRequestsPerHour(u64),
}

fn minutes(secs: &u64) -> u64 {
    secs.div_ceil(60)
}

impl From<RateLimitError> for AppError {
    fn from(err: RateLimitError) -> Self {
        AppError::RateLimited(err.to_string())
    }
}
