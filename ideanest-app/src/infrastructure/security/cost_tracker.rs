use chrono::{NaiveDate, Utc};
use ideanest_errors::AppError;
use std::sync::{Mutex, MutexGuard, PoisonError};

pub const DAILY_REQUEST_LIMIT: u32 = 200;
const ESTIMATED_COST_PER_REQUEST_CENTS: u32 = 2;
const DAILY_COST_LIMIT_CENTS: u32 = 400;

struct DailyUsage {
    day: NaiveDate,
    requests: u32,
    cost_cents: u32,
}

/// Process-wide daily budget for provider calls. The check and the charge
/// happen under one lock, so concurrent callers cannot overshoot either cap.
pub struct CostTracker {
    usage: Mutex<DailyUsage>,
}

impl CostTracker {
    pub fn new() -> Self {
        Self {
            usage: Mutex::new(DailyUsage {
                day: Utc::now().date_naive(),
                requests: 0,
                cost_cents: 0,
            }),
        }
    }

    pub fn check_and_increment(&self) -> Result<(), CostLimitError> {
        let mut usage = self.current_usage();

        if usage.requests >= DAILY_REQUEST_LIMIT {
            return Err(CostLimitError::DailyRequestLimitReached);
        }

        if usage.cost_cents + ESTIMATED_COST_PER_REQUEST_CENTS > DAILY_COST_LIMIT_CENTS {
            return Err(CostLimitError::DailyCostLimitReached);
        }

        usage.requests += 1;
        usage.cost_cents += ESTIMATED_COST_PER_REQUEST_CENTS;

        Ok(())
    }

    /// Requests still allowed today under both the request and the cost cap.
    pub fn remaining_requests(&self) -> u32 {
        let usage = self.current_usage();
        let by_count = DAILY_REQUEST_LIMIT.saturating_sub(usage.requests);
        let by_cost = DAILY_COST_LIMIT_CENTS.saturating_sub(usage.cost_cents)
            / ESTIMATED_COST_PER_REQUEST_CENTS;
        by_count.min(by_cost)
    }

    fn current_usage(&self) -> MutexGuard<'_, DailyUsage> {
        let mut usage = self.usage.lock().unwrap_or_else(PoisonError::into_inner);
        let today = Utc::now().date_naive();

        if usage.day != today {
            usage.day = today;
            usage.requests = 0;
            usage.cost_cents = 0;
            tracing::info!("Daily cost tracker reset");
        }

        usage
    }
}

impl Default for CostTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CostLimitError {
    #[error("The daily evaluation limit has been reached. Please come back tomorrow.")]
    DailyRequestLimitReached,
    #[error("The evaluation budget for today is used up. Please come back tomorrow.")]
    DailyCostLimitReached,
}

impl From<CostLimitError> for AppError {
    fn from(err: CostLimitError) -> Self {
        AppError::RateLimited(err.to_string())
    }
}
