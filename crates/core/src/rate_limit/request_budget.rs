//! Fixed request budget.
//!
//! Every request that would call the aggregator consumes one unit. Once the
//! ceiling is reached all further requests are rejected until [`RequestBudget::reset`].

use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, warn};

use crate::constants::DEFAULT_MAX_REQUESTS;
use crate::errors::{Error, Result};

/// Thread-safe counter with a fixed ceiling.
///
/// Increment and ceiling check happen in one atomic step, so concurrent
/// callers can never admit more than `ceiling` requests in total.
#[derive(Debug)]
pub struct RequestBudget {
    used: AtomicU64,
    ceiling: u64,
}

impl RequestBudget {
    pub fn new(ceiling: u64) -> Self {
        Self {
            used: AtomicU64::new(0),
            ceiling,
        }
    }

    /// Consume one unit of the budget.
    ///
    /// Returns the 1-based number of the admitted request, or
    /// [`Error::RateLimitExceeded`] once the ceiling has been reached.
    pub fn try_acquire(&self) -> Result<u64> {
        let ceiling = self.ceiling;
        match self
            .used
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |used| {
                (used < ceiling).then_some(used + 1)
            }) {
            Ok(previous) => {
                debug!("Request budget: admitted {}/{}", previous + 1, ceiling);
                Ok(previous + 1)
            }
            Err(_) => {
                warn!("Request budget of {} exhausted; rejecting request", ceiling);
                Err(Error::RateLimitExceeded { limit: ceiling })
            }
        }
    }

    pub fn used(&self) -> u64 {
        self.used.load(Ordering::Acquire)
    }

    pub fn remaining(&self) -> u64 {
        self.ceiling.saturating_sub(self.used())
    }

    pub fn ceiling(&self) -> u64 {
        self.ceiling
    }

    /// Restore the full budget.
    pub fn reset(&self) {
        self.used.store(0, Ordering::Release);
    }
}

impl Default for RequestBudget {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_REQUESTS)
    }
}
