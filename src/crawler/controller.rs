//! Adaptive concurrency controller
//!
//! Estimates a safe number of simultaneous fetches for one domain from
//! observed task outcomes alone: a streak of successes raises the budget, a
//! single failure lowers it. The controller is owned by its dispatch loop,
//! which calls `adjust` exactly once per completed task, so it needs no
//! internal locking.

/// Minimum concurrency; prevents a domain from stalling at zero workers
const MIN_CONCURRENCY: usize = 1;

/// How much the budget moves per adjustment
const ADAPTIVE_STEP: usize = 2;

/// Consecutive successes required before scaling up
const ADAPTIVE_THRESHOLD: u32 = 3;

/// Per-domain in-flight task budget, adjusted from task outcomes
#[derive(Debug)]
pub struct ConcurrencyController {
    current: usize,
    max_limit: usize,
    streak: u32,
}

impl ConcurrencyController {
    /// Creates a controller with its initial budget
    ///
    /// With `auto_scale`, the starting budget is a quarter of the available
    /// parallelism hint (fallback 2 when the hint is unavailable), clamped
    /// to `[1, max_limit]`. Without it, the budget starts pinned at
    /// `max_limit`.
    pub fn new(auto_scale: bool, max_limit: usize) -> Self {
        let max_limit = max_limit.max(MIN_CONCURRENCY);
        let current = if auto_scale {
            let hint = std::thread::available_parallelism()
                .map(|n| n.get() / 4)
                .unwrap_or(2);
            hint.clamp(MIN_CONCURRENCY, max_limit)
        } else {
            max_limit
        };

        tracing::debug!("Concurrency controller initialized at {}", current);

        Self {
            current,
            max_limit,
            streak: 0,
        }
    }

    /// Current in-flight task budget; always within `[1, max_limit]`
    pub fn current(&self) -> usize {
        self.current
    }

    /// Feeds one task outcome into the controller
    ///
    /// Success increments the streak; at `ADAPTIVE_THRESHOLD` consecutive
    /// successes the budget rises by `ADAPTIVE_STEP` (capped at the limit)
    /// and the streak resets. Any failure resets the streak and lowers the
    /// budget by `ADAPTIVE_STEP` (floored at the minimum).
    pub fn adjust(&mut self, success: bool) {
        if success {
            self.streak += 1;

            if self.streak >= ADAPTIVE_THRESHOLD && self.current < self.max_limit {
                self.current = (self.current + ADAPTIVE_STEP).min(self.max_limit);
                self.streak = 0;
                tracing::debug!("Increasing concurrency to {}", self.current);
            }
        } else {
            self.streak = 0;

            if self.current > MIN_CONCURRENCY {
                self.current = self.current.saturating_sub(ADAPTIVE_STEP).max(MIN_CONCURRENCY);
                tracing::debug!("Decreasing concurrency to {}", self.current);
            }
        }
    }
}
