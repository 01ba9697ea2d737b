use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 10;
pub const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// Bounded status-polling budget for a single execution.
///
/// The driver polls at most `max_polls` times and sleeps `interval` after
/// every poll that does not observe a terminal status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollPolicy {
    interval: Duration,
    max_polls: u32,
}

impl PollPolicy {
    /// `max_polls = floor(timeout / interval)`.
    pub fn from_budget(interval: Duration, timeout: Duration) -> Result<Self, ConfigError> {
        if interval.is_zero() {
            return Err(ConfigError::ZeroPollInterval);
        }
        if timeout < interval {
            return Err(ConfigError::TimeoutShorterThanInterval {
                timeout_secs: timeout.as_secs(),
                interval_secs: interval.as_secs(),
            });
        }

        let polls = timeout.as_nanos() / interval.as_nanos();
        let max_polls = u32::try_from(polls).unwrap_or(u32::MAX);
        Ok(Self {
            interval,
            max_polls,
        })
    }

    pub fn from_secs(interval_secs: u64, timeout_secs: u64) -> Result<Self, ConfigError> {
        Self::from_budget(
            Duration::from_secs(interval_secs),
            Duration::from_secs(timeout_secs),
        )
    }

    /// Explicit attempt count; allows a zero interval for tests.
    pub fn with_max_polls(interval: Duration, max_polls: u32) -> Self {
        Self {
            interval,
            max_polls: max_polls.max(1),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn max_polls(&self) -> u32 {
        self.max_polls
    }

    /// Total wait covered by the budget.
    pub fn budget(&self) -> Duration {
        self.interval.saturating_mul(self.max_polls)
    }
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            max_polls: (DEFAULT_TIMEOUT_SECS / DEFAULT_POLL_INTERVAL_SECS) as u32,
        }
    }
}
