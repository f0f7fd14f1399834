use std::{
    sync::{Arc, Condvar, Mutex, PoisonError},
    time::{Duration, Instant},
};

use rand::Rng as _;
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingParams {
    /// Interval before the first request and base of the backoff, in milliseconds.
    pub sleep_duration: u64,

    /// Upper bound on the interval between requests, in milliseconds.
    pub max_sleep_duration: u64,

    /// Number of attempts before giving up with an error.
    pub max_attempts: u32,

    /// Wall-clock bound on the whole confirmation, in milliseconds.
    pub timeout: Option<u64>,
}

impl Default for PollingParams {
    fn default() -> Self {
        Self {
            sleep_duration: 1000,
            max_sleep_duration: 10_000,
            max_attempts: 60,
            timeout: Some(300_000),
        }
    }
}

impl PollingParams {
    /// Returns the delay before attempt number `attempt` (zero-based): `sleep_duration`
    /// doubled per attempt, capped at `max_sleep_duration`, plus up to 10% jitter.
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponential_base = 2u64.saturating_pow(attempt);
        let delay_ms = self
            .sleep_duration
            .saturating_mul(exponential_base)
            .min(self.max_sleep_duration.max(self.sleep_duration));

        let jitter_range = delay_ms / 10;
        let jitter = if jitter_range > 0 {
            rand::thread_rng().gen_range(0, jitter_range)
        } else {
            0
        };

        Duration::from_millis(delay_ms + jitter)
    }
}

/// A handle the caller keeps to abort a running confirmation. Clones share state.
#[derive(Clone, Debug, Default)]
pub struct CancellationToken {
    inner: Arc<(Mutex<bool>, Condvar)>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Signals cancellation and wakes any poll currently sleeping on this token.
    pub fn cancel(&self) {
        let (cancelled, wakeup) = &*self.inner;
        *cancelled.lock().unwrap_or_else(PoisonError::into_inner) = true;
        wakeup.notify_all();
    }

    pub fn is_cancelled(&self) -> bool {
        *self.inner.0.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Sleeps for `duration` or until cancelled. Returns whether the token was cancelled.
    pub fn sleep(&self, duration: Duration) -> bool {
        let (cancelled, wakeup) = &*self.inner;
        let guard = cancelled.lock().unwrap_or_else(PoisonError::into_inner);
        let (guard, _) = wakeup
            .wait_timeout_while(guard, duration, |cancelled| !*cancelled)
            .unwrap_or_else(PoisonError::into_inner);
        *guard
    }
}

#[derive(Debug)]
pub struct PollingService {
    params: PollingParams,
}

impl PollingService {
    pub fn new(params: PollingParams) -> Self {
        Self { params }
    }

    /// Synchronous polling. Repeatedly calls `query` until it yields a value, sleeping with
    /// backoff before each call. Fails with `ConfirmationTimeout` once `max_attempts` queries
    /// were made or the timeout elapsed, and with `Cancelled` as soon as `cancel` is raised.
    /// Retryable errors from `query` count as unsuccessful attempts; others are returned.
    pub fn poll_for<T>(
        &self,
        tx_hash: &str,
        cancel: &CancellationToken,
        mut query: impl FnMut() -> Result<Option<T>>,
    ) -> Result<T> {
        let PollingParams {
            max_attempts,
            timeout,
            ..
        } = self.params;
        let deadline = timeout.map(|ms| Instant::now() + Duration::from_millis(ms));
        let cancelled = || Error::Cancelled {
            tx_hash: tx_hash.to_string(),
        };

        // The deadline only stops further attempts; the first query always runs.
        let expired = |attempts: u32| {
            attempts > 0 && deadline.map_or(false, |deadline| Instant::now() >= deadline)
        };

        let mut attempts = 0;
        while attempts < max_attempts {
            if expired(attempts) {
                break;
            }
            let mut delay = self.params.backoff(attempts);
            if let Some(deadline) = deadline {
                delay = delay.min(deadline.saturating_duration_since(Instant::now()));
            }

            if cancel.sleep(delay) {
                info!("confirmation of {} cancelled", tx_hash);
                return Err(cancelled());
            }
            if expired(attempts) {
                break;
            }

            attempts += 1;
            match query() {
                Ok(Some(value)) => return Ok(value),
                Ok(None) => info!("polling... (tx: {}, attempt: {})", tx_hash, attempts),
                Err(e) if e.is_retryable() => {
                    warn!("polling {} failed (attempt: {}): {}", tx_hash, attempts, e)
                }
                Err(e) => return Err(e),
            }
        }

        error!("exceeded max polling attempts for {}", tx_hash);
        Err(Error::ConfirmationTimeout {
            tx_hash: tx_hash.to_string(),
            attempts,
        })
    }
}
