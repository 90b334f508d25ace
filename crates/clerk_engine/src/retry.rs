use std::time::Duration;

use async_trait::async_trait;
use clerk_logging::clerk_warn;

use crate::lookup::StatusLookup;
use crate::types::{EngineEvent, LookupOutcome, ProgressSink};

/// Bounded retry with doubling delay for transient lookup failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first one. Clamped to at least 1.
    pub max_attempts: u32,
    /// Wait before the second attempt; doubles before each further one.
    pub initial_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_secs(5),
        }
    }
}

/// Injectable wait so tests can observe the backoff without sleeping.
#[async_trait]
pub trait Sleeper: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Run one letter lookup, retrying transient failures with exponential
/// backoff.
///
/// Any classified outcome returns immediately, whatever it says; every
/// attempt error counts as transient and is retried until
/// `policy.max_attempts` attempts have run, at which point the last
/// error surfaces as [`LookupOutcome::TransientError`]. Each wait is
/// announced on the sink before it starts.
pub async fn lookup_with_retry(
    lookup: &dyn StatusLookup,
    number: &str,
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    sink: &dyn ProgressSink,
) -> LookupOutcome {
    let max_attempts = policy.max_attempts.max(1);
    let mut delay = policy.initial_delay;
    let mut last_error = None;

    for attempt in 1..=max_attempts {
        sink.emit(EngineEvent::LookupStarted {
            number: number.to_string(),
            attempt,
        });

        match lookup.lookup(number).await {
            Ok(outcome) => return outcome,
            Err(err) => {
                clerk_warn!(
                    "lookup {} attempt {}/{} failed: {}",
                    number,
                    attempt,
                    max_attempts,
                    err
                );
                last_error = Some(err);
            }
        }

        if attempt < max_attempts {
            sink.emit(EngineEvent::LookupRetrying {
                number: number.to_string(),
                attempt,
                delay,
            });
            sleeper.sleep(delay).await;
            delay = delay.saturating_mul(2);
        }
    }

    let detail = last_error
        .map(|err| err.to_string())
        .unwrap_or_else(|| "unknown failure".to_string());
    LookupOutcome::TransientError {
        detail,
        attempts: max_attempts,
    }
}
