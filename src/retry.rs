use crate::error::{BreedGuruError, Result};
use std::future::Future;
use std::time::Duration;

pub const OVERLOAD_BACKOFF_MS: u64 = 5000;

/// Bounded retry strategy for remote calls.
///
/// `max_attempts` counts the initial call, so 2 means "retry once".
/// Only errors accepted by `retry_if` are retried; everything else
/// propagates immediately.
#[derive(Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
    retry_if: fn(&BreedGuruError) -> bool,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration, retry_if: fn(&BreedGuruError) -> bool) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
            retry_if,
        }
    }

    /// Single attempt, no retry.
    pub fn disabled() -> Self {
        Self::new(1, Duration::ZERO, |_| false)
    }

    /// One extra attempt after a fixed backoff, taken only when the
    /// service reports a transient overload.
    pub fn on_overload() -> Self {
        Self::new(
            2,
            Duration::from_millis(OVERLOAD_BACKOFF_MS),
            BreedGuruError::is_overloaded,
        )
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt < self.max_attempts && (self.retry_if)(&e) => {
                    log::warn!(
                        "Attempt {}/{} failed ({}), retrying in {}ms",
                        attempt,
                        self.max_attempts,
                        e,
                        self.backoff.as_millis()
                    );
                    tokio::time::sleep(self.backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn overloaded() -> BreedGuruError {
        BreedGuruError::OverloadedError("503 Service Unavailable".into())
    }

    #[tokio::test]
    async fn succeeds_first_try_without_retry() {
        let calls = AtomicU32::new(0);
        let result: Result<u32> = RetryPolicy::on_overload()
            .with_backoff(Duration::ZERO)
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok(42)
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn overload_retries_exactly_once_and_returns_retry_result() {
        let calls = AtomicU32::new(0);
        let result = RetryPolicy::on_overload()
            .with_backoff(Duration::ZERO)
            .run(|| async {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(overloaded())
                } else {
                    Ok("Gir")
                }
            })
            .await;

        assert_eq!(result.unwrap(), "Gir");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn failed_retry_surfaces_the_second_error() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::on_overload()
            .with_backoff(Duration::ZERO)
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(overloaded())
            })
            .await;

        assert!(result.unwrap_err().is_overloaded());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn non_overload_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<()> = RetryPolicy::on_overload()
            .with_backoff(Duration::ZERO)
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<(), _>(BreedGuruError::ResponseError("bad payload".into()))
            })
            .await;

        assert!(!result.unwrap_err().is_overloaded());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn overload_policy_uses_the_fixed_five_second_backoff() {
        let policy = RetryPolicy::on_overload();
        assert_eq!(policy.max_attempts, 2);
        assert_eq!(policy.backoff, Duration::from_millis(5000));
    }

    #[test]
    fn disabled_policy_is_a_single_attempt() {
        assert_eq!(RetryPolicy::disabled().max_attempts, 1);
    }
}
