//! Uniform retry policy and operational hook contracts.

use std::future::Future;
use std::time::Duration;

use crate::TransportError;

/// Attempt budget and inter-attempt delay.
///
/// Every failure kind is retried the same way. With the default multiplier of
/// `1.0` the delay is fixed; larger multipliers grow it up to `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
    pub backoff_multiplier: f64,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(1),
            backoff_multiplier: 1.0,
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        let policy = Self::new(max_attempts);
        Self {
            delay,
            max_delay: policy.max_delay.max(delay),
            ..policy
        }
    }

    pub fn with_backoff(mut self, multiplier: f64, max_delay: Duration) -> Self {
        self.backoff_multiplier = multiplier.max(1.0);
        self.max_delay = max_delay;
        self
    }

    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = (attempt.saturating_sub(1)) as i32;
        let unbounded = self.delay.as_secs_f64() * self.backoff_multiplier.powi(exponent);
        Duration::try_from_secs_f64(unbounded.min(self.max_delay.as_secs_f64()))
            .unwrap_or(self.max_delay)
    }

    /// Upper bound on wall time for one full retry sequence.
    pub fn worst_case_duration(&self, timeout: Duration) -> Duration {
        let attempts = self.max_attempts.max(1);
        let waiting = (1..attempts)
            .map(|attempt| self.delay_for_attempt(attempt))
            .fold(Duration::ZERO, Duration::saturating_add);
        timeout.saturating_mul(attempts).saturating_add(waiting)
    }
}

pub trait TransportHooks: Send + Sync {
    fn on_attempt_start(&self, _operation: &str, _attempt: u32) {}

    /// `next_delay` is `None` when no further attempt follows.
    fn on_attempt_failure(
        &self,
        _operation: &str,
        _attempt: u32,
        _next_delay: Option<Duration>,
        _error: &TransportError,
    ) {
    }

    fn on_success(&self, _operation: &str, _attempts: u32) {}

    fn on_exhausted(&self, _operation: &str, _attempts: u32, _error: &TransportError) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTransportHooks;

impl TransportHooks for NoopTransportHooks {}

pub async fn execute_with_retry<T, Op, OpFuture, Sleep, SleepFuture>(
    operation: &str,
    policy: &RetryPolicy,
    hooks: &dyn TransportHooks,
    mut execute: Op,
    mut sleep: Sleep,
) -> Result<T, TransportError>
where
    Op: FnMut(u32) -> OpFuture,
    OpFuture: Future<Output = Result<T, TransportError>>,
    Sleep: FnMut(Duration) -> SleepFuture,
    SleepFuture: Future<Output = ()>,
{
    let mut attempt = 1;

    loop {
        hooks.on_attempt_start(operation, attempt);

        match execute(attempt).await {
            Ok(value) => {
                hooks.on_success(operation, attempt);
                return Ok(value);
            }
            Err(error) => {
                if policy.should_retry(attempt) {
                    let delay = policy.delay_for_attempt(attempt);
                    hooks.on_attempt_failure(operation, attempt, Some(delay), &error);
                    sleep(delay).await;
                    attempt += 1;
                    continue;
                }

                hooks.on_attempt_failure(operation, attempt, None, &error);
                let exhausted = TransportError::exhausted(attempt, error);
                hooks.on_exhausted(operation, attempt, &exhausted);
                return Err(exhausted);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::Mutex;

    use super::*;
    use crate::TransportErrorKind;

    #[test]
    fn retry_policy_only_looks_at_attempt_budget() {
        let policy = RetryPolicy::new(3);

        assert!(policy.should_retry(1));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
        assert_eq!(RetryPolicy::new(0).max_attempts, 1);
    }

    #[test]
    fn retry_policy_delay_is_fixed_by_default() {
        let policy = RetryPolicy::fixed(4, Duration::from_millis(100));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(100));
    }

    #[test]
    fn retry_policy_backoff_grows_and_caps() {
        let policy = RetryPolicy::fixed(5, Duration::from_millis(100))
            .with_backoff(2.0, Duration::from_millis(250));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(250));
    }

    #[test]
    fn worst_case_duration_sums_timeouts_and_delays() {
        let policy = RetryPolicy::fixed(3, Duration::from_secs(1));

        assert_eq!(
            policy.worst_case_duration(Duration::from_secs(30)),
            Duration::from_secs(92)
        );
    }

    #[test]
    fn worst_case_duration_saturates_instead_of_overflowing() {
        let policy = RetryPolicy::fixed(3, Duration::MAX);

        assert_eq!(policy.delay_for_attempt(1), Duration::MAX);
        assert_eq!(policy.worst_case_duration(Duration::MAX), Duration::MAX);
        let no_delay = RetryPolicy::fixed(4, Duration::ZERO);
        assert_eq!(
            no_delay.worst_case_duration(Duration::from_secs(u64::MAX)),
            Duration::MAX
        );
    }

    #[test]
    fn fixed_delays_longer_than_the_default_cap_are_kept() {
        let policy = RetryPolicy::fixed(2, Duration::from_secs(45));

        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(45));
    }

    #[derive(Default)]
    struct RecordingHooks {
        events: Mutex<Vec<String>>,
    }

    impl TransportHooks for RecordingHooks {
        fn on_attempt_start(&self, operation: &str, attempt: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("start:{operation}:{attempt}"));
        }

        fn on_attempt_failure(
            &self,
            operation: &str,
            attempt: u32,
            next_delay: Option<Duration>,
            _error: &TransportError,
        ) {
            self.events.lock().expect("events lock").push(format!(
                "failure:{operation}:{attempt}:{}",
                next_delay.is_some()
            ));
        }

        fn on_success(&self, operation: &str, attempts: u32) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("success:{operation}:{attempts}"));
        }

        fn on_exhausted(&self, operation: &str, attempts: u32, error: &TransportError) {
            self.events
                .lock()
                .expect("events lock")
                .push(format!("exhausted:{operation}:{attempts}:{:?}", error.kind));
        }
    }

    #[tokio::test]
    async fn execute_with_retry_retries_and_reports_hooks() {
        let policy = RetryPolicy::new(3);
        let hooks = RecordingHooks::default();
        let attempts = Arc::new(Mutex::new(0_u32));
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = execute_with_retry(
            "GET /health",
            &policy,
            &hooks,
            {
                let attempts = Arc::clone(&attempts);
                move |attempt| {
                    let attempts = Arc::clone(&attempts);
                    async move {
                        *attempts.lock().expect("attempts lock") = attempt;
                        if attempt < 3 {
                            Err(TransportError::network("connection reset"))
                        } else {
                            Ok("ok")
                        }
                    }
                }
            },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                    }
                }
            },
        )
        .await;

        assert_eq!(result.expect("result should succeed"), "ok");
        assert_eq!(*attempts.lock().expect("attempts lock"), 3);
        assert_eq!(sleeps.lock().expect("sleep lock").len(), 2);

        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"success:GET /health:3".to_string()));
    }

    #[tokio::test]
    async fn execute_with_retry_exhausts_budget_for_every_error_kind() {
        let policy = RetryPolicy::new(4);
        let hooks = RecordingHooks::default();
        let sleeps = Arc::new(Mutex::new(Vec::new()));

        let result = execute_with_retry::<(), _, _, _, _>(
            "POST /chat",
            &policy,
            &hooks,
            |_| async move { Err(TransportError::invalid_request("bad input")) },
            {
                let sleeps = Arc::clone(&sleeps);
                move |delay| {
                    let sleeps = Arc::clone(&sleeps);
                    async move {
                        sleeps.lock().expect("sleep lock").push(delay);
                    }
                }
            },
        )
        .await;

        let error = result.expect_err("result should fail");
        assert_eq!(error.kind, TransportErrorKind::InvalidRequest);
        assert_eq!(error.attempts, 4);
        assert_eq!(sleeps.lock().expect("sleep lock").len(), 3);

        let events = hooks.events.lock().expect("events lock").clone();
        assert!(events.contains(&"failure:POST /chat:3:true".to_string()));
        assert!(events.contains(&"failure:POST /chat:4:false".to_string()));
        assert_eq!(
            events.last().map(String::as_str),
            Some("exhausted:POST /chat:4:InvalidRequest")
        );
    }
}
