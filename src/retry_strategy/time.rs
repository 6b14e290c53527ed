use crate::{Exhausted, RetryStrategy, TIMEOUT, WAIT};
use std::time::{Duration, Instant};

/// Retries an operation until `timeout` has passed since the first attempt.
///
/// The deadline is fixed by the first call and only checked before each
/// wait, so an attempt that starts just before the deadline still runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeRetry {
    timeout: Duration,
    wait: Duration,
    /// Set by the first attempt, cleared by `reset`.
    started: Option<Instant>,
    /// Fixed together with `started`. `None` while running means the
    /// timeout is too large for an `Instant` and never expires.
    deadline: Option<Instant>,
}

impl Default for TimeRetry {
    fn default() -> Self {
        Self::new(TIMEOUT, WAIT)
    }
}

impl TimeRetry {
    pub fn new(timeout: Duration, wait: Duration) -> Self {
        Self { timeout, wait, started: None, deadline: None }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Point after which no further attempt is granted.
    ///
    /// `None` until the first attempt of a session, and for the whole
    /// session if `timeout` does not fit into an `Instant`. Changing the
    /// timeout with [with_timeout](Self::with_timeout) only affects
    /// sessions started after the next [reset](RetryStrategy::reset).
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }
}

impl RetryStrategy for TimeRetry {
    fn check_attempt(&mut self) -> Result<Duration, Exhausted> {
        let Some(_started) = self.started else {
            let now = Instant::now();
            self.started = Some(now);
            self.deadline = now.checked_add(self.timeout);
            #[cfg(feature = "log")]
            log::trace!("first attempt, timeout {:?}", self.timeout);
            return Ok(Duration::ZERO);
        };
        if let Some(deadline) = self.deadline {
            if Instant::now() > deadline {
                return Err(Exhausted::Deadline { timeout: self.timeout });
            }
        }
        #[cfg(feature = "log")]
        log::trace!("attempt {:?} into the session after {:?}", _started.elapsed(), self.wait);
        Ok(self.wait)
    }

    fn reset(&mut self) {
        #[cfg(feature = "log")]
        log::debug!("reset time retry");
        self.started = None;
        self.deadline = None;
    }
}
