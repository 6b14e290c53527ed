use crate::{Exhausted, RetryStrategy};
use std::time::Duration;

/// Retries an operation a fixed number of times.
///
/// The first attempt is granted immediately, every later one after
/// `wait`. Once `max_count` attempts were granted the next call fails
/// without waiting, so `n` attempts take `(n - 1) * wait`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountRetry {
    max_count: usize,
    wait: Duration,
    count: usize,
}

impl CountRetry {
    pub fn new(max_count: usize, wait: Duration) -> Self {
        Self { max_count, wait, count: 0 }
    }

    /// Attempts already granted in the running session stay counted, up to
    /// the new bound.
    pub fn with_max_count(mut self, max_count: usize) -> Self {
        self.max_count = max_count;
        self.count = self.count.min(max_count);
        self
    }

    pub fn with_wait(mut self, wait: Duration) -> Self {
        self.wait = wait;
        self
    }

    pub fn max_count(&self) -> usize {
        self.max_count
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    /// Attempts granted since construction or the last reset.
    pub fn count(&self) -> usize {
        self.count
    }

    pub fn remaining(&self) -> usize {
        self.max_count.saturating_sub(self.count)
    }
}

impl RetryStrategy for CountRetry {
    fn check_attempt(&mut self) -> Result<Duration, Exhausted> {
        if self.count >= self.max_count {
            return Err(Exhausted::Attempts { max_count: self.max_count });
        }
        let delay = if self.count > 0 { self.wait } else { Duration::ZERO };
        self.count += 1;
        #[cfg(feature = "log")]
        log::trace!("attempt {}/{} after {:?}", self.count, self.max_count, delay);
        Ok(delay)
    }

    fn reset(&mut self) {
        #[cfg(feature = "log")]
        log::debug!("reset count retry after {} attempts", self.count);
        self.count = 0;
    }
}
