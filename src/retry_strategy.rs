pub mod count;
pub mod time;

pub use count::CountRetry;
pub use time::TimeRetry;

use crate::error::Exhausted;
use crate::stream::Attempts;
use crate::Failer;
use std::thread;
use std::time::Duration;

/// Decides whether an operation may be attempted again.
///
/// Strategies do not take the operation as a closure. The test drives the
/// loop itself so assertion failures point at the test's own lines:
///
/// ```
/// use test_retry::{times, Panic, RetryStrategy};
///
/// let mut ready = 0;
/// let mut retry = times(5);
/// while retry.next(&mut Panic) {
///     ready += 1;
///     if ready == 2 {
///         break;
///     }
/// }
/// assert_eq!(ready, 2);
/// ```
pub trait RetryStrategy {
    /// Advances the strategy by one attempt without blocking.
    ///
    /// `Ok(delay)` grants the attempt once `delay` has passed. The first
    /// attempt of a session always gets a zero delay.
    fn check_attempt(&mut self) -> Result<Duration, Exhausted>;

    /// Returns to the state before the first attempt so the strategy can
    /// drive another session.
    fn reset(&mut self);

    /// Returns `true` if the operation can be attempted again, sleeping
    /// for the wait period first unless this is the first attempt.
    ///
    /// Otherwise calls `failer.fail_now()` and returns `false`. Calling it
    /// again after that signals the failer again until [reset](Self::reset).
    fn next(&mut self, failer: &mut dyn Failer) -> bool {
        match self.check_attempt() {
            Ok(delay) => {
                if !delay.is_zero() {
                    thread::sleep(delay);
                }
                true
            }
            Err(_exhausted) => {
                #[cfg(feature = "log")]
                log::warn!("{_exhausted}");
                failer.fail_now();
                false
            }
        }
    }

    /// Same decisions as [next](Self::next), as an async stream paced by
    /// the tokio timer.
    fn attempts<F: Failer>(self, failer: F) -> Attempts<Self, F>
    where
        Self: Sized,
    {
        Attempts::new(self, failer)
    }
}

impl<R: RetryStrategy + ?Sized> RetryStrategy for &mut R {
    fn check_attempt(&mut self) -> Result<Duration, Exhausted> {
        (**self).check_attempt()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}

impl<R: RetryStrategy + ?Sized> RetryStrategy for Box<R> {
    fn check_attempt(&mut self) -> Result<Duration, Exhausted> {
        (**self).check_attempt()
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
