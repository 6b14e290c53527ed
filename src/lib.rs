//! Retry loops for tests that poll for a condition.
//!
//! A test asks a [RetryStrategy] whether it may try again instead of
//! writing its own sleep loop:
//!
//! ```
//! use test_retry::{timer, Panic, RetryStrategy};
//!
//! let mut polls = 0;
//! let mut retry = timer();
//! while retry.next(&mut Panic) {
//!     polls += 1;
//!     if polls < 3 {
//!         continue;
//!     }
//!     break;
//! }
//! assert_eq!(polls, 3);
//! ```
//!
//! The first attempt is always immediate. When the budget runs out the
//! [Failer] is called and `next` returns `false`.
pub mod error;
mod failer;
mod retry_strategy;
mod stream;

pub use error::Exhausted;
pub use failer::{Failer, Panic, Recorder};
pub use retry_strategy::{CountRetry, RetryStrategy, TimeRetry};
pub use stream::Attempts;
use std::time::Duration;

/// Default time span for which [timer] retries an operation.
pub const TIMEOUT: Duration = Duration::from_secs(1);

/// Default time between two attempts.
pub const WAIT: Duration = Duration::from_millis(25);

/// A [TimeRetry] with [TIMEOUT] and [WAIT].
pub fn timer() -> TimeRetry {
    TimeRetry::new(TIMEOUT, WAIT)
}

/// A [CountRetry] allowing `n` attempts, [WAIT] apart.
pub fn times(n: usize) -> CountRetry {
    CountRetry::new(n, WAIT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    // window a loop has to finish in, measured from the expected duration
    const EARLY: Duration = Duration::from_millis(2);
    const LATE: Duration = Duration::from_millis(50);

    fn strategies() -> Vec<(&'static str, Box<dyn RetryStrategy>)> {
        let count: Box<dyn RetryStrategy> = Box::new(CountRetry::new(3, Duration::from_millis(10)));
        let time: Box<dyn RetryStrategy> =
            Box::new(TimeRetry::new(Duration::from_millis(20), Duration::from_millis(10)));
        vec![("count", count), ("time", time)]
    }

    #[test]
    fn three_attempts_one_failure() {
        for (desc, mut retry) in strategies() {
            let mut failer = Recorder::new();
            let mut n = 0;
            let start = Instant::now();
            while retry.next(&mut failer) {
                n += 1;
            }
            let elapsed = start.elapsed();

            assert_eq!(n, 3, "{desc}: attempts");
            assert_eq!(failer.calls(), 1, "{desc}: fail_now calls");
            // the first attempt is immediate, so three attempts wait twice
            let want = Duration::from_millis(20);
            assert!(
                elapsed + EARLY >= want && elapsed <= want + LATE,
                "{desc}: loop took {elapsed:?} want {want:?}"
            );
        }
    }

    #[test]
    fn reset_allows_reuse_across_sessions() {
        for (desc, mut retry) in strategies() {
            for session in 0..3 {
                let mut failer = Recorder::new();
                let start = Instant::now();
                assert!(retry.next(&mut failer), "{desc}/{session}: first attempt");
                assert!(
                    start.elapsed() < Duration::from_millis(5),
                    "{desc}/{session}: first attempt waited"
                );
                while retry.next(&mut failer) {}
                assert_eq!(failer.calls(), 1, "{desc}/{session}");
                retry.reset();
                assert_eq!(failer.calls(), 1, "{desc}/{session}: reset signalled");
            }
        }
    }

    #[test]
    fn defaults() {
        let t = timer();
        assert_eq!(t.timeout(), TIMEOUT);
        assert_eq!(t.wait(), WAIT);

        let c = times(4);
        assert_eq!(c.max_count(), 4);
        assert_eq!(c.wait(), WAIT);
    }

    #[test]
    #[should_panic(expected = "retries exhausted")]
    fn panic_failer_ends_the_test() {
        let mut retry = CountRetry::new(2, Duration::ZERO);
        while retry.next(&mut Panic) {}
    }

    #[test]
    fn stops_once_the_operation_succeeds() {
        let mut retry = times(10).with_wait(Duration::ZERO);
        let mut failer = Recorder::new();
        let mut polls = 0;
        while retry.next(&mut failer) {
            polls += 1;
            if polls == 4 {
                break;
            }
        }
        assert_eq!(retry.count(), 4);
        assert_eq!(retry.remaining(), 6);
        assert!(!failer.failed());
    }

    #[test]
    fn retries_past_operation_errors() -> anyhow::Result<()> {
        let results = [Err(anyhow::anyhow!("not yet")), Err(anyhow::anyhow!("still not")), Ok(7)];
        let mut flaky = results.into_iter();
        let mut retry = CountRetry::new(5, Duration::from_millis(1));
        let mut failer = Recorder::new();
        let mut value = None;
        while retry.next(&mut failer) {
            match flaky.next().ok_or_else(|| anyhow::anyhow!("ran out of results"))? {
                Ok(v) => {
                    value = Some(v);
                    break;
                }
                Err(e) => eprintln!("attempt {}: {e}", retry.count()),
            }
        }
        assert_eq!(value, Some(7));
        assert_eq!(retry.count(), 3);
        assert!(!failer.failed());
        Ok(())
    }

    #[cfg(feature = "log")]
    #[test]
    fn log_records_do_not_change_decisions() {
        log::set_max_level(log::LevelFilter::Trace);
        for (desc, mut retry) in strategies() {
            let mut failer = Recorder::new();
            let mut n = 0;
            while retry.next(&mut failer) {
                n += 1;
            }
            retry.reset();
            assert_eq!(n, 3, "{desc}");
            assert_eq!(failer.calls(), 1, "{desc}");
        }
    }
}
