/// Reports that a [RetryStrategy](crate::RetryStrategy) ran out of attempts.
///
/// This is the only thing a strategy needs from whatever owns the test,
/// so any "fail now and stop" action can be plugged in. Closures
/// implement it directly:
///
/// ```
/// use test_retry::{times, RetryStrategy};
///
/// let mut failed = false;
/// let mut retry = times(0);
/// assert!(!retry.next(&mut || failed = true));
/// assert!(failed);
/// ```
pub trait Failer {
    fn fail_now(&mut self);
}

impl<F> Failer for F
where
    F: FnMut(),
{
    fn fail_now(&mut self) {
        (self)()
    }
}

/// Panics on exhaustion, which fails the surrounding `#[test]`.
#[derive(Debug, Default, Copy, Clone)]
pub struct Panic;

impl Failer for Panic {
    #[track_caller]
    fn fail_now(&mut self) {
        panic!("retries exhausted")
    }
}

/// Counts failure signals instead of acting on them.
///
/// Useful when the caller wants to inspect the outcome after the loop.
#[derive(Debug, Default, Clone)]
pub struct Recorder {
    calls: usize,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of times `fail_now` was called.
    pub fn calls(&self) -> usize {
        self.calls
    }

    pub fn failed(&self) -> bool {
        self.calls > 0
    }
}

impl Failer for Recorder {
    fn fail_now(&mut self) {
        self.calls += 1;
    }
}
