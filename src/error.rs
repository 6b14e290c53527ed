use std::fmt::{Debug, Display, Formatter};
use std::time::Duration;

/// Returned from [RetryStrategy::check_attempt](crate::RetryStrategy::check_attempt)
/// when no further attempt is allowed.
///
/// [RetryStrategy::next](crate::RetryStrategy::next) never hands this to the caller,
/// it calls the [Failer](crate::Failer) and returns `false` instead.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Exhausted {
    /// All `max_count` attempts of a [CountRetry](crate::CountRetry) were used.
    Attempts { max_count: usize },
    /// The deadline of a [TimeRetry](crate::TimeRetry) has passed.
    Deadline { timeout: Duration },
}

impl Display for Exhausted {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Exhausted::Attempts { max_count } => {
                write!(f, "retries exhausted after {max_count} attempts")
            }
            Exhausted::Deadline { timeout } => {
                write!(f, "retries exhausted after {timeout:?} timeout")
            }
        }
    }
}

impl std::error::Error for Exhausted {}
