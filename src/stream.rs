use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::stream::FusedStream;
use futures::{ready, Stream};
use pin_project::pin_project;
use tokio::time::{sleep, Sleep};

use crate::{Failer, RetryStrategy};

#[pin_project(project = StateProj)]
enum State {
    /// Next poll asks the strategy for another attempt.
    Ready,
    Waiting {
        #[pin]
        delay: Sleep,
    },
    Done,
}

/// Async counterpart of the [next](crate::RetryStrategy::next) loop.
///
/// Yields the 1-based attempt number every time the strategy grants an
/// attempt, waiting on the tokio timer instead of blocking the thread.
/// On exhaustion the failer is called once and the stream ends for good.
/// To reuse the strategy afterwards, drive the stream from a borrow
/// (`(&mut retry).attempts(failer)`) and reset it once the stream is gone.
///
/// ```
/// use futures::StreamExt;
/// use std::time::Duration;
/// use test_retry::{CountRetry, Panic, RetryStrategy};
///
/// # #[tokio::main]
/// # async fn main() {
/// let mut attempts = Box::pin(CountRetry::new(5, Duration::from_millis(1)).attempts(Panic));
/// while let Some(attempt) = attempts.next().await {
///     if attempt == 3 {
///         break;
///     }
/// }
/// assert_eq!(attempts.attempt(), 3);
/// # }
/// ```
#[pin_project]
pub struct Attempts<R, F> {
    retry_strategy: R,
    failer: F,
    attempt: usize,
    #[pin]
    state: State,
}

impl<R, F> Attempts<R, F>
where
    R: RetryStrategy,
    F: Failer,
{
    pub fn new(retry_strategy: R, failer: F) -> Self {
        Self { retry_strategy, failer, attempt: 0, state: State::Ready }
    }

    /// Attempts yielded so far.
    pub fn attempt(&self) -> usize {
        self.attempt
    }

    pub fn failer(&self) -> &F {
        &self.failer
    }
}

impl<R, F> Stream for Attempts<R, F>
where
    R: RetryStrategy,
    F: Failer,
{
    type Item = usize;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<usize>> {
        loop {
            let this = self.as_mut().project();
            let (new_state, output) = match this.state.project() {
                StateProj::Ready => match this.retry_strategy.check_attempt() {
                    Ok(delay) if delay.is_zero() => {
                        *this.attempt += 1;
                        return Poll::Ready(Some(*this.attempt));
                    }
                    Ok(delay) => (State::Waiting { delay: sleep(delay) }, None),
                    Err(_exhausted) => {
                        #[cfg(feature = "log")]
                        log::warn!("{_exhausted}");
                        this.failer.fail_now();
                        (State::Done, Some(None))
                    }
                },
                StateProj::Waiting { delay } => {
                    ready!(delay.poll(cx));
                    *this.attempt += 1;
                    (State::Ready, Some(Some(*this.attempt)))
                }
                StateProj::Done => return Poll::Ready(None),
            };

            self.as_mut().project().state.set(new_state);
            if let Some(output) = output {
                return Poll::Ready(output);
            }
        }
    }
}

impl<R, F> FusedStream for Attempts<R, F>
where
    R: RetryStrategy,
    F: Failer,
{
    fn is_terminated(&self) -> bool {
        matches!(self.state, State::Done)
    }
}
