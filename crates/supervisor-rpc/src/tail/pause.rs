//! The sleep between idle polls.

use std::time::Duration;

use tracing::trace;

use super::TAIL_TARGET;
use crate::cancel::CancellationToken;

/// Suspends the tail loop after a poll that found nothing new.
pub trait Pause {
    /// Waits for up to `interval`, returning early when `token` is cancelled.
    fn pause(&mut self, interval: Duration, token: &CancellationToken);
}

/// Waits on the cancellation token, so cancelling interrupts the sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenPause;

impl Pause for TokenPause {
    fn pause(&mut self, interval: Duration, token: &CancellationToken) {
        if token.wait_timeout(interval) {
            trace!(target: TAIL_TARGET, "pause interrupted by cancellation");
        }
    }
}
