//! Cancellation and deadline propagation for API calls.
//!
//! A [`Context`] is threaded from the outermost caller into every executor
//! call. The executor checks it before each attempt and races it against the
//! in-flight request and the backoff sleep.

use crate::error::Error;
use std::future::pending;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

/// Cancellation signal and optional deadline for a call.
#[derive(Debug, Clone, Default)]
pub struct Context {
    cancel: Option<watch::Receiver<bool>>,
    deadline: Option<Instant>,
}

/// Cancels every [`Context`] derived from it.
#[derive(Debug)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Signal cancellation. Idempotent.
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    /// Returns true once [`cancel`](Self::cancel) has been called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }
}

impl Context {
    /// A context that is never cancelled and has no deadline.
    #[must_use]
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a cancellable context.
    ///
    /// Dropping the returned handle without calling `cancel` leaves the
    /// context live.
    #[must_use]
    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (tx, rx) = watch::channel(false);
        self.cancel = Some(rx);
        (self, CancelHandle { tx })
    }

    /// Derive a context that expires at `deadline`.
    ///
    /// An existing earlier deadline is kept.
    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) if current < deadline => current,
            _ => deadline,
        });
        self
    }

    /// Derive a context that expires after `timeout`.
    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    /// The deadline, if any.
    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Returns the reason this context is done, or `None` if it is still live.
    #[must_use]
    pub fn err(&self) -> Option<Error> {
        if self.cancel.as_ref().is_some_and(|rx| *rx.borrow()) {
            return Some(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }

    /// Completes when the context is cancelled or its deadline passes.
    ///
    /// Never completes for a background context.
    pub async fn done(&self) {
        let cancelled = async {
            if let Some(mut rx) = self.cancel.clone() {
                if rx.wait_for(|cancelled| *cancelled).await.is_ok() {
                    return;
                }
            }
            pending::<()>().await;
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => pending::<()>().await,
            }
        };

        tokio::select! {
            () = cancelled => {}
            () = expired => {}
        }
    }

    /// The error to report once [`done`](Self::done) has completed.
    pub(crate) fn done_err(&self) -> Error {
        self.err().unwrap_or(Error::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_background_is_live() {
        assert!(Context::background().err().is_none());
        assert!(Context::background().deadline().is_none());
    }

    #[test]
    fn test_cancel_sets_error() {
        let (ctx, handle) = Context::background().with_cancel();
        assert!(ctx.err().is_none());
        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(ctx.err(), Some(Error::Cancelled));

        // Clones observe the same signal
        let cloned = ctx.clone();
        assert_eq!(cloned.err(), Some(Error::Cancelled));
    }

    #[tokio::test]
    async fn test_deadline_exceeded() {
        let ctx = Context::background().with_timeout(Duration::from_millis(10));
        ctx.done().await;
        assert_eq!(ctx.err(), Some(Error::DeadlineExceeded));
    }

    #[test]
    fn test_earlier_deadline_wins() {
        let now = Instant::now();
        let ctx = Context::background()
            .with_deadline(now + Duration::from_secs(1))
            .with_deadline(now + Duration::from_secs(60));
        assert_eq!(ctx.deadline(), Some(now + Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_done_wakes_on_cancel() {
        let (ctx, handle) = Context::background().with_cancel();
        let waiter = tokio::spawn(async move {
            ctx.done().await;
            ctx.err()
        });
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        assert_eq!(waiter.await.unwrap(), Some(Error::Cancelled));
    }

    #[tokio::test]
    async fn test_dropped_handle_keeps_context_live() {
        let (ctx, handle) = Context::background().with_cancel();
        drop(handle);
        let finished = tokio::time::timeout(Duration::from_millis(20), ctx.done()).await;
        assert!(finished.is_err());
        assert!(ctx.err().is_none());
    }
}
