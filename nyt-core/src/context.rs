//! Per-call cancellation and deadline.
//!
//! A [`RequestContext`] travels with every query. The transport races its one
//! outbound request against the context, so a cancelled or expired context
//! returns promptly with [`Error::Cancelled`] or [`Error::DeadlineExceeded`].

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use tokio::{sync::Notify, time::Instant};

use crate::error::Error;

#[derive(Debug, Default)]
struct CancelState {
    cancelled: AtomicBool,
    notify: Notify,
}

/// Cloneable handle used to cancel every request holding it.
#[derive(Debug, Clone, Default)]
pub struct Cancellation {
    state: Arc<CancelState>,
}

impl Cancellation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel. Wakes all waiters exactly once.
    pub fn cancel(&self) {
        if !self.state.cancelled.swap(true, Ordering::SeqCst) {
            self.state.notify.notify_waiters();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let notified = self.state.notify.notified();
        tokio::pin!(notified);
        // Register before checking the flag so a concurrent cancel is not lost.
        notified.as_mut().enable();
        if self.is_cancelled() {
            return;
        }
        notified.await;
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    deadline: Option<Instant>,
    cancellation: Option<Cancellation>,
}

impl RequestContext {
    /// A context that never expires and cannot be cancelled.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    pub fn with_cancellation(mut self, cancellation: Cancellation) -> Self {
        self.cancellation = Some(cancellation);
        self
    }

    /// The error this context has already ended with, if any.
    pub fn err(&self) -> Option<Error> {
        if self.cancellation.as_ref().is_some_and(Cancellation::is_cancelled) {
            return Some(Error::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(Error::DeadlineExceeded),
            _ => None,
        }
    }

    /// Resolves with the reason once the context is cancelled or its deadline passes.
    /// Never resolves for a background context.
    pub async fn done(&self) -> Error {
        let cancelled = async {
            match &self.cancellation {
                Some(c) => c.cancelled().await,
                None => std::future::pending::<()>().await,
            }
        };
        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = cancelled => Error::Cancelled,
            _ = expired => Error::DeadlineExceeded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_context_has_no_error() {
        assert!(RequestContext::background().err().is_none());
    }

    #[test]
    fn cancelled_context_reports_cancelled() {
        let cancel = Cancellation::new();
        let ctx = RequestContext::background().with_cancellation(cancel.clone());
        assert!(ctx.err().is_none());

        cancel.cancel();
        assert!(matches!(ctx.err(), Some(Error::Cancelled)));
    }

    #[tokio::test]
    async fn done_resolves_on_cancel_from_another_task() {
        let cancel = Cancellation::new();
        let ctx = RequestContext::background().with_cancellation(cancel.clone());

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            cancel.cancel();
        });

        let reason = tokio::time::timeout(Duration::from_secs(1), ctx.done())
            .await
            .expect("done should resolve after cancel");
        assert!(matches!(reason, Error::Cancelled));
    }

    #[tokio::test]
    async fn done_resolves_when_deadline_passes() {
        let ctx = RequestContext::background().with_timeout(Duration::from_millis(5));
        let reason = tokio::time::timeout(Duration::from_secs(1), ctx.done())
            .await
            .expect("done should resolve after deadline");
        assert!(matches!(reason, Error::DeadlineExceeded));
        assert!(matches!(ctx.err(), Some(Error::DeadlineExceeded)));
    }

    #[tokio::test]
    async fn cancel_before_wait_is_observed() {
        let cancel = Cancellation::new();
        cancel.cancel();
        tokio::time::timeout(Duration::from_millis(100), cancel.cancelled())
            .await
            .expect("already cancelled handle resolves immediately");
    }
}
