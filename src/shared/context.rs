//! Request execution context
//!
//! Every service operation receives a [`RequestContext`]. Collaborator calls
//! are raced against the context's cancellation signal and deadline, so a
//! cancelled caller never keeps waiting on the hasher or the repository.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::debug;

use crate::domain::{DomainError, DomainResult};

/// Cancellation signal that can be cloned and shared across tasks
#[derive(Clone)]
pub struct CancelSignal {
    sender: broadcast::Sender<()>,
    triggered: Arc<AtomicBool>,
}

impl CancelSignal {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(1);
        Self {
            sender,
            triggered: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered.load(Ordering::SeqCst)
    }

    pub fn trigger(&self) {
        if !self.triggered.swap(true, Ordering::SeqCst) {
            let _ = self.sender.send(());
        }
    }

    /// Resolve once the signal has been triggered.
    pub async fn wait(&self) {
        // Subscribe before checking the flag so a concurrent trigger is not missed.
        let mut rx = self.sender.subscribe();
        if self.is_triggered() {
            return;
        }
        let _ = rx.recv().await;
    }
}

impl Default for CancelSignal {
    fn default() -> Self {
        Self::new()
    }
}

/// Cancellation and deadline carrier for a single request.
///
/// Clones share the same cancellation signal.
#[derive(Clone, Default)]
pub struct RequestContext {
    signal: CancelSignal,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            signal: CancelSignal::new(),
            deadline: Some(deadline),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancel(&self) {
        self.signal.trigger();
    }

    pub fn is_cancelled(&self) -> bool {
        self.signal.is_triggered()
    }

    /// Drive `fut` to completion unless the context is cancelled or its
    /// deadline passes first. In that case `fut` is dropped.
    pub async fn run<F>(&self, fut: F) -> DomainResult<F::Output>
    where
        F: Future,
    {
        if self.is_cancelled() {
            return Err(DomainError::Cancelled);
        }
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Err(DomainError::DeadlineExceeded);
            }
        }

        let expired = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.signal.wait() => {
                debug!("request cancelled while waiting on collaborator");
                Err(DomainError::Cancelled)
            }
            _ = expired => {
                debug!("request deadline exceeded while waiting on collaborator");
                Err(DomainError::DeadlineExceeded)
            }
            out = fut => Ok(out),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_runs_to_completion() {
        let ctx = RequestContext::background();
        let out = ctx.run(async { 42 }).await.unwrap();
        assert_eq!(out, 42);
    }

    #[tokio::test]
    async fn test_cancelled_context_does_not_start_future() {
        let ctx = RequestContext::background();
        ctx.cancel();

        let started = Arc::new(AtomicBool::new(false));
        let flag = started.clone();
        let res = ctx
            .run(async move {
                flag.store(true, Ordering::SeqCst);
            })
            .await;

        assert!(matches!(res, Err(DomainError::Cancelled)));
        assert!(!started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_cancel_interrupts_pending_future() {
        let ctx = RequestContext::background();
        let canceller = ctx.clone();

        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            canceller.cancel();
        });

        let res = ctx.run(std::future::pending::<()>()).await;
        assert!(matches!(res, Err(DomainError::Cancelled)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_interrupts_slow_future() {
        let ctx = RequestContext::with_timeout(Duration::from_secs(1));

        let res = ctx
            .run(tokio::time::sleep(Duration::from_secs(10)))
            .await;

        assert!(matches!(res, Err(DomainError::DeadlineExceeded)));
    }

    #[test]
    fn test_signal_trigger_is_idempotent() {
        let signal = CancelSignal::new();
        signal.trigger();
        signal.trigger();
        assert!(signal.is_triggered());
    }
}
